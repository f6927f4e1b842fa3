//! The runtime's `Math.random` generator.
//!
//! Two independent 16-bit multiply-with-carry lanes, each kept in a
//! `u32` (low half: value, high half: carry). One step of each lane is
//! combined into 32 output bits and scaled into `[0, 1)`.

use std::sync::{LazyLock, Mutex, PoisonError};

use rand::{RngCore, SeedableRng};

const LANE0_MULTIPLIER: u32 = 18273;
const LANE1_MULTIPLIER: u32 = 36969;

/// `2^-32`.
const TWO_POW_MINUS_32: f64 = 2.328_306_436_538_696_3e-10;

/// Replacement seeds for lanes that would never move.
const FALLBACK_SEED: [u32; 2] = [0x9E37_79B9, 0x7F4A_7C15];

/// Multiply-with-carry generator producing doubles in `[0, 1)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MathRandom {
    state: [u32; 2],
}

impl MathRandom {
    /// Lanes seeded at a fixed point of their recurrence (zero, and
    /// `0x4760_FFFF` / `0x9068_FFFF`) are replaced.
    pub fn new(lane0: u32, lane1: u32) -> Self {
        let lane0 = non_degenerate(LANE0_MULTIPLIER, lane0, FALLBACK_SEED[0]);
        let lane1 = non_degenerate(LANE1_MULTIPLIER, lane1, FALLBACK_SEED[1]);
        Self {
            state: [lane0, lane1],
        }
    }

    /// Current lane states.
    pub fn state(&self) -> [u32; 2] {
        self.state
    }

    /// Advances both lanes and returns the combined 32 bits.
    pub fn step(&mut self) -> u32 {
        let [s0, s1] = self.state;
        let r0 = lane_step(LANE0_MULTIPLIER, s0);
        let r1 = lane_step(LANE1_MULTIPLIER, s1);
        self.state = [r0, r1];
        (r0 << 16).wrapping_add(r1 & 0xFFFF)
    }

    /// Next double in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.step()) * TWO_POW_MINUS_32
    }
}

fn lane_step(multiplier: u32, lane: u32) -> u32 {
    multiplier
        .wrapping_mul(lane & 0xFFFF)
        .wrapping_add(lane >> 16)
}

fn non_degenerate(multiplier: u32, lane: u32, fallback: u32) -> u32 {
    if lane_step(multiplier, lane) == lane {
        fallback
    } else {
        lane
    }
}

impl RngCore for MathRandom {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.step());
        let lo = u64::from(self.step());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for MathRandom {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        let lane0 = u32::from_le_bytes([seed[0], seed[1], seed[2], seed[3]]);
        let lane1 = u32::from_le_bytes([seed[4], seed[5], seed[6], seed[7]]);
        Self::new(lane0, lane1)
    }
}

/// Process-wide generator, seeded from OS entropy on first use.
static GLOBAL: LazyLock<Mutex<MathRandom>> = LazyLock::new(|| {
    let rng = MathRandom::from_os_rng();
    tracing::debug!("seeded process-wide random state from OS entropy");
    Mutex::new(rng)
});

/// Next value of the process-wide generator, in `[0, 1)`.
pub fn random() -> f64 {
    GLOBAL
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .next_f64()
}

/// Replaces the process-wide state with one derived from `seed`, making
/// subsequent [`random`] calls reproducible.
pub fn seed_random(seed: u64) {
    let rng = MathRandom::seed_from_u64(seed);
    tracing::debug!(seed, state = ?rng.state(), "reseeded process-wide random state");
    *GLOBAL.lock().unwrap_or_else(PoisonError::into_inner) = rng;
}
