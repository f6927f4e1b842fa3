//! Optional TOML configuration.
//!
//! ```toml
//! [random]
//! seed = 42
//!
//! [output]
//! pretty = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable consulted when `--config` is absent.
pub const CONFIG_ENV: &str = "RTKIT_CONFIG";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub random: RandomConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RandomConfig {
    /// Reseeds the process-wide generator before any command runs.
    pub seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Pretty-print JSON reports.
    pub pretty: bool,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// `--config` wins over the environment; neither means defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections_default() {
        let config: Config = toml::from_str("[random]\nseed = 7\n").unwrap();
        assert_eq!(config.random.seed, Some(7));
        assert!(!config.output.pretty);

        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.random.seed, None);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(toml::from_str::<Config>("[random]\nsed = 1\n").is_err());
    }
}
