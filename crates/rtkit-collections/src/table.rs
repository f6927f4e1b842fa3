//! Insertion-ordered hash table shared by `Set` and `Map`.
//!
//! Entries live in an append-only arena addressed by position. The hash
//! index maps a key to its arena slot. Deleting a key leaves a
//! tombstone (`None`) so positions held by live cursors stay valid.
//!
//! Positions handed to cursors are *logical*: `offset + slot`. `clear`
//! drops the arena and advances `offset` past it, so a cursor parked in
//! the cleared region resumes at the first entry added afterwards.
//! The table owns every registered cursor's position, so compaction can
//! rewrite them to the slots their next live entries move to.

use std::collections::HashMap;
use std::hash::Hash;

/// Arenas shorter than this are never compacted.
const MIN_COMPACT_LEN: usize = 16;

pub(crate) struct OrderedTable<K, V> {
    entries: Vec<Option<(K, V)>>,
    index: HashMap<K, usize>,
    offset: usize,
    live: usize,
    /// Logical positions of registered cursors, indexed by cursor id.
    cursors: Vec<Option<usize>>,
}

impl<K, V> OrderedTable<K, V>
where
    K: Hash + Eq + Clone,
{
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            offset: 0,
            live: 0,
            cursors: Vec::new(),
        }
    }

    /// Number of live entries.
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.entries[slot].as_ref().map(|(_, v)| v)
    }

    /// Inserts or updates. An existing key keeps its position and its
    /// originally stored key; the previous value is returned.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&slot) = self.index.get(&key)
            && let Some((_, existing)) = self.entries[slot].as_mut()
        {
            return Some(std::mem::replace(existing, value));
        }
        self.maybe_compact();
        let slot = self.entries.len();
        self.index.insert(key.clone(), slot);
        self.entries.push(Some((key, value)));
        self.live += 1;
        None
    }

    /// Turns the entry into a tombstone and hands the removed entry
    /// back, so the caller can drop it after releasing its borrow.
    pub(crate) fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let slot = self.index.remove(key)?;
        let entry = self.entries[slot].take()?;
        self.live -= 1;
        self.maybe_compact();
        Some(entry)
    }

    /// Empties the table. The old arena is returned for the same reason
    /// as in [`remove`](Self::remove): dropping a value may release a
    /// cursor that needs to borrow this table.
    pub(crate) fn clear(&mut self) -> Vec<Option<(K, V)>> {
        let dropped = std::mem::take(&mut self.entries);
        self.offset += dropped.len();
        self.index.clear();
        self.live = 0;
        tracing::trace!(dropped = dropped.len(), offset = self.offset, "cleared ordered table");
        dropped
    }

    /// Registers a cursor at the start of the arena and returns its id.
    pub(crate) fn open_cursor(&mut self) -> usize {
        let start = Some(self.offset);
        match self.cursors.iter().position(Option::is_none) {
            Some(id) => {
                self.cursors[id] = start;
                id
            }
            None => {
                self.cursors.push(start);
                self.cursors.len() - 1
            }
        }
    }

    pub(crate) fn close_cursor(&mut self, id: usize) {
        if let Some(slot) = self.cursors.get_mut(id) {
            *slot = None;
        }
        while let Some(None) = self.cursors.last() {
            self.cursors.pop();
        }
    }

    /// First live entry at or after cursor `id`'s position, advancing the
    /// cursor past it. `None` once the end of the arena is reached or
    /// the cursor is not registered.
    pub(crate) fn next_from(&mut self, id: usize) -> Option<(K, V)>
    where
        V: Clone,
    {
        let mut position = self.cursors.get(id).copied().flatten()?.max(self.offset);
        let mut found = None;
        while let Some(slot) = self.entries.get(position - self.offset) {
            position += 1;
            if let Some((k, v)) = slot {
                found = Some((k.clone(), v.clone()));
                break;
            }
        }
        self.cursors[id] = Some(position);
        found
    }

    /// Live entries in insertion order, without registering a cursor.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries
            .iter()
            .filter_map(|slot| slot.as_ref().map(|(k, v)| (k, v)))
    }

    fn maybe_compact(&mut self) {
        let len = self.entries.len();
        if len < MIN_COMPACT_LEN || self.live * 2 > len {
            return;
        }
        // moved[slot] is the compacted slot of the first live entry at or
        // after `slot`.
        let mut moved = Vec::with_capacity(len + 1);
        let mut kept = 0;
        for entry in &self.entries {
            moved.push(kept);
            kept += usize::from(entry.is_some());
        }
        moved.push(kept);
        for position in self.cursors.iter_mut().flatten() {
            let slot = position.saturating_sub(self.offset).min(len);
            *position = self.offset + moved[slot];
        }
        self.entries.retain(Option::is_some);
        self.index.clear();
        for (slot, entry) in self.entries.iter().enumerate() {
            if let Some((k, _)) = entry {
                self.index.insert(k.clone(), slot);
            }
        }
        tracing::trace!(
            before = len,
            after = self.entries.len(),
            cursors = self.cursors.iter().flatten().count(),
            "compacted ordered table"
        );
    }

    #[cfg(test)]
    pub(crate) fn arena_len(&self) -> usize {
        self.entries.len()
    }
}
