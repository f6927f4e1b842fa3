use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::cursor::{Cursor, SharedTable};
use crate::table::OrderedTable;

/// Insertion-ordered set of unique keys.
///
/// `Set` is a handle: clones share the same storage, like two
/// references to one runtime object. All methods take `&self`, so a
/// `for_each` callback may add, delete or clear while the walk is in
/// progress; see [`Set::for_each`] for what it then observes.
pub struct Set<K>
where
    K: Hash + Eq + Clone,
{
    table: SharedTable<K, ()>,
}

impl<K> Set<K>
where
    K: Hash + Eq + Clone,
{
    pub fn new() -> Self {
        Self {
            table: Rc::new(RefCell::new(OrderedTable::new())),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: Rc::new(RefCell::new(OrderedTable::with_capacity(capacity))),
        }
    }

    /// Adds `key` if absent. Returns `true` if it was newly inserted;
    /// an existing key keeps its position.
    pub fn add(&self, key: K) -> bool {
        self.table.borrow_mut().insert(key, ()).is_none()
    }

    pub fn has(&self, key: &K) -> bool {
        self.table.borrow().contains(key)
    }

    /// Removes `key`. Returns whether a live entry existed.
    pub fn delete(&self, key: &K) -> bool {
        let removed = self.table.borrow_mut().remove(key);
        removed.is_some()
    }

    pub fn clear(&self) {
        let dropped = self.table.borrow_mut().clear();
        drop(dropped);
    }

    /// Number of live keys.
    pub fn size(&self) -> usize {
        self.table.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Calls `f(value, key, set)` for each key in insertion order, with
    /// `value == key`.
    ///
    /// The walk is live: keys added during the walk are visited, keys
    /// deleted before the walk reaches them are skipped, and no key is
    /// visited twice unless it was deleted and re-added.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &K, &Set<K>),
    {
        let mut cursor = Cursor::new(&self.table);
        while let Some((key, ())) = cursor.next_entry() {
            f(&key, &key, self);
        }
    }

    /// Like [`for_each`](Self::for_each), stopping at the first error.
    pub fn try_for_each<E, F>(&self, mut f: F) -> Result<(), E>
    where
        F: FnMut(&K, &K, &Set<K>) -> Result<(), E>,
    {
        let mut cursor = Cursor::new(&self.table);
        while let Some((key, ())) = cursor.next_entry() {
            f(&key, &key, self)?;
        }
        Ok(())
    }

    /// Live iterator over the keys.
    pub fn values(&self) -> Values<K> {
        Values {
            cursor: Cursor::new(&self.table),
        }
    }

    /// Same as [`values`](Self::values).
    pub fn keys(&self) -> Values<K> {
        self.values()
    }

    /// Live iterator over `(key, key)` pairs.
    pub fn entries(&self) -> Entries<K> {
        Entries {
            cursor: Cursor::new(&self.table),
        }
    }

    /// Whether both handles refer to the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.table, &other.table)
    }

    pub(crate) fn cursor(&self) -> Cursor<K, ()> {
        Cursor::new(&self.table)
    }
}

impl<K> Clone for Set<K>
where
    K: Hash + Eq + Clone,
{
    fn clone(&self) -> Self {
        Self {
            table: Rc::clone(&self.table),
        }
    }
}

impl<K> Default for Set<K>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Set<K>
where
    K: Hash + Eq + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.borrow();
        f.debug_set().entries(table.iter().map(|(k, _)| k)).finish()
    }
}

impl<K> FromIterator<K> for Set<K>
where
    K: Hash + Eq + Clone,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let set = Set::new();
        set.extend(iter);
        set
    }
}

impl<K> Extend<K> for Set<K>
where
    K: Hash + Eq + Clone,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        Set::extend(self, iter);
    }
}

impl<K> Set<K>
where
    K: Hash + Eq + Clone,
{
    /// `Extend` through a shared handle.
    pub fn extend<I: IntoIterator<Item = K>>(&self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<K> IntoIterator for &Set<K>
where
    K: Hash + Eq + Clone,
{
    type Item = K;
    type IntoIter = Values<K>;

    fn into_iter(self) -> Self::IntoIter {
        self.values()
    }
}

/// Live iterator over a [`Set`]'s keys.
pub struct Values<K>
where
    K: Hash + Eq + Clone,
{
    cursor: Cursor<K, ()>,
}

impl<K> Iterator for Values<K>
where
    K: Hash + Eq + Clone,
{
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.cursor.next_entry().map(|(k, ())| k)
    }
}

/// Live iterator over a [`Set`]'s `(key, key)` pairs.
pub struct Entries<K>
where
    K: Hash + Eq + Clone,
{
    cursor: Cursor<K, ()>,
}

impl<K> Iterator for Entries<K>
where
    K: Hash + Eq + Clone,
{
    type Item = (K, K);

    fn next(&mut self) -> Option<(K, K)> {
        self.cursor.next_entry().map(|(k, ())| (k.clone(), k))
    }
}
