use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::cursor::{Cursor, SharedTable};
use crate::table::OrderedTable;

/// Insertion-ordered key to value map.
///
/// Like [`Set`](crate::Set), a `Map` is a shared handle whose methods
/// take `&self`. Values are returned by clone; store `Rc`s or other
/// handles when cloning is expensive.
pub struct Map<K, V>
where
    K: Hash + Eq + Clone,
{
    table: SharedTable<K, V>,
}

impl<K, V> Map<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
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

    pub fn get(&self, key: &K) -> Option<V> {
        self.table.borrow().get(key).cloned()
    }

    /// Inserts or updates `key`. An existing key keeps its position;
    /// its previous value is returned.
    pub fn set(&self, key: K, value: V) -> Option<V> {
        self.table.borrow_mut().insert(key, value)
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

    pub fn size(&self) -> usize {
        self.table.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Calls `f(value, key, map)` for each entry in insertion order.
    ///
    /// Same live-walk rules as [`Set::for_each`](crate::Set::for_each).
    /// Updating the value of a key not yet visited is observed when the
    /// walk reaches it.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&V, &K, &Map<K, V>),
    {
        let mut cursor = Cursor::new(&self.table);
        while let Some((key, value)) = cursor.next_entry() {
            f(&value, &key, self);
        }
    }

    pub fn try_for_each<E, F>(&self, mut f: F) -> Result<(), E>
    where
        F: FnMut(&V, &K, &Map<K, V>) -> Result<(), E>,
    {
        let mut cursor = Cursor::new(&self.table);
        while let Some((key, value)) = cursor.next_entry() {
            f(&value, &key, self)?;
        }
        Ok(())
    }

    pub fn entries(&self) -> Entries<K, V> {
        Entries {
            cursor: Cursor::new(&self.table),
        }
    }

    pub fn keys(&self) -> Keys<K, V> {
        Keys {
            cursor: Cursor::new(&self.table),
        }
    }

    pub fn values(&self) -> Values<K, V> {
        Values {
            cursor: Cursor::new(&self.table),
        }
    }

    /// `Extend` through a shared handle.
    pub fn extend<I: IntoIterator<Item = (K, V)>>(&self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.table, &other.table)
    }

    pub(crate) fn cursor(&self) -> Cursor<K, V> {
        Cursor::new(&self.table)
    }
}

impl<K, V> Clone for Map<K, V>
where
    K: Hash + Eq + Clone,
{
    fn clone(&self) -> Self {
        Self {
            table: Rc::clone(&self.table),
        }
    }
}

impl<K, V> Default for Map<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Map<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.borrow();
        f.debug_map().entries(table.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Map<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = Map::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for Map<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        Map::extend(self, iter);
    }
}

impl<K, V> IntoIterator for &Map<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    type Item = (K, V);
    type IntoIter = Entries<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

/// Live iterator over a [`Map`]'s `(key, value)` pairs.
pub struct Entries<K, V>
where
    K: Hash + Eq + Clone,
{
    cursor: Cursor<K, V>,
}

impl<K, V> Iterator for Entries<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.cursor.next_entry()
    }
}

pub struct Keys<K, V>
where
    K: Hash + Eq + Clone,
{
    cursor: Cursor<K, V>,
}

impl<K, V> Iterator for Keys<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.cursor.next_entry().map(|(k, _)| k)
    }
}

pub struct Values<K, V>
where
    K: Hash + Eq + Clone,
{
    cursor: Cursor<K, V>,
}

impl<K, V> Iterator for Values<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.cursor.next_entry().map(|(_, v)| v)
    }
}
