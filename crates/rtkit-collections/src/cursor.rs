//! Live iteration over a shared [`OrderedTable`].
//!
//! A cursor walks the table's arena by position instead of copying it;
//! the table keeps that position under the cursor's id so compaction can
//! move it. Entries appended before the cursor reaches them are visited,
//! entries deleted before it reaches them are skipped. Each step borrows the
//! table only for the duration of the lookup, so the caller may mutate
//! the collection between steps.
//!
//! ```text
//! Active(position) --next, live entry found--> Active(position')
//! Active(position) --next, end of arena-----> Exhausted
//! Exhausted        --next-------------------> Exhausted
//! ```

use std::cell::RefCell;
use std::hash::Hash;
use std::rc::Rc;

use crate::table::OrderedTable;

pub(crate) type SharedTable<K, V> = Rc<RefCell<OrderedTable<K, V>>>;

enum CursorState<K, V> {
    Active {
        table: SharedTable<K, V>,
        id: usize,
    },
    Exhausted,
}

pub(crate) struct Cursor<K, V>
where
    K: Hash + Eq + Clone,
{
    state: CursorState<K, V>,
}

impl<K, V> Cursor<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    pub(crate) fn new(table: &SharedTable<K, V>) -> Self {
        let id = table.borrow_mut().open_cursor();
        Self {
            state: CursorState::Active {
                table: Rc::clone(table),
                id,
            },
        }
    }

    pub(crate) fn next_entry(&mut self) -> Option<(K, V)> {
        let CursorState::Active { table, id } = &self.state else {
            return None;
        };
        let entry = table.borrow_mut().next_from(*id);
        if entry.is_none() {
            self.finish();
        }
        entry
    }

    #[cfg(test)]
    pub(crate) fn is_exhausted(&self) -> bool {
        matches!(self.state, CursorState::Exhausted)
    }
}

impl<K, V> Cursor<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Releases the table registration and the table reference.
    fn finish(&mut self) {
        if let CursorState::Active { table, id } =
            std::mem::replace(&mut self.state, CursorState::Exhausted)
        {
            table.borrow_mut().close_cursor(id);
        }
    }
}

impl<K, V> Drop for Cursor<K, V>
where
    K: Hash + Eq + Clone,
{
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared(keys: &[i32]) -> SharedTable<i32, ()> {
        let mut t = OrderedTable::new();
        for &k in keys {
            t.insert(k, ());
        }
        Rc::new(RefCell::new(t))
    }

    #[test]
    fn test_exhausted_is_terminal() {
        let table = shared(&[1]);
        let mut cursor = Cursor::new(&table);
        assert_eq!(cursor.next_entry(), Some((1, ())));
        assert_eq!(cursor.next_entry(), None);
        assert!(cursor.is_exhausted());
        table.borrow_mut().insert(2, ());
        assert_eq!(cursor.next_entry(), None);
    }

    #[test]
    fn test_sees_appends_made_between_steps() {
        let table = shared(&[1, 2]);
        let mut cursor = Cursor::new(&table);
        assert_eq!(cursor.next_entry(), Some((1, ())));
        table.borrow_mut().insert(3, ());
        table.borrow_mut().remove(&2);
        assert_eq!(cursor.next_entry(), Some((3, ())));
        assert_eq!(cursor.next_entry(), None);
    }

    #[test]
    fn test_parked_cursor_resumes_after_compaction() {
        let table = shared(&[1, 2]);
        let mut cursor = Cursor::new(&table);
        assert_eq!(cursor.next_entry(), Some((1, ())));
        for k in 100..100_100 {
            table.borrow_mut().insert(k, ());
            table.borrow_mut().remove(&k);
        }
        assert!(table.borrow().arena_len() < 100);
        table.borrow_mut().insert(3, ());
        assert_eq!(cursor.next_entry(), Some((2, ())));
        assert_eq!(cursor.next_entry(), Some((3, ())));
        assert_eq!(cursor.next_entry(), None);
    }

    #[test]
    fn test_releases_table_when_done_or_dropped() {
        let table = shared(&[1]);
        let mut cursor = Cursor::new(&table);
        assert_eq!(Rc::strong_count(&table), 2);
        cursor.next_entry();
        cursor.next_entry();
        assert_eq!(Rc::strong_count(&table), 1);

        let cursor = Cursor::new(&table);
        assert_eq!(Rc::strong_count(&table), 2);
        drop(cursor);
        assert_eq!(Rc::strong_count(&table), 1);
    }
}
