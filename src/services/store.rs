//! In-memory record store
//!
//! One store per entity type. Readers take a cloned snapshot so a query
//! always runs against a single consistent view of the collection.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::types::Record;

/// Thread-safe collection of records keyed by `Record::id`.
#[derive(Debug)]
pub struct RecordStore<T> {
    records: RwLock<Vec<T>>,
}

impl<T: Record> RecordStore<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    // No writer leaves the Vec half-updated; recover from poisoning.
    fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<T>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clone the current contents.
    pub fn snapshot(&self) -> Vec<T> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.read().iter().find(|r| r.id() == id).cloned()
    }

    /// Append a record and return a copy of it.
    pub fn insert(&self, record: T) -> T {
        debug!("Inserting {} {}", T::ENTITY, record.id());
        self.write().push(record.clone());
        record
    }

    /// Mutate a record in place. Returns the updated record, or `None`
    /// when no record has that id.
    pub fn update<F>(&self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut records = self.write();
        let record = records.iter_mut().find(|r| r.id() == id)?;
        f(record);
        debug!("Updated {} {}", T::ENTITY, id);
        Some(record.clone())
    }

    /// Remove a record, returning it if it existed.
    pub fn remove(&self, id: &str) -> Option<T> {
        let mut records = self.write();
        let index = records.iter().position(|r| r.id() == id)?;
        debug!("Removed {} {}", T::ENTITY, id);
        Some(records.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Notification, NotificationKind};
    use chrono::Utc;

    fn note(id: &str) -> Notification {
        Notification {
            id: id.to_string(),
            title: format!("Title {}", id),
            message: "Body".to_string(),
            kind: NotificationKind::Info,
            read: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let store = RecordStore::new(vec![note("n1")]);
        store.insert(note("n2"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("n2").unwrap().title, "Title n2");
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_update() {
        let store = RecordStore::new(vec![note("n1")]);
        let updated = store.update("n1", |n| n.read = true).unwrap();

        assert!(updated.read);
        assert!(store.get("n1").unwrap().read);
        assert!(store.update("nope", |n| n.read = true).is_none());
    }

    #[test]
    fn test_remove_preserves_order() {
        let store = RecordStore::new(vec![note("a"), note("b"), note("c")]);
        assert!(store.remove("b").is_some());
        assert!(store.remove("b").is_none());

        let ids: Vec<_> = store.snapshot().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = RecordStore::new(vec![note("a")]);
        let snapshot = store.snapshot();
        store.insert(note("b"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len(), 2);
    }
}
