use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{NoteStore, StoreError};
use crate::models::{NewNote, Note};

/// Process-local store with the same ordering rules as the SQL one.
///
/// It can be switched offline to simulate a lost database connection.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    inner: Mutex<Inner>,
    offline: AtomicBool,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    notes: BTreeMap<i64, Note>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every operation fails with [`StoreError::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.notes.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store is offline".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn list(&self) -> Result<Vec<Note>, StoreError> {
        self.check_online()?;
        let inner = self.inner.lock().await;

        let mut notes: Vec<Note> = inner.notes.values().cloned().collect();
        notes.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(notes)
    }

    async fn get(&self, id: i64) -> Result<Option<Note>, StoreError> {
        self.check_online()?;
        Ok(self.inner.lock().await.notes.get(&id).cloned())
    }

    async fn insert(&self, note: NewNote) -> Result<Note, StoreError> {
        self.check_online()?;
        let mut inner = self.inner.lock().await;

        inner.last_id += 1;
        let note = Note {
            id: inner.last_id,
            title: note.title,
            content: note.content,
            created_at: Utc::now(),
        };
        inner.notes.insert(note.id, note.clone());

        Ok(note)
    }

    async fn update(&self, id: i64, note: NewNote) -> Result<Option<Note>, StoreError> {
        self.check_online()?;
        let mut inner = self.inner.lock().await;

        Ok(inner.notes.get_mut(&id).map(|existing| {
            existing.title = note.title;
            existing.content = note.content;
            existing.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.check_online()?;
        Ok(self.inner.lock().await.notes.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_note(title: &str, content: &str) -> NewNote {
        NewNote {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let store = MemoryNoteStore::new();
        let a = store.insert(new_note("a", "")).await.unwrap();
        let b = store.insert(new_note("b", "")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(a.created_at <= b.created_at);
    }

    #[tokio::test]
    async fn insert_then_get_returns_same_fields() {
        let store = MemoryNoteStore::new();
        let created = store.insert(new_note("title", "body")).await.unwrap();

        let fetched = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(fetched.created_at <= Utc::now());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = MemoryNoteStore::new();
        for title in ["first", "second", "third"] {
            store.insert(new_note(title, "")).await.unwrap();
        }

        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, ["third", "second", "first"]);
    }

    #[tokio::test]
    async fn list_on_empty_store_is_empty() {
        let store = MemoryNoteStore::new();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_created_at() {
        let store = MemoryNoteStore::new();
        let created = store.insert(new_note("old", "x")).await.unwrap();

        let updated = store
            .update(created.id, new_note("new", "y"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "new");
        assert_eq!(updated.content, "y");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn update_missing_leaves_table_unchanged() {
        let store = MemoryNoteStore::new();
        store.insert(new_note("only", "")).await.unwrap();

        let updated = store.update(42, new_note("nope", "")).await.unwrap();
        assert!(updated.is_none());
        assert_eq!(store.len().await, 1);
        assert!(store.get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_row_existed() {
        let store = MemoryNoteStore::new();
        let created = store.insert(new_note("gone", "")).await.unwrap();

        assert!(!store.delete(created.id + 1).await.unwrap());
        assert!(store.delete(created.id).await.unwrap());
        assert!(store.get(created.id).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryNoteStore::new();
        let first = store.insert(new_note("a", "")).await.unwrap();
        store.delete(first.id).await.unwrap();

        let second = store.insert(new_note("b", "")).await.unwrap();
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn offline_store_fails_every_operation() {
        let store = MemoryNoteStore::new();
        store.set_offline(true);

        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));
        assert!(store.list().await.is_err());
        assert!(store.insert(new_note("a", "")).await.is_err());

        store.set_offline(false);
        assert!(store.ping().await.is_ok());
    }
}
