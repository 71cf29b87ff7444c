//! Persistence for notes.
//!
//! Handlers never talk to a backend directly: they go through the
//! [`NoteStore`] trait, so the PostgreSQL store can be swapped for the
//! in-memory one in tests or local runs.

mod embedded;
mod memory;
mod postgres;

use async_trait::async_trait;

use crate::models::{NewNote, Note};

pub use memory::MemoryNoteStore;
pub use postgres::{PgNoteStore, migrate};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to acquire database connection: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("database query failed: {0}")]
    Query(#[from] tokio_postgres::Error),

    #[error("failed to build connection pool: {0}")]
    Build(#[from] deadpool_postgres::BuildError),

    #[error("failed to run migrations: {0}")]
    Migration(#[from] refinery::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes, newest first.
    async fn list(&self) -> Result<Vec<Note>, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<Note>, StoreError>;

    /// Persist a note; the store assigns `id` and `created_at`.
    async fn insert(&self, note: NewNote) -> Result<Note, StoreError>;

    /// Replace title and content of an existing note.
    /// Returns `None` when no row has this id.
    async fn update(&self, id: i64, note: NewNote) -> Result<Option<Note>, StoreError>;

    /// Returns whether a row existed and was removed.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
