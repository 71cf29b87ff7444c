use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::{NoTls, Row};

use super::{NoteStore, StoreError, embedded::migrations};
use crate::{
    config::Config,
    models::{NewNote, Note},
};

use async_trait::async_trait;

const NOTE_COLUMNS: &str = "id, title, content, created_at";

/// PostgreSQL-backed store over a bounded connection pool.
///
/// The pool has no wait timeout: when every connection is checked out,
/// callers queue in FIFO order until one is returned.
#[derive(Clone)]
pub struct PgNoteStore {
    pool: Pool,
}

impl PgNoteStore {
    pub fn new(cfg: &Config) -> Result<Self, StoreError> {
        let manager = Manager::from_config(
            cfg.pg_config(),
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );

        let pool = Pool::builder(manager)
            .max_size(cfg.db_pool_size)
            .build()?;

        Ok(Self { pool })
    }
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn list(&self) -> Result<Vec<Note>, StoreError> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached(&format!(
                "SELECT {NOTE_COLUMNS} FROM notes ORDER BY created_at DESC, id DESC"
            ))
            .await?;
        let rows = client.query(&stmt, &[]).await?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Note>, StoreError> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached(&format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1"))
            .await?;
        let row = client.query_opt(&stmt, &[&id]).await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn insert(&self, note: NewNote) -> Result<Note, StoreError> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached(&format!(
                "INSERT INTO notes (title, content) VALUES ($1, $2) RETURNING {NOTE_COLUMNS}"
            ))
            .await?;
        let row = client
            .query_one(&stmt, &[&note.title, &note.content])
            .await?;

        Ok(note_from_row(&row))
    }

    async fn update(&self, id: i64, note: NewNote) -> Result<Option<Note>, StoreError> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached(&format!(
                "UPDATE notes SET title = $1, content = $2 WHERE id = $3 RETURNING {NOTE_COLUMNS}"
            ))
            .await?;
        let row = client
            .query_opt(&stmt, &[&note.title, &note.content, &id])
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let client = self.pool.get().await?;
        let stmt = client
            .prepare_cached("DELETE FROM notes WHERE id = $1")
            .await?;
        let rows = client.execute(&stmt, &[&id]).await?;

        Ok(rows == 1)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let client = self.pool.get().await?;
        client.simple_query("SELECT 1").await?;
        Ok(())
    }
}

/// Apply the embedded schema migrations over a dedicated connection.
pub async fn migrate(cfg: &Config) -> Result<(), StoreError> {
    let (mut client, con) = cfg.pg_config().connect(NoTls).await?;

    tokio::spawn(async move {
        if let Err(e) = con.await {
            tracing::error!("migration connection error: {}", e);
        }
    });

    let migrations_report = migrations::runner().run_async(&mut client).await?;

    for migration in migrations_report.applied_migrations() {
        tracing::info!(
            "Migration Applied -  Name: {}, Version: {}",
            migration.name(),
            migration.version()
        );
    }

    tracing::info!("DB migrations finished!");

    Ok(())
}
