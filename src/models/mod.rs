use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted note, exactly as the store returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Note {
    /// Note ID, assigned by the store
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note content, empty when none was given
    pub content: String,
    /// Insertion time
    pub created_at: DateTime<Utc>,
}

/// Validated fields for an insert or a full replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}
