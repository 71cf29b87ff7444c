use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /notes` and `PUT /notes/{id}`.
///
/// Both fields are optional on the wire so that a missing title is reported
/// as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NoteRequest {
    /// Note title, required and non-blank
    #[serde(default)]
    pub title: Option<String>,
    /// Note content, defaults to an empty string
    #[serde(default)]
    pub content: Option<String>,
}

impl NoteRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Backend is running".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
