//! HTTP client for the notes API and the local state a UI keeps on top
//! of it.

mod board;

pub use board::{NoteBoard, NoteForm};

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    dto::{ErrorResponse, HealthResponse, MessageResponse, NoteRequest},
    models::Note,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded {status}: {message}")]
    Status { status: StatusCode, message: String },
}

impl ClientError {
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` includes the API prefix, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string(),
        };

        Err(ClientError::Status { status, message })
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        Self::send(self.http.get(self.url("/health"))).await
    }

    pub async fn list_notes(&self) -> Result<Vec<Note>, ClientError> {
        Self::send(self.http.get(self.url("/notes"))).await
    }

    pub async fn get_note(&self, id: i64) -> Result<Note, ClientError> {
        Self::send(self.http.get(self.url(&format!("/notes/{id}")))).await
    }

    pub async fn create_note(&self, request: &NoteRequest) -> Result<Note, ClientError> {
        Self::send(self.http.post(self.url("/notes")).json(request)).await
    }

    pub async fn update_note(&self, id: i64, request: &NoteRequest) -> Result<Note, ClientError> {
        Self::send(self.http.put(self.url(&format!("/notes/{id}"))).json(request)).await
    }

    pub async fn delete_note(&self, id: i64) -> Result<MessageResponse, ClientError> {
        Self::send(self.http.delete(self.url(&format!("/notes/{id}")))).await
    }
}
