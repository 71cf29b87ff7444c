use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{ErrorResponse, HealthResponse, MessageResponse, NoteRequest},
    models::Note,
    service::{NoteService, ServiceError},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        get_all_notes,
        get_one_note,
        create_note,
        update_note,
        delete_note
    ),
    components(schemas(
        Note,
        NoteRequest,
        HealthResponse,
        MessageResponse,
        ErrorResponse
    )),
    servers((url = "/api")),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Map a service error onto a status code. Store errors are logged here and
/// reported to the caller only as `failure`.
fn error_response(err: ServiceError, failure: &'static str) -> Response {
    match err {
        ServiceError::Validation(e) => json_error(StatusCode::BAD_REQUEST, e.to_string()),
        ServiceError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "Note not found"),
        ServiceError::Store(e) => {
            tracing::error!("{}: {}", failure, e);
            json_error(StatusCode::INTERNAL_SERVER_ERROR, failure)
        }
    }
}

fn bad_body(rejection: &JsonRejection) -> Response {
    tracing::debug!("rejected request body: {}", rejection);
    json_error(StatusCode::BAD_REQUEST, "Invalid JSON body")
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn health() -> Response {
    (StatusCode::OK, Json(HealthResponse::ok())).into_response()
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "All notes, newest first", body = Vec<Note>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(State(service): State<Arc<NoteService>>) -> Response {
    match service.list_notes().await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => error_response(e, "Failed to fetch notes"),
    }
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = Note),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<i64>,
) -> Response {
    match service.get_note(id).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => error_response(e, "Failed to fetch note"),
    }
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = NoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = Note),
        (status = 400, description = "Title missing or empty", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_body(&rejection),
    };

    match service.create_note(payload).await {
        Ok(note) => (StatusCode::CREATED, Json(note)).into_response(),
        Err(e) => error_response(e, "Failed to create note"),
    }
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = NoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = Note),
        (status = 400, description = "Title missing or empty", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<i64>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_body(&rejection),
    };

    match service.update_note(id, payload).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => error_response(e, "Failed to update note"),
    }
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = MessageResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(State(service): State<Arc<NoteService>>, Path(id): Path<i64>) -> Response {
    match service.delete_note(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Note deleted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e, "Failed to delete note"),
    }
}
