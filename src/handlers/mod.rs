pub mod rest;

use axum::{Json, Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use std::sync::Arc;

use crate::service::NoteService;

/// Prefix every REST route is mounted under.
pub const API_PREFIX: &str = "/api";

/// Build the full HTTP application around an already constructed service.
pub fn router(service: Arc<NoteService>) -> Router {
    let api = Router::new()
        .route("/health", get(rest::health))
        .route("/notes", get(rest::get_all_notes).post(rest::create_note))
        .route(
            "/notes/{id}",
            get(rest::get_one_note)
                .put(rest::update_note)
                .delete(rest::delete_note),
        )
        .route(
            "/api-doc/openapi.json",
            get(|| async { Json(rest::ApiDoc::openapi()) }),
        )
        .with_state(service);

    Router::new()
        .nest(API_PREFIX, api)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
