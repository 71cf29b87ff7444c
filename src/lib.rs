//! Note-taking REST API.
//!
//! A single `notes` table exposed over `/api/notes`, with the store
//! injected into the HTTP layer through [`repository::NoteStore`] and a
//! typed [`client`] for consumers.

pub mod client;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod models;
pub mod readiness;
pub mod repository;
pub mod service;
