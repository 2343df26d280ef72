//! InterviewNinja API Library Crate
//!
//! This library contains the HTTP layer for the voice mock-interview
//! service: configuration, request/response models, the axum handlers and
//! router, plus the scraping and code-execution plumbing. The `api`
//! binary is a thin wrapper around this library; all session state and
//! sequencing logic lives in `interview-core`.

pub mod config;
pub mod exec;
pub mod handlers;
pub mod models;
pub mod router;
pub mod scraper;
pub mod state;
