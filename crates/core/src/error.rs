//! Error taxonomy for the primary conversation path.
//!
//! Synthesis failures never appear here: they are absorbed at the
//! orchestrator's degradation boundary and reported as absent audio.
//! Configuration errors (unknown category/tone/verbosity) cannot reach the
//! core at all (the configuration enums make them unrepresentable) and
//! survive only at the env-config boundary in the service crate.

use crate::llm::GenerationError;
use uuid::Uuid;

/// Errors surfaced by the session orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    /// The session id is not in the live store. Never retried.
    #[error("session '{0}' not found")]
    NotFound(Uuid),
    /// The text-generation collaborator failed. The candidate's turn is
    /// retained; retrying is a caller decision.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}
