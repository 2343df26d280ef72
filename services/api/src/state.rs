//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds all shared,
//! clonable resources like the orchestrator, the archive, and service
//! clients.

use crate::config::Config;
use interview_core::{
    archive::SessionArchive, llm::CompletionClient, orchestrator::Orchestrator,
    speech::SpeechSynthesizer,
};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
/// All fields are public to be accessible from other modules.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub archive: Arc<SessionArchive>,
    pub llm: Arc<dyn CompletionClient>,
    /// `None` when no synthesis credentials were configured.
    pub speech: Option<Arc<dyn SpeechSynthesizer>>,
    pub config: Arc<Config>,
    /// Shared HTTP client for the scraping and code-execution proxies.
    pub http: reqwest::Client,
}
