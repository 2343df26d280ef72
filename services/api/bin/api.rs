//! Main Entrypoint for the InterviewNinja API Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Initializing logging.
//! 3. Initializing shared services (completion client, speech client,
//!    orchestrator, archive).
//! 4. Constructing the Axum router and applying middleware.
//! 5. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use interview_api::{config::Config, router::create_router, state::AppState};
use interview_core::{
    archive::SessionArchive,
    llm::{CompletionClient, OpenAiCompletionClient},
    orchestrator::Orchestrator,
    speech::{ElevenLabsClient, SpeechSynthesizer},
    store::SessionStore,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Received shutdown signal. Shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing application state...");

    // --- 3. Initialize Shared Services ---
    let llm: Arc<dyn CompletionClient> = Arc::new(OpenAiCompletionClient::new(
        &config.openai_api_key,
        config.openai_api_base.as_deref(),
        config.chat_model.clone(),
    ));

    let speech: Option<Arc<dyn SpeechSynthesizer>> = match &config.elevenlabs_api_key {
        Some(api_key) => Some(Arc::new(ElevenLabsClient::new(api_key))),
        None => {
            info!("ELEVENLABS_API_KEY not set; sessions will run text-only with a client-side fallback.");
            None
        }
    };

    let orchestrator = Arc::new(Orchestrator::new(
        SessionStore::new(),
        llm.clone(),
        speech.clone(),
    ));
    let archive = Arc::new(
        SessionArchive::new(config.sessions_dir.clone())
            .context("Failed to initialize session archive")?,
    );

    let app_state = Arc::new(AppState {
        orchestrator,
        archive,
        llm,
        speech,
        config: Arc::new(config.clone()),
        http: reqwest::Client::new(),
    });

    // --- 4. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state).layer(cors);

    // --- 5. Start Server ---
    info!(
        model = %config.chat_model,
        bind_address = %config.bind_address,
        speech_enabled = config.elevenlabs_api_key.is_some(),
        "Service configured. Starting server..."
    );
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server has shut down.");
    Ok(())
}
