//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the REST API and OpenAPI documentation.

use crate::{
    exec, handlers,
    models::{
        AnalysisResponse, AnalyzeSessionPayload, ArchiveSummaryView, ArchivedSessionView,
        EndSessionResponse, ErrorResponse, ExecuteCodePayload, ExecuteCodeResponse,
        ExtractedProblem, ListSessionsResponse, PreviewResponse, ProblemSource, RespondPayload,
        RespondResponse, RuntimeView, RuntimesResponse, SaveSessionPayload, SaveSessionResponse,
        ScrapePayload, ScrapeResponse, SessionView, StartSessionPayload, StartSessionResponse,
        TtsPayload, TurnView,
    },
    scraper,
    state::AppState,
};

use axum::{
    Router,
    response::Json,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::start_session,
        handlers::respond,
        handlers::text_to_speech,
        handlers::get_session,
        handlers::end_session,
        handlers::save_session,
        handlers::list_saved_sessions,
        handlers::get_saved_session,
        handlers::delete_saved_session,
        handlers::analyze_session,
        scraper::extract_problems,
        scraper::preview_url,
        exec::execute_code,
        exec::list_runtimes,
    ),
    components(
        schemas(
            StartSessionPayload,
            StartSessionResponse,
            RespondPayload,
            RespondResponse,
            TtsPayload,
            SessionView,
            TurnView,
            EndSessionResponse,
            SaveSessionPayload,
            SaveSessionResponse,
            ListSessionsResponse,
            ArchiveSummaryView,
            ArchivedSessionView,
            AnalyzeSessionPayload,
            AnalysisResponse,
            ScrapePayload,
            ScrapeResponse,
            ExtractedProblem,
            PreviewResponse,
            ExecuteCodePayload,
            ExecuteCodeResponse,
            RuntimeView,
            RuntimesResponse,
            ProblemSource,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Voice", description = "Live interview loop"),
        (name = "Session", description = "Saving, listing, and analyzing sessions"),
        (name = "Scraper", description = "Problem extraction from URLs"),
        (name = "Code Execution", description = "Sandboxed code execution proxy")
    )
)]
pub struct ApiDoc;

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({"message": "InterviewNinja API", "status": "running"}))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "healthy"}))
}

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Group all routes that require AppState into their own router.
    let api_router = Router::new()
        .route("/api/voice/start", post(handlers::start_session))
        .route("/api/voice/respond", post(handlers::respond))
        .route("/api/voice/tts", post(handlers::text_to_speech))
        .route(
            "/api/voice/session/{id}",
            get(handlers::get_session).delete(handlers::end_session),
        )
        .route("/api/session/save", post(handlers::save_session))
        .route("/api/session/list", get(handlers::list_saved_sessions))
        .route("/api/session/analyze", post(handlers::analyze_session))
        .route(
            "/api/session/{id}",
            get(handlers::get_saved_session).delete(handlers::delete_saved_session),
        )
        .route("/api/scraper/extract", post(scraper::extract_problems))
        .route("/api/scraper/preview", post(scraper::preview_url))
        .route("/api/code/execute", post(exec::execute_code))
        .route("/api/code/runtimes", get(exec::list_runtimes))
        // Apply the state ONLY to this group of routes.
        .with_state(app_state);

    // Merge the stateful routes with the stateless ones (probes and docs).
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
