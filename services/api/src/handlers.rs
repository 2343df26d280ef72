//! Axum Handlers for the REST API
//!
//! This module contains the logic for handling HTTP requests for the live
//! interview loop and the session archive. It uses `utoipa` doc comments
//! to generate OpenAPI documentation.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use interview_core::{
    analysis,
    archive::ArchiveError,
    error::OrchestratorError,
    llm::GenerationError,
    session::{InterviewType, TopicSource, Tone, Turn},
    speech::{SynthesisError, voice_for_tone},
};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::{
    models::{
        AnalysisResponse, AnalyzeSessionPayload, ArchiveSummaryView, ArchivedSessionView,
        EndSessionResponse, ErrorResponse, ListSessionsResponse, ProblemSource, RespondPayload,
        RespondResponse, SaveSessionPayload, SaveSessionResponse, SessionView,
        StartSessionPayload, StartSessionResponse, TtsPayload,
    },
    state::AppState,
};

pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Timeout(String),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { message })).into_response()
            }
            ApiError::Timeout(message) => {
                (StatusCode::REQUEST_TIMEOUT, Json(ErrorResponse { message })).into_response()
            }
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                let message = "An internal server error occurred.".to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { message }),
                )
                    .into_response()
            }
        }
    }
}

impl From<OrchestratorError> for ApiError {
    fn from(err: OrchestratorError) -> Self {
        match err {
            OrchestratorError::NotFound(id) => {
                ApiError::NotFound(format!("Session with id '{id}' not found"))
            }
            OrchestratorError::Generation(err) => {
                ApiError::InternalServerError(anyhow::Error::new(err))
            }
        }
    }
}

impl From<ArchiveError> for ApiError {
    fn from(err: ArchiveError) -> Self {
        match err {
            ArchiveError::NotFound(id) => {
                ApiError::NotFound(format!("Saved session with id '{id}' not found"))
            }
            other => ApiError::InternalServerError(anyhow::Error::new(other)),
        }
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        ApiError::InternalServerError(anyhow::Error::new(err))
    }
}

impl From<SynthesisError> for ApiError {
    fn from(err: SynthesisError) -> Self {
        ApiError::InternalServerError(anyhow::Error::new(err))
    }
}

/// Start a new interview session.
#[utoipa::path(
    post,
    path = "/api/voice/start",
    request_body = StartSessionPayload,
    responses(
        (status = 200, description = "Session started", body = StartSessionResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Voice"
)]
pub async fn start_session(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<StartSessionPayload>,
) -> Result<Json<StartSessionResponse>, ApiError> {
    // A missing description falls back to "no topic" rather than failing;
    // the `url` source carries content already scraped by the client.
    let topic_source = match (payload.problem_source, payload.problem_description) {
        (ProblemSource::Random, _) => TopicSource::Random,
        (ProblemSource::Description, Some(text)) => TopicSource::Description(text),
        (ProblemSource::Url, Some(text)) => TopicSource::Scraped(text),
        (_, None) => TopicSource::Description(String::new()),
    };

    let start = state
        .orchestrator
        .create(
            payload.interview_type,
            payload.tone,
            payload.verbosity,
            topic_source,
        )
        .await;

    Ok(Json(StartSessionResponse {
        session_id: start.session_id,
        opening_text: start.opening_text,
        audio_url: start.audio_url,
    }))
}

/// Process the candidate's message and generate the interviewer's reply.
#[utoipa::path(
    post,
    path = "/api/voice/respond",
    request_body = RespondPayload,
    responses(
        (status = 200, description = "Interviewer reply", body = RespondResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Voice"
)]
pub async fn respond(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RespondPayload>,
) -> Result<Json<RespondResponse>, ApiError> {
    let reply = state
        .orchestrator
        .respond(payload.session_id, &payload.user_message)
        .await?;

    Ok(Json(RespondResponse {
        response_text: reply.text,
        audio_url: reply.audio_url,
        is_complete: false,
    }))
}

/// Convert text to speech (standalone endpoint). Returns MP3 bytes.
#[utoipa::path(
    post,
    path = "/api/voice/tts",
    request_body = TtsPayload,
    responses(
        (status = 200, description = "MP3 audio bytes", body = Vec<u8>, content_type = "audio/mpeg"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Voice"
)]
pub async fn text_to_speech(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TtsPayload>,
) -> Result<Response, ApiError> {
    let speech = state.speech.as_ref().ok_or_else(|| {
        ApiError::InternalServerError(anyhow::anyhow!("speech synthesis is not configured"))
    })?;

    let audio = speech
        .synthesize(&payload.text, voice_for_tone(Tone::Neutral))
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "audio/mpeg"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=speech.mp3",
            ),
        ],
        audio,
    )
        .into_response())
}

/// Get a live session, including its full message history.
#[utoipa::path(
    get,
    path = "/api/voice/session/{id}",
    responses(
        (status = 200, description = "Session snapshot", body = SessionView),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    params(("id" = Uuid, Path, description = "Session ID")),
    tag = "Voice"
)]
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let session = state.orchestrator.get(id).await?;
    Ok(Json(session.into()))
}

/// End a session and remove it from the live store.
#[utoipa::path(
    delete,
    path = "/api/voice/session/{id}",
    responses(
        (status = 200, description = "Session ended", body = EndSessionResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    params(("id" = Uuid, Path, description = "Session ID")),
    tag = "Voice"
)]
pub async fn end_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<EndSessionResponse>, ApiError> {
    let summary = state.orchestrator.end(id).await?;
    Ok(Json(EndSessionResponse {
        message: "Session ended".to_string(),
        total_turns: summary.total_turns,
    }))
}

/// Archive the current state of a live session for later review.
#[utoipa::path(
    post,
    path = "/api/session/save",
    request_body = SaveSessionPayload,
    responses(
        (status = 200, description = "Session saved", body = SaveSessionResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "Session"
)]
pub async fn save_session(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SaveSessionPayload>,
) -> Result<Json<SaveSessionResponse>, ApiError> {
    let session = state.orchestrator.get(payload.session_id).await?;
    let archived = state.archive.save(session).await;

    Ok(Json(SaveSessionResponse {
        message: "Session saved successfully".to_string(),
        session_id: archived.session.id,
        saved_at: archived.saved_at,
    }))
}

/// List all saved sessions.
#[utoipa::path(
    get,
    path = "/api/session/list",
    responses(
        (status = 200, description = "Saved session summaries", body = ListSessionsResponse)
    ),
    tag = "Session"
)]
pub async fn list_saved_sessions(
    State(state): State<Arc<AppState>>,
) -> Json<ListSessionsResponse> {
    let sessions = state
        .archive
        .list()
        .await
        .into_iter()
        .map(ArchiveSummaryView::from)
        .collect();
    Json(ListSessionsResponse { sessions })
}

/// Get a specific saved session.
#[utoipa::path(
    get,
    path = "/api/session/{id}",
    responses(
        (status = 200, description = "Archived session", body = ArchivedSessionView),
        (status = 404, description = "Saved session not found", body = ErrorResponse)
    ),
    params(("id" = Uuid, Path, description = "Session ID")),
    tag = "Session"
)]
pub async fn get_saved_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ArchivedSessionView>, ApiError> {
    let archived = state.archive.get(id).await?;
    Ok(Json(archived.into()))
}

/// Delete a saved session.
#[utoipa::path(
    delete,
    path = "/api/session/{id}",
    responses(
        (status = 200, description = "Saved session deleted"),
        (status = 404, description = "Saved session not found", body = ErrorResponse)
    ),
    params(("id" = Uuid, Path, description = "Session ID")),
    tag = "Session"
)]
pub async fn delete_saved_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.archive.delete(id).await?;
    Ok(Json(serde_json::json!({
        "message": "Session deleted",
        "session_id": id,
    })))
}

/// Analyze an interview and return detailed feedback.
///
/// Resolves the transcript from the live store first, then the archive,
/// so ended-but-saved interviews remain analyzable.
#[utoipa::path(
    post,
    path = "/api/session/analyze",
    request_body = AnalyzeSessionPayload,
    responses(
        (status = 200, description = "Analysis report", body = AnalysisResponse),
        (status = 400, description = "Nothing to analyze", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Session"
)]
pub async fn analyze_session(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AnalyzeSessionPayload>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let (interview_type, history): (InterviewType, Vec<Turn>) =
        match state.orchestrator.get(payload.session_id).await {
            Ok(session) => (session.interview_type, session.history),
            Err(OrchestratorError::NotFound(_)) => {
                let archived = state.archive.get(payload.session_id).await?;
                (archived.session.interview_type, archived.session.history)
            }
            Err(err) => return Err(err.into()),
        };

    if history.is_empty() {
        return Err(ApiError::BadRequest("No messages to analyze".to_string()));
    }

    let report = analysis::analyze(state.llm.as_ref(), interview_type, &history).await?;
    Ok(Json(report.into()))
}
