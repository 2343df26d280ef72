//! API Models
//!
//! Request and response payloads for the HTTP surface, annotated for
//! OpenAPI generation with `utoipa`. Domain types live in
//! `interview-core`; this module only maps them to and from the wire.

use chrono::{DateTime, Utc};
use interview_core::{
    analysis::AnalysisReport,
    archive::{ArchiveSummary, ArchivedSession},
    session::{InterviewType, Session, Speaker, Tone, Turn, Verbosity},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// How the interview topic is chosen at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProblemSource {
    Random,
    Description,
    Url,
}

fn default_tone() -> Tone {
    Tone::Neutral
}

fn default_verbosity() -> Verbosity {
    Verbosity::Medium
}

fn default_problem_source() -> ProblemSource {
    ProblemSource::Random
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StartSessionPayload {
    #[schema(value_type = String, example = "ml_theory")]
    pub interview_type: InterviewType,
    #[serde(default = "default_verbosity")]
    #[schema(value_type = String, example = "medium")]
    pub verbosity: Verbosity,
    #[serde(default = "default_tone")]
    #[schema(value_type = String, example = "neutral")]
    pub tone: Tone,
    #[serde(default = "default_problem_source")]
    pub problem_source: ProblemSource,
    /// Free-text topic for `description`, or the pre-scraped content for
    /// `url`.
    pub problem_description: Option<String>,
    pub problem_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StartSessionResponse {
    #[schema(value_type = String, format = Uuid)]
    pub session_id: Uuid,
    pub opening_text: String,
    /// `data:audio/mpeg;base64,...`; absent when synthesis degraded.
    pub audio_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RespondPayload {
    #[schema(value_type = String, format = Uuid)]
    pub session_id: Uuid,
    pub user_message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RespondResponse {
    pub response_text: String,
    pub audio_url: Option<String>,
    pub is_complete: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TtsPayload {
    #[schema(example = "Welcome to your interview.")]
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TurnView {
    #[schema(value_type = String, example = "interviewer")]
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl From<Turn> for TurnView {
    fn from(turn: Turn) -> Self {
        Self {
            speaker: turn.speaker,
            text: turn.text,
            timestamp: turn.timestamp,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionView {
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    #[schema(value_type = String, example = "system_design")]
    pub interview_type: InterviewType,
    #[schema(value_type = String, example = "neutral")]
    pub tone: Tone,
    #[schema(value_type = String, example = "medium")]
    pub verbosity: Verbosity,
    pub topic: Option<String>,
    pub history: Vec<TurnView>,
    pub created_at: DateTime<Utc>,
}

impl From<Session> for SessionView {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            interview_type: session.interview_type,
            tone: session.tone,
            verbosity: session.verbosity,
            topic: session.topic,
            history: session.history.into_iter().map(TurnView::from).collect(),
            created_at: session.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EndSessionResponse {
    pub message: String,
    pub total_turns: usize,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveSessionPayload {
    #[schema(value_type = String, format = Uuid)]
    pub session_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaveSessionResponse {
    pub message: String,
    #[schema(value_type = String, format = Uuid)]
    pub session_id: Uuid,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArchiveSummaryView {
    #[schema(value_type = String, format = Uuid)]
    pub session_id: Uuid,
    #[schema(value_type = String, example = "coaching")]
    pub interview_type: InterviewType,
    pub saved_at: DateTime<Utc>,
    pub turn_count: usize,
}

impl From<ArchiveSummary> for ArchiveSummaryView {
    fn from(summary: ArchiveSummary) -> Self {
        Self {
            session_id: summary.id,
            interview_type: summary.interview_type,
            saved_at: summary.saved_at,
            turn_count: summary.turn_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListSessionsResponse {
    pub sessions: Vec<ArchiveSummaryView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArchivedSessionView {
    pub session: SessionView,
    pub saved_at: DateTime<Utc>,
}

impl From<ArchivedSession> for ArchivedSessionView {
    fn from(archived: ArchivedSession) -> Self {
        Self {
            session: archived.session.into(),
            saved_at: archived.saved_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeSessionPayload {
    #[schema(value_type = String, format = Uuid)]
    pub session_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalysisResponse {
    #[schema(example = 7)]
    pub overall_score: u8,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub detailed_feedback: String,
    pub recommendations: Vec<String>,
}

impl From<AnalysisReport> for AnalysisResponse {
    fn from(report: AnalysisReport) -> Self {
        Self {
            overall_score: report.overall_score,
            strengths: report.strengths,
            areas_for_improvement: report.areas_for_improvement,
            detailed_feedback: report.detailed_feedback,
            recommendations: report.recommendations,
        }
    }
}

// Scraper models

#[derive(Debug, Deserialize, ToSchema)]
pub struct ScrapePayload {
    #[schema(example = "https://example.com/interview-questions")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExtractedProblem {
    pub name: String,
    pub content: String,
    pub difficulty: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScrapeResponse {
    pub problems: Vec<ExtractedProblem>,
    pub source_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PreviewResponse {
    pub url: String,
    pub text_length: usize,
    pub preview: String,
    pub full_text: String,
}

// Code execution models

fn default_language() -> String {
    "python".to_string()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExecuteCodePayload {
    pub code: String,
    #[serde(default = "default_language")]
    #[schema(example = "python")]
    pub language: String,
    pub stdin: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExecuteCodeResponse {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RuntimeView {
    pub language: String,
    pub version: String,
    pub aliases: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RuntimesResponse {
    pub runtimes: Vec<RuntimeView>,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_start_session_payload_defaults() {
        let json = r#"{"interview_type": "ml_theory"}"#;
        let payload: StartSessionPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.interview_type, InterviewType::MlTheory);
        assert_eq!(payload.tone, Tone::Neutral);
        assert_eq!(payload.verbosity, Verbosity::Medium);
        assert_eq!(payload.problem_source, ProblemSource::Random);
        assert!(payload.problem_description.is_none());
    }

    #[test]
    fn test_start_session_payload_full() {
        let json = r#"{
            "interview_type": "system_design",
            "tone": "adversarial",
            "verbosity": "low",
            "problem_source": "description",
            "problem_description": "Design a feature store"
        }"#;
        let payload: StartSessionPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.interview_type, InterviewType::SystemDesign);
        assert_eq!(payload.tone, Tone::Adversarial);
        assert_eq!(payload.verbosity, Verbosity::Low);
        assert_eq!(payload.problem_source, ProblemSource::Description);
        assert_eq!(
            payload.problem_description.as_deref(),
            Some("Design a feature store")
        );
    }

    #[test]
    fn test_start_session_payload_missing_type_fails() {
        let result: Result<StartSessionPayload, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }

    #[test]
    fn test_problem_source_wire_format() {
        assert_eq!(
            serde_json::to_string(&ProblemSource::Random).unwrap(),
            "\"random\""
        );
        let parsed: ProblemSource = serde_json::from_str("\"url\"").unwrap();
        assert_eq!(parsed, ProblemSource::Url);
    }

    #[test]
    fn test_session_view_from_core_session() {
        let session = Session {
            id: Uuid::new_v4(),
            interview_type: InterviewType::Coaching,
            tone: Tone::Friendly,
            verbosity: Verbosity::High,
            topic: Some("Career Discussion".to_string()),
            history: vec![Turn::now(Speaker::Interviewer, "Hi!")],
            created_at: Utc::now(),
        };
        let id = session.id;

        let view = SessionView::from(session);
        assert_eq!(view.id, id);
        assert_eq!(view.history.len(), 1);
        assert_eq!(view.history[0].speaker, Speaker::Interviewer);

        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("coaching"));
        assert!(json.contains("Career Discussion"));
    }

    #[test]
    fn test_execute_code_payload_default_language() {
        let json = r#"{"code": "print(1)"}"#;
        let payload: ExecuteCodePayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.language, "python");
        assert!(payload.stdin.is_none());
    }

    #[test]
    fn test_error_response_serialization() {
        let error = ErrorResponse {
            message: "Session not found".to_string(),
        };

        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, r#"{"message":"Session not found"}"#);
    }
}
