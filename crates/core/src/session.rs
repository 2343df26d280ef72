//! Session Data Model
//!
//! Defines the central `Session` entity and its configuration axes. A
//! session's settings are fixed at creation; only `history` grows, and it
//! grows append-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The kind of interview being simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewType {
    SystemDesign,
    LiveCoding,
    MlTheory,
    Coaching,
}

impl InterviewType {
    /// All interview types, in a stable order.
    pub const ALL: [InterviewType; 4] = [
        InterviewType::SystemDesign,
        InterviewType::LiveCoding,
        InterviewType::MlTheory,
        InterviewType::Coaching,
    ];

    /// Human-readable label, e.g. "system design".
    pub fn label(&self) -> &'static str {
        match self {
            InterviewType::SystemDesign => "system design",
            InterviewType::LiveCoding => "live coding",
            InterviewType::MlTheory => "ml theory",
            InterviewType::Coaching => "coaching",
        }
    }
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterviewType::SystemDesign => write!(f, "system_design"),
            InterviewType::LiveCoding => write!(f, "live_coding"),
            InterviewType::MlTheory => write!(f, "ml_theory"),
            InterviewType::Coaching => write!(f, "coaching"),
        }
    }
}

/// How the interviewer carries itself during the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Friendly,
    Neutral,
    Adversarial,
}

impl Tone {
    /// All tones, in a stable order.
    pub const ALL: [Tone; 3] = [Tone::Friendly, Tone::Neutral, Tone::Adversarial];
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tone::Friendly => write!(f, "friendly"),
            Tone::Neutral => write!(f, "neutral"),
            Tone::Adversarial => write!(f, "adversarial"),
        }
    }
}

/// How much the interviewer says per turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    Low,
    Medium,
    High,
}

impl Verbosity {
    /// All verbosity levels, in a stable order.
    pub const ALL: [Verbosity; 3] = [Verbosity::Low, Verbosity::Medium, Verbosity::High];
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verbosity::Low => write!(f, "low"),
            Verbosity::Medium => write!(f, "medium"),
            Verbosity::High => write!(f, "high"),
        }
    }
}

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Interviewer,
    Candidate,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::Interviewer => write!(f, "interviewer"),
            Speaker::Candidate => write!(f, "candidate"),
        }
    }
}

/// One utterance in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// A turn stamped with the current time.
    pub fn now(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// One live interview conversation.
///
/// `interview_type`, `tone`, `verbosity` and `topic` never change after
/// creation. `history` starts with the interviewer's opening turn and is
/// only ever appended to; the orchestrator never reorders or deletes
/// turns, even when a later generation call fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub interview_type: InterviewType,
    pub tone: Tone,
    pub verbosity: Verbosity,
    pub topic: Option<String>,
    pub history: Vec<Turn>,
    pub created_at: DateTime<Utc>,
}

/// Where a session's topic comes from at creation time.
///
/// `Scraped` carries text that was extracted from a URL *before* the
/// session was started; by the time it reaches the orchestrator it is
/// pass-through text just like `Description`.
#[derive(Debug, Clone)]
pub enum TopicSource {
    Random,
    Description(String),
    Scraped(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interview_type_wire_format() {
        let json = serde_json::to_string(&InterviewType::SystemDesign).unwrap();
        assert_eq!(json, "\"system_design\"");

        let parsed: InterviewType = serde_json::from_str("\"ml_theory\"").unwrap();
        assert_eq!(parsed, InterviewType::MlTheory);
    }

    #[test]
    fn test_tone_and_verbosity_wire_format() {
        assert_eq!(
            serde_json::to_string(&Tone::Adversarial).unwrap(),
            "\"adversarial\""
        );
        assert_eq!(serde_json::to_string(&Verbosity::Low).unwrap(), "\"low\"");

        let tone: Tone = serde_json::from_str("\"friendly\"").unwrap();
        assert_eq!(tone, Tone::Friendly);
        let verbosity: Verbosity = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(verbosity, Verbosity::High);
    }

    #[test]
    fn test_invalid_enum_deserialization() {
        let result: Result<InterviewType, _> = serde_json::from_str("\"brainteaser\"");
        assert!(result.is_err());

        let result: Result<Tone, _> = serde_json::from_str("\"sarcastic\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_display_matches_wire_format() {
        for interview_type in InterviewType::ALL {
            let wire = serde_json::to_string(&interview_type).unwrap();
            assert_eq!(wire, format!("\"{interview_type}\""));
        }
        for tone in Tone::ALL {
            let wire = serde_json::to_string(&tone).unwrap();
            assert_eq!(wire, format!("\"{tone}\""));
        }
    }

    #[test]
    fn test_session_round_trip() {
        let session = Session {
            id: Uuid::new_v4(),
            interview_type: InterviewType::LiveCoding,
            tone: Tone::Neutral,
            verbosity: Verbosity::Medium,
            topic: Some("Implement K-Means Clustering".to_string()),
            history: vec![Turn::now(Speaker::Interviewer, "Hi there!")],
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("live_coding"));
        assert!(json.contains("K-Means"));

        let parsed: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, session.id);
        assert_eq!(parsed.interview_type, session.interview_type);
        assert_eq!(parsed.history.len(), 1);
        assert_eq!(parsed.history[0].speaker, Speaker::Interviewer);
    }

    #[test]
    fn test_turn_now_stamps_timestamp() {
        let before = Utc::now();
        let turn = Turn::now(Speaker::Candidate, "I'd start with a hash map.");
        let after = Utc::now();

        assert!(turn.timestamp >= before && turn.timestamp <= after);
        assert_eq!(turn.speaker, Speaker::Candidate);
    }
}
