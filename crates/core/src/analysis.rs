//! Post-Interview Transcript Analysis
//!
//! Renders a session's history as a transcript and asks the completion
//! service for structured feedback. A reply that is not valid JSON
//! degrades to a fallback report wrapping the raw text rather than
//! failing the request.

use crate::llm::{ChatMessage, CompletionClient, GenerationError};
use crate::session::{InterviewType, Speaker, Turn};
use serde::{Deserialize, Serialize};
use tracing::warn;

const ANALYSIS_SYSTEM_PROMPT: &str = "You are an expert interview coach providing detailed feedback on interview performance. Always respond with valid JSON.";

/// Structured feedback for an interview transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub overall_score: u8,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub detailed_feedback: String,
    pub recommendations: Vec<String>,
}

fn render_transcript(history: &[Turn]) -> String {
    history
        .iter()
        .map(|turn| {
            let speaker = match turn.speaker {
                Speaker::Interviewer => "Interviewer",
                Speaker::Candidate => "Candidate",
            };
            format!("{speaker}: {}", turn.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn analysis_prompt(interview_type: InterviewType, transcript: &str) -> String {
    format!(
        "Analyze this {} interview transcript and provide detailed feedback.\n\n\
         Transcript:\n{transcript}\n\n\
         Provide your analysis in the following JSON format:\n\
         {{\n\
             \"overall_score\": <1-10>,\n\
             \"strengths\": [\"strength1\", \"strength2\", ...],\n\
             \"areas_for_improvement\": [\"area1\", \"area2\", ...],\n\
             \"detailed_feedback\": \"Comprehensive paragraph of feedback\",\n\
             \"recommendations\": [\"recommendation1\", \"recommendation2\", ...]\n\
         }}\n\n\
         Be specific and actionable in your feedback. Reference specific moments from the interview.",
        interview_type.label(),
    )
}

/// Asks the completion service for feedback on `history`.
pub async fn analyze(
    llm: &dyn CompletionClient,
    interview_type: InterviewType,
    history: &[Turn],
) -> Result<AnalysisReport, GenerationError> {
    let transcript = render_transcript(history);
    let prompt = analysis_prompt(interview_type, &transcript);
    let reply = llm
        .complete(ANALYSIS_SYSTEM_PROMPT, &[ChatMessage::user(prompt)])
        .await?;

    match serde_json::from_str::<AnalysisReport>(&reply) {
        Ok(report) => Ok(report),
        Err(err) => {
            warn!(error = %err, "analysis reply was not valid JSON, using fallback report");
            Ok(AnalysisReport {
                overall_score: 5,
                strengths: vec!["Unable to parse detailed feedback".to_string()],
                areas_for_improvement: vec!["Unable to parse detailed feedback".to_string()],
                detailed_feedback: reply,
                recommendations: vec!["Please review the transcript manually".to_string()],
            })
        }
    }
}
