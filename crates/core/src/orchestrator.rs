//! Interview Session Orchestrator
//!
//! The core state machine. It exclusively owns live session state, builds
//! the per-turn instruction context from a session's fixed settings,
//! drives the multi-turn conversation loop against the completion
//! service, and attempts speech synthesis as a best-effort side channel.
//!
//! A session is either present in the store (active, accepting turns) or
//! removed (ended). There is no paused state and no automatic expiry;
//! ending is always an explicit caller action.

use crate::{
    error::OrchestratorError,
    llm::{ChatMessage, CompletionClient},
    problems, prompt,
    session::{InterviewType, Session, Speaker, TopicSource, Tone, Turn, Verbosity},
    speech::{SpeechSynthesizer, voice_for_tone},
    store::SessionStore,
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Result of starting a session.
#[derive(Debug, Clone)]
pub struct SessionStart {
    pub session_id: Uuid,
    pub opening_text: String,
    /// `data:audio/mpeg;base64,...` URL; absent when synthesis degraded
    /// and the client should fall back to its own speech.
    pub audio_url: Option<String>,
}

/// Result of one successful exchange.
#[derive(Debug, Clone)]
pub struct InterviewerReply {
    pub text: String,
    pub audio_url: Option<String>,
}

/// Summary returned when a session ends.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub total_turns: usize,
}

pub struct Orchestrator {
    store: SessionStore,
    llm: Arc<dyn CompletionClient>,
    speech: Option<Arc<dyn SpeechSynthesizer>>,
}

impl Orchestrator {
    /// Creates the orchestrator around an explicit session store and its
    /// collaborators. `speech` is `None` when no synthesis credentials
    /// were configured; sessions then run text-only.
    pub fn new(
        store: SessionStore,
        llm: Arc<dyn CompletionClient>,
        speech: Option<Arc<dyn SpeechSynthesizer>>,
    ) -> Self {
        Self { store, llm, speech }
    }

    /// Starts a session: resolves the topic, composes the opening turn,
    /// stores the record, and attempts opening audio.
    ///
    /// Synthesis failure never fails creation; it degrades to no audio.
    pub async fn create(
        &self,
        interview_type: InterviewType,
        tone: Tone,
        verbosity: Verbosity,
        topic_source: TopicSource,
    ) -> SessionStart {
        let topic = resolve_topic(interview_type, topic_source);
        let opening_text = prompt::opening(interview_type, tone, topic.as_deref());

        let session = Session {
            id: Uuid::new_v4(),
            interview_type,
            tone,
            verbosity,
            topic,
            history: vec![Turn::now(Speaker::Interviewer, opening_text.clone())],
            created_at: Utc::now(),
        };
        let session_id = session.id;
        self.store.insert(session).await;
        info!(%session_id, %interview_type, %tone, %verbosity, "interview session started");

        let audio_url = self.synthesize_best_effort(&opening_text, tone).await;
        SessionStart {
            session_id,
            opening_text,
            audio_url,
        }
    }

    /// Appends the candidate's turn, asks the completion service for the
    /// interviewer's reply against the full ordered history, appends the
    /// reply, and attempts best-effort audio for it.
    ///
    /// On generation failure the already-appended candidate turn is
    /// retained; history is append-only and never truncated. Whether to
    /// resend the same turn is the caller's decision; the core defines no
    /// replay. Concurrent calls for one id are not serialized: replies
    /// land in generation-completion order.
    pub async fn respond(
        &self,
        session_id: Uuid,
        candidate_text: &str,
    ) -> Result<InterviewerReply, OrchestratorError> {
        let mut session = self
            .store
            .snapshot(session_id)
            .await
            .ok_or(OrchestratorError::NotFound(session_id))?;

        let candidate_turn = Turn::now(Speaker::Candidate, candidate_text);
        if !self.store.append_turn(session_id, candidate_turn.clone()).await {
            return Err(OrchestratorError::NotFound(session_id));
        }
        session.history.push(candidate_turn);

        let system_instruction = prompt::compose(
            session.interview_type,
            session.tone,
            session.verbosity,
            session.topic.as_deref(),
        );
        let messages: Vec<ChatMessage> = session
            .history
            .iter()
            .map(|turn| match turn.speaker {
                Speaker::Interviewer => ChatMessage::assistant(turn.text.clone()),
                Speaker::Candidate => ChatMessage::user(turn.text.clone()),
            })
            .collect();

        let reply_text = self.llm.complete(&system_instruction, &messages).await?;

        let reply_turn = Turn::now(Speaker::Interviewer, reply_text.clone());
        if !self.store.append_turn(session_id, reply_turn).await {
            // The session was ended while generation was in flight.
            return Err(OrchestratorError::NotFound(session_id));
        }

        let audio_url = self.synthesize_best_effort(&reply_text, session.tone).await;
        Ok(InterviewerReply {
            text: reply_text,
            audio_url,
        })
    }

    /// Ends a session, removing it from the store atomically.
    pub async fn end(&self, session_id: Uuid) -> Result<SessionSummary, OrchestratorError> {
        let session = self
            .store
            .remove(session_id)
            .await
            .ok_or(OrchestratorError::NotFound(session_id))?;
        info!(%session_id, total_turns = session.history.len(), "interview session ended");
        Ok(SessionSummary {
            session_id,
            total_turns: session.history.len(),
        })
    }

    /// Full snapshot of a live session.
    pub async fn get(&self, session_id: Uuid) -> Result<Session, OrchestratorError> {
        self.store
            .snapshot(session_id)
            .await
            .ok_or(OrchestratorError::NotFound(session_id))
    }

    /// The single degradation boundary for the speech side channel: any
    /// failure, and absent credentials, become `None`. Never an error.
    async fn synthesize_best_effort(&self, text: &str, tone: Tone) -> Option<String> {
        let Some(speech) = &self.speech else {
            warn!("speech synthesis not configured, skipping audio");
            return None;
        };
        let voice_id = voice_for_tone(tone);
        match speech.synthesize(text, voice_id).await {
            Ok(audio) => {
                info!(voice_id, bytes = audio.len(), "synthesized interviewer audio");
                Some(format!("data:audio/mpeg;base64,{}", BASE64.encode(audio)))
            }
            Err(err) => {
                error!(error = %err, "speech synthesis failed, degrading to text-only");
                None
            }
        }
    }
}

/// Resolves a session topic from its source. Blank text is treated as no
/// topic at all.
fn resolve_topic(interview_type: InterviewType, topic_source: TopicSource) -> Option<String> {
    let topic = match topic_source {
        TopicSource::Random => {
            let problem = problems::pick(interview_type);
            format!("{}\n\n{}", problem.name, problem.content)
        }
        TopicSource::Description(text) | TopicSource::Scraped(text) => text,
    };
    let trimmed = topic.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
