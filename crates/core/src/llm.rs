//! Text-Completion Collaborator
//!
//! The orchestrator talks to an opaque text-completion service through the
//! `CompletionClient` trait; the production implementation targets any
//! OpenAI-compatible chat API.

use async_openai::{
    Client,
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;

/// Role of a message in the ordered conversation sent to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message of the conversation passed to [`CompletionClient::complete`].
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Failure of the primary text-generation path. Always surfaced to the
/// caller; never retried by the core.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("completion request failed: {0}")]
    Upstream(String),
    #[error("completion response contained no content")]
    EmptyResponse,
}

impl From<OpenAIError> for GenerationError {
    fn from(error: OpenAIError) -> Self {
        GenerationError::Upstream(error.to_string())
    }
}

/// A text-completion service able to continue an interview conversation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Produces the next reply given a system instruction and the full
    /// ordered conversation so far.
    async fn complete(
        &self,
        system_instruction: &str,
        messages: &[ChatMessage],
    ) -> Result<String, GenerationError>;
}

/// An implementation of [`CompletionClient`] for any OpenAI-compatible API.
pub struct OpenAiCompletionClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCompletionClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key for the completion service.
    /// * `api_base` - Optional base URL override for compatible providers.
    /// * `model` - Chat model identifier (e.g. "gpt-4").
    pub fn new(api_key: &str, api_base: Option<&str>, model: String) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(api_base) = api_base {
            config = config.with_api_base(api_base);
        }
        Self {
            client: Client::with_config(config),
            model,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(
        &self,
        system_instruction: &str,
        messages: &[ChatMessage],
    ) -> Result<String, GenerationError> {
        let mut request_messages: Vec<ChatCompletionRequestMessage> =
            Vec::with_capacity(messages.len() + 1);
        request_messages.push(
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_instruction)
                .build()?
                .into(),
        );
        for message in messages {
            let request_message = match message.role {
                ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(message.content.clone())
                    .build()?
                    .into(),
                ChatRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(message.content.clone())
                    .build()?
                    .into(),
            };
            request_messages.push(request_message);
        }

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(request_messages)
            .temperature(0.7)
            .max_tokens(500u32)
            .build()?;

        let response = self.client.chat().create(request).await?;
        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}
