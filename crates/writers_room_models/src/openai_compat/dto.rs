//! Chat-completions data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A message in a chat-completions conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct ChatMessage {
    /// `system`, `user` or `assistant`
    role: String,
    /// Message text
    content: String,
}

impl ChatMessage {
    /// Create a message.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Requested response format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct ResponseFormat {
    /// Format type, e.g. `json_object`
    #[serde(rename = "type")]
    kind: String,
}

impl ResponseFormat {
    /// Constrain output to a single JSON object.
    pub fn json_object() -> Self {
        Self {
            kind: "json_object".to_string(),
        }
    }
}

/// Chat-completions request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatCompletionRequest {
    /// Model identifier
    model: String,
    /// Conversation
    messages: Vec<ChatMessage>,
    /// Sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Output token cap
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Response format constraint
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

impl ChatCompletionRequest {
    /// Creates a new builder for `ChatCompletionRequest`.
    pub fn builder() -> ChatCompletionRequestBuilder {
        ChatCompletionRequestBuilder::default()
    }
}

/// Assistant message inside a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChoiceMessage {
    /// Generated text; absent for refusals on some providers
    #[serde(default)]
    content: Option<String>,
}

/// One completion choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatChoice {
    /// Generated message
    message: ChoiceMessage,
    /// Why generation stopped
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Chat-completions response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatCompletionResponse {
    /// Completion choices; the first is used
    #[serde(default)]
    choices: Vec<ChatChoice>,
}
