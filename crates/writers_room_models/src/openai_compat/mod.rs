//! OpenAI-compatible chat-completions integration.

mod client;
mod conversions;
mod dto;

pub use client::OpenAICompatibleClient;
pub use dto::{
    ChatChoice, ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse,
    ChatMessage, ChoiceMessage, ResponseFormat,
};
