//! Model provider drivers for the writers' room.
//!
//! Every provider speaking the OpenAI chat-completions protocol (OpenAI,
//! Groq, Ollama, vLLM, LM Studio) is reached through
//! [`OpenAICompatibleClient`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai_compat;

pub use openai_compat::{
    ChatChoice, ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse,
    ChatMessage, ChoiceMessage, OpenAICompatibleClient, ResponseFormat,
};
