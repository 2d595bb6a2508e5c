//! Request and response types for text generation.

use crate::{Message, Output};
use serde::{Deserialize, Serialize};

/// Provider-neutral generation request.
///
/// # Examples
///
/// ```
/// use writers_room_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::system("You are a director."), Message::user("Plan scene 1.")])
///     .temperature(Some(0.7))
///     .json_mode(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 2);
/// assert!(request.json_mode);
/// assert_eq!(request.max_tokens, None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_builder::Builder)]
#[builder(default, setter(into))]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Model identifier override
    pub model: Option<String>,
    /// Ask the provider to constrain output to a JSON object
    pub json_mode: bool,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use writers_room_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse {
///     outputs: vec![Output::Text("Hello".to_string()), Output::Text(" there".to_string())],
/// };
/// assert_eq!(response.text(), "Hello there");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// Concatenated text of every output.
    pub fn text(&self) -> String {
        self.outputs.iter().map(Output::as_text).collect()
    }
}
