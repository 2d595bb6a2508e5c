//! Conversions between writers' room and chat-completions formats.

use crate::openai_compat::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat,
};
use writers_room_core::{GenerateRequest, GenerateResponse, Output};
use writers_room_error::{GenerationError, GenerationErrorKind, GenerationResult};

/// Converts a [`GenerateRequest`] to a chat-completions body.
///
/// The request's model overrides `default_model`. `json_mode` is honored
/// only when `structured_outputs` is enabled.
pub fn to_chat_request(
    req: &GenerateRequest,
    default_model: &str,
    structured_outputs: bool,
) -> GenerationResult<ChatCompletionRequest> {
    let messages: Vec<ChatMessage> = req
        .messages
        .iter()
        .map(|message| ChatMessage::new(message.role.as_ref(), message.content.clone()))
        .collect();

    let response_format = (req.json_mode && structured_outputs).then(ResponseFormat::json_object);

    ChatCompletionRequest::builder()
        .model(req.model.clone().unwrap_or_else(|| default_model.to_string()))
        .messages(messages)
        .temperature(req.temperature)
        .max_tokens(req.max_tokens)
        .response_format(response_format)
        .build()
        .map_err(|e| {
            GenerationError::new(GenerationErrorKind::Transport(format!(
                "Failed to build request: {}",
                e
            )))
        })
}

/// Converts a chat-completions body to a [`GenerateResponse`].
///
/// # Errors
///
/// Returns [`GenerationErrorKind::EmptyResponse`] when there is no choice
/// or the first choice has no text.
pub fn from_chat_response(response: ChatCompletionResponse) -> GenerationResult<GenerateResponse> {
    let text = response
        .choices()
        .first()
        .and_then(|choice| choice.message().content().clone())
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| GenerationError::new(GenerationErrorKind::EmptyResponse))?;

    Ok(GenerateResponse {
        outputs: vec![Output::Text(text)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use writers_room_core::Message;

    #[test]
    fn test_json_mode_requires_structured_outputs() {
        let req = GenerateRequest::builder()
            .messages(vec![Message::system("Be terse."), Message::user("Plan scene 1.")])
            .json_mode(true)
            .build()
            .unwrap();

        let native = to_chat_request(&req, "gpt-4o-mini", true).unwrap();
        assert_eq!(native.response_format(), &Some(ResponseFormat::json_object()));
        assert_eq!(native.messages()[0].role(), "system");

        let plain = to_chat_request(&req, "gpt-4o-mini", false).unwrap();
        assert!(plain.response_format().is_none());
        let body = serde_json::to_value(&plain).unwrap();
        assert!(body.get("response_format").is_none());
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_request_model_overrides_default() {
        let req = GenerateRequest::builder()
            .model(Some("llama3.1".to_string()))
            .temperature(Some(0.3))
            .build()
            .unwrap();
        let chat = to_chat_request(&req, "gpt-4o-mini", true).unwrap();
        assert_eq!(chat.model(), "llama3.1");
        assert_eq!(chat.temperature(), &Some(0.3));
    }

    #[test]
    fn test_response_text_extracted_from_first_choice() {
        let body: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Hello."},"finish_reason":"stop"}]}"#,
        )
        .unwrap();
        let response = from_chat_response(body).unwrap();
        assert_eq!(response.text(), "Hello.");
    }

    #[test]
    fn test_empty_choices_is_empty_response() {
        let body: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        let err = from_chat_response(body).unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::EmptyResponse);
    }
}
