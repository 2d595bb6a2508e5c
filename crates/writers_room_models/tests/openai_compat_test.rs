//! Tests for the OpenAI-compatible driver.

use std::time::Duration;
use writers_room_config::ProviderConfig;
use writers_room_core::{GenerateRequest, Message};
use writers_room_error::GenerationErrorKind;
use writers_room_interface::WritersRoomDriver;
use writers_room_models::OpenAICompatibleClient;

#[test]
fn test_endpoint_strips_trailing_slash() {
    let client = OpenAICompatibleClient::new(
        "test-key".to_string(),
        "llama3.1".to_string(),
        "http://localhost:11434/v1/".to_string(),
        false,
        Duration::from_secs(5),
    )
    .unwrap();

    assert_eq!(client.endpoint(), "http://localhost:11434/v1/chat/completions");
    assert_eq!(client.model_name(), "llama3.1");
    assert!(!client.supports_json_mode());
}

#[test]
fn test_from_config_requires_api_key_variable() {
    let config: ProviderConfig =
        serde_json::from_str(r#"{"api_key_env": "WRITERS_ROOM_TEST_KEY_THAT_IS_NEVER_SET"}"#)
            .unwrap();

    let err = OpenAICompatibleClient::from_config(&config).unwrap_err();
    assert!(matches!(err.kind, GenerationErrorKind::MissingCredentials(ref var)
        if var == "WRITERS_ROOM_TEST_KEY_THAT_IS_NEVER_SET"));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let client = OpenAICompatibleClient::new(
        "test-key".to_string(),
        "gpt-4o-mini".to_string(),
        "http://127.0.0.1:9".to_string(),
        true,
        Duration::from_secs(2),
    )
    .unwrap();

    let request = GenerateRequest::builder()
        .messages(vec![Message::user("Say hello.")])
        .build()
        .unwrap();

    let err = client.generate(&request).await.unwrap_err();
    assert!(matches!(err.kind, GenerationErrorKind::Transport(_)));
}

#[cfg_attr(not(feature = "api"), ignore)]
#[tokio::test]
async fn test_live_completion() {
    let _ = dotenvy::dotenv();
    let config = ProviderConfig::default();
    let client = OpenAICompatibleClient::from_config(&config).unwrap();

    let request = GenerateRequest::builder()
        .messages(vec![Message::user("Reply with the single word: ready")])
        .max_tokens(Some(10))
        .build()
        .unwrap();

    let response = client.generate(&request).await.unwrap();
    assert!(!response.text().is_empty());
}
