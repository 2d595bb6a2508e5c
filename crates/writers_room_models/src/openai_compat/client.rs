//! OpenAI-compatible driver using reqwest.

use crate::openai_compat::{ChatCompletionResponse, conversions};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};
use writers_room_config::ProviderConfig;
use writers_room_core::{GenerateRequest, GenerateResponse};
use writers_room_error::{GenerationError, GenerationErrorKind, GenerationResult};
use writers_room_interface::WritersRoomDriver;

/// Driver for any chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    structured_outputs: bool,
    provider: &'static str,
}

impl OpenAICompatibleClient {
    /// Creates a driver with an explicit API key.
    ///
    /// `base_url` is the API root, e.g. `https://api.openai.com/v1`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized.
    #[instrument(skip(api_key), fields(model = %model, base_url = %base_url))]
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        structured_outputs: bool,
        timeout: Duration,
    ) -> GenerationResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            GenerationError::new(GenerationErrorKind::Transport(format!(
                "Failed to build HTTP client: {}",
                e
            )))
        })?;

        debug!("Created OpenAI-compatible driver");

        Ok(Self {
            client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            structured_outputs,
            provider: "openai_compatible",
        })
    }

    /// Creates a driver from provider settings.
    ///
    /// Reads the API key from the environment variable named by
    /// `api_key_env`. Local servers that ignore the key still need the
    /// variable set to some value.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationErrorKind::MissingCredentials`] if the variable is unset.
    #[instrument(skip_all, fields(model = %config.model()))]
    pub fn from_config(config: &ProviderConfig) -> GenerationResult<Self> {
        let api_key = std::env::var(config.api_key_env()).map_err(|_| {
            GenerationError::new(GenerationErrorKind::MissingCredentials(
                config.api_key_env().clone(),
            ))
        })?;

        Self::new(
            api_key,
            config.model().clone(),
            config.base_url().clone(),
            *config.structured_outputs(),
            Duration::from_secs(*config.timeout_secs()),
        )
    }

    /// Endpoint receiving chat-completions requests.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl WritersRoomDriver for OpenAICompatibleClient {
    #[instrument(
        skip(self, req),
        fields(provider = self.provider, model = %self.model, messages = req.messages.len())
    )]
    async fn generate(&self, req: &GenerateRequest) -> GenerationResult<GenerateResponse> {
        let body = conversions::to_chat_request(req, &self.model, self.structured_outputs)?;
        let url = self.endpoint();

        debug!(
            url = %url,
            json_mode = body.response_format().is_some(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                GenerationError::new(GenerationErrorKind::Transport(format!(
                    "Request failed: {}",
                    e
                )))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, error = %message, "API error");
            return Err(GenerationError::new(GenerationErrorKind::Api {
                status: status.as_u16(),
                message,
            }));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to decode response body");
            GenerationError::new(GenerationErrorKind::Transport(format!(
                "Failed to decode response: {}",
                e
            )))
        })?;

        let truncated = parsed
            .choices()
            .first()
            .and_then(|choice| choice.finish_reason().as_deref())
            == Some("length");
        if truncated {
            warn!("Completion truncated by the output token cap");
        }

        conversions::from_chat_response(parsed)
    }

    fn provider_name(&self) -> &'static str {
        self.provider
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn supports_json_mode(&self) -> bool {
        self.structured_outputs
    }
}
