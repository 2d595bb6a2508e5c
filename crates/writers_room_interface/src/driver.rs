//! Trait for text-generation backends.

use async_trait::async_trait;
use writers_room_core::{GenerateRequest, GenerateResponse};
use writers_room_error::GenerationResult;

/// Core trait that every text-generation backend implements.
#[async_trait]
pub trait WritersRoomDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> GenerationResult<GenerateResponse>;

    /// Provider name (e.g., "openai", "ollama").
    fn provider_name(&self) -> &'static str;

    /// Model identifier.
    fn model_name(&self) -> &str;

    /// Whether the backend honors [`GenerateRequest::json_mode`].
    fn supports_json_mode(&self) -> bool {
        false
    }
}
