//! Individual configuration sections.

use serde::{Deserialize, Serialize};
use writers_room_core::{DialogueFailurePolicy, ResumeMode, SamplingConfig};
use writers_room_interface::OutputShape;

/// Connection settings for the model provider.
///
/// # Example
///
/// ```toml
/// [provider]
/// base_url = "http://localhost:11434/v1"
/// model = "llama3.1"
/// structured_outputs = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ProviderConfig {
    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_base_url")]
    base_url: String,
    /// Model identifier
    #[serde(default = "default_model")]
    model: String,
    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    api_key_env: String,
    /// Request JSON output natively from the provider
    #[serde(default = "default_structured_outputs")]
    structured_outputs: bool,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "WRITERS_ROOM_API_KEY".to_string()
}

fn default_structured_outputs() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            structured_outputs: default_structured_outputs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Sampling settings per agent output shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct SamplingTable {
    /// Casting
    #[serde(default = "default_cast")]
    cast: SamplingConfig,
    /// Scene planning
    #[serde(default = "default_scene_plan")]
    scene_plan: SamplingConfig,
    /// Actor lines
    #[serde(default = "default_dialogue")]
    dialogue: SamplingConfig,
    /// Scene summaries
    #[serde(default = "default_scene_summary")]
    scene_summary: SamplingConfig,
    /// End-of-scene judgments
    #[serde(default = "default_scene_end")]
    scene_end: SamplingConfig,
}

fn default_cast() -> SamplingConfig {
    SamplingConfig::with_temperature(0.8)
}

fn default_scene_plan() -> SamplingConfig {
    SamplingConfig::with_temperature(0.7)
}

fn default_dialogue() -> SamplingConfig {
    SamplingConfig::with_temperature(0.9)
}

fn default_scene_summary() -> SamplingConfig {
    SamplingConfig::with_temperature(0.5)
}

fn default_scene_end() -> SamplingConfig {
    SamplingConfig::with_temperature(0.3)
}

impl Default for SamplingTable {
    fn default() -> Self {
        Self {
            cast: default_cast(),
            scene_plan: default_scene_plan(),
            dialogue: default_dialogue(),
            scene_summary: default_scene_summary(),
            scene_end: default_scene_end(),
        }
    }
}

impl SamplingTable {
    /// Sampling settings for an output shape.
    pub fn for_shape(&self, shape: OutputShape) -> &SamplingConfig {
        match shape {
            OutputShape::Cast => &self.cast,
            OutputShape::ScenePlan => &self.scene_plan,
            OutputShape::Dialogue => &self.dialogue,
            OutputShape::SceneSummary => &self.scene_summary,
            OutputShape::SceneEnd => &self.scene_end,
        }
    }
}

/// Casting settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct CastingConfig {
    /// Number of characters to generate
    #[serde(default = "default_cast_size")]
    cast_size: usize,
}

fn default_cast_size() -> usize {
    4
}

impl Default for CastingConfig {
    fn default() -> Self {
        Self {
            cast_size: default_cast_size(),
        }
    }
}

/// Failure and resume policies.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct PolicyConfig {
    /// What to do when an actor call fails
    #[serde(default)]
    dialogue_failure: DialogueFailurePolicy,
    /// How resume treats an interrupted scene
    #[serde(default)]
    resume: ResumeMode,
}

impl PolicyConfig {
    /// Build a policy section explicitly.
    pub fn new(dialogue_failure: DialogueFailurePolicy, resume: ResumeMode) -> Self {
        Self {
            dialogue_failure,
            resume,
        }
    }
}
