//! Sampling parameters for a model call.

use serde::{Deserialize, Serialize};

/// Sampling settings passed with each agent invocation.
///
/// # Examples
///
/// ```
/// use writers_room_core::SamplingConfig;
///
/// let sampling = SamplingConfig::builder()
///     .temperature(0.3)
///     .max_output_tokens(Some(256))
///     .build()
///     .unwrap();
/// assert_eq!(*sampling.temperature(), 0.3);
/// assert_eq!(*sampling.max_output_tokens(), Some(256));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(default)]
pub struct SamplingConfig {
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    temperature: f32,
    /// Output token cap, if any
    #[serde(default)]
    max_output_tokens: Option<u32>,
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_output_tokens: None,
        }
    }
}

impl SamplingConfig {
    /// Creates a new sampling config builder.
    pub fn builder() -> SamplingConfigBuilder {
        SamplingConfigBuilder::default()
    }

    /// Config with the given temperature and no token cap.
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature,
            max_output_tokens: None,
        }
    }
}
