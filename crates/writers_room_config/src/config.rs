//! Top-level configuration and layered loading.

use crate::{CastingConfig, PolicyConfig, ProviderConfig, SamplingTable};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use writers_room_core::{PacingConfig, TurnPolicy};
use writers_room_error::{ConfigError, WritersRoomResult};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../writers_room.toml");

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "WRITERS_ROOM";

/// Everything the orchestrator and the model client need to run.
///
/// # Example
///
/// ```no_run
/// use writers_room_config::WritersRoomConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = WritersRoomConfig::load()?;
/// println!("Model: {}", config.provider().model());
/// println!("Turn cap: {}", config.turns().max_turns());
/// # Ok(())
/// # }
/// ```
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct WritersRoomConfig {
    /// Model provider connection
    #[serde(default)]
    provider: ProviderConfig,
    /// Sampling per agent output shape
    #[serde(default)]
    sampling: SamplingTable,
    /// Casting
    #[serde(default)]
    casting: CastingConfig,
    /// Acting loop bounds
    #[serde(default)]
    turns: TurnPolicy,
    /// Activity pacing
    #[serde(default)]
    pacing: PacingConfig,
    /// Failure and resume policies
    #[serde(default)]
    policy: PolicyConfig,
}

impl WritersRoomConfig {
    /// Load configuration with precedence: env > current dir > home dir > bundled default.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> WritersRoomResult<Self> {
        debug!(
            "Loading configuration with precedence: env > current dir > home dir > bundled defaults"
        );

        let mut files = Vec::new();
        if let Some(home) = dirs::home_dir() {
            files.push(home.join(".config/writers_room/writers_room.toml"));
        }
        files.push(PathBuf::from("writers_room.toml"));

        Self::layered(&files, None)
    }

    /// Load the bundled defaults overlaid with one explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, cannot be parsed, or fails validation.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> WritersRoomResult<Self> {
        debug!("Loading configuration from file");

        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::not_found(path).into());
        }

        Self::layered(&[path.to_path_buf()], None)
    }

    /// Build from bundled defaults, optional files in order, then the environment.
    ///
    /// `env` replaces the process environment when given.
    pub(crate) fn layered(
        files: &[PathBuf],
        env: Option<HashMap<String, String>>,
    ) -> WritersRoomResult<Self> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        for file in files {
            builder = builder.add_source(File::from(file.as_path()).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first violated constraint.
    pub fn validate(&self) -> WritersRoomResult<()> {
        let turns = &self.turns;
        if *turns.min_turns() == 0 {
            return Err(ConfigError::invalid_field("turns.min_turns", "must be at least 1").into());
        }
        if turns.max_turns() < turns.min_turns() {
            return Err(ConfigError::invalid_field(
                "turns.max_turns",
                format!(
                    "({}) must not be below turns.min_turns ({})",
                    turns.max_turns(),
                    turns.min_turns()
                ),
            )
            .into());
        }
        if *turns.dialogue_window() == 0 {
            return Err(
                ConfigError::invalid_field("turns.dialogue_window", "must be at least 1").into(),
            );
        }
        if *turns.judgment_window() == 0 {
            return Err(
                ConfigError::invalid_field("turns.judgment_window", "must be at least 1").into(),
            );
        }
        if *self.casting.cast_size() == 0 {
            return Err(
                ConfigError::invalid_field("casting.cast_size", "must be at least 1").into(),
            );
        }
        if self.provider.base_url().trim().is_empty() {
            return Err(ConfigError::invalid_field("provider.base_url", "must not be empty").into());
        }
        Ok(())
    }
}
