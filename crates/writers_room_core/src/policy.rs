//! Turn-taking, pacing and failure policies.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounds of the per-scene acting loop.
///
/// A scene never ends on the director's judgment before `min_turns`, always
/// ends at `max_turns`, and in between asks the director after every line.
///
/// # Examples
///
/// ```
/// use writers_room_core::TurnPolicy;
///
/// let policy = TurnPolicy::default();
/// assert_eq!(*policy.min_turns(), 8);
/// assert_eq!(*policy.max_turns(), 12);
/// assert_eq!(policy.context_window(), 8);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(default)]
pub struct TurnPolicy {
    /// Turns before the director may call the scene
    #[serde(default = "default_min_turns")]
    min_turns: u32,
    /// Hard cap on turns per scene
    #[serde(default = "default_max_turns")]
    max_turns: u32,
    /// Recent lines shown to an actor
    #[serde(default = "default_dialogue_window")]
    dialogue_window: usize,
    /// Recent lines shown to the director for the end-of-scene call
    #[serde(default = "default_judgment_window")]
    judgment_window: usize,
}

fn default_min_turns() -> u32 {
    8
}

fn default_max_turns() -> u32 {
    12
}

fn default_dialogue_window() -> usize {
    6
}

fn default_judgment_window() -> usize {
    8
}

impl Default for TurnPolicy {
    fn default() -> Self {
        Self {
            min_turns: default_min_turns(),
            max_turns: default_max_turns(),
            dialogue_window: default_dialogue_window(),
            judgment_window: default_judgment_window(),
        }
    }
}

impl TurnPolicy {
    /// Creates a new turn policy builder.
    pub fn builder() -> TurnPolicyBuilder {
        TurnPolicyBuilder::default()
    }

    /// Number of recent lines worth retaining during a scene.
    pub fn context_window(&self) -> usize {
        self.dialogue_window.max(self.judgment_window)
    }
}

/// Delays that pace the visible activity stream.
///
/// They carry no correctness meaning; zero disables them.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(default)]
pub struct PacingConfig {
    /// Pause between dialogue turns, in milliseconds
    #[serde(default = "default_turn_delay_ms")]
    turn_delay_ms: u64,
    /// Pause between scenes, in milliseconds
    #[serde(default = "default_scene_delay_ms")]
    scene_delay_ms: u64,
}

fn default_turn_delay_ms() -> u64 {
    500
}

fn default_scene_delay_ms() -> u64 {
    1000
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            turn_delay_ms: default_turn_delay_ms(),
            scene_delay_ms: default_scene_delay_ms(),
        }
    }
}

impl PacingConfig {
    /// Creates a new pacing config builder.
    pub fn builder() -> PacingConfigBuilder {
        PacingConfigBuilder::default()
    }

    /// No delays at all, for headless runs and tests.
    pub fn immediate() -> Self {
        Self {
            turn_delay_ms: 0,
            scene_delay_ms: 0,
        }
    }

    /// Delay between turns.
    pub fn turn_delay(&self) -> Duration {
        Duration::from_millis(self.turn_delay_ms)
    }

    /// Delay between scenes.
    pub fn scene_delay(&self) -> Duration {
        Duration::from_millis(self.scene_delay_ms)
    }
}

/// What to do when an actor fails to produce a line.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DialogueFailurePolicy {
    /// Halt the session with an error
    #[default]
    Abort,
    /// Log a soft error and move on to the next turn
    SkipTurn,
}

/// How `resume` treats a scene interrupted by `pause`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResumeMode {
    /// Keep the plan and turn state and continue the same scene
    #[default]
    ContinueScene,
    /// Plan the interrupted scene again from scratch
    ReplanScene,
}
