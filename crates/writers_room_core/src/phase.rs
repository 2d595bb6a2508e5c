//! Orchestrator lifecycle phases.

use serde::{Deserialize, Serialize};

/// The orchestrator's current phase.
///
/// One phase is active at a time. The value doubles as control state and as
/// the status shown to the user.
///
/// # Examples
///
/// ```
/// use writers_room_core::OrchestratorPhase;
///
/// assert_eq!(OrchestratorPhase::PlanningScene.to_string(), "planning_scene");
/// assert!(OrchestratorPhase::Completed.is_terminal());
/// assert!(OrchestratorPhase::Acting.is_looping());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrchestratorPhase {
    /// Nothing has happened yet
    #[default]
    Idle,
    /// Session setup has started
    Initializing,
    /// Characters are being generated, or casting has finished and writing has not started
    Casting,
    /// The director is planning the next scene
    PlanningScene,
    /// Actors are performing the scene
    Acting,
    /// The finished scene is being summarized
    Summarizing,
    /// The final scene has been written
    Completed,
    /// Writing is suspended
    Paused,
    /// An unrecovered failure occurred
    Error,
}

impl OrchestratorPhase {
    /// Phases that only a reset leaves.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }

    /// Phases of the per-scene director loop.
    pub fn is_looping(self) -> bool {
        matches!(self, Self::PlanningScene | Self::Acting | Self::Summarizing)
    }
}
