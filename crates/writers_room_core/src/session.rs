//! Point-in-time view of an orchestration session.

use crate::{ActivityLog, OrchestratorPhase, StoryState};
use serde::{Deserialize, Serialize};

/// Copy of everything a user-facing surface renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct SessionSnapshot {
    /// Story written so far
    story: StoryState,
    /// Current phase
    phase: OrchestratorPhase,
    /// Whether writing is suspended
    is_paused: bool,
    /// Last recorded error message
    error: Option<String>,
    /// Activity entries, oldest first
    activity: Vec<ActivityLog>,
}

impl SessionSnapshot {
    /// Assemble a snapshot.
    pub fn new(
        story: StoryState,
        phase: OrchestratorPhase,
        is_paused: bool,
        error: Option<String>,
        activity: Vec<ActivityLog>,
    ) -> Self {
        Self {
            story,
            phase,
            is_paused,
            error,
            activity,
        }
    }

    /// Take ownership of the story.
    pub fn into_story(self) -> StoryState {
        self.story
    }
}
