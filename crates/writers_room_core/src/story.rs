//! The aggregate story state.

use crate::{Character, SceneRecord, SceneSummary, ScriptLine};
use serde::{Deserialize, Serialize};

/// Everything written so far in a session.
///
/// Mutated only through the narrative store. `current_scene_index` counts
/// scenes planned so far; scene numbers are gap-free from 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryState {
    /// The user's premise
    pub theme: String,
    /// The cast, in casting order
    pub characters: Vec<Character>,
    /// Scenes planned so far, in order
    pub scenes: Vec<SceneRecord>,
    /// Number of scenes planned so far
    pub current_scene_index: u32,
    /// Set once the final scene has been written
    pub is_finished: bool,
    /// Per-scene summaries, in scene order
    pub summaries: Vec<SceneSummary>,
    /// Running story synopsis, one paragraph per scene
    pub summary_so_far: String,
    /// The rendered screenplay
    pub script_lines: Vec<ScriptLine>,
}

impl StoryState {
    /// Empty state for a theme.
    pub fn with_theme(theme: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
            ..Self::default()
        }
    }

    /// Look up a cast member by id.
    pub fn character(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|character| character.id == id)
    }

    /// The most recently planned scene.
    pub fn last_scene(&self) -> Option<&SceneRecord> {
        self.scenes.last()
    }

    /// Number of spoken lines in the script.
    pub fn dialogue_count(&self) -> usize {
        self.script_lines
            .iter()
            .filter(|line| line.is_dialogue())
            .count()
    }
}
