//! Scene plans, records and summaries.

use serde::{Deserialize, Serialize};

/// The director's plan for one scene.
///
/// Produced once per scene and read-only afterward. `is_final_scene` is the
/// only signal that ends the story.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenePlan {
    /// 1-based, strictly sequential
    pub scene_number: u32,
    /// Slug line, e.g. "INT. DETECTIVE'S OFFICE - NIGHT"
    pub heading: String,
    /// Description of the location
    pub setting: String,
    /// Dramatic goal of the scene
    pub objective: String,
    /// Names of the characters expected in the scene
    pub characters_present: Vec<String>,
    /// Emotional tone
    pub mood: String,
    /// Action line that opens the scene
    pub opening_action: String,
    /// Whether the story ends after this scene
    #[serde(default)]
    pub is_final_scene: bool,
}

impl ScenePlan {
    /// Whether the named character is expected in this scene.
    pub fn features(&self, name: &str) -> bool {
        self.characters_present.iter().any(|present| present == name)
    }
}

/// A planned scene as recorded in the story state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneRecord {
    /// Identifier of the form `scene_N`
    pub id: String,
    /// The plan the scene was shot from
    pub plan: ScenePlan,
}

impl SceneRecord {
    /// Record a plan under its canonical id.
    pub fn new(plan: ScenePlan) -> Self {
        Self {
            id: Self::id_for(plan.scene_number),
            plan,
        }
    }

    /// Canonical id for a scene number.
    pub fn id_for(scene_number: u32) -> String {
        format!("scene_{}", scene_number)
    }
}

/// Compressed memory of a finished scene.
///
/// Summaries are the only context the planner has of prior scenes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneSummary {
    /// Id of the summarized scene
    pub scene_id: String,
    /// Number of the summarized scene
    pub scene_number: u32,
    /// Short prose summary
    pub summary: String,
    /// Ordered key events
    pub key_events: Vec<String>,
}

impl SceneSummary {
    /// Summary used when the summarizer fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use writers_room_core::SceneSummary;
    ///
    /// let fallback = SceneSummary::fallback(3);
    /// assert_eq!(fallback.summary, "Scene 3 completed");
    /// assert_eq!(fallback.key_events.len(), 1);
    /// ```
    pub fn fallback(scene_number: u32) -> Self {
        Self {
            scene_id: SceneRecord::id_for(scene_number),
            scene_number,
            summary: format!("Scene {} completed", scene_number),
            key_events: vec!["Scene completed".to_string()],
        }
    }
}

/// Summary content returned by the summarizer agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SummaryDraft {
    /// Short prose summary
    pub summary: String,
    /// Ordered key events
    #[serde(default)]
    pub key_events: Vec<String>,
}

impl SummaryDraft {
    /// Attach the draft to a scene.
    pub fn into_summary(self, scene_number: u32) -> SceneSummary {
        SceneSummary {
            scene_id: SceneRecord::id_for(scene_number),
            scene_number,
            summary: self.summary,
            key_events: self.key_events,
        }
    }
}
