//! Structured outputs of the actor and judgment agents.

use serde::{Deserialize, Serialize};

/// A single utterance produced for a character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DialogueLine {
    /// The spoken text
    pub dialogue: String,
    /// Optional parenthetical action
    #[serde(default)]
    pub action: Option<String>,
}

impl DialogueLine {
    /// Text as it appears in the script.
    ///
    /// # Examples
    ///
    /// ```
    /// use writers_room_core::DialogueLine;
    ///
    /// let line = DialogueLine {
    ///     dialogue: "I never said that.".to_string(),
    ///     action: Some("hesitating".to_string()),
    /// };
    /// assert_eq!(line.script_text(), "(hesitating) I never said that.");
    /// ```
    pub fn script_text(&self) -> String {
        match self.action.as_deref().map(str::trim) {
            Some(action) if !action.is_empty() => format!("({}) {}", action, self.dialogue),
            _ => self.dialogue.clone(),
        }
    }
}

/// The director's verdict on whether a scene has run its course.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneEndJudgment {
    /// Whether to cut the scene now
    pub should_end: bool,
    /// Short justification
    #[serde(default)]
    pub reason: String,
}
