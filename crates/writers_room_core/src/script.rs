//! Rendered screenplay lines.

use serde::{Deserialize, Serialize};

/// One line of the rendered screenplay.
///
/// The script is an append-only sequence; insertion order is the canonical
/// script order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptLine {
    /// Title of the screenplay
    Header {
        /// Title text
        content: String,
    },
    /// Slug line opening a scene
    SceneHeading {
        /// Heading text
        content: String,
    },
    /// Stage direction
    Action {
        /// Action text
        content: String,
    },
    /// A spoken line
    Dialogue {
        /// What is said, possibly with a leading parenthetical
        content: String,
        /// Character name
        speaker: String,
        /// Character id
        character_id: String,
    },
}

impl ScriptLine {
    /// Text content of the line.
    pub fn content(&self) -> &str {
        match self {
            Self::Header { content }
            | Self::SceneHeading { content }
            | Self::Action { content }
            | Self::Dialogue { content, .. } => content,
        }
    }

    /// Speaker name for dialogue lines.
    pub fn speaker(&self) -> Option<&str> {
        match self {
            Self::Dialogue { speaker, .. } => Some(speaker),
            _ => None,
        }
    }

    /// Whether this is a spoken line.
    pub fn is_dialogue(&self) -> bool {
        matches!(self, Self::Dialogue { .. })
    }

    /// Render the line for a scene transcript.
    ///
    /// Dialogue becomes `"speaker: line"`; everything else is verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use writers_room_core::ScriptLine;
    ///
    /// let line = ScriptLine::Dialogue {
    ///     content: "Not tonight.".to_string(),
    ///     speaker: "Mara".to_string(),
    ///     character_id: "char_1".to_string(),
    /// };
    /// assert_eq!(line.transcript_text(), "Mara: Not tonight.");
    /// ```
    pub fn transcript_text(&self) -> String {
        match self {
            Self::Dialogue {
                content, speaker, ..
            } => format!("{}: {}", speaker, content),
            other => other.content().to_string(),
        }
    }
}
