//! Cast members.

use serde::{Deserialize, Serialize};

/// A character cast for the session.
///
/// Immutable once cast. Downstream components refer to characters by `id`
/// and match scene membership by `name`.
///
/// # Examples
///
/// ```
/// use writers_room_core::{Character, CharacterProfile};
///
/// let profile = CharacterProfile {
///     name: "Mara Voss".to_string(),
///     bio: "A retired harbor pilot.".to_string(),
///     personality_traits: vec!["stubborn".to_string(), "loyal".to_string()],
///     speaking_style: "Clipped nautical slang".to_string(),
/// };
/// let mara = profile.into_character(1);
/// assert_eq!(mara.id, "char_1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Character {
    /// Stable identifier for the session
    pub id: String,
    /// Display name, also used in scene membership lists
    pub name: String,
    /// Short background
    pub bio: String,
    /// Ordered personality traits
    pub personality_traits: Vec<String>,
    /// How the character talks
    pub speaking_style: String,
}

/// A character as proposed by the casting agent, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterProfile {
    /// Display name
    pub name: String,
    /// Short background
    pub bio: String,
    /// Ordered personality traits
    #[serde(default)]
    pub personality_traits: Vec<String>,
    /// How the character talks
    #[serde(default)]
    pub speaking_style: String,
}

impl CharacterProfile {
    /// Assign the 1-based roster position as a stable id.
    pub fn into_character(self, position: usize) -> Character {
        Character {
            id: format!("char_{}", position),
            name: self.name,
            bio: self.bio,
            personality_traits: self.personality_traits,
            speaking_style: self.speaking_style,
        }
    }
}
