//! Message types for driver conversations.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A text message in a driver conversation.
///
/// # Examples
///
/// ```
/// use writers_room_core::{Message, Role};
///
/// let message = Message::user("Plan scene 1.");
/// assert_eq!(message.role, Role::User);
/// assert_eq!(message.content, "Plan scene 1.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// Message text
    pub content: String,
}

impl Message {
    /// A system instruction.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// A user prompt.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}
