//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Role of a message sent to a text-generation driver.
///
/// # Examples
///
/// ```
/// use writers_room_core::Role;
///
/// assert_eq!(Role::System.to_string(), "system");
/// assert_ne!(Role::User, Role::Assistant);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Agent instructions
    System,
    /// The orchestrator's prompt
    User,
    /// Model replies
    Assistant,
}
