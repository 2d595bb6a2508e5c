//! Activity log entries for the "behind the scenes" stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which agent produced an activity entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AgentRole {
    /// Scene planning and scene-end calls
    Director,
    /// A character delivering lines
    Actor,
    /// Scene summarization
    Summarizer,
    /// The orchestrator itself
    System,
}

/// What an activity entry describes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LogKind {
    /// Status notice
    Info,
    /// Something happened
    Action,
    /// An agent is working
    Thinking,
    /// A step finished
    Complete,
}

/// One entry in the append-only activity stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityLog {
    /// Unique id
    pub id: Uuid,
    /// When the entry was recorded
    pub timestamp: DateTime<Utc>,
    /// Producing agent
    pub agent: AgentRole,
    /// Character name for actor entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    /// Human-readable message
    pub message: String,
    /// Entry kind
    pub kind: LogKind,
}

impl ActivityLog {
    /// Create an entry stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use writers_room_core::{ActivityLog, AgentRole, LogKind};
    ///
    /// let entry = ActivityLog::new(AgentRole::Actor, LogKind::Thinking, "Mara is thinking...")
    ///     .with_agent_name("Mara");
    /// assert_eq!(entry.agent_name.as_deref(), Some("Mara"));
    /// ```
    pub fn new(agent: AgentRole, kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            agent,
            agent_name: None,
            message: message.into(),
            kind,
        }
    }

    /// Attach the character name.
    pub fn with_agent_name(mut self, name: impl Into<String>) -> Self {
        self.agent_name = Some(name.into());
        self
    }
}
