//! Fatal orchestration errors.

/// Conditions that halt a writing session.
///
/// Every variant is fatal: the session moves to the `error` phase and only a
/// reset recovers it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum OrchestrationErrorKind {
    /// Character generation failed.
    #[display("Casting failed: {}", _0)]
    Casting(String),

    /// The director could not plan a scene.
    #[display("Planning scene {} failed: {}", scene_number, message)]
    Planning {
        /// Scene being planned
        scene_number: u32,
        /// Underlying failure
        message: String,
    },

    /// An actor could not produce a line.
    #[display("Dialogue for {} failed: {}", character, message)]
    Dialogue {
        /// Character whose turn it was
        character: String,
        /// Underlying failure
        message: String,
    },

    /// Writing was started before casting.
    #[display("Characters must be cast before writing starts")]
    NotInitialized,

    /// Casting was requested on a session that already has a roster.
    #[display("Session already has a cast; reset before initializing again")]
    AlreadyInitialized,

    /// The session is in the error phase.
    #[display("Session failed earlier ({}); reset to start over", _0)]
    SessionFailed(String),

    /// The roster is empty so nobody can speak.
    #[display("No characters available to speak")]
    EmptyRoster,
}

impl OrchestrationErrorKind {
    /// Whether the condition ends the session.
    pub fn is_fatal(&self) -> bool {
        true
    }
}

/// Orchestration error with location tracking.
///
/// # Examples
///
/// ```
/// use writers_room_error::{OrchestrationError, OrchestrationErrorKind};
///
/// let err = OrchestrationError::new(OrchestrationErrorKind::NotInitialized);
/// assert!(err.is_fatal());
/// assert!(format!("{}", err).contains("cast"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Orchestration Error: {} at line {} in {}", kind, line, file)]
pub struct OrchestrationError {
    /// The specific error condition
    pub kind: OrchestrationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl OrchestrationError {
    /// Create a new OrchestrationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: OrchestrationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the error ends the session.
    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}
