//! Soft errors: failures absorbed with a safe default.

/// Conditions the orchestrator recovers from locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SoftErrorKind {
    /// Summarization failed; a fallback summary was substituted.
    #[display("Summary for scene {} fell back to default: {}", scene_number, reason)]
    SummaryFallback {
        /// Scene being summarized
        scene_number: u32,
        /// Underlying failure
        reason: String,
    },

    /// The end-of-scene judgment failed; the scene keeps running.
    #[display("Scene-end judgment after turn {} failed: {}", turn, reason)]
    JudgmentFallback {
        /// Turn count when the judgment was requested
        turn: u32,
        /// Underlying failure
        reason: String,
    },

    /// A dialogue turn was skipped under the skip-turn policy.
    #[display("Skipped turn {} for {}: {}", turn, character, reason)]
    TurnSkipped {
        /// Turn that produced no line
        turn: u32,
        /// Character whose line failed
        character: String,
        /// Underlying failure
        reason: String,
    },
}

/// Soft error with location tracking.
///
/// Soft errors are never propagated; they are logged and recorded in the
/// activity stream.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Soft Error: {} at line {} in {}", kind, line, file)]
pub struct SoftError {
    /// The specific error condition
    pub kind: SoftErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SoftError {
    /// Create a new SoftError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SoftErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
