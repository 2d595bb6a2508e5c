//! Errors raised by a model invocation.

/// Specific conditions under which a generation call fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// The request never produced an HTTP response.
    #[display("Transport failure: {}", _0)]
    Transport(String),

    /// The provider answered with a non-success status.
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Body or reason returned by the provider
        message: String,
    },

    /// The API key environment variable is not set.
    #[display("Missing credentials: {} is not set", _0)]
    MissingCredentials(String),

    /// The provider returned no usable text.
    #[display("Model returned an empty response")]
    EmptyResponse,

    /// The returned text could not be parsed into, or validated as, the requested shape.
    #[display("Malformed {} output: {}", shape, reason)]
    MalformedOutput {
        /// Name of the requested output shape
        shape: String,
        /// Why parsing or validation failed
        reason: String,
        /// Raw unparsed model text, kept for diagnostics
        raw: String,
    },

    /// The client returned a different variant than the one requested.
    #[display("Expected {} output, got {}", expected, actual)]
    ShapeMismatch {
        /// Requested output shape
        expected: String,
        /// Shape actually returned
        actual: String,
    },
}

/// Generation error with location tracking.
///
/// # Examples
///
/// ```
/// use writers_room_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::MalformedOutput {
///     shape: "scene_plan".to_string(),
///     reason: "missing field `heading`".to_string(),
///     raw: "{\"setting\": \"a dock\"}".to_string(),
/// });
/// assert_eq!(err.raw_text(), Some("{\"setting\": \"a dock\"}"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The specific error condition
    pub kind: GenerationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a [`GenerationErrorKind::MalformedOutput`] error.
    #[track_caller]
    pub fn malformed(
        shape: impl Into<String>,
        reason: impl Into<String>,
        raw: impl Into<String>,
    ) -> Self {
        Self::new(GenerationErrorKind::MalformedOutput {
            shape: shape.into(),
            reason: reason.into(),
            raw: raw.into(),
        })
    }

    /// Raw model text attached to the error, if any.
    pub fn raw_text(&self) -> Option<&str> {
        match &self.kind {
            GenerationErrorKind::MalformedOutput { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// Result type for generation calls.
pub type GenerationResult<T> = Result<T, GenerationError>;
