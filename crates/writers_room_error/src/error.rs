//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, JsonError, OrchestrationError};

/// Every error condition the workspace can surface.
///
/// # Examples
///
/// ```
/// use writers_room_error::{WritersRoomError, JsonError};
///
/// let json_err = JsonError::new("unexpected end of input");
/// let err: WritersRoomError = json_err.into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum WritersRoomErrorKind {
    /// Model invocation error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Fatal orchestration error
    #[from(OrchestrationError)]
    Orchestration(OrchestrationError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Writers' room error with kind discrimination.
///
/// # Examples
///
/// ```
/// use writers_room_error::{ConfigError, WritersRoomErrorKind, WritersRoomResult};
///
/// fn might_fail() -> WritersRoomResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), WritersRoomErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Writers' Room Error: {}", _0)]
pub struct WritersRoomError(Box<WritersRoomErrorKind>);

impl WritersRoomError {
    /// Create a new error from a kind.
    pub fn new(kind: WritersRoomErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &WritersRoomErrorKind {
        &self.0
    }

    /// The orchestration error inside, if this is one.
    pub fn as_orchestration(&self) -> Option<&OrchestrationError> {
        match self.kind() {
            WritersRoomErrorKind::Orchestration(err) => Some(err),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to WritersRoomErrorKind
impl<T> From<T> for WritersRoomError
where
    T: Into<WritersRoomErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for writers' room operations.
pub type WritersRoomResult<T> = std::result::Result<T, WritersRoomError>;
