//! Configuration error types.

use std::path::Path;

/// Configuration error with source location.
///
/// Validation failures carry the dotted key that failed, such as
/// `turns.max_turns`, so callers can point the user at the right setting.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Dotted configuration key at fault, when one is known
    pub field: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use writers_room_error::ConfigError;
    ///
    /// let err = ConfigError::new("max_turns must exceed min_turns");
    /// assert!(err.message.contains("max_turns"));
    /// assert!(err.field.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            field: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// A configuration value violates a constraint.
    ///
    /// # Examples
    ///
    /// ```
    /// use writers_room_error::ConfigError;
    ///
    /// let err = ConfigError::invalid_field("casting.cast_size", "must be at least 1");
    /// assert_eq!(err.field.as_deref(), Some("casting.cast_size"));
    /// assert_eq!(err.message, "casting.cast_size must be at least 1");
    /// ```
    #[track_caller]
    pub fn invalid_field(field: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        let field = field.into();
        let mut err = Self::new(format!("{} {}", field, reason));
        err.field = Some(field);
        err
    }

    /// An explicitly requested configuration file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use writers_room_error::ConfigError;
    ///
    /// let err = ConfigError::not_found("/tmp/missing_room.toml");
    /// assert!(err.message.contains("missing_room.toml"));
    /// ```
    #[track_caller]
    pub fn not_found(path: impl AsRef<Path>) -> Self {
        Self::new(format!("Configuration file not found: {}", path.as_ref().display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_field_display_names_the_key() {
        let err = ConfigError::invalid_field("provider.base_url", "must not be empty");
        let shown = err.to_string();
        assert!(shown.starts_with("Configuration Error: provider.base_url must not be empty"));
        assert!(shown.contains("config.rs"));
    }
}
