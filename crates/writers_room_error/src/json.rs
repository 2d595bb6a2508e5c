//! JSON error types.

/// Characters of the offending input kept in a parse error.
const PREVIEW_CHARS: usize = 100;

/// Failure to find or decode the JSON document in a model response.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use writers_room_error::JsonError;
    ///
    /// let err = JsonError::new("trailing comma");
    /// assert!(err.message.contains("trailing"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// The response held no object or array, fenced or bare.
    ///
    /// # Examples
    ///
    /// ```
    /// use writers_room_error::JsonError;
    ///
    /// let err = JsonError::no_document(42);
    /// assert_eq!(err.message, "No JSON found in response (length: 42)");
    /// ```
    #[track_caller]
    pub fn no_document(response_len: usize) -> Self {
        Self::new(format!("No JSON found in response (length: {})", response_len))
    }

    /// A document was found but did not decode into the expected type.
    ///
    /// The message keeps the first hundred characters of the input.
    ///
    /// # Examples
    ///
    /// ```
    /// use writers_room_error::JsonError;
    ///
    /// let err = JsonError::undecodable("missing field `heading`", r#"{"mood": "tense"}"#);
    /// assert!(err.message.contains("missing field `heading`"));
    /// assert!(err.message.contains(r#"{"mood": "tense"}"#));
    /// ```
    #[track_caller]
    pub fn undecodable(reason: impl std::fmt::Display, input: &str) -> Self {
        let preview = input.chars().take(PREVIEW_CHARS).collect::<String>();
        Self::new(format!("Failed to parse JSON: {} (JSON: {}...)", reason, preview))
    }
}
