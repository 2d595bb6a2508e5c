//! Error types for the writers' room.
//!
//! This crate provides the foundation error types used throughout the workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Three families matter to the orchestrator:
//! - [`GenerationError`]: the model call failed or returned something unusable
//! - [`OrchestrationError`]: a fatal condition that halts the session
//! - [`SoftError`]: a condition absorbed locally with a safe default
//!
//! # Examples
//!
//! ```
//! use writers_room_error::{GenerationError, GenerationErrorKind, WritersRoomResult};
//!
//! fn call_model() -> WritersRoomResult<String> {
//!     Err(GenerationError::new(GenerationErrorKind::EmptyResponse))?
//! }
//!
//! assert!(call_model().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod json;
mod orchestration;
mod soft;

pub use config::ConfigError;
pub use error::{WritersRoomError, WritersRoomErrorKind, WritersRoomResult};
pub use generation::{GenerationError, GenerationErrorKind, GenerationResult};
pub use json::JsonError;
pub use orchestration::{OrchestrationError, OrchestrationErrorKind};
pub use soft::{SoftError, SoftErrorKind};
