//! Writers' Room - multi-agent screenplay writing.
//!
//! Give the room a theme and it casts characters, plans scenes as a
//! director, performs them turn by turn as a cast of actors, and keeps a
//! running summary of the story so far. The result is a screenplay that
//! can be exported as Fountain or plain text.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use writers_room::{ExportFormat, WritersRoomConfig, connect, export};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let room = connect(WritersRoomConfig::load()?)?;
//!
//!     room.initialize("A jazz trio stranded at a border checkpoint").await?;
//!     room.start_writing().await?;
//!
//!     let story = room.snapshot().into_story();
//!     println!("{}", export(ExportFormat::Fountain, &story.script_lines));
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `writers_room_error` - Error types
//! - `writers_room_core` - Story, scene, script and policy types
//! - `writers_room_interface` - `AgentClient` and `WritersRoomDriver` traits
//! - `writers_room_config` - Layered TOML and environment configuration
//! - `writers_room_models` - OpenAI-compatible driver
//! - `writers_room_narrative` - Orchestrator, turn engine and narrative store
//!
//! This crate re-exports everything for convenience.

pub use writers_room_config::*;
pub use writers_room_core::*;
pub use writers_room_error::*;
pub use writers_room_interface::*;
pub use writers_room_models::OpenAICompatibleClient;
pub use writers_room_narrative::*;

mod telemetry;

pub use telemetry::init_logging;

/// Orchestrator backed by the OpenAI-compatible driver.
pub type WritersRoom = Orchestrator<StructuredAgentClient<OpenAICompatibleClient>>;

/// Build an orchestrator for the configured provider.
///
/// # Errors
///
/// Fails if the configuration is invalid or the provider's API key
/// variable is unset.
pub fn connect(config: WritersRoomConfig) -> WritersRoomResult<WritersRoom> {
    config.validate()?;
    let driver = OpenAICompatibleClient::from_config(config.provider())?;
    tracing::info!(
        provider = driver.provider_name(),
        model = driver.model_name(),
        "Connected writers' room"
    );
    Ok(Orchestrator::new(StructuredAgentClient::new(driver), config))
}
