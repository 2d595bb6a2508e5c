//! Orchestration engine for the writers' room.
//!
//! This crate turns a theme into a screenplay by coordinating three agent
//! roles through a single director loop:
//!
//! - **Casting** generates the characters once per session
//! - **Scene planning** asks the director for each scene's plan
//! - **The turn engine** runs a scene's dialogue turn by turn
//! - **Summarization** compresses each finished scene for later planning
//!
//! All state lives in a [`NarrativeStore`] owned by the [`Orchestrator`];
//! hosts read snapshots and the activity stream and drive the session with
//! `initialize`, `start_writing`, `pause`, `resume` and `reset`.
//!
//! # Example
//!
//! ```rust,ignore
//! use writers_room_narrative::{Orchestrator, StructuredAgentClient};
//! use writers_room_models::OpenAICompatibleClient;
//! use writers_room_config::WritersRoomConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = WritersRoomConfig::load()?;
//! let driver = OpenAICompatibleClient::from_config(config.provider())?;
//! let orchestrator = Orchestrator::new(StructuredAgentClient::new(driver), config);
//!
//! orchestrator.initialize("Two rival chefs trapped in a snowed-in diner").await?;
//! orchestrator.start_writing().await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod agent_client;
mod cancellation;
mod casting;
mod export;
mod extraction;
mod orchestrator;
mod planner;
mod prompts;
mod random;
mod store;
mod summarizer;
mod turn_engine;

pub use agent_client::StructuredAgentClient;
pub use cancellation::StopToken;
pub use casting::cast_characters;
pub use export::{ExportFormat, export, format_fountain, format_plain_text};
pub use extraction::{extract_json, parse_json};
pub use orchestrator::Orchestrator;
pub use planner::ScenePlanner;
pub use prompts::{Prompt, json_example, render as render_prompt};
pub use random::{RandomSource, SeededRandom, SequenceRandom, ThreadRandom};
pub use store::{ACTIVITY_CHANNEL_CAPACITY, NarrativeStore, RunGuard, SceneProgress};
pub use summarizer::{SceneSummarizer, SummaryOutcome, transcript};
pub use turn_engine::{
    SceneOutcome, TerminationCheck, TurnEngine, TurnState, WrapReason, select_speaker,
    termination_check,
};
