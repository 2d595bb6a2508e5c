//! Core data types for the writers' room.
//!
//! This crate provides the plain data shared by every other crate: the cast,
//! scene plans and summaries, the rendered script, the aggregate story state,
//! the activity log, orchestration policies, and the request/response types
//! exchanged with a text-generation driver.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod activity;
mod character;
mod dialogue;
mod message;
mod output;
mod phase;
mod policy;
mod request;
mod role;
mod sampling;
mod scene;
mod script;
mod session;
mod story;

pub use activity::{ActivityLog, AgentRole, LogKind};
pub use character::{Character, CharacterProfile};
pub use dialogue::{DialogueLine, SceneEndJudgment};
pub use message::Message;
pub use output::Output;
pub use phase::OrchestratorPhase;
pub use policy::{
    DialogueFailurePolicy, PacingConfig, PacingConfigBuilder, ResumeMode, TurnPolicy,
    TurnPolicyBuilder,
};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use sampling::{SamplingConfig, SamplingConfigBuilder};
pub use scene::{ScenePlan, SceneRecord, SceneSummary, SummaryDraft};
pub use script::ScriptLine;
pub use session::SessionSnapshot;
pub use story::StoryState;
