//! Trait definitions for the writers' room.
//!
//! Two seams live here:
//! - [`WritersRoomDriver`]: a raw text-generation backend
//! - [`AgentClient`]: a role-aware client returning typed agent outputs
//!
//! The orchestrator depends only on [`AgentClient`], so tests can script
//! every agent response without a network.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod agent;
mod driver;

pub use agent::{AgentClient, AgentOutput, AgentRequest, OutputShape};
pub use driver::WritersRoomDriver;
