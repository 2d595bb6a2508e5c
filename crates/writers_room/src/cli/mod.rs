//! Command-line interface module.

mod commands;
mod run;

pub use commands::{Cli, Commands, WriteArgs};
pub use run::{show_config, write_screenplay};
