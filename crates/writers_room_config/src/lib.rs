//! Configuration for the writers' room.
//!
//! Settings are layered with the `config` crate. Later sources win:
//! 1. Bundled defaults (`writers_room.toml`, compiled in)
//! 2. `~/.config/writers_room/writers_room.toml`
//! 3. `./writers_room.toml`
//! 4. `WRITERS_ROOM__SECTION__KEY` environment variables

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod sections;

pub use config::WritersRoomConfig;
pub use sections::{CastingConfig, PolicyConfig, ProviderConfig, SamplingTable};
