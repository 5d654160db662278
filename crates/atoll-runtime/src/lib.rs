//! The chunk store: lazy generation, block edits, view streaming and mesh caching.
#![forbid(unsafe_code)]

pub mod config;
mod edit;
mod stream;
mod world;

pub use config::{Edits, MAX_RADIUS, RuntimeConfig, Streaming};
pub use stream::StreamReport;
pub use world::World;
