// src/services/mod.rs

//! Portal API access and per-resource watcher wiring.

mod portal;
mod watchers;

pub use portal::{EndpointFeed, PortalClient};
pub use watchers::PortalWatchers;
