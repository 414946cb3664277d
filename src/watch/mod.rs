// src/watch/mod.rs

//! Generic snapshot-diff watch engine.
//!
//! [`ResourceWatcher`] owns the poll loop, the retained snapshot, and the
//! listener registry for one resource collection. Everything
//! resource-specific comes in through two seams: the record type's
//! [`Tracked`] impl (identity, comparison fields, ordering timestamp) and
//! a [`FetchCollection`] adapter supplying the full collection.

mod diff;
mod events;
mod watcher;

pub use diff::{DiffOutcome, diff_snapshots};
pub use events::{ChangeKind, ListenerId};
pub use watcher::{PollStats, ResourceWatcher};

use async_trait::async_trait;

use crate::error::Result;

/// A record type whose collection can be watched for changes.
pub trait Tracked: Clone + Send + Sync + 'static {
    /// Stable identity of a record across polls.
    type Key: std::hash::Hash + Eq + Clone + Send + Sync + std::fmt::Debug;

    /// Resource name, used for logging and registry lookup.
    const RESOURCE: &'static str;

    /// Extract the identity key.
    fn key(&self) -> Self::Key;

    /// Whether a record already present in the snapshot counts as
    /// updated. Comparison fields are resource-specific; each record type
    /// decides which of its fields matter.
    fn changed_from(&self, previous: &Self) -> bool;

    /// Timestamp-like field used to order notifications newest-first.
    /// Ordering never affects diff correctness.
    fn posted_at(&self) -> &str;
}

/// Source of the full current collection for one resource.
#[async_trait]
pub trait FetchCollection<R>: Send + Sync {
    /// Fetch the full collection. Any error abandons the current poll
    /// cycle; the previous snapshot is kept.
    async fn fetch(&self) -> Result<Vec<R>>;
}

/// Object-safe lifecycle surface shared by all watchers, so a registry
/// can address them uniformly regardless of record type.
#[async_trait]
pub trait Watch: Send + Sync {
    /// Resource name this watcher covers.
    fn resource(&self) -> &'static str;

    /// Begin polling. No-op if already running.
    fn start(&self);

    /// Request the poll loop to end after its current iteration.
    fn stop(&self);

    /// Whether the poll loop is active.
    fn is_running(&self) -> bool;

    /// Run one fetch-and-diff cycle outside the regular interval.
    async fn check_now(&self);
}
