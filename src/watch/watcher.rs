// src/watch/watcher.rs

//! Poll loop, retained snapshot, and lifecycle for one resource.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::events::{self, ListenerSet};
use super::{ChangeKind, FetchCollection, ListenerId, Tracked, Watch, diff_snapshots};

/// Counters describing a watcher's polling history.
#[derive(Debug, Clone, Default)]
pub struct PollStats {
    /// Completed fetch-and-diff cycles, successful or not
    pub cycles: u64,
    /// Cycles abandoned because the fetch failed
    pub failures: u64,
    /// `New` events dispatched
    pub new_events: u64,
    /// `Updated` events dispatched
    pub updated_events: u64,
    /// Time of the last successful cycle
    pub last_success: Option<DateTime<Utc>>,
}

struct Inner<R: Tracked> {
    feed: Arc<dyn FetchCollection<R>>,
    interval: Duration,
    /// Cleared by `stop`, observed at the top of each loop iteration.
    running: AtomicBool,
    /// Bumped on every `start`; a loop whose epoch is stale exits, so a
    /// quick stop/start can never leave two live loops.
    epoch: AtomicU64,
    /// Serializes whole cycles so the loop and `check_now` never
    /// interleave a diff.
    cycle: tokio::sync::Mutex<()>,
    /// `None` until the first successful fetch.
    snapshot: Mutex<Option<Vec<R>>>,
    listeners: Mutex<ListenerSet<R>>,
    stats: Mutex<PollStats>,
}

/// Watches one remote collection and notifies listeners of changes.
///
/// Cheap to clone; clones share the snapshot, listener registry, and poll
/// loop. [`crate::services::PortalWatchers`] keeps the one instance per
/// resource.
pub struct ResourceWatcher<R: Tracked> {
    inner: Arc<Inner<R>>,
}

impl<R: Tracked> Clone for ResourceWatcher<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<R: Tracked> ResourceWatcher<R> {
    /// Create a watcher over `feed`, polling every `interval` once
    /// started. The interval is the delay between the end of one cycle
    /// and the start of the next.
    pub fn new(feed: Arc<dyn FetchCollection<R>>, interval: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                feed,
                interval,
                running: AtomicBool::new(false),
                epoch: AtomicU64::new(0),
                cycle: tokio::sync::Mutex::new(()),
                snapshot: Mutex::new(None),
                listeners: Mutex::new(ListenerSet::new()),
                stats: Mutex::new(PollStats::default()),
            }),
        }
    }

    /// Begin polling. Idempotent: a second call while running is a no-op.
    pub fn start(&self) {
        if self.inner.running.swap(true, Ordering::SeqCst) {
            return;
        }
        let epoch = self.inner.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            log::info!("{}: polling started", R::RESOURCE);
            loop {
                if !inner.running.load(Ordering::SeqCst)
                    || inner.epoch.load(Ordering::SeqCst) != epoch
                {
                    break;
                }
                inner.run_cycle().await;
                tokio::time::sleep(inner.interval).await;
            }
            log::info!("{}: polling stopped", R::RESOURCE);
        });
    }

    /// Request the loop to end after its current iteration. Idempotent;
    /// a no-op on an idle watcher. The retained snapshot is kept, so a
    /// later `start` diffs against it rather than re-baselining.
    pub fn stop(&self) {
        self.inner.running.store(false, Ordering::SeqCst);
    }

    /// Whether the poll loop is active.
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::SeqCst)
    }

    /// Run one fetch-and-diff cycle outside the regular interval, e.g.
    /// right after submitting a record. Same algorithm and same snapshot
    /// as the loop; works whether or not polling is running.
    pub async fn check_now(&self) {
        self.inner.run_cycle().await;
    }

    /// Register a callback for one kind of change. Allowed at any time,
    /// running or not, including from inside another callback.
    pub fn add_listener(
        &self,
        kind: ChangeKind,
        callback: impl Fn(&R) + Send + Sync + 'static,
    ) -> ListenerId {
        lock(&self.inner.listeners).add(kind, Arc::new(callback))
    }

    /// Detach a previously registered callback. Returns `false` if the
    /// token was already removed.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        lock(&self.inner.listeners).remove(id)
    }

    /// The last retained snapshot; empty before the first successful
    /// fetch. Synchronous, for callers outside the event flow.
    pub fn current_data(&self) -> Vec<R> {
        lock(&self.inner.snapshot).clone().unwrap_or_default()
    }

    /// Polling counters for this watcher.
    pub fn stats(&self) -> PollStats {
        lock(&self.inner.stats).clone()
    }
}

impl<R: Tracked> Inner<R> {
    async fn run_cycle(&self) {
        let _cycle = self.cycle.lock().await;

        let fetched = match self.feed.fetch().await {
            Ok(records) => records,
            Err(e) => {
                log::warn!("{}: poll failed, keeping previous snapshot: {e}", R::RESOURCE);
                let mut stats = lock(&self.stats);
                stats.cycles += 1;
                stats.failures += 1;
                return;
            }
        };

        let mut current = fetched;
        // Newest first, so notifications go out newest first.
        current.sort_by(|a, b| b.posted_at().cmp(a.posted_at()));

        let outcome = {
            let mut snapshot = lock(&self.snapshot);
            let outcome = match snapshot.take() {
                // First successful fetch is a baseline, not a change.
                None => {
                    log::debug!(
                        "{}: adopted baseline of {} records",
                        R::RESOURCE,
                        current.len()
                    );
                    None
                }
                Some(previous) => Some(diff_snapshots(&previous, &current)),
            };
            // Whole-collection replacement, not a merge.
            *snapshot = Some(current);
            outcome
        };

        let mut dispatched = (0u64, 0u64);
        if let Some(outcome) = outcome {
            if !outcome.removed.is_empty() {
                log::debug!(
                    "{}: {} records left the collection",
                    R::RESOURCE,
                    outcome.removed.len()
                );
            }
            for record in &outcome.added {
                let callbacks = lock(&self.listeners).for_kind(ChangeKind::New);
                events::dispatch(R::RESOURCE, ChangeKind::New, &callbacks, record);
            }
            for record in &outcome.updated {
                let callbacks = lock(&self.listeners).for_kind(ChangeKind::Updated);
                events::dispatch(R::RESOURCE, ChangeKind::Updated, &callbacks, record);
            }
            dispatched = (outcome.added.len() as u64, outcome.updated.len() as u64);
        }

        let mut stats = lock(&self.stats);
        stats.cycles += 1;
        stats.new_events += dispatched.0;
        stats.updated_events += dispatched.1;
        stats.last_success = Some(Utc::now());
    }
}

#[async_trait]
impl<R: Tracked> Watch for ResourceWatcher<R> {
    fn resource(&self) -> &'static str {
        R::RESOURCE
    }

    fn start(&self) {
        ResourceWatcher::start(self);
    }

    fn stop(&self) {
        ResourceWatcher::stop(self);
    }

    fn is_running(&self) -> bool {
        ResourceWatcher::is_running(self)
    }

    async fn check_now(&self) {
        ResourceWatcher::check_now(self).await;
    }
}
