// src/watch/events.rs

//! Listener registry and event fan-out.
//!
//! Listeners are registered per change kind and invoked synchronously in
//! registration order. A panicking listener is isolated and logged; the
//! remaining listeners still run.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// The kind of change a listener subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// A record whose key was not in the previous snapshot
    New,
    /// A known record whose comparison fields changed
    Updated,
}

impl ChangeKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ChangeKind::New => "new",
            ChangeKind::Updated => "updated",
        }
    }
}

/// Token identifying one listener registration.
///
/// Each registration is its own subscription; removing by token detaches
/// exactly that callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub(crate) type Callback<R> = Arc<dyn Fn(&R) + Send + Sync>;

/// Registration-ordered listener set for one resource.
pub(crate) struct ListenerSet<R> {
    next_id: u64,
    entries: Vec<(ListenerId, ChangeKind, Callback<R>)>,
}

impl<R> ListenerSet<R> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, kind: ChangeKind, callback: Callback<R>) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push((id, kind, callback));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Callbacks registered for `kind`, in registration order.
    ///
    /// Cloned out so the set's lock is not held during invocation and a
    /// callback may itself register or remove listeners.
    pub(crate) fn for_kind(&self, kind: ChangeKind) -> Vec<Callback<R>> {
        self.entries
            .iter()
            .filter(|(_, entry_kind, _)| *entry_kind == kind)
            .map(|(_, _, callback)| Arc::clone(callback))
            .collect()
    }
}

/// Invoke every callback with the record, isolating panics per listener.
pub(crate) fn dispatch<R>(resource: &str, kind: ChangeKind, callbacks: &[Callback<R>], record: &R) {
    for callback in callbacks {
        if panic::catch_unwind(AssertUnwindSafe(|| callback(record))).is_err() {
            log::warn!(
                "{resource}: a {} listener panicked; continuing with remaining listeners",
                kind.as_str()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn recorder(seen: &Arc<Mutex<Vec<String>>>, tag: &str) -> Callback<String> {
        let seen = Arc::clone(seen);
        let tag = tag.to_string();
        Arc::new(move |record: &String| {
            seen.lock().unwrap().push(format!("{tag}:{record}"));
        })
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut set = ListenerSet::new();
        set.add(ChangeKind::New, recorder(&seen, "first"));
        set.add(ChangeKind::New, recorder(&seen, "second"));
        set.add(ChangeKind::Updated, recorder(&seen, "other"));

        let callbacks = set.for_kind(ChangeKind::New);
        dispatch("items", ChangeKind::New, &callbacks, &"a".to_string());

        assert_eq!(*seen.lock().unwrap(), vec!["first:a", "second:a"]);
    }

    #[test]
    fn test_remove_listener() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut set = ListenerSet::new();
        let id = set.add(ChangeKind::New, recorder(&seen, "gone"));
        set.add(ChangeKind::New, recorder(&seen, "kept"));

        assert!(set.remove(id));
        assert!(!set.remove(id));

        let callbacks = set.for_kind(ChangeKind::New);
        dispatch("items", ChangeKind::New, &callbacks, &"a".to_string());

        assert_eq!(*seen.lock().unwrap(), vec!["kept:a"]);
    }

    #[test]
    fn test_panicking_listener_does_not_stop_fanout() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut set: ListenerSet<String> = ListenerSet::new();
        set.add(
            ChangeKind::New,
            Arc::new(|_: &String| panic!("listener failure")),
        );
        set.add(ChangeKind::New, recorder(&seen, "survivor"));

        let callbacks = set.for_kind(ChangeKind::New);
        dispatch("items", ChangeKind::New, &callbacks, &"a".to_string());

        assert_eq!(*seen.lock().unwrap(), vec!["survivor:a"]);
    }
}
