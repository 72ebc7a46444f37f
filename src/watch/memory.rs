//! In-process watch source backed by a shared map.
//!
//! The embedding program (or a test) mutates the store through `upsert`
//! and `remove`; subscribers receive the corresponding events. This is
//! the reference implementation of the [`WatchSource`] contract. A real
//! deployment would put a remote-store adapter behind the same trait.

use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;
use tokio::sync::broadcast;

use crate::watch::{Resource, ResourceEvent, ResourceId, WatchSource};

const EVENT_BUFFER: usize = 64;

/// A [`WatchSource`] over an in-memory resource map.
pub struct MemoryWatchSource {
    store: DashMap<ResourceId, Resource>,
    events: broadcast::Sender<ResourceEvent>,
    synced: AtomicBool,
}

impl MemoryWatchSource {
    /// An empty source that reports itself synced immediately.
    pub fn new() -> Self {
        Self::with_sync_state(true)
    }

    /// A source that stays unsynced until [`mark_synced`](Self::mark_synced)
    /// is called. Lets callers stage pre-existing state first, the way a
    /// remote source catches up before its initial sync completes.
    pub fn pending() -> Self {
        Self::with_sync_state(false)
    }

    fn with_sync_state(synced: bool) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            store: DashMap::new(),
            events,
            synced: AtomicBool::new(synced),
        }
    }

    /// Declare the initial catch-up finished.
    pub fn mark_synced(&self) {
        self.synced.store(true, Ordering::SeqCst);
    }

    /// Insert or replace a resource, publishing `Added` or `Updated`.
    pub fn upsert(&self, resource: Resource) {
        let old = self.store.insert(resource.id.clone(), resource.clone());
        let event = match old {
            Some(old) => ResourceEvent::Updated { old, new: resource },
            None => ResourceEvent::Added(resource),
        };
        // No subscribers yet is fine
        let _ = self.events.send(event);
    }

    /// Remove a resource, publishing `Deleted` if it existed.
    pub fn remove(&self, id: &ResourceId) {
        if let Some((_, old)) = self.store.remove(id) {
            let _ = self.events.send(ResourceEvent::Deleted(old));
        }
    }
}

impl Default for MemoryWatchSource {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchSource for MemoryWatchSource {
    fn list(&self) -> Vec<Resource> {
        self.store.iter().map(|entry| entry.value().clone()).collect()
    }

    fn subscribe(&self) -> broadcast::Receiver<ResourceEvent> {
        self.events.subscribe()
    }

    fn has_synced(&self) -> bool {
        self.synced.load(Ordering::SeqCst)
    }
}
