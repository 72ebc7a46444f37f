//! The watch-source seam.
//!
//! # Data Flow
//! ```text
//! remote store (transport out of scope)
//!     → WatchSource impl (list + broadcast of ResourceEvents + sync signal)
//!     → controller filter task (identity + revision checks)
//!     → bounded apply queue
//! ```
//!
//! # Design Decisions
//! - Events are a tagged enum dispatched by pattern matching, not untyped
//!   callbacks with runtime downcasts
//! - The revision token is opaque: compared only for inequality, with an
//!   empty token meaning "unknown, assume changed"
//! - Reconnection, pagination and long-poll semantics belong to the
//!   source implementation, not to this contract

use std::collections::HashMap;
use std::fmt;

use tokio::sync::broadcast;

pub mod memory;

/// Coordinates of one resource in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    pub namespace: String,
    pub name: String,
}

impl ResourceId {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Last-seen snapshot of a stored resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub id: ResourceId,
    /// Opaque version marker. Empty means the store did not report one.
    pub revision: String,
    /// Payload keys to raw text blobs.
    pub data: HashMap<String, String>,
}

impl Resource {
    pub fn new(id: ResourceId, revision: impl Into<String>) -> Self {
        Self {
            id,
            revision: revision.into(),
            data: HashMap::new(),
        }
    }

    /// Builder-style payload entry, mostly for tests and fixtures.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Whether `newer` should be treated as a real change relative to
    /// `self`. A missing revision on either side counts as changed, since
    /// re-applying is safer than missing an update.
    pub fn revision_changed(&self, newer: &Resource) -> bool {
        self.revision.is_empty() || newer.revision.is_empty() || self.revision != newer.revision
    }
}

/// A change notification from the store.
#[derive(Debug, Clone)]
pub enum ResourceEvent {
    Added(Resource),
    Updated { old: Resource, new: Resource },
    Deleted(Resource),
}

/// An incremental view over a namespaced key-value store.
///
/// Implementations must deliver at least the latest state per resource,
/// in order, and report `has_synced` once the initial catch-up against
/// existing state is complete.
pub trait WatchSource: Send + Sync + 'static {
    /// Every resource currently visible to the source.
    fn list(&self) -> Vec<Resource>;

    /// Subscribe to change notifications. Events published after this
    /// call are delivered in publication order.
    fn subscribe(&self) -> broadcast::Receiver<ResourceEvent>;

    /// True once the initial catch-up has completed and `list` reflects
    /// the pre-existing state of the store.
    fn has_synced(&self) -> bool;
}
