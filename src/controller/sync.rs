//! Bootstrap and steady-state synchronization.
//!
//! # Data Flow
//! ```text
//! WatchSource subscription
//!     → filter_events task: identity + revision checks, then enqueue
//!     → bounded apply queue (producers block when full, never drop)
//!     → consume task: the table's single writer
//! ```
//!
//! # Ordering
//! Events that pass the filter reach the table in delivery order: one
//! FIFO queue, one consumer. Stale updates (unchanged revision) are
//! dropped before the queue, never reordered after it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;

use crate::config::table::LevelTable;
use crate::error::ControllerError;
use crate::watch::{Resource, ResourceEvent, ResourceId, WatchSource};

/// How often bootstrap re-checks the source's sync signal.
const SYNC_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A unit of work for the consumer task.
#[derive(Debug)]
pub(crate) enum ApplyEvent {
    /// Re-parse this snapshot and replace the overrides.
    Apply(Resource),
    /// The tracked resource was deleted; clear all overrides.
    Reset,
}

/// Block until the source reports its initial catch-up done, or fail
/// after `timeout`.
pub(crate) async fn wait_for_sync(
    source: &dyn WatchSource,
    timeout: Duration,
) -> Result<(), ControllerError> {
    let deadline = Instant::now() + timeout;
    while !source.has_synced() {
        if Instant::now() >= deadline {
            tracing::error!(?timeout, "timed out waiting for watch source to sync");
            return Err(ControllerError::SyncTimeout { waited: timeout });
        }
        tokio::time::sleep(SYNC_POLL_INTERVAL).await;
    }
    Ok(())
}

/// Identity and revision filtering. Runs before anything reaches the
/// queue so unrelated resources never pollute it.
pub(crate) fn accept(tracked: &ResourceId, event: ResourceEvent) -> Option<ApplyEvent> {
    match event {
        ResourceEvent::Added(resource) if resource.id == *tracked => {
            Some(ApplyEvent::Apply(resource))
        }
        ResourceEvent::Updated { old, new } if new.id == *tracked => {
            if old.revision_changed(&new) {
                Some(ApplyEvent::Apply(new))
            } else {
                // unchanged revision is a no-op, not an error
                None
            }
        }
        ResourceEvent::Deleted(resource) if resource.id == *tracked => Some(ApplyEvent::Reset),
        _ => None,
    }
}

/// Drain events that buffered up between subscribing and finishing the
/// catch-up apply. Runs before the sync tasks are spawned, so applying
/// directly here keeps the single-writer rule. A subscription that
/// closed this early means the controller never reached a live steady
/// state, which is fatal for startup.
pub(crate) fn drain_pending(
    events: &mut broadcast::Receiver<ResourceEvent>,
    tracked: &ResourceId,
    table: &LevelTable,
    log_key: &str,
) -> Result<(), ControllerError> {
    loop {
        match events.try_recv() {
            Ok(event) => {
                if let Some(accepted) = accept(tracked, event) {
                    apply_event(table, log_key, accepted);
                }
            }
            Err(broadcast::error::TryRecvError::Empty) => return Ok(()),
            Err(broadcast::error::TryRecvError::Lagged(missed)) => {
                tracing::warn!(missed, resource = %tracked, "watch subscription lagged during bootstrap");
            }
            Err(broadcast::error::TryRecvError::Closed) => {
                tracing::error!(resource = %tracked, "watch subscription closed before startup finished");
                return Err(ControllerError::SourceClosed);
            }
        }
    }
}

/// Producer side: drain the subscription, filter, and feed the bounded
/// queue. A full queue blocks the send; shutdown wins the race so a
/// blocked producer never deadlocks against a stopped consumer.
pub(crate) async fn filter_events(
    mut events: broadcast::Receiver<ResourceEvent>,
    tracked: ResourceId,
    queue: mpsc::Sender<ApplyEvent>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        let event = tokio::select! {
            _ = shutdown.recv() => return,
            received = events.recv() => match received {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, resource = %tracked, "watch subscription lagged, resuming with newer events");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    // updates stop arriving but queries keep serving the
                    // last applied table
                    tracing::warn!(resource = %tracked, "watch subscription closed, levels frozen at last applied state");
                    return;
                }
            },
        };

        let Some(apply) = accept(&tracked, event) else {
            continue;
        };

        tokio::select! {
            _ = shutdown.recv() => return,
            sent = queue.send(apply) => {
                if sent.is_err() {
                    // consumer gone
                    return;
                }
            }
        }
    }
}

/// Consumer side: the level table's single writer. Applies one event at
/// a time, in queue order, until shutdown.
pub(crate) async fn consume(
    mut queue: mpsc::Receiver<ApplyEvent>,
    table: Arc<LevelTable>,
    log_key: String,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = shutdown.recv() => return,
            event = queue.recv() => match event {
                Some(event) => apply_event(&table, &log_key, event),
                None => return,
            },
        }
    }
}

/// Apply one accepted event to the table.
pub(crate) fn apply_event(table: &LevelTable, log_key: &str, event: ApplyEvent) {
    match event {
        ApplyEvent::Apply(resource) => apply(table, log_key, &resource),
        ApplyEvent::Reset => {
            tracing::info!("tracked resource deleted, reverting all parts to the default level");
            table.reset();
        }
    }
}

/// Rebuild the table from one snapshot. All-or-nothing at the table
/// boundary.
pub(crate) fn apply(table: &LevelTable, log_key: &str, resource: &Resource) {
    let payload = resource
        .data
        .get(log_key)
        .map(String::as_str)
        .unwrap_or_default();
    table.apply(&resource.revision, payload);
    tracing::debug!(
        resource = %resource.id,
        revision = %resource.revision,
        overrides = table.overrides().len(),
        "applied level overrides"
    );
}
