//! The level controller: bootstrap, steady-state sync, query surface.
//!
//! # Startup
//! ```text
//! subscribe to the watch source
//!     → wait for its initial sync (bounded by sync_timeout_ms, fatal on expiry)
//!     → apply the tracked resource from list(), if present (single-threaded)
//!     → drain events buffered during bootstrap (fatal if the
//!       subscription already closed)
//!     → spawn filter task + consumer task; all further changes flow
//!       through the bounded queue
//! ```
//!
//! Subscribing before the sync wait means no event can slip between the
//! catch-up apply and steady state; anything delivered in between is
//! drained through the same filter before the tasks start.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::schema::ControllerConfig;
use crate::config::table::LevelTable;
use crate::error::ControllerError;
use crate::level::{Decision, Level};
use crate::lifecycle::Shutdown;
use crate::watch::{ResourceId, WatchSource};

mod sync;

/// Live handle over the watched level configuration.
///
/// Cheap to share behind an `Arc`; decision queries are lock-free reads
/// against the current table snapshot.
pub struct LevelController {
    table: Arc<LevelTable>,
    tracked: ResourceId,
    shutdown: Shutdown,
    filter_task: JoinHandle<()>,
    consumer_task: JoinHandle<()>,
}

impl LevelController {
    /// Bootstrap against existing store state, then start the
    /// steady-state sync tasks.
    ///
    /// Fails with [`ControllerError::SyncTimeout`] if the source never
    /// confirms its initial catch-up: the controller refuses to answer
    /// decisions from an unconfirmed table.
    pub async fn start(
        config: ControllerConfig,
        source: Arc<dyn WatchSource>,
    ) -> Result<Self, ControllerError> {
        let table = Arc::new(LevelTable::new(&config.default_level));
        let tracked = ResourceId::new(config.namespace.clone(), config.name.clone());

        // Subscribe first so nothing can slip between catch-up and steady
        // state.
        let mut events = source.subscribe();

        sync::wait_for_sync(
            source.as_ref(),
            Duration::from_millis(config.sync_timeout_ms),
        )
        .await?;

        // Catch-up: apply whatever already exists for the tracked
        // identity. The consumer task is not running yet, so this write
        // is single-threaded.
        if let Some(existing) = source.list().into_iter().find(|r| r.id == tracked) {
            sync::apply(&table, &config.log_key, &existing);
        } else {
            tracing::debug!(resource = %tracked, "no existing resource, starting from defaults");
        }

        // Events that raced the bootstrap are buffered in the
        // subscription; apply them now and fail if the source already
        // closed under us.
        sync::drain_pending(&mut events, &tracked, &table, &config.log_key)?;

        let shutdown = Shutdown::new();
        // validation rejects 0, but a literal config must not panic here
        let (queue_tx, queue_rx) = mpsc::channel(config.queue_capacity.max(1));
        let filter_task = tokio::spawn(sync::filter_events(
            events,
            tracked.clone(),
            queue_tx,
            shutdown.subscribe(),
        ));
        let consumer_task = tokio::spawn(sync::consume(
            queue_rx,
            Arc::clone(&table),
            config.log_key,
            shutdown.subscribe(),
        ));

        tracing::info!(
            resource = %tracked,
            default_level = %table.default_level(),
            "level controller started"
        );

        Ok(Self {
            table,
            tracked,
            shutdown,
            filter_task,
            consumer_task,
        })
    }

    /// Is a log statement at `severity` enabled for `part`?
    pub fn decide(&self, part: &str, severity: Level) -> Decision {
        self.table.decide(part, severity)
    }

    /// The resolved threshold's ordinal for `part`, for sinks that take
    /// a graded verbosity value.
    pub fn decide_verbosity(&self, part: &str) -> u8 {
        self.table.decide_verbosity(part)
    }

    /// Currently overridden part names, in payload order.
    pub fn parts(&self) -> Vec<String> {
        self.table.parts()
    }

    /// Snapshot copy of the current overrides.
    pub fn overrides(&self) -> HashMap<String, Level> {
        self.table.overrides()
    }

    /// The threshold used for parts without an override.
    pub fn default_level(&self) -> Level {
        self.table.default_level()
    }

    /// Revision of the last applied resource snapshot.
    pub fn revision(&self) -> String {
        self.table.revision()
    }

    /// The identity this controller tracks.
    pub fn tracked(&self) -> &ResourceId {
        &self.tracked
    }

    /// Shared handle to the table, for log sites that outlive borrows of
    /// the controller.
    pub fn table(&self) -> Arc<LevelTable> {
        Arc::clone(&self.table)
    }

    /// Stop both sync tasks and wait for them to finish. No event is
    /// applied after the signal is observed.
    pub async fn shutdown(self) {
        self.shutdown.trigger();
        let _ = self.filter_task.await;
        let _ = self.consumer_task.await;
        tracing::info!(resource = %self.tracked, "level controller stopped");
    }
}
