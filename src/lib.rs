//! Live-reloadable per-part log verbosity.
//!
//! A [`LevelController`] tracks one remotely stored configuration resource
//! through a [`watch::WatchSource`] and keeps an in-memory level table in
//! sync with it. Log call sites ask the controller whether a severity is
//! enabled for a named subsystem ("part") without restarting the process
//! or re-reading a local file.
//!
//! # Architecture Overview
//!
//! ```text
//!  WatchSource ──add/update/delete──▶ filter task ──bounded queue──▶ consumer task
//!  (remote store)  (identity + revision check)                      (single writer)
//!                                                                        │
//!                                                                        ▼
//!  log call sites ◀──lock-free snapshot reads──────────────────── LevelTable
//! ```
//!
//! The level table is the only mutable shared state: exactly one writer
//! (the consumer task), swapped atomically per accepted event, read
//! concurrently by any number of log statements.

// Core subsystems
pub mod config;
pub mod controller;
pub mod level;
pub mod watch;

// Cross-cutting concerns
pub mod error;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ControllerConfig;
pub use config::table::LevelTable;
pub use controller::LevelController;
pub use error::ControllerError;
pub use level::{Decision, Level, LevelParseError};
pub use lifecycle::Shutdown;
pub use watch::memory::MemoryWatchSource;
pub use watch::{Resource, ResourceEvent, ResourceId, WatchSource};
