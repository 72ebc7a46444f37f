//! Tracing setup for embedding programs.
//!
//! The controller itself only emits `tracing` events; installing a
//! subscriber is the host process's call. This helper wires the usual
//! EnvFilter + fmt stack for hosts that do not bring their own.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install an EnvFilter-driven fmt subscriber.
///
/// `default_filter` applies when `RUST_LOG` is unset. Returns `false` if
/// a global subscriber was already installed (the host keeps its own).
pub fn init(default_filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
