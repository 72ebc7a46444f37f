//! Controller error types.

use std::time::Duration;

use thiserror::Error;

/// Fatal conditions during controller startup.
///
/// Steady-state operation does not produce errors: malformed payloads
/// degrade to fewer overrides and decision queries always resolve.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The watch source never reported its initial sync in time. The
    /// controller refuses to serve decisions from a table it could not
    /// confirm was initialized from existing state.
    #[error("watch source did not report sync within {waited:?}")]
    SyncTimeout { waited: Duration },

    /// The subscription ended while the controller was still starting.
    #[error("watch source subscription closed during startup")]
    SourceClosed,
}
