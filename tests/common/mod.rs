//! Shared fixtures for controller integration tests.

use std::sync::Arc;
use std::time::Duration;

use dynlog::{
    ControllerConfig, LevelController, MemoryWatchSource, Resource, ResourceId, WatchSource,
};

/// Identity every test controller tracks.
pub fn tracked() -> ResourceId {
    ResourceId::new("prod", "log-levels")
}

/// Controller settings pointed at [`tracked`], with a short sync timeout.
pub fn config() -> ControllerConfig {
    ControllerConfig {
        namespace: "prod".to_string(),
        name: "log-levels".to_string(),
        sync_timeout_ms: 1_000,
        ..ControllerConfig::default()
    }
}

/// A snapshot of the tracked resource carrying `payload` under the
/// default log key.
pub fn resource(revision: &str, payload: &str) -> Resource {
    Resource::new(tracked(), revision).with_entry("log", payload)
}

/// Start a controller over `source` with the standard test config.
pub async fn start(source: &Arc<MemoryWatchSource>) -> LevelController {
    let source: Arc<dyn WatchSource> = source.clone();
    LevelController::start(config(), source).await.unwrap()
}

/// Poll until the controller has applied the snapshot with `revision`.
#[allow(dead_code)]
pub async fn wait_for_revision(controller: &LevelController, revision: &str) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while controller.revision() != revision {
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for revision {revision:?}, still at {:?}",
            controller.revision()
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

/// Poll until a delete has cleared every override.
#[allow(dead_code)]
pub async fn wait_for_reset(controller: &LevelController) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !controller.overrides().is_empty() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for overrides to clear"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
