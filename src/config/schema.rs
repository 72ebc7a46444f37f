//! Controller configuration schema.
//!
//! All fields have defaults so an embedding program can start from a
//! minimal config file or build the struct literally.

use serde::{Deserialize, Serialize};

/// Static settings for a [`LevelController`](crate::LevelController).
///
/// These identify the watched resource and shape the sync pipeline; the
/// levels themselves live in the resource payload and reload without a
/// restart.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Namespace of the tracked resource.
    pub namespace: String,

    /// Name of the tracked resource.
    pub name: String,

    /// Payload key whose value holds the `part: level` text blob.
    pub log_key: String,

    /// Threshold for parts without an override. Case-insensitive;
    /// unrecognized names fall back to `Info`.
    pub default_level: String,

    /// How long bootstrap may wait for the watch source's initial sync
    /// before construction fails.
    pub sync_timeout_ms: u64,

    /// Capacity of the bounded queue between the watch callbacks and the
    /// single consumer task. Producers block (never drop) when full.
    pub queue_capacity: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            namespace: "default".to_string(),
            name: "log-levels".to_string(),
            log_key: "log".to_string(),
            default_level: "info".to_string(),
            sync_timeout_ms: 30_000,
            queue_capacity: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.log_key, "log");
        assert_eq!(config.default_level, "info");
        assert_eq!(config.queue_capacity, 10);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ControllerConfig =
            toml::from_str("namespace = \"prod\"\nname = \"svc-log-levels\"").unwrap();
        assert_eq!(config.namespace, "prod");
        assert_eq!(config.name, "svc-log-levels");
        assert_eq!(config.log_key, "log");
        assert_eq!(config.sync_timeout_ms, 30_000);
    }
}
