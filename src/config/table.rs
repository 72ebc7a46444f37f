//! The live level table and its decision queries.
//!
//! # Design Decisions
//! - Overrides are replaced wholesale per accepted update, never patched
//!   key by key; a delete swaps in an empty snapshot
//! - Readers load the current snapshot through `arc-swap`, so decision
//!   queries are lock-free and never observe a half-written table
//! - Overrides are stored as typed [`Level`]s; payload values that fail to
//!   parse are dropped at apply time and the part falls back to the
//!   default level

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::parser::parse_payload;
use crate::level::{Decision, Level};

/// One fully built generation of overrides. Immutable once stored.
#[derive(Debug, Default)]
struct Snapshot {
    revision: String,
    overrides: HashMap<String, Level>,
    parts: Vec<String>,
}

/// Mapping from part name to severity threshold, with a default.
///
/// The table has exactly one writer (the controller's consumer task) and
/// any number of concurrent readers.
pub struct LevelTable {
    default_level: Level,
    snapshot: ArcSwap<Snapshot>,
}

impl LevelTable {
    /// Create an empty table.
    ///
    /// `default_level` is matched case-insensitively against the level
    /// vocabulary; an unrecognized name falls back to `Info`.
    pub fn new(default_level: &str) -> Self {
        let default_level = Level::parse(default_level).unwrap_or_else(|err| {
            tracing::warn!(
                level = %err.name,
                fallback = %Level::DEFAULT,
                "unrecognized default level, using fallback"
            );
            Level::DEFAULT
        });
        Self {
            default_level,
            snapshot: ArcSwap::from_pointee(Snapshot::default()),
        }
    }

    /// The threshold used for parts without an override.
    pub fn default_level(&self) -> Level {
        self.default_level
    }

    /// Rebuild the overrides from a payload blob and swap the new
    /// generation in. All-or-nothing: readers see either the previous or
    /// the new table, never a mix.
    pub fn apply(&self, revision: &str, payload: &str) {
        let parsed = parse_payload(payload);
        let mut overrides = HashMap::with_capacity(parsed.entries.len());
        let mut parts = Vec::with_capacity(parsed.parts.len());
        for part in parsed.parts {
            match Level::parse(&parsed.entries[&part]) {
                Ok(level) => {
                    overrides.insert(part.clone(), level);
                    parts.push(part);
                }
                Err(err) => {
                    tracing::warn!(
                        part = %part,
                        level = %err.name,
                        "dropping override with unrecognized level, part falls back to default"
                    );
                }
            }
        }
        self.snapshot.store(Arc::new(Snapshot {
            revision: revision.to_string(),
            overrides,
            parts,
        }));
    }

    /// Drop every override. Subsequent queries resolve purely through the
    /// default level, as if the part had never been configured.
    pub fn reset(&self) {
        self.snapshot.store(Arc::new(Snapshot::default()));
    }

    /// Is a log statement at `severity` enabled for `part`?
    ///
    /// Enabled iff `severity >= threshold`, where the threshold is the
    /// part's override or, absent one, the default level. A threshold of
    /// `Warn` silences `Debug` and `Info` but passes `Warn` and `Error`.
    pub fn decide(&self, part: &str, severity: Level) -> Decision {
        if severity >= self.threshold(part) {
            Decision::Enabled
        } else {
            Decision::Disabled
        }
    }

    /// Graded variant of [`decide`](Self::decide): the resolved
    /// threshold's ordinal, for sinks whose API takes a verbosity number
    /// rather than a yes/no gate.
    pub fn decide_verbosity(&self, part: &str) -> u8 {
        self.threshold(part).ordinal()
    }

    fn threshold(&self, part: &str) -> Level {
        self.snapshot
            .load()
            .overrides
            .get(part)
            .copied()
            .unwrap_or(self.default_level)
    }

    /// Currently overridden part names, in payload insertion order.
    pub fn parts(&self) -> Vec<String> {
        self.snapshot.load().parts.clone()
    }

    /// Snapshot copy of the current overrides.
    pub fn overrides(&self) -> HashMap<String, Level> {
        self.snapshot.load().overrides.clone()
    }

    /// Revision of the last applied resource; empty after construction or
    /// a reset.
    pub fn revision(&self) -> String {
        self.snapshot.load().revision.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unseen_part_uses_default() {
        let table = LevelTable::new("warn");
        assert_eq!(table.decide("anything", Level::Warn), Decision::Enabled);
        assert_eq!(table.decide("anything", Level::Info), Decision::Disabled);
    }

    #[test]
    fn test_unrecognized_default_falls_back_to_info() {
        let table = LevelTable::new("chatty");
        assert_eq!(table.default_level(), Level::Info);
        assert_eq!(table.decide("p", Level::Info), Decision::Enabled);
        assert_eq!(table.decide("p", Level::Debug), Decision::Disabled);
    }

    #[test]
    fn test_overrides_apply() {
        let table = LevelTable::new("info");
        table.apply("1", "part1: warn\npart2: debug");

        assert_eq!(table.decide("part1", Level::Error), Decision::Enabled);
        assert_eq!(table.decide("part1", Level::Info), Decision::Disabled);
        assert_eq!(table.decide("part2", Level::Debug), Decision::Enabled);
        // part3 falls through to the default
        assert_eq!(table.decide("part3", Level::Info), Decision::Enabled);
        assert_eq!(table.decide("part3", Level::Debug), Decision::Disabled);
        assert_eq!(table.parts(), vec!["part1", "part2"]);
        assert_eq!(table.revision(), "1");
    }

    #[test]
    fn test_replace_not_merge() {
        let table = LevelTable::new("info");
        table.apply("1", "a: warn");
        table.apply("2", "b: debug");

        // "a" no longer overridden: Error is enabled either way, Debug only
        // under the stale warn... which must be gone, so Debug follows the
        // Info default and is disabled.
        assert_eq!(table.decide("a", Level::Error), Decision::Enabled);
        assert_eq!(table.decide("a", Level::Debug), Decision::Disabled);
        assert_eq!(table.decide("a", Level::Info), Decision::Enabled);
        assert_eq!(table.overrides().len(), 1);
    }

    #[test]
    fn test_reset_reverts_to_default_only() {
        let table = LevelTable::new("info");
        table.apply("1", "part1: warn\npart2: debug");
        table.reset();

        assert_eq!(table.decide("part1", Level::Warn), Decision::Enabled);
        assert_eq!(table.decide("part2", Level::Debug), Decision::Disabled);
        assert!(table.overrides().is_empty());
        assert!(table.parts().is_empty());
        assert_eq!(table.revision(), "");
    }

    #[test]
    fn test_invalid_override_clamps_to_default() {
        let table = LevelTable::new("warn");
        table.apply("1", "part1: loud\npart2: error");

        // part1's override was dropped, so it resolves through the default
        assert_eq!(table.decide("part1", Level::Warn), Decision::Enabled);
        assert_eq!(table.decide("part1", Level::Info), Decision::Disabled);
        assert_eq!(table.decide("part2", Level::Error), Decision::Enabled);
        assert_eq!(table.parts(), vec!["part2"]);
    }

    #[test]
    fn test_threshold_monotonicity() {
        let table = LevelTable::new("info");
        table.apply("1", "p: warn");
        let severities = [Level::Debug, Level::Info, Level::Warn, Level::Error];
        let mut enabled_seen = false;
        for severity in severities {
            let enabled = table.decide("p", severity).is_enabled();
            // once enabled at some severity, every higher severity is too
            assert!(!enabled_seen || enabled);
            enabled_seen |= enabled;
        }
        assert!(enabled_seen);
    }

    #[test]
    fn test_verbosity_is_threshold_ordinal() {
        let table = LevelTable::new("info");
        table.apply("1", "p: error");
        assert_eq!(table.decide_verbosity("p"), Level::Error.ordinal());
        assert_eq!(table.decide_verbosity("other"), Level::Info.ordinal());
    }
}
