//! Payload text parsing.
//!
//! The watched resource stores the per-part levels as a newline-separated
//! text blob of `part: level` pairs. Parsing never fails: lines that do
//! not contain a `:` are skipped, and an empty payload simply yields no
//! overrides.

use std::collections::HashMap;

/// Result of parsing one payload blob.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedPayload {
    /// Part name → raw level name, whitespace-trimmed.
    pub entries: HashMap<String, String>,
    /// Part names in first-seen order.
    pub parts: Vec<String>,
}

/// Parse a payload blob into a part → level-name mapping.
///
/// Each line is split on the first `:` only, so level names may not
/// contain a colon but part names written as `a:b: warn` keep `a` as the
/// part. A duplicate part overwrites the earlier value (last wins) while
/// keeping its first-seen position in `parts`.
pub fn parse_payload(text: &str) -> ParsedPayload {
    let mut parsed = ParsedPayload::default();
    for line in text.lines() {
        let Some((part, level)) = line.split_once(':') else {
            continue;
        };
        let part = part.trim();
        let level = level.trim();
        if !parsed.entries.contains_key(part) {
            parsed.parts.push(part.to_string());
        }
        parsed.entries.insert(part.to_string(), level.to_string());
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_pairs() {
        let parsed = parse_payload("part1: warn\npart2: debug");
        assert_eq!(parsed.entries["part1"], "warn");
        assert_eq!(parsed.entries["part2"], "debug");
        assert_eq!(parsed.parts, vec!["part1", "part2"]);
    }

    #[test]
    fn test_empty_payload() {
        let parsed = parse_payload("");
        assert!(parsed.entries.is_empty());
        assert!(parsed.parts.is_empty());
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let parsed = parse_payload("no delimiter\n\npart1: info\n   \njust-a-word");
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries["part1"], "info");
    }

    #[test]
    fn test_first_colon_delimits() {
        let parsed = parse_payload("scheduler:queue: warn");
        assert_eq!(parsed.entries["scheduler"], "queue: warn");
    }

    #[test]
    fn test_whitespace_trimmed() {
        let parsed = parse_payload("   part1   :   warn   ");
        assert_eq!(parsed.entries["part1"], "warn");
        assert_eq!(parsed.parts, vec!["part1"]);
    }

    #[test]
    fn test_duplicate_last_wins_keeps_order() {
        let parsed = parse_payload("a: warn\nb: info\na: debug");
        assert_eq!(parsed.entries["a"], "debug");
        assert_eq!(parsed.parts, vec!["a", "b"]);
    }
}
