//! Sequence counter documents
//!
//! One document per named sequence, advanced atomically with `$inc` so two
//! concurrent creates can never be handed the same business id.

use serde::{Deserialize, Serialize};

/// Collection name for sequence counters
pub const COUNTER_COLLECTION: &str = "counters";

/// Sequence name for task business ids ("SC-%02d")
pub const TASK_SEQUENCE: &str = "tasks";

/// Sequence name for user business ids ("U-%02d")
pub const USER_SEQUENCE: &str = "users";

/// Counter document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CounterDoc {
    /// Sequence name
    #[serde(rename = "_id")]
    pub name: String,

    /// Last assigned value
    pub seq: i64,
}

/// Format a sequence value as a human-readable business id
///
/// Zero-padded to width 2; values past 99 simply widen ("SC-100").
pub fn format_sequence_id(prefix: &str, seq: i64) -> String {
    format!("{}-{:02}", prefix, seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_single_digits() {
        assert_eq!(format_sequence_id("SC", 1), "SC-01");
        assert_eq!(format_sequence_id("U", 9), "U-09");
    }

    #[test]
    fn leaves_two_digits_alone() {
        assert_eq!(format_sequence_id("SC", 42), "SC-42");
    }

    #[test]
    fn widens_past_ninety_nine() {
        assert_eq!(format_sequence_id("SC", 100), "SC-100");
        assert_eq!(format_sequence_id("U", 1234), "U-1234");
    }
}
