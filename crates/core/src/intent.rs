//! Parsed scheduling intent extracted from a container label.

use serde::{Deserialize, Serialize};

use crate::command::ScheduleCommand;

/// Label key namespace for scheduling labels.
///
/// A container opts in with exactly one `simple.schedules.<command>` label
/// whose value is the cron expression. Matching is case-insensitive on the
/// prefix.
pub const SCHEDULE_LABEL_PREFIX: &str = "simple.schedules.";

/// A validated scheduling directive read from a single container label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleIntent {
    /// The exact label key that matched (e.g. `simple.schedules.restart`).
    pub label_key: String,
    /// The raw cron expression exactly as written in the label value.
    pub label_value: String,
    /// Lifecycle command named by the label suffix.
    pub command: ScheduleCommand,
}

impl ScheduleIntent {
    /// `key=value` identity used to detect "same label, same value" across
    /// reconciliations and suppress redundant re-registration.
    pub fn fingerprint(&self) -> String {
        format!("{}={}", self.label_key, self.label_value)
    }
}
