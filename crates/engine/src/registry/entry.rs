//! Registry entry types.

use chrono::{DateTime, Local};

use simple_core::ScheduleIntent;

use crate::timer::TimerHandle;

/// Live registry entry: one container's schedule with its running timer.
///
/// Entries are never mutated in place; intent replacement removes the entry
/// (stopping its timer) and creates a fresh one.
pub struct Schedule {
    /// Container name, the stable external identity key.
    pub container_name: String,
    /// The validated intent this schedule runs.
    pub intent: ScheduleIntent,
    /// When this entry was (re-)registered.
    pub registered_at: DateTime<Local>,
    /// Owns the periodic firing; stopped on removal.
    pub(crate) timer: TimerHandle,
}

impl Schedule {
    pub(crate) fn view(&self) -> ScheduleView {
        ScheduleView {
            container_name: self.container_name.clone(),
            intent: self.intent.clone(),
            registered_at: self.registered_at,
            next_fire: self.timer.next_fire(),
        }
    }
}

/// Cloneable snapshot of a registry entry.
#[derive(Debug, Clone)]
pub struct ScheduleView {
    pub container_name: String,
    pub intent: ScheduleIntent,
    pub registered_at: DateTime<Local>,
    /// Next computed fire time at snapshot time.
    pub next_fire: Option<DateTime<Local>>,
}
