//! Schedule registry: the single source of truth for active schedules.
//!
//! Maps container name to its live schedule (intent + running timer). The
//! registry exclusively owns every entry and its timer handle; lookups
//! return cloneable [`ScheduleView`] snapshots so the timer never escapes.

mod core;
mod entry;

#[cfg(test)]
mod tests;

pub use self::core::ScheduleRegistry;
pub use self::entry::{Schedule, ScheduleView};
