//! [`ScheduleRegistry`] — locked map of container name to live schedule.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Local;

use simple_core::ScheduleIntent;

use crate::error::{EngineError, Result};
use crate::timer::{self, FireCallback};

use super::entry::{Schedule, ScheduleView};

/// Authoritative mapping from container name to its active schedule.
///
/// All operations go through one registry-wide mutex, so the compound
/// remove+add of [`register`](ScheduleRegistry::register) is atomic with
/// respect to any concurrent lookup or timer-fire mutation. No operation
/// awaits while holding the lock.
pub struct ScheduleRegistry {
    entries: Mutex<HashMap<String, Schedule>>,
}

impl ScheduleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Start a timer for `intent` and insert the schedule under `name`.
    ///
    /// Fails with [`EngineError::DuplicateSchedule`] if an entry already
    /// exists; callers that want replacement use [`register`](Self::register).
    pub fn add(
        &self,
        name: &str,
        intent: ScheduleIntent,
        on_fire: FireCallback,
    ) -> Result<ScheduleView> {
        let mut entries = self.lock();
        if entries.contains_key(name) {
            return Err(EngineError::DuplicateSchedule(name.to_string()));
        }
        Self::insert(&mut entries, name, intent, on_fire)
    }

    /// Stop the entry's timer and delete it.
    pub fn remove(&self, name: &str) -> Result<()> {
        let mut entries = self.lock();
        match entries.remove(name) {
            Some(entry) => {
                entry.timer.stop();
                Ok(())
            }
            None => Err(EngineError::ScheduleNotFound(name.to_string())),
        }
    }

    /// Replace-or-create the schedule for `name` under one lock acquisition.
    ///
    /// An existing entry is removed (its timer stopped) before the new one
    /// is inserted, so replacement never fails on `DuplicateSchedule` and is
    /// never observable as a half-applied state.
    pub fn register(
        &self,
        name: &str,
        intent: ScheduleIntent,
        on_fire: FireCallback,
    ) -> Result<ScheduleView> {
        let mut entries = self.lock();
        if let Some(old) = entries.remove(name) {
            old.timer.stop();
        }
        Self::insert(&mut entries, name, intent, on_fire)
    }

    /// Snapshot of the schedule for `name`, if registered.
    pub fn find(&self, name: &str) -> Option<ScheduleView> {
        self.lock().get(name).map(Schedule::view)
    }

    /// Snapshot of all current schedules, in no particular order.
    pub fn list(&self) -> Vec<ScheduleView> {
        self.lock().values().map(Schedule::view).collect()
    }

    /// Stop every timer and clear the registry. Used at shutdown.
    pub fn drain(&self) {
        let mut entries = self.lock();
        for (_, entry) in entries.drain() {
            entry.timer.stop();
        }
    }

    /// Number of active schedules.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the registry has no schedules.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Schedule>> {
        self.entries.lock().expect("schedule registry lock poisoned")
    }

    fn insert(
        entries: &mut HashMap<String, Schedule>,
        name: &str,
        intent: ScheduleIntent,
        on_fire: FireCallback,
    ) -> Result<ScheduleView> {
        let timer =
            timer::start(&intent.label_value, on_fire).map_err(|e| EngineError::Expression {
                expression: intent.label_value.clone(),
                source: e,
            })?;
        let entry = Schedule {
            container_name: name.to_string(),
            intent,
            registered_at: Local::now(),
            timer,
        };
        let view = entry.view();
        entries.insert(name.to_string(), entry);
        Ok(view)
    }
}

impl Default for ScheduleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
