//! Cron timer primitive: expression validation and per-schedule fire tasks.
//!
//! Each registered schedule owns one [`TimerHandle`] whose tokio task sleeps
//! until the next local-time fire, awaits the fire callback, and repeats.
//! The timer holds an opaque callback, never the schedule itself; the
//! dispatcher re-resolves everything it needs from the registry at fire time.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use cron::Schedule;
use futures::future::BoxFuture;
use tokio::sync::watch;

/// Opaque fire callback invoked on every tick.
pub type FireCallback = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Whether `expression` is a valid schedule expression.
pub fn validate(expression: &str) -> bool {
    parse_schedule(expression).is_ok()
}

/// Normalize a 5-field cron expression to 6-field by prepending "0" seconds.
///
/// The `cron` crate requires at least 6 fields: `sec min hour day-of-month
/// month day-of-week`. Labels commonly use standard 5-field cron.
fn normalize(expression: &str) -> String {
    let trimmed = expression.trim();
    if trimmed.split_whitespace().count() == 5 {
        format!("0 {}", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Parse a schedule expression, accepting 5-field and 6/7-field forms.
pub(crate) fn parse_schedule(expression: &str) -> Result<Schedule, cron::error::Error> {
    Schedule::from_str(&normalize(expression))
}

/// Handle to a running timer task.
///
/// Stopping is signalled over a watch channel, so a fire callback may stop
/// its own timer: the loop observes the signal at its next select rather
/// than being cancelled mid-callback. Dropping the handle also stops the
/// task.
pub struct TimerHandle {
    schedule: Schedule,
    stop: watch::Sender<bool>,
}

impl TimerHandle {
    /// Signal the timer task to exit. Idempotent.
    pub fn stop(&self) {
        let _ = self.stop.send(true);
    }

    /// Whether the timer task has fully exited and dropped its receiver.
    #[cfg(test)]
    fn is_stopped(&self) -> bool {
        self.stop.is_closed()
    }

    /// The next `n` fire times in the local timezone.
    pub fn upcoming(&self, n: usize) -> Vec<DateTime<Local>> {
        self.schedule.upcoming(Local).take(n).collect()
    }

    /// The next fire time, if the schedule has one.
    pub fn next_fire(&self) -> Option<DateTime<Local>> {
        self.schedule.upcoming(Local).next()
    }
}

/// Parse `expression` and start a timer task firing `on_fire` on schedule.
pub fn start(expression: &str, on_fire: FireCallback) -> Result<TimerHandle, cron::error::Error> {
    let schedule = parse_schedule(expression)?;
    let (stop, mut stopped) = watch::channel(false);

    let task_schedule = schedule.clone();
    tokio::spawn(async move {
        loop {
            let Some(next) = task_schedule.upcoming(Local).next() else {
                break;
            };
            let delay = (next - Local::now()).to_std().unwrap_or(Duration::ZERO);
            tokio::select! {
                biased;
                _ = stopped.changed() => break,
                _ = tokio::time::sleep(delay) => on_fire().await,
            }
        }
    });

    Ok(TimerHandle { schedule, stop })
}

// ── Tests ───────────────────────────────────────────────────────────
