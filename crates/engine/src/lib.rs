//! Label-driven container schedule reconciliation engine.
//!
//! This crate provides:
//! - Label parsing/validation for `simple.schedules.<command>` labels
//! - A cron timer built on the `cron` crate, one tokio task per schedule
//! - The schedule registry, single source of truth for active schedules
//! - Reconciliation against the startup listing and the runtime event stream
//! - Fire-time dispatch of lifecycle commands with disappearance recovery

pub mod dispatch;
pub mod error;
pub mod label;
pub mod reconcile;
pub mod registry;
pub mod timer;

pub use error::{EngineError, Result};
pub use reconcile::Reconciler;
pub use registry::{ScheduleRegistry, ScheduleView};
