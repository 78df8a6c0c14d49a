//! Reconciliation engine: keeps the registry matching observed reality.
//!
//! Two entry points drive the registry: a one-time startup scan over the
//! full fleet and incremental reconciliation of each runtime event. Events
//! are processed one at a time in arrival order; timer fires run
//! concurrently on their own tasks and synchronize through the registry.

use std::sync::Arc;

use tracing::{info, warn};

use simple_core::{RuntimeEvent, ScheduleIntent};
use simple_runtime::{ContainerFilter, ContainerRuntime};

use crate::dispatch;
use crate::error::Result;
use crate::label;
use crate::registry::ScheduleRegistry;
use crate::timer::FireCallback;

/// Drives the schedule registry from fleet listings and runtime events.
pub struct Reconciler {
    runtime: Arc<dyn ContainerRuntime>,
    registry: Arc<ScheduleRegistry>,
}

impl Reconciler {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, registry: Arc<ScheduleRegistry>) -> Self {
        Self { runtime, registry }
    }

    /// The registry this reconciler mutates.
    pub fn registry(&self) -> &Arc<ScheduleRegistry> {
        &self.registry
    }

    /// One-time full-fleet scan at startup.
    ///
    /// Lists every container (including stopped ones) and registers each
    /// valid scheduling intent. Containers without one are skipped silently.
    /// Must complete before event subscription so no event races the initial
    /// population.
    pub async fn startup_scan(&self) -> Result<()> {
        let containers = self.runtime.list_containers(&ContainerFilter::all()).await?;
        info!(containers = containers.len(), "scanning fleet for scheduling labels");

        for container in &containers {
            let name = container.short_name();
            if let Some(intent) = label::parse_intent(&container.labels, name) {
                self.register(name, intent);
            }
        }
        Ok(())
    }

    /// Reconcile the registry against one runtime event.
    ///
    /// An existing schedule is torn down when the event's attributes no
    /// longer carry its exact label (relabel, label removal, or container
    /// removal — a removal event carries no matching attributes). A valid
    /// candidate intent in the event stands a schedule up, unless one with
    /// the identical fingerprint is already registered.
    pub fn handle_event(&self, event: &RuntimeEvent) {
        let name = event.name.as_str();

        if let Some(existing) = self.registry.find(name) {
            let still_matches = event.attributes.get(&existing.intent.label_key)
                == Some(&existing.intent.label_value);
            if !still_matches {
                match self.registry.remove(name) {
                    Ok(()) => info!(container = %name, "container unregistered"),
                    // A concurrent fire may have removed it already.
                    Err(e) => warn!(container = %name, error = %e, "unregister raced"),
                }
            }
        }

        let Some(candidate) = label::parse_intent(&event.attributes, name) else {
            return;
        };
        let already_registered = self
            .registry
            .find(name)
            .is_some_and(|s| s.intent.fingerprint() == candidate.fingerprint());
        if !already_registered {
            self.register(name, candidate);
        }
    }

    /// Replace-or-create the schedule for `name` and log the next run.
    fn register(&self, name: &str, intent: ScheduleIntent) {
        match self.registry.register(name, intent, self.fire_callback(name)) {
            Ok(view) => {
                info!(
                    container = %name,
                    command = %view.intent.command,
                    schedule = %view.intent.label_value,
                    "container registered"
                );
                if let Some(next) = view.next_fire {
                    info!(container = %name, next_run = %next, "next run");
                }
            }
            Err(e) => warn!(container = %name, error = %e, "failed to register schedule"),
        }
    }

    /// Build the opaque fire callback for `name`.
    ///
    /// The callback carries only the container name plus shared handles; the
    /// dispatcher re-resolves the schedule and the container at fire time,
    /// so no stale state is captured.
    fn fire_callback(&self, name: &str) -> FireCallback {
        let runtime = Arc::clone(&self.runtime);
        let registry = Arc::clone(&self.registry);
        let name = name.to_string();
        Arc::new(move || {
            let runtime = Arc::clone(&runtime);
            let registry = Arc::clone(&registry);
            let name = name.clone();
            Box::pin(async move { dispatch::execute(runtime, registry, &name).await })
        })
    }
}
