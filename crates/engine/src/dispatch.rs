//! Fire-time execution of a schedule's lifecycle command.

use std::sync::Arc;

use tracing::{info, warn};

use simple_core::ScheduleCommand;
use simple_runtime::{ContainerFilter, ContainerRuntime};

use crate::registry::ScheduleRegistry;

/// Execute one fire for the schedule registered under `name`.
///
/// The container is re-resolved by name on every fire; identity can change
/// between observation and execution, so nothing is cached across ticks.
/// A container that no longer exists unregisters its own schedule; a command
/// the runtime rejects is logged and leaves the schedule active for its next
/// fire.
pub async fn execute(
    runtime: Arc<dyn ContainerRuntime>,
    registry: Arc<ScheduleRegistry>,
    name: &str,
) {
    // The schedule may have been removed between the tick and this call.
    let Some(schedule) = registry.find(name) else {
        return;
    };

    let containers = match runtime.list_containers(&ContainerFilter::by_name(name)).await {
        Ok(containers) => containers,
        Err(e) => {
            warn!(container = %name, error = %e, "failed to list containers at fire time");
            log_next_run(&registry, name);
            return;
        }
    };

    let Some(target) = containers.first() else {
        info!(
            container = %name,
            "no container with this name found, removing from schedule"
        );
        if registry.remove(name).is_ok() {
            info!(container = %name, "container unregistered");
        }
        return;
    };

    let handle = runtime.container(&target.id);
    let result = match schedule.intent.command {
        ScheduleCommand::Start => handle.start().await,
        ScheduleCommand::Stop => handle.stop().await,
        ScheduleCommand::Restart => handle.restart().await,
    };

    match result {
        Ok(()) => info!(
            container = %name,
            command = %schedule.intent.command,
            "command executed"
        ),
        Err(e) => warn!(
            container = %name,
            command = %schedule.intent.command,
            error = %e,
            "command failed, schedule stays active"
        ),
    }

    log_next_run(&registry, name);
}

fn log_next_run(registry: &ScheduleRegistry, name: &str) {
    if let Some(next) = registry.find(name).and_then(|view| view.next_fire) {
        info!(container = %name, next_run = %next, "next run");
    }
}
