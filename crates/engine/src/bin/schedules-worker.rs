//! schedules-worker — label-driven container lifecycle scheduler daemon.
//!
//! Scans the fleet once at startup, then keeps the schedule registry in
//! sync with the container event stream, one event at a time. Timer fires
//! dispatch lifecycle commands on their own tasks.

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;

use simple_engine::{Reconciler, ScheduleRegistry};
use simple_runtime::{ContainerRuntime, DockerCli};

/// Label-driven container lifecycle scheduler.
///
/// Containers opt in with a single `simple.schedules.<command>` label whose
/// value is a cron expression; `<command>` is one of start, stop, restart.
#[derive(Parser, Debug)]
#[command(name = "schedules-worker", version, about)]
struct Cli {
    /// Container runtime CLI binary.
    #[arg(long, env = "DOCKER_BIN", default_value = "docker")]
    docker_bin: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let runtime: Arc<dyn ContainerRuntime> = Arc::new(DockerCli::new(&cli.docker_bin));
    let registry = Arc::new(ScheduleRegistry::new());
    let reconciler = Reconciler::new(Arc::clone(&runtime), Arc::clone(&registry));

    // Populate the registry before any event can race the initial state.
    reconciler.startup_scan().await?;
    info!(schedules = registry.len(), "startup scan complete");

    let mut events = runtime.subscribe_events().await?;
    info!("subscribed to container events");

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Some(event) => reconciler.handle_event(&event),
                    None => {
                        // A registry we can no longer keep in sync with
                        // reality must not keep running.
                        registry.drain();
                        bail!("container event stream closed, reconciliation halted");
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!(schedules = registry.len(), "shutting down, stopping all timers");
                registry.drain();
                break;
            }
        }
    }

    Ok(())
}
