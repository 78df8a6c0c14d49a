//! Docker implementation of the runtime client, driving the `docker` CLI.
//!
//! Listings go through `docker ps -q` + `docker inspect` because the inspect
//! JSON carries the full label map; the `docker ps` `Labels` column is a
//! comma-joined string that cannot round-trip cron values containing commas.
//! Events come from a long-lived `docker events --format '{{json .}}'`
//! process whose stdout lines are parsed and forwarded over a channel.

use std::collections::HashMap;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use simple_core::{ContainerSummary, RuntimeEvent};

use crate::client::{ContainerFilter, ContainerHandle, ContainerRuntime};
use crate::error::{Result, RuntimeError};

/// Channel capacity for the event stream. Reconciliation drains one event at
/// a time; the buffer absorbs short bursts and a full channel backpressures
/// the reader task instead of dropping events.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Docker runtime client backed by the `docker` CLI.
#[derive(Debug, Clone)]
pub struct DockerCli {
    bin: String,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl DockerCli {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    /// Run a docker CLI command and return stdout on success.
    async fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new(&self.bin)
            .args(args)
            .output()
            .await
            .map_err(|e| RuntimeError::Spawn {
                bin: self.bin.clone(),
                source: e,
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(RuntimeError::CommandFailed {
                command: format!("{} {}", self.bin, args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

#[async_trait]
impl ContainerRuntime for DockerCli {
    async fn list_containers(&self, filter: &ContainerFilter) -> Result<Vec<ContainerSummary>> {
        let mut args = vec!["ps", "-q"];
        if filter.all {
            args.push("-a");
        }
        let name_filter;
        if let Some(name) = &filter.name {
            name_filter = format!("name=^{}$", name);
            args.push("--filter");
            args.push(&name_filter);
        }

        let ids_out = self.run(&args).await?;
        let ids: Vec<&str> = ids_out.lines().filter(|l| !l.is_empty()).collect();
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut inspect_args = vec!["inspect"];
        inspect_args.extend(&ids);
        let inspect_out = self.run(&inspect_args).await?;
        let inspected: Vec<InspectedContainer> = serde_json::from_str(&inspect_out)?;

        let mut containers: Vec<ContainerSummary> =
            inspected.into_iter().map(ContainerSummary::from).collect();

        // Docker's name filter is a regex over substrings; enforce the exact
        // match the contract promises.
        if let Some(name) = &filter.name {
            containers.retain(|c| c.short_name() == name);
        }

        Ok(containers)
    }

    fn container(&self, id: &str) -> Box<dyn ContainerHandle> {
        Box::new(DockerContainer {
            cli: self.clone(),
            id: id.to_string(),
        })
    }

    async fn subscribe_events(&self) -> Result<mpsc::Receiver<RuntimeEvent>> {
        let mut child = Command::new(&self.bin)
            .args([
                "events",
                "--format",
                "{{json .}}",
                "--filter",
                "type=container",
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| RuntimeError::Spawn {
                bin: self.bin.clone(),
                source: e,
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| RuntimeError::EventStream("no stdout from events process".into()))?;

        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        tokio::spawn(async move {
            // Keep the child alive for the lifetime of the reader task.
            let _child = child;
            let mut lines = BufReader::new(stdout).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        let raw: RawEvent = match serde_json::from_str(&line) {
                            Ok(ev) => ev,
                            Err(e) => {
                                warn!(error = %e, "skipping unparseable event line");
                                continue;
                            }
                        };
                        let Some(event) = raw.into_runtime_event() else {
                            debug!("skipping event without a container name");
                            continue;
                        };
                        if tx.send(event).await.is_err() {
                            // Subscriber went away; stop reading.
                            break;
                        }
                    }
                    Ok(None) => {
                        error!("docker events stream ended");
                        break;
                    }
                    Err(e) => {
                        error!(error = %e, "failed to read docker events stream");
                        break;
                    }
                }
            }
            // Dropping `tx` closes the channel and signals the subscriber.
        });

        Ok(rx)
    }
}

/// Handle to one container, issuing lifecycle commands by ID.
struct DockerContainer {
    cli: DockerCli,
    id: String,
}

#[async_trait]
impl ContainerHandle for DockerContainer {
    async fn start(&self) -> Result<()> {
        self.cli.run(&["start", &self.id]).await.map(|_| ())
    }

    async fn stop(&self) -> Result<()> {
        self.cli.run(&["stop", &self.id]).await.map(|_| ())
    }

    async fn restart(&self) -> Result<()> {
        self.cli.run(&["restart", &self.id]).await.map(|_| ())
    }
}

// ── docker JSON shapes ──────────────────────────────────────────────

/// Subset of `docker inspect` output the client needs.
#[derive(Debug, Deserialize)]
struct InspectedContainer {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "State")]
    state: InspectedState,
    #[serde(rename = "Config")]
    config: InspectedConfig,
}

#[derive(Debug, Deserialize)]
struct InspectedState {
    #[serde(rename = "Status")]
    status: String,
}

#[derive(Debug, Deserialize)]
struct InspectedConfig {
    /// `null` for containers created without labels.
    #[serde(rename = "Labels", default)]
    labels: Option<HashMap<String, String>>,
}

impl From<InspectedContainer> for ContainerSummary {
    fn from(c: InspectedContainer) -> Self {
        ContainerSummary {
            id: c.id,
            name: c.name,
            state: c.state.status,
            labels: c.config.labels.unwrap_or_default(),
        }
    }
}

/// One line of `docker events --format '{{json .}}'`.
#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "Action", default)]
    action: String,
    #[serde(rename = "Actor", default)]
    actor: RawActor,
}

#[derive(Debug, Default, Deserialize)]
struct RawActor {
    #[serde(rename = "Attributes", default)]
    attributes: HashMap<String, String>,
}

impl RawEvent {
    /// Convert to the engine-facing event; `None` when the event carries no
    /// container name to key on.
    fn into_runtime_event(self) -> Option<RuntimeEvent> {
        let name = self
            .actor
            .attributes
            .get("name")
            .map(|n| n.trim_start_matches('/').to_string())?;
        Some(RuntimeEvent {
            action: self.action,
            name,
            attributes: self.actor.attributes,
        })
    }
}

// ── Tests ───────────────────────────────────────────────────────────
