//! Runtime client contract consumed by the scheduling engine.

use async_trait::async_trait;
use tokio::sync::mpsc;

use simple_core::{ContainerSummary, RuntimeEvent};

use crate::error::Result;

/// Listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerFilter {
    /// Include stopped containers.
    pub all: bool,
    /// Exact container name match (without leading path separator).
    pub name: Option<String>,
}

impl ContainerFilter {
    /// Every container, including stopped ones.
    pub fn all() -> Self {
        Self { all: true, name: None }
    }

    /// A single container by exact name, including stopped state.
    pub fn by_name(name: &str) -> Self {
        Self {
            all: true,
            name: Some(name.to_string()),
        }
    }
}

/// Transient handle to one container, resolved by ID.
///
/// Handles are cheap and short-lived; callers re-resolve by name on every
/// operation rather than caching a handle across ticks.
#[async_trait]
pub trait ContainerHandle: Send + Sync {
    async fn start(&self) -> Result<()>;
    async fn stop(&self) -> Result<()>;
    async fn restart(&self) -> Result<()>;
}

/// Contract the engine consumes for listings, lifecycle commands, and the
/// container event stream.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// List containers matching the filter.
    async fn list_containers(&self, filter: &ContainerFilter) -> Result<Vec<ContainerSummary>>;

    /// Resolve a handle for the container with the given runtime ID.
    fn container(&self, id: &str) -> Box<dyn ContainerHandle>;

    /// Subscribe to container lifecycle events.
    ///
    /// The returned channel delivers events live and in arrival order;
    /// delivery is backpressured, so a slow subscriber stalls the sender
    /// rather than dropping events. The sender side is dropped when the
    /// underlying stream fails or ends; the subscriber must treat channel
    /// closure as a fatal desync condition.
    async fn subscribe_events(&self) -> Result<mpsc::Receiver<RuntimeEvent>>;
}
