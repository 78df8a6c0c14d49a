//! Container listing snapshot as reported by the runtime.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One container as returned by a runtime listing.
///
/// `name` may carry the runtime's leading path separator (Docker reports
/// `/web`); consumers strip it before using the name as an identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSummary {
    /// Runtime-internal container ID.
    pub id: String,
    /// Container name, the stable external identity.
    pub name: String,
    /// Runtime state string (`running`, `exited`, ...).
    pub state: String,
    /// Full label map at listing time.
    pub labels: HashMap<String, String>,
}

impl ContainerSummary {
    /// Container name without the runtime's leading path separator.
    pub fn short_name(&self) -> &str {
        self.name.trim_start_matches('/')
    }
}
