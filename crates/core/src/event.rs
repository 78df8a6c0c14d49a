//! Container lifecycle event delivered by the runtime's event stream.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One container event (create, die, destroy, rename, update, ...).
///
/// `attributes` is the full current label/attribute map of the container at
/// event time; for Docker it also carries non-label keys such as `image` and
/// `name`, which the label parser ignores by prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeEvent {
    /// Event action as reported by the runtime (e.g. `start`, `destroy`).
    pub action: String,
    /// Container name, already stripped of any leading path separator.
    pub name: String,
    /// Current label/attribute map at event time.
    pub attributes: HashMap<String, String>,
}
