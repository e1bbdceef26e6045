//! Network (VPC) data model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resource tags, ordered by key.
pub type Tags = BTreeMap<String, String>;

/// Reference to a network that exists in the remote store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NetworkHandle {
    /// Provider assigned identifier (e.g. `vpc-0abc...`).
    pub id: String,
    /// CIDR block of the network.
    pub cidr: String,
}

/// Desired network sent to [`crate::store::RemoteStore::create_or_import_network`].
///
/// With `import_id` set, the store adopts that existing network instead of
/// creating a new one; `cidr` and `tags` remain the desired state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRequest {
    pub name: String,
    pub cidr: String,
    pub tags: Tags,
    pub import_id: Option<String>,
}

impl std::fmt::Display for NetworkHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.id, self.cidr)
    }
}
