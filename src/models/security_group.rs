//! Security group data model.

use serde::{Deserialize, Serialize};

/// A single inbound rule.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IngressRule {
    pub protocol: String,
    pub from_port: u16,
    pub to_port: u16,
    pub cidr: String,
}

/// Desired security group sent to [`crate::store::RemoteStore::create_security_group`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityGroupRequest {
    pub name: String,
    pub description: String,
    pub network_id: String,
    pub ingress: Vec<IngressRule>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SecurityGroupHandle {
    pub id: String,
    pub name: String,
    pub network_id: String,
}
