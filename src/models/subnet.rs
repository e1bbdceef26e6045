//! Subnet data model.

use super::Tags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two provisioned subnets.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubnetKind {
    Public,
    Private,
}

impl SubnetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubnetKind::Public => "public",
            SubnetKind::Private => "private",
        }
    }

    /// Value of the `Name` tag, e.g. `acme-public-subnet-dev`.
    pub fn tag_name(&self, name: &str, environment: &str) -> String {
        format!("{name}-{kind}-subnet-{environment}", kind = self.as_str())
    }

    /// Logical resource name, e.g. `publicSubnet`.
    pub fn resource_name(&self) -> String {
        format!("{}Subnet", self.as_str())
    }
}

impl fmt::Display for SubnetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a created subnet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubnetHandle {
    pub id: String,
    /// Value of the `Name` tag.
    pub name: String,
    pub cidr: String,
    pub availability_zone: String,
    /// Parent network id.
    pub network_id: String,
}

/// Desired subnet sent to [`crate::store::RemoteStore::create_subnet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetRequest {
    /// Logical resource name.
    pub name: String,
    pub network_id: String,
    pub cidr: String,
    pub availability_zone: String,
    pub tags: Tags,
}

impl fmt::Display for SubnetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' [{}] in {} (network {})",
            self.id, self.name, self.cidr, self.availability_zone, self.network_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name() {
        assert_eq!(
            SubnetKind::Public.tag_name("acme", "dev"),
            "acme-public-subnet-dev"
        );
        assert_eq!(
            SubnetKind::Private.tag_name("acme", "prod"),
            "acme-private-subnet-prod"
        );
    }

    #[test]
    fn test_resource_name() {
        assert_eq!(SubnetKind::Public.resource_name(), "publicSubnet");
        assert_eq!(SubnetKind::Private.resource_name(), "privateSubnet");
    }
}
