//! Desired state for one reconciliation run.

use crate::config::TAG_KEY;
use serde::{Deserialize, Serialize};

/// Validated desired state. Built by [`crate::processing::validate`] and
/// never mutated afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    /// Logical name of the network, also the value of its `Name` tag.
    pub name: String,
    /// IPv4 CIDR block of the network.
    pub cidr: String,
    /// Active stack, used in subnet tags.
    pub environment: String,
    /// Tag key used to look up an existing network.
    pub tag_key: String,
    pub public_subnet_cidr: String,
    pub private_subnet_cidr: String,
}

impl Parameters {
    pub fn new(
        name: impl Into<String>,
        cidr: impl Into<String>,
        environment: impl Into<String>,
        public_subnet_cidr: impl Into<String>,
        private_subnet_cidr: impl Into<String>,
    ) -> Self {
        Parameters {
            name: name.into(),
            cidr: cidr.into(),
            environment: environment.into(),
            tag_key: TAG_KEY.to_string(),
            public_subnet_cidr: public_subnet_cidr.into(),
            private_subnet_cidr: private_subnet_cidr.into(),
        }
    }
}

impl std::fmt::Display for Parameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{name} [{cidr}] env={env} public={public} private={private}",
            name = self.name,
            cidr = self.cidr,
            env = self.environment,
            public = self.public_subnet_cidr,
            private = self.private_subnet_cidr
        )
    }
}
