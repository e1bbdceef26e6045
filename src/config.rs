//! Configuration keys and sources.
//!
//! The validator reads its input through [`ConfigSource`], so nothing here
//! touches process-wide state except [`EnvConfig`], which reads the
//! environment it was pointed at.

use crate::error::ValidationError;
use std::collections::HashMap;

/// Tag used to find an existing network.
pub const TAG_KEY: &str = "Name";

pub const KEY_VPC_NAME: &str = "vpcName";
pub const KEY_VPC_CIDR: &str = "vpcCIDR";
pub const KEY_PUBLIC_SUBNET_CIDR: &str = "publicSubnetCIDR";
pub const KEY_PRIVATE_SUBNET_CIDR: &str = "privateSubnetCIDR";
/// Reported when the derived environment is empty.
pub const KEY_ENVIRONMENT: &str = "environment";

/// Required keys in validation order.
pub const REQUIRED_KEYS: [&str; 4] = [
    KEY_VPC_NAME,
    KEY_VPC_CIDR,
    KEY_PUBLIC_SUBNET_CIDR,
    KEY_PRIVATE_SUBNET_CIDR,
];

/// Prefix of environment variables read by [`EnvConfig`].
pub const ENV_PREFIX: &str = "VPC_CONFIG_";
pub const DEFAULT_STACK: &str = "dev";
pub const DEFAULT_AVAILABILITY_STATE: &str = "available";

/// Key/value configuration for one stack.
pub trait ConfigSource {
    /// Value of a required key. Absent keys are a [`ValidationError::MissingKey`].
    fn require(&self, key: &'static str) -> Result<String, ValidationError>;

    /// Name of the active stack (e.g. `dev`, `prod`).
    fn current_environment(&self) -> String;
}

/// Reads `VPC_CONFIG_<key>` environment variables.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    stack: String,
}

impl EnvConfig {
    pub fn new(stack: impl Into<String>) -> Self {
        EnvConfig {
            stack: stack.into(),
        }
    }

    pub fn var_name(key: &str) -> String {
        format!("{ENV_PREFIX}{key}")
    }
}

impl ConfigSource for EnvConfig {
    fn require(&self, key: &'static str) -> Result<String, ValidationError> {
        let var = Self::var_name(key);
        log::trace!("reading {var}");
        std::env::var(&var).map_err(|_| ValidationError::MissingKey(key))
    }

    fn current_environment(&self) -> String {
        self.stack.clone()
    }
}

/// In-memory configuration.
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    values: HashMap<String, String>,
    environment: String,
}

impl MapConfig {
    pub fn new(environment: impl Into<String>) -> Self {
        MapConfig {
            values: HashMap::new(),
            environment: environment.into(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }
}

impl ConfigSource for MapConfig {
    fn require(&self, key: &'static str) -> Result<String, ValidationError> {
        self.values
            .get(key)
            .cloned()
            .ok_or(ValidationError::MissingKey(key))
    }

    fn current_environment(&self) -> String {
        self.environment.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_config_require() {
        let config = MapConfig::new("dev").with(KEY_VPC_NAME, "acme");
        assert_eq!(config.require(KEY_VPC_NAME).unwrap(), "acme");
        assert_eq!(
            config.require(KEY_VPC_CIDR).unwrap_err(),
            ValidationError::MissingKey(KEY_VPC_CIDR)
        );
        assert_eq!(config.current_environment(), "dev");
    }

    #[test]
    fn test_env_config_var_name() {
        assert_eq!(EnvConfig::var_name(KEY_VPC_NAME), "VPC_CONFIG_vpcName");
    }

    #[test]
    fn test_env_config_missing_var() {
        let config = EnvConfig::new("staging");
        assert_eq!(
            config.require("keyThatIsNeverSet").unwrap_err(),
            ValidationError::MissingKey("keyThatIsNeverSet")
        );
        assert_eq!(config.current_environment(), "staging");
    }
}
