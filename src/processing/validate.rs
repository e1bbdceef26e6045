//! Parameter validation.
//!
//! Reads the required keys from a [`ConfigSource`] in a fixed order and
//! reports the first one that is missing or empty.

use crate::config::{
    ConfigSource, KEY_ENVIRONMENT, KEY_PRIVATE_SUBNET_CIDR, KEY_PUBLIC_SUBNET_CIDR, KEY_VPC_CIDR,
    KEY_VPC_NAME,
};
use crate::error::ValidationError;
use crate::models::{Ipv4, Parameters};

/// Read a key, trimmed, and reject blank values.
fn require_non_empty(
    source: &dyn ConfigSource,
    key: &'static str,
) -> Result<String, ValidationError> {
    let value = source.require(key)?;
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingKey(key));
    }
    Ok(value.to_string())
}

fn parse_cidr(key: &'static str, value: &str) -> Result<Ipv4, ValidationError> {
    Ipv4::new(value).map_err(|e| ValidationError::InvalidCidr {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Build [`Parameters`] from `source`.
///
/// Order: `vpcName`, `vpcCIDR`, `publicSubnetCIDR`, `privateSubnetCIDR`, then
/// the derived environment. After all values are present the CIDR blocks are
/// parsed and both subnets must sit inside the network.
pub fn validate(source: &dyn ConfigSource) -> Result<Parameters, ValidationError> {
    let name = require_non_empty(source, KEY_VPC_NAME)?;
    let cidr = require_non_empty(source, KEY_VPC_CIDR)?;
    let public_subnet_cidr = require_non_empty(source, KEY_PUBLIC_SUBNET_CIDR)?;
    let private_subnet_cidr = require_non_empty(source, KEY_PRIVATE_SUBNET_CIDR)?;
    let environment = source.current_environment().trim().to_string();
    if environment.is_empty() {
        return Err(ValidationError::MissingKey(KEY_ENVIRONMENT));
    }

    let network = parse_cidr(KEY_VPC_CIDR, &cidr)?;
    for (key, value) in [
        (KEY_PUBLIC_SUBNET_CIDR, &public_subnet_cidr),
        (KEY_PRIVATE_SUBNET_CIDR, &private_subnet_cidr),
    ] {
        let subnet = parse_cidr(key, value)?;
        if !network.contains(&subnet) {
            return Err(ValidationError::SubnetOutsideNetwork {
                key,
                subnet: value.clone(),
                network: cidr.clone(),
            });
        }
    }

    let parameters = Parameters::new(
        name,
        cidr,
        environment,
        public_subnet_cidr,
        private_subnet_cidr,
    );
    log::debug!("validated parameters: {parameters}");
    Ok(parameters)
}
