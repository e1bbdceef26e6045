//! Error types for the reconciler.
//!
//! Each layer wraps the error of the layer below with its own context, so the
//! final message reads key → call → resource name.

use crate::models::SubnetKind;
use thiserror::Error;

/// A required configuration value is missing or malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required in stack config")]
    MissingKey(&'static str),

    #[error("{key} is not a valid IPv4 CIDR block '{value}': {reason}")]
    InvalidCidr {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("{key} {subnet} is not inside the network CIDR {network}")]
    SubnetOutsideNetwork {
        key: &'static str,
        subnet: String,
        network: String,
    },
}

impl ValidationError {
    /// The configuration key this error is about.
    pub fn key(&self) -> &'static str {
        match self {
            ValidationError::MissingKey(key) => key,
            ValidationError::InvalidCidr { key, .. } => key,
            ValidationError::SubnetOutsideNetwork { key, .. } => key,
        }
    }
}

/// Failure reported by a [`crate::store::RemoteStore`] call.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("command failed: {0}")]
    CommandFailed(String),

    #[error("unexpected response at path={path}: {message}")]
    Parse { path: String, message: String },

    #[error("network {id} has CIDR {observed}, desired {desired}")]
    Drift {
        id: String,
        observed: String,
        desired: String,
    },

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Injected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while adopting or creating the network.
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("failed querying networks tagged {tag_key}={tag_value}: {source}")]
    Query {
        tag_key: String,
        tag_value: String,
        #[source]
        source: StoreError,
    },

    #[error("failed importing existing network {id}: {source}")]
    Import {
        id: String,
        #[source]
        source: StoreError,
    },

    #[error("failed creating network {name}: {source}")]
    Create {
        name: String,
        #[source]
        source: StoreError,
    },
}

/// Failure while provisioning the subnets of a network.
#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("failed listing availability zones: {source}")]
    Zones {
        #[source]
        source: StoreError,
    },

    #[error("need at least 2 available zones, found {found}")]
    InsufficientZones { found: usize },

    #[error("failed creating {kind} subnet {name}: {source}")]
    Subnet {
        kind: SubnetKind,
        name: String,
        #[source]
        source: StoreError,
    },
}

/// Failure while creating the optional security group.
#[derive(Error, Debug)]
pub enum SecurityGroupError {
    #[error("failed creating security group {name}: {source}")]
    Create {
        name: String,
        #[source]
        source: StoreError,
    },
}

/// Top level error for a reconciliation run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to load configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("failed to reconcile network: {0}")]
    Reconcile(#[from] ReconcileError),

    #[error("failed to create subnets: {0}")]
    Provision(#[from] ProvisionError),

    #[error("failed to create security group: {0}")]
    SecurityGroup(#[from] SecurityGroupError),

    #[error("failed writing outputs: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed serializing outputs: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
