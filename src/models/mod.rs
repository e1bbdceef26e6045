//! Domain models for the network reconciler.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 address with CIDR notation support
//! - [`Parameters`] - validated desired state
//! - [`NetworkHandle`] and [`SubnetHandle`] - resources returned by the remote store
//! - [`StackOutputs`] - the named values exported after a run

mod ipv4;
mod network;
mod outputs;
mod parameters;
mod security_group;
mod subnet;

// Re-export public types
pub use ipv4::{broadcast_addr, cut_addr, get_cidr_mask, num_aws_hosts, Ipv4, MAX_LENGTH};
pub use network::{NetworkHandle, NetworkRequest, Tags};
pub use outputs::StackOutputs;
pub use parameters::Parameters;
pub use security_group::{IngressRule, SecurityGroupHandle, SecurityGroupRequest};
pub use subnet::{SubnetHandle, SubnetKind, SubnetRequest};
