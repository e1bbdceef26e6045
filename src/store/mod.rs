//! Remote resource store abstraction.
//!
//! - [`RemoteStore`] - operations the reconciler needs from a cloud provider
//! - [`MemoryStore`] - in-process store for tests and dry runs
//!
//! The AWS CLI backed store lives in [`crate::aws`].

mod memory;

use crate::error::StoreError;
use crate::models::{
    NetworkHandle, NetworkRequest, SecurityGroupHandle, SecurityGroupRequest, SubnetHandle,
    SubnetRequest,
};

pub use memory::{Call, MemoryStore, Operation};

/// Queryable store of network resources.
///
/// Every call is a blocking round trip. Retries and timeouts, if any, belong
/// to the implementation.
pub trait RemoteStore {
    /// Ids of networks tagged `tag_key=tag_value`, in the order the store returns them.
    fn list_networks_by_tag(&self, tag_key: &str, tag_value: &str)
        -> Result<Vec<String>, StoreError>;

    /// Names of availability zones in the given state (normally `available`).
    fn list_availability_zones(&self, state: &str) -> Result<Vec<String>, StoreError>;

    /// Create the network, or adopt `request.import_id` when set.
    fn create_or_import_network(
        &self,
        request: &NetworkRequest,
    ) -> Result<NetworkHandle, StoreError>;

    fn create_subnet(&self, request: &SubnetRequest) -> Result<SubnetHandle, StoreError>;

    fn create_security_group(
        &self,
        request: &SecurityGroupRequest,
    ) -> Result<SecurityGroupHandle, StoreError>;
}
