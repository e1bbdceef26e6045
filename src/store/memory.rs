//! In-process remote store.
//!
//! Keeps networks, subnets and security groups in memory and records every
//! call, so tests can assert on what the reconciler asked for. Used by
//! `--dry-run` as well.

use super::RemoteStore;
use crate::error::StoreError;
use crate::models::{
    NetworkHandle, NetworkRequest, SecurityGroupHandle, SecurityGroupRequest, SubnetHandle,
    SubnetRequest, Tags,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Store operation, used to inject failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    ListNetworks,
    ListZones,
    ImportNetwork,
    CreateNetwork,
    /// Subnet creation for one logical subnet name (e.g. `publicSubnet`).
    CreateSubnet(String),
    CreateSecurityGroup,
}

/// A recorded store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListNetworks { tag_key: String, tag_value: String },
    ListZones { state: String },
    ImportNetwork(NetworkRequest),
    CreateNetwork(NetworkRequest),
    CreateSubnet(SubnetRequest),
    CreateSecurityGroup(SecurityGroupRequest),
}

#[derive(Debug, Clone)]
struct StoredNetwork {
    id: String,
    cidr: String,
    tags: Tags,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    networks: RefCell<Vec<StoredNetwork>>,
    zones: Vec<(String, String)>,
    subnets: RefCell<Vec<SubnetHandle>>,
    security_groups: RefCell<Vec<SecurityGroupHandle>>,
    failures: RefCell<HashMap<Operation, String>>,
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u32>,
}

impl MemoryStore {
    /// Empty store with the given zones, all in state `available`.
    pub fn new<S: Into<String>>(zones: impl IntoIterator<Item = S>) -> Self {
        MemoryStore {
            zones: zones
                .into_iter()
                .map(|z| (z.into(), "available".to_string()))
                .collect(),
            ..Default::default()
        }
    }

    /// Add a zone in an arbitrary state (e.g. `impaired`).
    pub fn with_zone(mut self, name: impl Into<String>, state: impl Into<String>) -> Self {
        self.zones.push((name.into(), state.into()));
        self
    }

    /// Seed a pre-existing network tagged `Name=name`.
    pub fn with_network(self, id: impl Into<String>, cidr: impl Into<String>, name: &str) -> Self {
        let mut tags = Tags::new();
        tags.insert(crate::config::TAG_KEY.to_string(), name.to_string());
        self.networks.borrow_mut().push(StoredNetwork {
            id: id.into(),
            cidr: cidr.into(),
            tags,
        });
        self
    }

    /// Make `operation` fail with `message` from now on.
    pub fn fail_on(&self, operation: Operation, message: impl Into<String>) {
        self.failures.borrow_mut().insert(operation, message.into());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls matching `pred`.
    pub fn count_calls(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn network_count(&self) -> usize {
        self.networks.borrow().len()
    }

    pub fn subnets(&self) -> Vec<SubnetHandle> {
        self.subnets.borrow().clone()
    }

    pub fn security_groups(&self) -> Vec<SecurityGroupHandle> {
        self.security_groups.borrow().clone()
    }

    fn check(&self, operation: &Operation) -> Result<(), StoreError> {
        match self.failures.borrow().get(operation) {
            Some(message) => Err(StoreError::Injected(message.clone())),
            None => Ok(()),
        }
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn new_id(&self, prefix: &str) -> String {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        format!("{prefix}-{id:08x}")
    }
}

impl RemoteStore for MemoryStore {
    fn list_networks_by_tag(
        &self,
        tag_key: &str,
        tag_value: &str,
    ) -> Result<Vec<String>, StoreError> {
        self.record(Call::ListNetworks {
            tag_key: tag_key.to_string(),
            tag_value: tag_value.to_string(),
        });
        self.check(&Operation::ListNetworks)?;
        Ok(self
            .networks
            .borrow()
            .iter()
            .filter(|n| n.tags.get(tag_key).map(String::as_str) == Some(tag_value))
            .map(|n| n.id.clone())
            .collect())
    }

    fn list_availability_zones(&self, state: &str) -> Result<Vec<String>, StoreError> {
        self.record(Call::ListZones {
            state: state.to_string(),
        });
        self.check(&Operation::ListZones)?;
        Ok(self
            .zones
            .iter()
            .filter(|(_, s)| s == state)
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn create_or_import_network(
        &self,
        request: &NetworkRequest,
    ) -> Result<NetworkHandle, StoreError> {
        match &request.import_id {
            Some(id) => {
                self.record(Call::ImportNetwork(request.clone()));
                self.check(&Operation::ImportNetwork)?;
                let mut networks = self.networks.borrow_mut();
                let network = networks
                    .iter_mut()
                    .find(|n| &n.id == id)
                    .ok_or_else(|| StoreError::NotFound(id.clone()))?;
                if network.cidr != request.cidr {
                    return Err(StoreError::Drift {
                        id: id.clone(),
                        observed: network.cidr.clone(),
                        desired: request.cidr.clone(),
                    });
                }
                network.tags.extend(request.tags.clone());
                Ok(NetworkHandle {
                    id: network.id.clone(),
                    cidr: network.cidr.clone(),
                })
            }
            None => {
                self.record(Call::CreateNetwork(request.clone()));
                self.check(&Operation::CreateNetwork)?;
                let network = StoredNetwork {
                    id: self.new_id("vpc"),
                    cidr: request.cidr.clone(),
                    tags: request.tags.clone(),
                };
                let handle = NetworkHandle {
                    id: network.id.clone(),
                    cidr: network.cidr.clone(),
                };
                self.networks.borrow_mut().push(network);
                Ok(handle)
            }
        }
    }

    fn create_subnet(&self, request: &SubnetRequest) -> Result<SubnetHandle, StoreError> {
        self.record(Call::CreateSubnet(request.clone()));
        self.check(&Operation::CreateSubnet(request.name.clone()))?;
        if !self
            .networks
            .borrow()
            .iter()
            .any(|n| n.id == request.network_id)
        {
            return Err(StoreError::NotFound(request.network_id.clone()));
        }
        let subnet = SubnetHandle {
            id: self.new_id("subnet"),
            name: request
                .tags
                .get(crate::config::TAG_KEY)
                .cloned()
                .unwrap_or_else(|| request.name.clone()),
            cidr: request.cidr.clone(),
            availability_zone: request.availability_zone.clone(),
            network_id: request.network_id.clone(),
        };
        self.subnets.borrow_mut().push(subnet.clone());
        Ok(subnet)
    }

    fn create_security_group(
        &self,
        request: &SecurityGroupRequest,
    ) -> Result<SecurityGroupHandle, StoreError> {
        self.record(Call::CreateSecurityGroup(request.clone()));
        self.check(&Operation::CreateSecurityGroup)?;
        let group = SecurityGroupHandle {
            id: self.new_id("sg"),
            name: request.name.clone(),
            network_id: request.network_id.clone(),
        };
        self.security_groups.borrow_mut().push(group.clone());
        Ok(group)
    }
}
