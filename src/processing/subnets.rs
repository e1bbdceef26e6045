//! Subnet provisioning.
//!
//! Creates the public and the private subnet of a network, one per
//! availability zone. Subnets are always created; there is no lookup of
//! existing subnets.

use crate::config::DEFAULT_AVAILABILITY_STATE;
use crate::error::ProvisionError;
use crate::models::{NetworkHandle, Parameters, SubnetHandle, SubnetKind, SubnetRequest, Tags};
use crate::store::RemoteStore;

/// Desired subnet of `kind` in `zone`.
fn subnet_request(
    kind: SubnetKind,
    network: &NetworkHandle,
    params: &Parameters,
    zone: &str,
) -> SubnetRequest {
    let cidr = match kind {
        SubnetKind::Public => &params.public_subnet_cidr,
        SubnetKind::Private => &params.private_subnet_cidr,
    };
    let mut tags = Tags::new();
    tags.insert(
        params.tag_key.clone(),
        kind.tag_name(&params.name, &params.environment),
    );
    SubnetRequest {
        name: kind.resource_name(),
        network_id: network.id.clone(),
        cidr: cidr.clone(),
        availability_zone: zone.to_string(),
        tags,
    }
}

/// Create `[public, private]` subnets in `network`.
///
/// The public subnet goes to the first available zone, the private one to
/// the second. Fails before creating anything when fewer than two zones are
/// available. A failed public subnet stops the run before the private one.
pub fn provision_subnets(
    store: &dyn RemoteStore,
    network: &NetworkHandle,
    params: &Parameters,
) -> Result<[SubnetHandle; 2], ProvisionError> {
    let zones = store
        .list_availability_zones(DEFAULT_AVAILABILITY_STATE)
        .map_err(|source| ProvisionError::Zones { source })?;
    if zones.len() < 2 {
        return Err(ProvisionError::InsufficientZones { found: zones.len() });
    }
    log::debug!("available zones: {}", zones.join(", "));

    let create = |kind: SubnetKind, zone: &str| -> Result<SubnetHandle, ProvisionError> {
        let request = subnet_request(kind, network, params, zone);
        let tag = request.tags.get(&params.tag_key).cloned().unwrap_or_default();
        let subnet = store
            .create_subnet(&request)
            .map_err(|source| ProvisionError::Subnet {
                kind,
                name: tag,
                source,
            })?;
        log::info!("Created {kind} subnet {subnet}");
        Ok(subnet)
    };

    let public = create(SubnetKind::Public, &zones[0])?;
    let private = create(SubnetKind::Private, &zones[1])?;
    Ok([public, private])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Call, MemoryStore, Operation};

    fn params() -> Parameters {
        Parameters::new("acme", "10.0.0.0/16", "dev", "10.0.1.0/24", "10.0.2.0/24")
    }

    fn network() -> NetworkHandle {
        NetworkHandle {
            id: "vpc-1".to_string(),
            cidr: "10.0.0.0/16".to_string(),
        }
    }

    fn store_with_network(zones: &[&str]) -> MemoryStore {
        MemoryStore::new(zones.iter().copied()).with_network("vpc-1", "10.0.0.0/16", "acme")
    }

    fn subnet_calls(store: &MemoryStore) -> usize {
        store.count_calls(|c| matches!(c, Call::CreateSubnet(_)))
    }

    #[test]
    fn test_subnet_order_and_content() {
        let store = store_with_network(&["us-east-1a", "us-east-1b", "us-east-1c"]);
        let [public, private] = provision_subnets(&store, &network(), &params()).unwrap();

        assert_eq!(public.cidr, "10.0.1.0/24");
        assert_eq!(public.availability_zone, "us-east-1a");
        assert_eq!(public.name, "acme-public-subnet-dev");
        assert_eq!(public.network_id, "vpc-1");

        assert_eq!(private.cidr, "10.0.2.0/24");
        assert_eq!(private.availability_zone, "us-east-1b");
        assert_eq!(private.name, "acme-private-subnet-dev");
        assert_eq!(private.network_id, "vpc-1");
    }

    #[test]
    fn test_requests_use_available_zones() {
        let store = store_with_network(&["us-east-1a", "us-east-1b"]);
        provision_subnets(&store, &network(), &params()).unwrap();
        assert_eq!(
            store.calls()[0],
            Call::ListZones {
                state: "available".to_string()
            }
        );
        match &store.calls()[1] {
            Call::CreateSubnet(request) => {
                assert_eq!(request.name, "publicSubnet");
                assert_eq!(request.tags["Name"], "acme-public-subnet-dev");
            }
            other => panic!("expected subnet creation, got {other:?}"),
        }
    }

    #[test]
    fn test_insufficient_zones() {
        for zones in [&[][..], &["us-east-1a"][..]] {
            let store = store_with_network(zones);
            let err = provision_subnets(&store, &network(), &params()).unwrap_err();
            assert!(
                matches!(err, ProvisionError::InsufficientZones { found } if found == zones.len())
            );
            assert_eq!(subnet_calls(&store), 0);
        }
    }

    #[test]
    fn test_unavailable_zones_do_not_count() {
        let store = store_with_network(&["us-east-1a"]).with_zone("us-east-1b", "impaired");
        let err = provision_subnets(&store, &network(), &params()).unwrap_err();
        assert_eq!(err.to_string(), "need at least 2 available zones, found 1");
    }

    #[test]
    fn test_zone_lookup_failure() {
        let store = store_with_network(&["us-east-1a", "us-east-1b"]);
        store.fail_on(Operation::ListZones, "UnauthorizedOperation");
        let err = provision_subnets(&store, &network(), &params()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed listing availability zones: UnauthorizedOperation"
        );
        assert_eq!(subnet_calls(&store), 0);
    }

    #[test]
    fn test_public_failure_skips_private() {
        let store = store_with_network(&["us-east-1a", "us-east-1b"]);
        store.fail_on(Operation::CreateSubnet("publicSubnet".to_string()), "InvalidSubnet.Range");
        let err = provision_subnets(&store, &network(), &params()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed creating public subnet acme-public-subnet-dev: InvalidSubnet.Range"
        );
        assert_eq!(subnet_calls(&store), 1);
        assert!(store.subnets().is_empty());
    }

    #[test]
    fn test_private_failure_keeps_public() {
        let store = store_with_network(&["us-east-1a", "us-east-1b"]);
        store.fail_on(Operation::CreateSubnet("privateSubnet".to_string()), "InvalidSubnet.Conflict");
        let err = provision_subnets(&store, &network(), &params()).unwrap_err();
        assert!(matches!(
            err,
            ProvisionError::Subnet {
                kind: SubnetKind::Private,
                ..
            }
        ));
        assert_eq!(store.subnets().len(), 1);
        assert_eq!(store.subnets()[0].cidr, "10.0.1.0/24");
    }
}
