//! Optional security group for the reconciled network.

use crate::error::SecurityGroupError;
use crate::models::{IngressRule, NetworkHandle, SecurityGroupHandle, SecurityGroupRequest};
use crate::store::RemoteStore;

const DESCRIPTION: &str = "managed by vpc-reconciler";

/// Create security group `name` in `network`, open to TCP from inside the
/// network's own CIDR block.
pub fn provision_security_group(
    store: &dyn RemoteStore,
    network: &NetworkHandle,
    name: &str,
) -> Result<SecurityGroupHandle, SecurityGroupError> {
    let request = SecurityGroupRequest {
        name: name.to_string(),
        description: DESCRIPTION.to_string(),
        network_id: network.id.clone(),
        ingress: vec![IngressRule {
            protocol: "tcp".to_string(),
            from_port: 0,
            to_port: 65535,
            cidr: network.cidr.clone(),
        }],
    };
    let group = store
        .create_security_group(&request)
        .map_err(|source| SecurityGroupError::Create {
            name: name.to_string(),
            source,
        })?;
    log::info!("Created security group {} ({})", group.name, group.id);
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Call, MemoryStore, Operation};

    fn network() -> NetworkHandle {
        NetworkHandle {
            id: "vpc-1".to_string(),
            cidr: "10.0.0.0/16".to_string(),
        }
    }

    #[test]
    fn test_security_group_request() {
        let store = MemoryStore::new(["a", "b"]);
        let group = provision_security_group(&store, &network(), "acme-sg").unwrap();
        assert_eq!(group.name, "acme-sg");
        assert_eq!(group.network_id, "vpc-1");
        match &store.calls()[0] {
            Call::CreateSecurityGroup(request) => {
                assert_eq!(request.ingress.len(), 1);
                let rule = &request.ingress[0];
                assert_eq!(rule.protocol, "tcp");
                assert_eq!((rule.from_port, rule.to_port), (0, 65535));
                assert_eq!(rule.cidr, "10.0.0.0/16");
            }
            other => panic!("expected security group, got {other:?}"),
        }
    }

    #[test]
    fn test_security_group_failure() {
        let store = MemoryStore::new(["a", "b"]);
        store.fail_on(Operation::CreateSecurityGroup, "InvalidGroup.Duplicate");
        let err = provision_security_group(&store, &network(), "acme-sg").unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed creating security group acme-sg: InvalidGroup.Duplicate"
        );
    }
}
