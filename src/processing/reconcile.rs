//! Network reconciliation.
//!
//! Adopts the network already tagged with the desired name, or creates it.
//! Re-running with the same name never creates a second network.

use crate::error::ReconcileError;
use crate::models::{NetworkHandle, NetworkRequest, Parameters, Tags};
use crate::store::RemoteStore;
use colored::Colorize;

/// Converge the remote store to one network matching `params`.
///
/// When several networks carry the tag, the first one in store order is
/// adopted and a warning lists the others.
pub fn reconcile(
    store: &dyn RemoteStore,
    params: &Parameters,
) -> Result<NetworkHandle, ReconcileError> {
    let existing = store
        .list_networks_by_tag(&params.tag_key, &params.name)
        .map_err(|source| ReconcileError::Query {
            tag_key: params.tag_key.clone(),
            tag_value: params.name.clone(),
            source,
        })?;

    let mut tags = Tags::new();
    tags.insert(params.tag_key.clone(), params.name.clone());
    let mut request = NetworkRequest {
        name: params.name.clone(),
        cidr: params.cidr.clone(),
        tags,
        import_id: None,
    };

    match existing.split_first() {
        Some((first, rest)) => {
            if !rest.is_empty() {
                log::warn!(
                    "{} networks tagged {}={}: {}; adopting {}",
                    existing.len(),
                    params.tag_key,
                    params.name,
                    existing.join(", "),
                    first.yellow()
                );
            }
            request.import_id = Some(first.clone());
            let network = store
                .create_or_import_network(&request)
                .map_err(|source| ReconcileError::Import {
                    id: first.clone(),
                    source,
                })?;
            log::info!("Network already exists with ID: {}", network.id.green());
            Ok(network)
        }
        None => {
            log::debug!(
                "Network {} does not exist, creating a new one with CIDR {}",
                params.name,
                params.cidr
            );
            let network = store
                .create_or_import_network(&request)
                .map_err(|source| ReconcileError::Create {
                    name: params.name.clone(),
                    source,
                })?;
            log::info!("Created network with ID: {}", network.id.green());
            Ok(network)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Call, MemoryStore, Operation};

    fn params() -> Parameters {
        Parameters::new("test-vpc", "10.0.0.0/16", "dev", "10.0.1.0/24", "10.0.2.0/24")
    }

    fn is_create(call: &Call) -> bool {
        matches!(call, Call::CreateNetwork(_))
    }

    #[test]
    fn test_adopts_existing_network() {
        let store = MemoryStore::new(["a", "b"]).with_network("vpc-existing", "10.0.0.0/16", "test-vpc");
        let network = reconcile(&store, &params()).unwrap();
        assert_eq!(network.id, "vpc-existing");
        assert_eq!(store.count_calls(is_create), 0);
        assert_eq!(store.network_count(), 1);
        match &store.calls()[1] {
            Call::ImportNetwork(request) => {
                assert_eq!(request.import_id.as_deref(), Some("vpc-existing"));
                assert_eq!(request.cidr, "10.0.0.0/16");
                assert_eq!(request.tags["Name"], "test-vpc");
            }
            other => panic!("expected import, got {other:?}"),
        }
    }

    #[test]
    fn test_creates_when_missing() {
        let store = MemoryStore::new(["a", "b"]).with_network("vpc-other", "10.0.0.0/16", "other-vpc");
        let network = reconcile(&store, &params()).unwrap();
        assert_ne!(network.id, "vpc-other");
        assert_eq!(network.cidr, "10.0.0.0/16");
        assert_eq!(store.count_calls(is_create), 1);
        match &store.calls()[1] {
            Call::CreateNetwork(request) => {
                assert!(request.import_id.is_none());
                assert_eq!(request.tags["Name"], "test-vpc");
            }
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn test_second_run_adopts_first_runs_network() {
        let store = MemoryStore::new(["a", "b"]);
        let first = reconcile(&store, &params()).unwrap();
        let second = reconcile(&store, &params()).unwrap();
        assert_eq!(first, second);
        assert_eq!(store.network_count(), 1);
        assert_eq!(store.count_calls(is_create), 1);
    }

    #[test]
    fn test_ambiguous_tag_adopts_first() {
        let store = MemoryStore::new(["a", "b"])
            .with_network("vpc-first", "10.0.0.0/16", "test-vpc")
            .with_network("vpc-second", "10.0.0.0/16", "test-vpc");
        let network = reconcile(&store, &params()).unwrap();
        assert_eq!(network.id, "vpc-first");
        assert_eq!(store.count_calls(|c| matches!(c, Call::ImportNetwork(_))), 1);
        assert_eq!(store.count_calls(is_create), 0);
        assert_eq!(store.network_count(), 2);
    }

    #[test]
    fn test_query_failure() {
        let store = MemoryStore::new(["a", "b"]);
        store.fail_on(Operation::ListNetworks, "AuthFailure");
        let err = reconcile(&store, &params()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed querying networks tagged Name=test-vpc: AuthFailure"
        );
        assert_eq!(store.calls().len(), 1);
    }

    #[test]
    fn test_import_failure() {
        let store = MemoryStore::new(["a", "b"]).with_network("vpc-existing", "10.0.0.0/16", "test-vpc");
        store.fail_on(Operation::ImportNetwork, "RequestLimitExceeded");
        let err = reconcile(&store, &params()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("failed importing existing network vpc-existing"));
        assert!(message.contains("RequestLimitExceeded"));
        assert_eq!(store.count_calls(is_create), 0);
    }

    #[test]
    fn test_create_failure() {
        let store = MemoryStore::new(["a", "b"]);
        store.fail_on(Operation::CreateNetwork, "VpcLimitExceeded");
        let err = reconcile(&store, &params()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed creating network test-vpc: VpcLimitExceeded"
        );
        assert!(matches!(err, ReconcileError::Create { .. }));
    }
}
