//! Idempotent reconciler for a VPC with one public and one private subnet.
//!
//! A run validates configuration, adopts the network tagged with the
//! configured name (or creates it), then creates the two subnets. See [`run`].

pub mod aws;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;
pub mod store;

use config::ConfigSource;
use models::{NetworkHandle, Parameters, SecurityGroupHandle, StackOutputs, SubnetHandle};
use store::RemoteStore;

pub use error::{Error, Result};

/// Optional parts of a run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Create a security group with this name in the network.
    pub security_group: Option<String>,
}

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub parameters: Parameters,
    pub network: NetworkHandle,
    pub subnets: [SubnetHandle; 2],
    pub security_group: Option<SecurityGroupHandle>,
    pub outputs: StackOutputs,
}

/// Validate, reconcile the network and provision its subnets.
///
/// Stops at the first error. Resources created before the failing step are
/// left in place.
pub fn run(
    config: &dyn ConfigSource,
    store: &dyn RemoteStore,
    options: &RunOptions,
) -> Result<RunReport> {
    let parameters = processing::validate(config)?;
    log::info!("#Start reconcile {parameters}");

    let network = processing::reconcile(store, &parameters)?;
    let subnets = processing::provision_subnets(store, &network, &parameters)?;
    let security_group = options
        .security_group
        .as_deref()
        .map(|name| processing::provision_security_group(store, &network, name))
        .transpose()?;

    let outputs = StackOutputs::new(&network, &subnets);
    Ok(RunReport {
        parameters,
        network,
        subnets,
        security_group,
        outputs,
    })
}
