//! Reconciliation logic.
//!
//! This module contains the steps of a run, in the order they execute:
//! - [`validate`] - Desired state from configuration
//! - [`reconcile`] - Adopt or create the network
//! - [`subnets`] - Public and private subnets
//! - [`security_group`] - Optional security group

mod reconcile;
mod security_group;
mod subnets;
mod validate;

// Re-export public functions
pub use reconcile::reconcile;
pub use security_group::provision_security_group;
pub use subnets::provision_subnets;
pub use validate::validate;
