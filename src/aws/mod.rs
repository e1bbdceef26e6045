//! AWS CLI interaction.
//!
//! This module handles all AWS-related operations:
//! - [`cli`] - Command execution for the AWS CLI
//! - [`ec2`] - [`crate::store::RemoteStore`] backed by `aws ec2` commands

mod cli;
mod ec2;

// Re-export public types and functions
pub use cli::{run, CommandRunner, ShellRunner};
pub use ec2::Ec2Cli;
