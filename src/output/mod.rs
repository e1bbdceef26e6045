//! Output formatting for a finished run.
//!
//! This module handles presenting stack outputs:
//! - [`terminal`] - Aligned terminal output with colors
//! - [`json`] - Outputs file for downstream tooling

mod json;
mod terminal;

pub use json::{write_outputs, OutputsFile};
pub use terminal::{format_field, print_report};
