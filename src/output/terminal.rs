//! Terminal output utilities.
//!
//! Provides formatting helpers for terminal output.

use crate::models::{num_aws_hosts, Ipv4, SubnetHandle};
use crate::RunReport;
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Usable host count for a subnet, `?` when the CIDR cannot be read.
fn host_count(subnet: &SubnetHandle) -> String {
    Ipv4::new(&subnet.cidr)
        .and_then(|cidr| num_aws_hosts(cidr.mask))
        .map(|n| n.to_string())
        .unwrap_or_else(|_| "?".to_string())
}

fn subnet_line(subnet: &SubnetHandle) -> String {
    format!(
        "{id},{name},{cidr},{hosts},{az}",
        id = format_field(&subnet.id, 26),
        name = format_field(&subnet.name, 30),
        cidr = format_field(&subnet.cidr, 18),
        hosts = format_field(format!("{}_hosts", host_count(subnet)), 14),
        az = format_field(&subnet.availability_zone, 14),
    )
}

/// Print the network, its subnets and the named outputs to stdout.
pub fn print_report(report: &RunReport) {
    println!(
        "VPC: '{name}' {id} - {cidr} ({env})",
        name = report.parameters.name,
        id = report.network.id.green(),
        cidr = report.network.cidr,
        env = report.parameters.environment
    );
    for subnet in &report.subnets {
        println!("{}", subnet_line(subnet));
    }
    if let Some(group) = &report.security_group {
        println!("SG: '{}' {}", group.name, group.id.green());
    }
    println!("#{}#", "Outputs".on_blue());
    for (key, value) in report.outputs.entries() {
        println!("{},{}", format_field(key, 20), format_field(value, 26));
    }
}
