//! AWS CLI command execution.
//!
//! Provides utilities for running AWS CLI commands and returning their output.
//! Commands are argument vectors and never go through a shell.

use crate::error::StoreError;
use colored::Colorize;
use std::process::Command;

/// Largest stdout accepted from a single command.
const MAX_OUTPUT_BYTES: usize = 500_000;

/// Something that can execute a command and return its stdout.
///
/// `cmd[0]` is the program; every other element is passed as one argument,
/// unsplit and unquoted.
pub trait CommandRunner {
    fn run(&self, cmd: &[String]) -> Result<String, StoreError>;
}

/// Runs commands as child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, cmd: &[String]) -> Result<String, StoreError> {
        run(cmd)
    }
}

/// Run a command and return its stdout.
///
/// # Returns
/// * `Ok(String)` - The stdout output on success
/// * `Err` - If the command fails, is empty or produces too much output
pub fn run(cmd: &[String]) -> Result<String, StoreError> {
    let line = cmd.join(" ");
    log::debug!("run({cmd})", cmd = line.on_blue());

    let (program, args) = cmd
        .split_first()
        .ok_or_else(|| StoreError::CommandFailed("empty command".to_string()))?;

    let output = Command::new(program).args(args).output().map_err(|e| {
        log::error!("Command execution failed: {}", e);
        e
    })?;

    if output.status.success() {
        log::debug!("Success cmd: {line}");
        log::debug!("Success output.stdout.len(): {}", output.stdout.len());

        if output.stdout.len() > MAX_OUTPUT_BYTES {
            return Err(StoreError::CommandFailed(format!(
                "Response too large: {} bytes for command: {:?}",
                output.stdout.len(),
                cmd
            )));
        }
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::trace!(
            "code={code:?}, status={status}\n┎######\nstderr=\n{stderr}\n┖######",
            code = output.status.code(),
            status = output.status,
            stderr = stderr.red()
        );
        log::warn!(
            "{failed} to run {cmd}",
            failed = "failed".on_red(),
            cmd = line.on_blue()
        );
        return Err(StoreError::CommandFailed(stderr.trim().to_string()));
    }

    String::from_utf8(output.stdout)
        .map_err(|e| StoreError::CommandFailed(format!("Invalid UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_arguments_are_passed_unsplit() {
        let out = run(&args(&["echo", "web,api", "bob's vpc", "[{\"Key\":\"Name\"}]"])).unwrap();
        assert_eq!(out, "web,api bob's vpc [{\"Key\":\"Name\"}]\n");
    }

    #[test]
    fn test_run_failure_reports_stderr() {
        let err = run(&args(&["sh", "-c", "echo denied >&2; exit 3"])).unwrap_err();
        assert_eq!(err.to_string(), "command failed: denied");
    }

    #[test]
    fn test_run_empty_command() {
        let err = run(&[]).unwrap_err();
        assert_eq!(err.to_string(), "command failed: empty command");
    }
}
