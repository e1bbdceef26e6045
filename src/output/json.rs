//! Outputs file.

use crate::error::Result;
use crate::models::StackOutputs;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of the outputs file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OutputsFile {
    pub stack: String,
    pub generated_at: DateTime<Utc>,
    pub outputs: StackOutputs,
}

/// Write `outputs` for `stack` as pretty JSON to `path`, replacing any
/// previous file.
pub fn write_outputs(path: &Path, stack: &str, outputs: &StackOutputs) -> Result<OutputsFile> {
    let file = OutputsFile {
        stack: stack.to_string(),
        generated_at: Utc::now(),
        outputs: outputs.clone(),
    };
    let json = serde_json::to_string_pretty(&file)?;
    log::info!("Writing outputs to {}", path.display());
    std::fs::write(path, json)?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_outputs() {
        let dir = tempfile::tempdir().expect("Error creating temp dir");
        let path = dir.path().join("outputs.json");
        let outputs = StackOutputs {
            vpc_id: "vpc-1".to_string(),
            vpc_cidr: "10.0.0.0/16".to_string(),
            public_subnet_ids: "subnet-a".to_string(),
            private_subnet_ids: "subnet-b".to_string(),
            public_subnet_az: "us-east-1a".to_string(),
            private_subnet_az: "us-east-1b".to_string(),
            public_subnet_cidr: "10.0.1.0/24".to_string(),
            private_subnet_cidr: "10.0.2.0/24".to_string(),
        };
        let written = write_outputs(&path, "dev", &outputs).expect("Error writing outputs");

        let json = std::fs::read_to_string(&path).expect("Error reading outputs");
        let read: OutputsFile = serde_json::from_str(&json).expect("Error parsing outputs");
        assert_eq!(read, written);
        assert_eq!(read.outputs.vpc_id, "vpc-1");
        assert!(json.contains("\"PublicSubnetAz\": \"us-east-1a\""));
    }

    #[test]
    fn test_write_outputs_missing_dir() {
        let dir = tempfile::tempdir().expect("Error creating temp dir");
        let path = dir.path().join("missing").join("outputs.json");
        let outputs = StackOutputs {
            vpc_id: String::new(),
            vpc_cidr: String::new(),
            public_subnet_ids: String::new(),
            private_subnet_ids: String::new(),
            public_subnet_az: String::new(),
            private_subnet_az: String::new(),
            public_subnet_cidr: String::new(),
            private_subnet_cidr: String::new(),
        };
        let err = write_outputs(&path, "dev", &outputs).unwrap_err();
        assert!(err.to_string().starts_with("failed writing outputs"));
    }
}
