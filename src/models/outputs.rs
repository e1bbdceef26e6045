//! Named values exported after a successful run.

use super::{NetworkHandle, SubnetHandle};
use serde::{Deserialize, Serialize};

/// The eight exported values. Field names on the wire match the stack
/// output names consumers already read.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct StackOutputs {
    pub vpc_id: String,
    pub vpc_cidr: String,
    pub public_subnet_ids: String,
    pub private_subnet_ids: String,
    pub public_subnet_az: String,
    pub private_subnet_az: String,
    pub public_subnet_cidr: String,
    pub private_subnet_cidr: String,
}

impl StackOutputs {
    /// Build outputs from the network and the `[public, private]` subnet pair.
    pub fn new(network: &NetworkHandle, subnets: &[SubnetHandle; 2]) -> Self {
        let [public, private] = subnets;
        StackOutputs {
            vpc_id: network.id.clone(),
            vpc_cidr: network.cidr.clone(),
            public_subnet_ids: public.id.clone(),
            private_subnet_ids: private.id.clone(),
            public_subnet_az: public.availability_zone.clone(),
            private_subnet_az: private.availability_zone.clone(),
            public_subnet_cidr: public.cidr.clone(),
            private_subnet_cidr: private.cidr.clone(),
        }
    }

    /// Output name/value pairs in export order.
    pub fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("VpcId", self.vpc_id.as_str()),
            ("VpcCidr", self.vpc_cidr.as_str()),
            ("PublicSubnetIds", self.public_subnet_ids.as_str()),
            ("PrivateSubnetIds", self.private_subnet_ids.as_str()),
            ("PublicSubnetAz", self.public_subnet_az.as_str()),
            ("PrivateSubnetAz", self.private_subnet_az.as_str()),
            ("PublicSubnetCidr", self.public_subnet_cidr.as_str()),
            ("PrivateSubnetCidr", self.private_subnet_cidr.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StackOutputs {
        let network = NetworkHandle {
            id: "vpc-1".to_string(),
            cidr: "10.0.0.0/16".to_string(),
        };
        let subnet = |id: &str, cidr: &str, az: &str| SubnetHandle {
            id: id.to_string(),
            name: format!("{id}-name"),
            cidr: cidr.to_string(),
            availability_zone: az.to_string(),
            network_id: "vpc-1".to_string(),
        };
        StackOutputs::new(
            &network,
            &[
                subnet("subnet-a", "10.0.1.0/24", "us-east-1a"),
                subnet("subnet-b", "10.0.2.0/24", "us-east-1b"),
            ],
        )
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 8);
        assert_eq!(obj["VpcId"], "vpc-1");
        assert_eq!(obj["PublicSubnetIds"], "subnet-a");
        assert_eq!(obj["PrivateSubnetAz"], "us-east-1b");
        assert_eq!(obj["PrivateSubnetCidr"], "10.0.2.0/24");
    }

    #[test]
    fn test_entries_match_serialized_names() {
        let outputs = sample();
        let json = serde_json::to_value(&outputs).unwrap();
        for (key, value) in outputs.entries() {
            assert_eq!(json[key], value, "mismatch for {key}");
        }
    }
}
