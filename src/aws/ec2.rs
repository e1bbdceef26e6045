//! EC2 resources through the AWS CLI.
//!
//! Each store operation is one or two `aws ec2 ...` invocations whose JSON
//! output is parsed with `serde_path_to_error`, so a response we do not
//! understand is reported with the path of the offending field.

use super::cli::{CommandRunner, ShellRunner};
use crate::error::StoreError;
use crate::models::{
    Ipv4, NetworkHandle, NetworkRequest, SecurityGroupHandle, SecurityGroupRequest, SubnetHandle,
    SubnetRequest, Tags,
};
use crate::store::RemoteStore;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct Tag {
    key: String,
    value: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct Vpc {
    vpc_id: String,
    cidr_block: Ipv4,
    #[serde(default)]
    tags: Vec<Tag>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct DescribeVpcs {
    vpcs: Vec<Vpc>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct CreateVpc {
    vpc: Vpc,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct AvailabilityZone {
    zone_name: String,
    state: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct DescribeAvailabilityZones {
    availability_zones: Vec<AvailabilityZone>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct Subnet {
    subnet_id: String,
    vpc_id: String,
    cidr_block: String,
    availability_zone: String,
    #[serde(default)]
    tags: Vec<Tag>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct CreateSubnet {
    subnet: Subnet,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct CreateSecurityGroup {
    group_id: String,
}

/// [`RemoteStore`] that drives `aws ec2`.
#[derive(Debug, Clone, Default)]
pub struct Ec2Cli<R: CommandRunner = ShellRunner> {
    runner: R,
    region: Option<String>,
    profile: Option<String>,
}

impl Ec2Cli<ShellRunner> {
    pub fn new() -> Self {
        Ec2Cli::with_runner(ShellRunner)
    }
}

impl<R: CommandRunner> Ec2Cli<R> {
    pub fn with_runner(runner: R) -> Self {
        Ec2Cli {
            runner,
            region: None,
            profile: None,
        }
    }

    pub fn region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    pub fn profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    /// Full argument vector for `aws ec2 <args>`.
    fn command(&self, args: &[&str]) -> Vec<String> {
        let mut cmd: Vec<String> = ["aws", "ec2"]
            .iter()
            .chain(args)
            .chain(&["--output", "json"])
            .map(|s| s.to_string())
            .collect();
        if let Some(region) = &self.region {
            cmd.extend(["--region".to_string(), region.clone()]);
        }
        if let Some(profile) = &self.profile {
            cmd.extend(["--profile".to_string(), profile.clone()]);
        }
        cmd
    }

    fn ec2<T: DeserializeOwned>(&self, args: &[&str]) -> Result<T, StoreError> {
        let output = self.runner.run(&self.command(args))?;
        parse(&output)
    }

    fn describe_vpcs(&self, args: &[&str]) -> Result<Vec<Vpc>, StoreError> {
        let args: Vec<&str> = std::iter::once("describe-vpcs").chain(args.iter().copied()).collect();
        let described: DescribeVpcs = self.ec2(&args)?;
        Ok(described.vpcs)
    }
}

fn parse<T: DeserializeOwned>(output: &str) -> Result<T, StoreError> {
    let mut deserializer = serde_json::Deserializer::from_str(output);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::error!("OUTPUT START:\n\n{}\n\nOUTPUT END\n", output);
        StoreError::Parse {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        }
    })
}

/// `--filters` value matching `name` exactly against one value.
///
/// JSON form, so commas in the value are not read as a value separator.
fn filter(name: &str, value: &str) -> String {
    json!([{ "Name": name, "Values": [value] }]).to_string()
}

/// `[{"Key":..,"Value":..}]` list for `--tags`.
fn tag_list(tags: &Tags) -> Value {
    tags.iter()
        .map(|(k, v)| json!({ "Key": k, "Value": v }))
        .collect()
}

/// `--tag-specifications` value for a resource type.
fn tag_specification(resource_type: &str, tags: &Tags) -> String {
    json!([{ "ResourceType": resource_type, "Tags": tag_list(tags) }]).to_string()
}

fn name_tag(tags: &[Tag]) -> Option<&str> {
    tags.iter()
        .find(|t| t.key == crate::config::TAG_KEY)
        .map(|t| t.value.as_str())
}

impl<R: CommandRunner> RemoteStore for Ec2Cli<R> {
    fn list_networks_by_tag(
        &self,
        tag_key: &str,
        tag_value: &str,
    ) -> Result<Vec<String>, StoreError> {
        let filters = filter(&format!("tag:{tag_key}"), tag_value);
        let vpcs = self.describe_vpcs(&["--filters", &filters])?;
        Ok(vpcs.into_iter().map(|v| v.vpc_id).collect())
    }

    fn list_availability_zones(&self, state: &str) -> Result<Vec<String>, StoreError> {
        let filters = filter("state", state);
        let described: DescribeAvailabilityZones =
            self.ec2(&["describe-availability-zones", "--filters", &filters])?;
        Ok(described
            .availability_zones
            .into_iter()
            .filter(|z| z.state == state)
            .map(|z| z.zone_name)
            .collect())
    }

    fn create_or_import_network(
        &self,
        request: &NetworkRequest,
    ) -> Result<NetworkHandle, StoreError> {
        let vpc = match &request.import_id {
            Some(id) => {
                let vpc = self
                    .describe_vpcs(&["--vpc-ids", id])?
                    .into_iter()
                    .next()
                    .ok_or_else(|| StoreError::NotFound(id.clone()))?;
                if Ipv4::new(&request.cidr).ok() != Some(vpc.cidr_block) {
                    return Err(StoreError::Drift {
                        id: id.clone(),
                        observed: vpc.cidr_block.to_string(),
                        desired: request.cidr.clone(),
                    });
                }
                let desired_name = request.tags.get(crate::config::TAG_KEY).map(String::as_str);
                if name_tag(&vpc.tags) != desired_name {
                    log::info!("Tagging imported network {id}");
                    let tags = tag_list(&request.tags).to_string();
                    self.runner.run(&self.command(&[
                        "create-tags",
                        "--resources",
                        id,
                        "--tags",
                        &tags,
                    ]))?;
                }
                vpc
            }
            None => {
                let tag_spec = tag_specification("vpc", &request.tags);
                let created: CreateVpc = self.ec2(&[
                    "create-vpc",
                    "--cidr-block",
                    &request.cidr,
                    "--tag-specifications",
                    &tag_spec,
                ])?;
                created.vpc
            }
        };
        Ok(NetworkHandle {
            id: vpc.vpc_id,
            cidr: vpc.cidr_block.to_string(),
        })
    }

    fn create_subnet(&self, request: &SubnetRequest) -> Result<SubnetHandle, StoreError> {
        let tag_spec = tag_specification("subnet", &request.tags);
        let created: CreateSubnet = self.ec2(&[
            "create-subnet",
            "--vpc-id",
            &request.network_id,
            "--cidr-block",
            &request.cidr,
            "--availability-zone",
            &request.availability_zone,
            "--tag-specifications",
            &tag_spec,
        ])?;
        let subnet = created.subnet;
        let name = name_tag(&subnet.tags)
            .map(str::to_string)
            .unwrap_or_else(|| request.name.clone());
        Ok(SubnetHandle {
            id: subnet.subnet_id,
            name,
            cidr: subnet.cidr_block,
            availability_zone: subnet.availability_zone,
            network_id: subnet.vpc_id,
        })
    }

    fn create_security_group(
        &self,
        request: &SecurityGroupRequest,
    ) -> Result<SecurityGroupHandle, StoreError> {
        let created: CreateSecurityGroup = self.ec2(&[
            "create-security-group",
            "--group-name",
            &request.name,
            "--description",
            &request.description,
            "--vpc-id",
            &request.network_id,
        ])?;
        for rule in &request.ingress {
            let port = format!("{}-{}", rule.from_port, rule.to_port);
            self.runner.run(&self.command(&[
                "authorize-security-group-ingress",
                "--group-id",
                &created.group_id,
                "--protocol",
                &rule.protocol,
                "--port",
                &port,
                "--cidr",
                &rule.cidr,
            ]))?;
        }
        Ok(SecurityGroupHandle {
            id: created.group_id,
            name: request.name.clone(),
            network_id: request.network_id.clone(),
        })
    }
}
