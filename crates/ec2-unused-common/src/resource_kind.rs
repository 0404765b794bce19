//! EC2 resource kinds and their scan order

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Types of EC2 resources checked for usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Elastic IP address (unused when it has no association)
    ElasticIp,
    /// NAT gateway (unused when no route table targets it)
    NatGateway,
    /// EBS volume (unused when not in the `in-use` state)
    EbsVolume,
}

impl ResourceKind {
    /// All kinds, in the order they are scanned and reported
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::ElasticIp,
        ResourceKind::NatGateway,
        ResourceKind::EbsVolume,
    ];

    /// Name used on the command line and in JSON output
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::ElasticIp => "elastic-ip",
            ResourceKind::NatGateway => "nat-gateway",
            ResourceKind::EbsVolume => "ebs-volume",
        }
    }

    /// Human-readable label for tables
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::ElasticIp => "Elastic IP",
            ResourceKind::NatGateway => "NAT Gateway",
            ResourceKind::EbsVolume => "EBS Volume",
        }
    }

    /// Short description of when a resource of this kind counts as unused
    pub fn predicate(self) -> &'static str {
        match self {
            ResourceKind::ElasticIp => "address has no association",
            ResourceKind::NatGateway => "no route table routes through the gateway",
            ResourceKind::EbsVolume => "volume state is not \"in-use\"",
        }
    }

    /// Position in [`ResourceKind::ALL`], used for stable report ordering
    pub fn scan_order(self) -> u8 {
        match self {
            ResourceKind::ElasticIp => 0,
            ResourceKind::NatGateway => 1,
            ResourceKind::EbsVolume => 2,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a resource kind name is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResourceKindError(String);

impl fmt::Display for ParseResourceKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let valid: Vec<_> = ResourceKind::ALL.iter().map(|k| k.as_str()).collect();
        write!(
            f,
            "unknown resource kind '{}' (expected one of: {})",
            self.0,
            valid.join(", ")
        )
    }
}

impl std::error::Error for ParseResourceKindError {}

impl FromStr for ResourceKind {
    type Err = ParseResourceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "elastic-ip" | "eip" => Ok(ResourceKind::ElasticIp),
            "nat-gateway" | "nat" => Ok(ResourceKind::NatGateway),
            "ebs-volume" | "ebs" => Ok(ResourceKind::EbsVolume),
            _ => Err(ParseResourceKindError(s.to_string())),
        }
    }
}
