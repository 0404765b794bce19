//! EC2 records consumed by the finder
//!
//! These are trimmed copies of the SDK response types, holding only the
//! fields the usage checks and reports look at. Records without an ID are
//! dropped during conversion since they cannot be reported.

use crate::aws::tags::extract_ec2_tags;
use ec2_unused_common::defaults::VOLUME_STATE_IN_USE;
use std::collections::BTreeMap;

/// Elastic IP address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElasticIp {
    pub allocation_id: String,
    pub public_ip: Option<String>,
    /// Set when the address is associated with an instance or network interface
    pub association_id: Option<String>,
    /// "vpc" or "standard"
    pub domain: Option<String>,
    pub tags: BTreeMap<String, String>,
}

impl ElasticIp {
    pub fn new(allocation_id: impl Into<String>) -> Self {
        Self {
            allocation_id: allocation_id.into(),
            ..Default::default()
        }
    }

    pub fn with_association(mut self, association_id: impl Into<String>) -> Self {
        self.association_id = Some(association_id.into());
        self
    }

    pub fn from_sdk(address: &aws_sdk_ec2::types::Address) -> Option<Self> {
        Some(Self {
            allocation_id: address.allocation_id()?.to_string(),
            public_ip: address.public_ip().map(str::to_string),
            association_id: address.association_id().map(str::to_string),
            domain: address.domain().map(|d| d.as_str().to_string()),
            tags: extract_ec2_tags(address.tags()),
        })
    }

    pub fn is_unused(&self) -> bool {
        self.association_id.is_none()
    }
}

/// NAT gateway
///
/// Whether a gateway is used depends on the route tables that target it,
/// so there is no `is_unused` here; see
/// [`UnusedFinder::unused_nat_gateways`](crate::aws::UnusedFinder::unused_nat_gateways).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NatGateway {
    pub nat_gateway_id: String,
    pub vpc_id: Option<String>,
    pub subnet_id: Option<String>,
    pub state: Option<String>,
    pub tags: BTreeMap<String, String>,
}

impl NatGateway {
    pub fn new(nat_gateway_id: impl Into<String>) -> Self {
        Self {
            nat_gateway_id: nat_gateway_id.into(),
            ..Default::default()
        }
    }

    pub fn from_sdk(gateway: &aws_sdk_ec2::types::NatGateway) -> Option<Self> {
        Some(Self {
            nat_gateway_id: gateway.nat_gateway_id()?.to_string(),
            vpc_id: gateway.vpc_id().map(str::to_string),
            subnet_id: gateway.subnet_id().map(str::to_string),
            state: gateway.state().map(|s| s.as_str().to_string()),
            tags: extract_ec2_tags(gateway.tags()),
        })
    }
}

/// EBS volume
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EbsVolume {
    pub volume_id: String,
    /// Raw volume state ("creating", "available", "in-use", ...)
    pub state: Option<String>,
    pub size_gib: Option<i32>,
    pub volume_type: Option<String>,
    pub availability_zone: Option<String>,
    pub tags: BTreeMap<String, String>,
}

impl EbsVolume {
    pub fn new(volume_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            volume_id: volume_id.into(),
            state: Some(state.into()),
            ..Default::default()
        }
    }

    pub fn from_sdk(volume: &aws_sdk_ec2::types::Volume) -> Option<Self> {
        Some(Self {
            volume_id: volume.volume_id()?.to_string(),
            state: volume.state().map(|s| s.as_str().to_string()),
            size_gib: volume.size(),
            volume_type: volume.volume_type().map(|t| t.as_str().to_string()),
            availability_zone: volume.availability_zone().map(str::to_string),
            tags: extract_ec2_tags(volume.tags()),
        })
    }

    /// Anything not attached counts as unused, including a missing state.
    pub fn is_unused(&self) -> bool {
        self.state.as_deref() != Some(VOLUME_STATE_IN_USE)
    }
}
