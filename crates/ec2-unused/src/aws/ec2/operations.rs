//! EC2 operations trait for testing

use super::Ec2Client;
use super::types::{EbsVolume, ElasticIp, NatGateway};
use anyhow::Result;

/// Trait for EC2 operations that can be mocked in tests.
///
/// This trait abstracts the EC2 listing calls so the usage predicates in
/// the finder can be unit tested without hitting real AWS.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait Ec2Operations: Send + Sync {
    /// List all Elastic IP addresses
    async fn describe_addresses(&self) -> Result<Vec<ElasticIp>>;

    /// List available NAT gateways
    async fn describe_nat_gateways(&self) -> Result<Vec<NatGateway>>;

    /// List the route tables that route through a NAT gateway
    async fn route_tables_for_nat_gateway(&self, nat_gateway_id: &str) -> Result<Vec<String>>;

    /// List all EBS volumes
    async fn describe_volumes(&self) -> Result<Vec<EbsVolume>>;
}

impl Ec2Operations for Ec2Client {
    async fn describe_addresses(&self) -> Result<Vec<ElasticIp>> {
        Ec2Client::describe_addresses(self).await
    }

    async fn describe_nat_gateways(&self) -> Result<Vec<NatGateway>> {
        Ec2Client::describe_nat_gateways(self).await
    }

    async fn route_tables_for_nat_gateway(&self, nat_gateway_id: &str) -> Result<Vec<String>> {
        Ec2Client::route_tables_for_nat_gateway(self, nat_gateway_id).await
    }

    async fn describe_volumes(&self) -> Result<Vec<EbsVolume>> {
        Ec2Client::describe_volumes(self).await
    }
}
