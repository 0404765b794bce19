//! EC2 listing operations

mod operations;
mod types;

pub use operations::Ec2Operations;
pub use types::{EbsVolume, ElasticIp, NatGateway};

#[cfg(test)]
pub use operations::MockEc2Operations;

use crate::aws::context::{AwsContext, FromAwsContext};
use anyhow::{Context, Result};
use aws_sdk_ec2::{Client, types::Filter};
use ec2_unused_common::defaults::NAT_GATEWAY_STATE_AVAILABLE;
use tracing::debug;

/// EC2 client for listing addresses, gateways, route tables and volumes
pub struct Ec2Client {
    pub(crate) client: Client,
}

impl FromAwsContext for Ec2Client {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.ec2_client(),
        }
    }
}

impl Ec2Client {
    /// List all Elastic IP addresses. DescribeAddresses is not paginated.
    pub async fn describe_addresses(&self) -> Result<Vec<ElasticIp>> {
        let response = self
            .client
            .describe_addresses()
            .send()
            .await
            .context("Failed to describe Elastic IP addresses")?;

        let addresses: Vec<_> = response
            .addresses()
            .iter()
            .filter_map(ElasticIp::from_sdk)
            .collect();

        debug!(count = addresses.len(), "Found Elastic IP addresses");
        Ok(addresses)
    }

    /// List NAT gateways in the `available` state, following pagination.
    pub async fn describe_nat_gateways(&self) -> Result<Vec<NatGateway>> {
        let mut gateways = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let response = self
                .client
                .describe_nat_gateways()
                .filter(
                    Filter::builder()
                        .name("state")
                        .values(NAT_GATEWAY_STATE_AVAILABLE)
                        .build(),
                )
                .set_next_token(next_token.take())
                .send()
                .await
                .context("Failed to describe NAT gateways")?;

            gateways.extend(
                response
                    .nat_gateways()
                    .iter()
                    .filter_map(NatGateway::from_sdk),
            );

            match response.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!(count = gateways.len(), "Found NAT gateways");
        Ok(gateways)
    }

    /// List the IDs of route tables with a route targeting the NAT gateway.
    pub async fn route_tables_for_nat_gateway(&self, nat_gateway_id: &str) -> Result<Vec<String>> {
        let mut route_table_ids = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let response = self
                .client
                .describe_route_tables()
                .filters(
                    Filter::builder()
                        .name("route.nat-gateway-id")
                        .values(nat_gateway_id)
                        .build(),
                )
                .set_next_token(next_token.take())
                .send()
                .await
                .with_context(|| {
                    format!("Failed to describe route tables for NAT gateway {nat_gateway_id}")
                })?;

            route_table_ids.extend(
                response
                    .route_tables()
                    .iter()
                    .filter_map(|rt| rt.route_table_id())
                    .map(str::to_string),
            );

            match response.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!(
            nat_gateway_id = %nat_gateway_id,
            count = route_table_ids.len(),
            "Found route tables targeting NAT gateway"
        );
        Ok(route_table_ids)
    }

    /// List all EBS volumes, following pagination.
    pub async fn describe_volumes(&self) -> Result<Vec<EbsVolume>> {
        let mut volumes = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let response = self
                .client
                .describe_volumes()
                .set_next_token(next_token.take())
                .send()
                .await
                .context("Failed to describe EBS volumes")?;

            volumes.extend(response.volumes().iter().filter_map(EbsVolume::from_sdk));

            match response.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!(count = volumes.len(), "Found EBS volumes");
        Ok(volumes)
    }
}
