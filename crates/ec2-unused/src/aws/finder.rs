//! Unused resource finder
//!
//! Each check is one listing (plus one route table query per NAT gateway)
//! followed by a filter. Calls run sequentially and any API error aborts
//! the check without partial results.

use super::ec2::{EbsVolume, Ec2Client, Ec2Operations, ElasticIp, NatGateway};
use super::tags::{TagMatcher, name_tag};
use crate::aws::context::{AwsContext, FromAwsContext};
use anyhow::Result;
use ec2_unused_common::{ResourceKind, UnusedResource};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Finds unused resources in a single region
pub struct UnusedFinder<E> {
    ec2: E,
    region: String,
    ignore_tags: Vec<TagMatcher>,
}

impl FromAwsContext for UnusedFinder<Ec2Client> {
    fn from_context(ctx: &AwsContext) -> Self {
        Self::new(Ec2Client::from_context(ctx), ctx.region())
    }
}

impl<E: Ec2Operations> UnusedFinder<E> {
    pub fn new(ec2: E, region: impl Into<String>) -> Self {
        Self {
            ec2,
            region: region.into(),
            ignore_tags: Vec::new(),
        }
    }

    /// Skip resources carrying any of these tags
    pub fn with_ignore_tags(mut self, ignore_tags: Vec<TagMatcher>) -> Self {
        self.ignore_tags = ignore_tags;
        self
    }

    /// Elastic IPs with no association
    pub async fn unused_elastic_ips(&self) -> Result<Vec<UnusedResource>> {
        let addresses = self.ec2.describe_addresses().await?;

        let unused: Vec<_> = addresses
            .into_iter()
            .filter(ElasticIp::is_unused)
            .filter(|a| !self.is_ignored(&a.tags))
            .map(|a| self.elastic_ip_resource(a))
            .collect();

        debug!(region = %self.region, count = unused.len(), "Unused Elastic IPs");
        Ok(unused)
    }

    /// NAT gateways that no route table routes through
    pub async fn unused_nat_gateways(&self) -> Result<Vec<UnusedResource>> {
        let gateways = self.ec2.describe_nat_gateways().await?;

        let mut unused = Vec::new();
        for gateway in gateways {
            if self.is_ignored(&gateway.tags) {
                continue;
            }
            let route_tables = self
                .ec2
                .route_tables_for_nat_gateway(&gateway.nat_gateway_id)
                .await?;
            if route_tables.is_empty() {
                unused.push(self.nat_gateway_resource(gateway));
            } else {
                debug!(
                    nat_gateway_id = %gateway.nat_gateway_id,
                    route_tables = ?route_tables,
                    "NAT gateway is referenced"
                );
            }
        }

        debug!(region = %self.region, count = unused.len(), "Unused NAT gateways");
        Ok(unused)
    }

    /// EBS volumes not in the `in-use` state
    pub async fn unused_ebs_volumes(&self) -> Result<Vec<UnusedResource>> {
        let volumes = self.ec2.describe_volumes().await?;

        let unused: Vec<_> = volumes
            .into_iter()
            .filter(EbsVolume::is_unused)
            .filter(|v| !self.is_ignored(&v.tags))
            .map(|v| self.volume_resource(v))
            .collect();

        debug!(region = %self.region, count = unused.len(), "Unused EBS volumes");
        Ok(unused)
    }

    /// Run the check for a single resource kind
    pub async fn find(&self, kind: ResourceKind) -> Result<Vec<UnusedResource>> {
        match kind {
            ResourceKind::ElasticIp => self.unused_elastic_ips().await,
            ResourceKind::NatGateway => self.unused_nat_gateways().await,
            ResourceKind::EbsVolume => self.unused_ebs_volumes().await,
        }
    }

    /// Run the checks for each kind in order and concatenate the results
    pub async fn find_all(&self, kinds: &[ResourceKind]) -> Result<Vec<UnusedResource>> {
        let mut resources = Vec::new();
        for &kind in kinds {
            let found = self.find(kind).await?;
            info!(region = %self.region, kind = %kind, count = found.len(), "Checked resources");
            resources.extend(found);
        }
        Ok(resources)
    }

    fn is_ignored(&self, tags: &BTreeMap<String, String>) -> bool {
        self.ignore_tags.iter().any(|m| m.matches(tags))
    }

    fn elastic_ip_resource(&self, address: ElasticIp) -> UnusedResource {
        let detail = join_detail([
            address.public_ip.clone(),
            address.domain.as_ref().map(|d| format!("domain {d}")),
        ]);
        UnusedResource {
            kind: ResourceKind::ElasticIp,
            name: name_tag(&address.tags),
            id: address.allocation_id,
            region: self.region.clone(),
            detail,
            tags: address.tags,
        }
    }

    fn nat_gateway_resource(&self, gateway: NatGateway) -> UnusedResource {
        let detail = join_detail([
            gateway.vpc_id.clone(),
            gateway.subnet_id.clone(),
            gateway.state.clone(),
        ]);
        UnusedResource {
            kind: ResourceKind::NatGateway,
            name: name_tag(&gateway.tags),
            id: gateway.nat_gateway_id,
            region: self.region.clone(),
            detail,
            tags: gateway.tags,
        }
    }

    fn volume_resource(&self, volume: EbsVolume) -> UnusedResource {
        let detail = join_detail([
            volume.size_gib.map(|s| format!("{s} GiB")),
            volume.volume_type.clone(),
            volume.state.clone(),
            volume.availability_zone.clone(),
        ]);
        UnusedResource {
            kind: ResourceKind::EbsVolume,
            name: name_tag(&volume.tags),
            id: volume.volume_id,
            region: self.region.clone(),
            detail,
            tags: volume.tags,
        }
    }
}

fn join_detail<const N: usize>(parts: [Option<String>; N]) -> String {
    parts.into_iter().flatten().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::ec2::MockEc2Operations;
    use anyhow::anyhow;

    fn finder(ec2: MockEc2Operations) -> UnusedFinder<MockEc2Operations> {
        UnusedFinder::new(ec2, "us-east-1")
    }

    #[tokio::test]
    async fn test_unused_elastic_ips() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_addresses().times(1).returning(|| {
            Ok(vec![
                ElasticIp::new("allocation1").with_association("association1"),
                ElasticIp::new("allocation2"),
            ])
        });

        let unused = finder(ec2).unused_elastic_ips().await.unwrap();
        assert_eq!(unused.len(), 1);
        assert_eq!(unused[0].id(), "allocation2");
        assert_eq!(unused[0].kind, ResourceKind::ElasticIp);
        assert_eq!(unused[0].region, "us-east-1");
    }

    #[tokio::test]
    async fn test_elastic_ip_error_propagates() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_addresses()
            .returning(|| Err(anyhow!("AWS Error")));

        let err = finder(ec2).unused_elastic_ips().await.unwrap_err();
        assert_eq!(err.to_string(), "AWS Error");
    }

    #[tokio::test]
    async fn test_nat_gateway_without_route_table_is_unused() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_nat_gateways()
            .returning(|| Ok(vec![NatGateway::new("gateway1")]));
        ec2.expect_route_tables_for_nat_gateway()
            .times(1)
            .returning(|_| Ok(vec![]));

        let unused = finder(ec2).unused_nat_gateways().await.unwrap();
        assert_eq!(unused.len(), 1);
        assert_eq!(unused[0].id(), "gateway1");
    }

    #[tokio::test]
    async fn test_nat_gateway_with_route_table_is_used() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_nat_gateways().returning(|| {
            Ok(vec![NatGateway::new("gateway1"), NatGateway::new("gateway2")])
        });
        ec2.expect_route_tables_for_nat_gateway()
            .times(2)
            .returning(|id| {
                if id == "gateway1" {
                    Ok(vec!["routetable1".to_string()])
                } else {
                    Ok(vec![])
                }
            });

        let unused = finder(ec2).unused_nat_gateways().await.unwrap();
        let ids: Vec<_> = unused.iter().map(|r| r.id()).collect();
        assert_eq!(ids, ["gateway2"]);
    }

    #[tokio::test]
    async fn test_route_table_error_propagates() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_nat_gateways()
            .returning(|| Ok(vec![NatGateway::new("gateway1")]));
        ec2.expect_route_tables_for_nat_gateway()
            .returning(|_| Err(anyhow!("UnauthorizedOperation")));

        assert!(finder(ec2).unused_nat_gateways().await.is_err());
    }

    #[tokio::test]
    async fn test_nat_gateway_listing_error_skips_route_lookup() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_nat_gateways()
            .returning(|| Err(anyhow!("AWS Error")));
        ec2.expect_route_tables_for_nat_gateway().never();

        assert!(finder(ec2).unused_nat_gateways().await.is_err());
    }

    #[tokio::test]
    async fn test_unused_ebs_volumes() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_volumes().times(1).returning(|| {
            Ok(vec![
                EbsVolume::new("vol1", "available"),
                EbsVolume::new("vol2", "in-use"),
            ])
        });

        let unused = finder(ec2).unused_ebs_volumes().await.unwrap();
        assert_eq!(unused.len(), 1);
        assert_eq!(unused[0].id(), "vol1");
        assert_eq!(unused[0].detail, "available");
    }

    #[tokio::test]
    async fn test_volume_detail_and_name() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_volumes().returning(|| {
            let mut vol = EbsVolume::new("vol-0abc", "available");
            vol.size_gib = Some(50);
            vol.volume_type = Some("gp3".to_string());
            vol.availability_zone = Some("us-east-1b".to_string());
            vol.tags.insert("Name".to_string(), "scratch".to_string());
            Ok(vec![vol])
        });

        let unused = finder(ec2).unused_ebs_volumes().await.unwrap();
        assert_eq!(unused[0].detail, "50 GiB, gp3, available, us-east-1b");
        assert_eq!(unused[0].name.as_deref(), Some("scratch"));
        assert_eq!(unused[0].tags.len(), 1);
    }

    #[tokio::test]
    async fn test_ignore_tags_exclude_resources() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_addresses().returning(|| {
            let mut kept = ElasticIp::new("eipalloc-keep");
            kept.tags.insert("keep".to_string(), "true".to_string());
            Ok(vec![kept, ElasticIp::new("eipalloc-report")])
        });
        ec2.expect_describe_nat_gateways().returning(|| {
            let mut kept = NatGateway::new("nat-keep");
            kept.tags.insert("keep".to_string(), "yes".to_string());
            Ok(vec![kept])
        });
        // Ignored gateways are never looked up
        ec2.expect_route_tables_for_nat_gateway().never();

        let finder = finder(ec2).with_ignore_tags(vec!["keep".parse().unwrap()]);

        let eips = finder.unused_elastic_ips().await.unwrap();
        assert_eq!(eips.len(), 1);
        assert_eq!(eips[0].id(), "eipalloc-report");

        assert!(finder.unused_nat_gateways().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_runs_only_requested_kinds_in_order() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_volumes()
            .times(1)
            .returning(|| Ok(vec![EbsVolume::new("vol1", "available")]));
        ec2.expect_describe_addresses()
            .times(1)
            .returning(|| Ok(vec![ElasticIp::new("eipalloc-1")]));

        let found = finder(ec2)
            .find_all(&[ResourceKind::EbsVolume, ResourceKind::ElasticIp])
            .await
            .unwrap();
        let kinds: Vec<_> = found.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, [ResourceKind::EbsVolume, ResourceKind::ElasticIp]);
    }

    #[tokio::test]
    async fn test_find_all_stops_at_first_error() {
        let mut ec2 = MockEc2Operations::new();
        ec2.expect_describe_addresses()
            .returning(|| Err(anyhow!("AWS Error")));
        ec2.expect_describe_volumes().never();

        let result = finder(ec2)
            .find_all(&[ResourceKind::ElasticIp, ResourceKind::EbsVolume])
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_join_detail_skips_missing_parts() {
        assert_eq!(
            join_detail([Some("a".to_string()), None, Some("c".to_string())]),
            "a, c"
        );
        assert_eq!(join_detail::<1>([None]), "");
    }
}
