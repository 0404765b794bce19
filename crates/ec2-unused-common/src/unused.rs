//! Unused resource records

use crate::resource_kind::ResourceKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A resource that matched its kind's "unused" predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnusedResource {
    /// Kind of resource
    pub kind: ResourceKind,
    /// Allocation ID, NAT gateway ID or volume ID
    pub id: String,
    /// Region the resource lives in
    pub region: String,
    /// Value of the `Name` tag, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Kind-specific summary (public IP, VPC, size and state, ...)
    pub detail: String,
    /// All tags on the resource
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub tags: BTreeMap<String, String>,
}

impl UnusedResource {
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Sort resources by region, then kind scan order, then ID.
pub fn sort_resources(resources: &mut [UnusedResource]) {
    resources.sort_by(|a, b| {
        a.region
            .cmp(&b.region)
            .then(a.kind.scan_order().cmp(&b.kind.scan_order()))
            .then_with(|| a.id.cmp(&b.id))
    });
}
