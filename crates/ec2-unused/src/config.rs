//! Configuration types for a scan

use crate::aws::tags::TagMatcher;
use ec2_unused_common::ResourceKind;
use ec2_unused_common::defaults::DEFAULT_REGION;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// AWS credential and region selection
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// Regions to scan, in order (empty means the SDK-resolved region)
    pub regions: Vec<String>,
    /// AWS profile name (overrides default credential resolution)
    pub aws_profile: Option<String>,
}

/// Which resources to report
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Resource kinds to check (empty means all)
    pub kinds: Vec<ResourceKind>,
    /// Resources carrying any of these tags are never reported
    pub ignore_tags: Vec<TagMatcher>,
}

/// Configuration for a scan
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub aws: AwsConfig,
    pub filter: FilterConfig,
    pub format: OutputFormat,
}

impl ScanConfig {
    /// Whether the region has to come from the SDK's default chain
    pub fn needs_resolved_region(&self) -> bool {
        self.aws.regions.is_empty()
    }

    /// Regions with duplicates removed, first occurrence wins.
    ///
    /// Without explicit regions, falls back to `resolved` (the region the
    /// SDK picked from the environment or profile), then [`DEFAULT_REGION`].
    pub fn regions(&self, resolved: Option<String>) -> Vec<String> {
        if self.aws.regions.is_empty() {
            return vec![resolved.unwrap_or_else(|| DEFAULT_REGION.to_string())];
        }
        dedup_in_order(self.aws.regions.iter().cloned())
    }

    /// Requested kinds in scan order, or all kinds when none were requested
    pub fn kinds(&self) -> Vec<ResourceKind> {
        if self.filter.kinds.is_empty() {
            return ResourceKind::ALL.to_vec();
        }
        let mut kinds = dedup_in_order(self.filter.kinds.iter().copied());
        kinds.sort_by_key(|k| k.scan_order());
        kinds
    }

    pub fn aws_profile(&self) -> Option<&str> {
        self.aws.aws_profile.as_deref()
    }

    pub fn ignore_tags(&self) -> &[TagMatcher] {
        &self.filter.ignore_tags
    }
}

fn dedup_in_order<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
