//! Report rendering (table and JSON)

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use ec2_unused_common::{ResourceKind, UnusedResource, sort_resources};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Result of scanning one or more regions
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub scanned_at: DateTime<Utc>,
    pub regions: Vec<String>,
    pub resources: Vec<UnusedResource>,
}

impl Report {
    /// Build a report, sorting resources by region, kind and ID
    pub fn new(
        account_id: Option<String>,
        regions: Vec<String>,
        mut resources: Vec<UnusedResource>,
    ) -> Self {
        sort_resources(&mut resources);
        Self {
            account_id,
            scanned_at: Utc::now(),
            regions,
            resources,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Number of unused resources per kind (kinds with none are omitted)
    pub fn count_by_kind(&self) -> BTreeMap<ResourceKind, usize> {
        let mut counts = BTreeMap::new();
        for r in &self.resources {
            *counts.entry(r.kind).or_insert(0) += 1;
        }
        counts
    }
}

/// Render the report as a table followed by per-kind totals
pub fn render_table(report: &Report) -> String {
    let mut out = String::new();

    if let Some(account) = &report.account_id {
        let _ = writeln!(out, "Account: {account}");
    }
    let _ = writeln!(out, "Regions: {}", report.regions.join(", "));
    let _ = writeln!(out);

    if report.is_empty() {
        out.push_str("No unused resources found.\n");
        return out;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Region"),
            Cell::new("Kind"),
            Cell::new("ID"),
            Cell::new("Name"),
            Cell::new("Detail"),
        ]);

    for r in &report.resources {
        table.add_row(vec![
            Cell::new(&r.region),
            Cell::new(r.kind.label()),
            Cell::new(&r.id),
            Cell::new(r.name.as_deref().unwrap_or("-")),
            Cell::new(&r.detail),
        ]);
    }

    let _ = writeln!(out, "{table}");
    let _ = writeln!(out);
    for (kind, count) in report.count_by_kind() {
        let _ = writeln!(out, "{:<12} {}", format!("{}:", kind.label()), count);
    }
    let _ = writeln!(out, "Total: {} unused resources", report.resources.len());
    out
}

/// Render the report as pretty-printed JSON
pub fn render_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}
