//! EC2 tag helpers
//!
//! Tags are flattened into a sorted map for reporting, and `--ignore-tag`
//! filters are matched against that map.

use anyhow::{Result, bail};
use ec2_unused_common::defaults::NAME_TAG;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Extract EC2 tags into a map, skipping tags without a key or value.
pub fn extract_ec2_tags(tags: &[aws_sdk_ec2::types::Tag]) -> BTreeMap<String, String> {
    tags.iter()
        .filter_map(|t| match (t.key(), t.value()) {
            (Some(k), Some(v)) => Some((k.to_string(), v.to_string())),
            _ => None,
        })
        .collect()
}

/// Get the `Name` tag, ignoring empty values
pub fn name_tag(tags: &BTreeMap<String, String>) -> Option<String> {
    tags.get(NAME_TAG).filter(|v| !v.is_empty()).cloned()
}

/// A tag filter given as `KEY` (any value) or `KEY=VALUE` (exact value)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatcher {
    key: String,
    value: Option<String>,
}

impl TagMatcher {
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Check whether the tag set carries this key (and value, if given)
    pub fn matches(&self, tags: &BTreeMap<String, String>) -> bool {
        match (tags.get(&self.key), &self.value) {
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
            (None, _) => false,
        }
    }
}

impl FromStr for TagMatcher {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (key, value) = match s.split_once('=') {
            Some((k, v)) => (k.trim(), Some(v.trim().to_string())),
            None => (s.trim(), None),
        };
        if key.is_empty() {
            bail!("Tag filter '{}' has an empty key", s);
        }
        Ok(Self::new(key, value))
    }
}

impl fmt::Display for TagMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "{}={}", self.key, v),
            None => f.write_str(&self.key),
        }
    }
}
