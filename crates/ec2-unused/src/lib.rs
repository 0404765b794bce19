//! ec2-unused - find EC2 resources nothing is using
//!
//! This crate provides the library behind the `ec2-unused` binary: it lists
//! Elastic IP addresses, NAT gateways and EBS volumes in a region and keeps
//! the ones that match a simple "unused" predicate.

pub mod aws;
pub mod config;
pub mod logging;
pub mod report;
