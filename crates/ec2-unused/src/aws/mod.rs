//! AWS client modules
//!
//! This module provides wrappers around AWS SDK clients for:
//! - EC2: Elastic IP, NAT gateway, route table and volume listing
//! - STS: Account ID lookup
//! - finder: the "unused" predicates applied over EC2 listings

pub mod account;
pub mod context;
pub mod ec2;
pub mod error;
pub mod finder;
pub mod tags;

// Core clients
pub use account::{AccountId, get_current_account_id};
pub use context::{AwsContext, FromAwsContext, resolve_region};
pub use ec2::{Ec2Client, Ec2Operations};
pub use finder::UnusedFinder;

// Error handling
pub use error::{AwsError, classify_anyhow_error, classify_aws_error};
