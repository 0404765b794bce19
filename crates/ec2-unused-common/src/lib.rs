//! ec2-unused-common - Shared types for unused-resource reporting
//!
//! This crate holds the resource vocabulary shared by the finder, the
//! report renderers and the CLI, without any AWS SDK dependencies.
//!
//! ## Modules
//!
//! - [`defaults`]: Default configuration values
//! - [`resource_kind`]: The kinds of EC2 resources that can be checked
//! - [`unused`]: A resource found to be unused

pub mod defaults;
pub mod resource_kind;
pub mod unused;

pub use resource_kind::{ParseResourceKindError, ResourceKind};
pub use unused::{UnusedResource, sort_resources};
