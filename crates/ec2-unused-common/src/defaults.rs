//! Default configuration values

/// Region used when neither `--region` nor `AWS_REGION` is given
pub const DEFAULT_REGION: &str = "us-east-1";

/// Volume state that marks an EBS volume as attached
pub const VOLUME_STATE_IN_USE: &str = "in-use";

/// NAT gateway state that is considered for route table checks
pub const NAT_GATEWAY_STATE_AVAILABLE: &str = "available";

/// Tag key holding a resource's display name
pub const NAME_TAG: &str = "Name";
