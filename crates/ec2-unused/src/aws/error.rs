//! AWS error classification
//!
//! Errors from the listing calls are propagated unchanged; this module only
//! inspects an error chain afterwards to pick a user-facing suggestion. It
//! uses the SDK's `.code()` and falls back to matching the Debug output.

use thiserror::Error;

/// AWS error categories relevant to read-only listing
#[derive(Debug, Error)]
pub enum AwsError {
    /// Credentials lack permission for the call
    #[error("Access denied")]
    AccessDenied,

    /// Credentials are missing, expired or malformed
    #[error("Invalid or expired AWS credentials")]
    InvalidCredentials,

    /// Region is an opt-in region that is not enabled for the account
    #[error("Region is not enabled for this account")]
    RegionNotEnabled,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    Throttled,

    /// Generic AWS SDK error with code and message
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl AwsError {
    /// Get a user-friendly suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            AwsError::AccessDenied => Some(
                "Grant ec2:DescribeAddresses, ec2:DescribeNatGateways, \
                 ec2:DescribeRouteTables and ec2:DescribeVolumes to the caller.",
            ),
            AwsError::InvalidCredentials => Some(
                "Refresh your credentials or pass --aws-profile with a valid profile.",
            ),
            AwsError::RegionNotEnabled => {
                Some("Enable the region in the account settings or drop it from --region.")
            }
            AwsError::Throttled => Some("AWS API rate limit hit. Try again in a moment."),
            AwsError::Sdk { .. } => None,
        }
    }
}

const ACCESS_DENIED_CODES: &[&str] = &[
    "UnauthorizedOperation",
    "AccessDenied",
    "AccessDeniedException",
];

const CREDENTIAL_CODES: &[&str] = &[
    "AuthFailure",
    "InvalidClientTokenId",
    "ExpiredToken",
    "ExpiredTokenException",
    "SignatureDoesNotMatch",
];

const REGION_CODES: &[&str] = &["OptInRequired"];

const THROTTLING_CODES: &[&str] = &["Throttling", "ThrottlingException", "RequestLimitExceeded"];

/// Classify an AWS SDK error using the error code.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> AwsError {
    match code {
        Some(c) if ACCESS_DENIED_CODES.contains(&c) => AwsError::AccessDenied,
        Some(c) if CREDENTIAL_CODES.contains(&c) => AwsError::InvalidCredentials,
        Some(c) if REGION_CODES.contains(&c) => AwsError::RegionNotEnabled,
        Some(c) if THROTTLING_CODES.contains(&c) => AwsError::Throttled,
        _ => AwsError::Sdk {
            code: code.map(|s| s.to_string()),
            message: message.unwrap_or("Unknown error").to_string(),
        },
    }
}

/// Classify an anyhow::Error by extracting the AWS error code.
///
/// Walks the error chain looking for the SDK errors of the calls this tool
/// makes. Falls back to string matching on the Debug representation.
pub fn classify_anyhow_error(error: &anyhow::Error) -> AwsError {
    use aws_sdk_ec2::error::ProvideErrorMetadata;
    use aws_sdk_ec2::error::SdkError;
    use aws_sdk_ec2::operation::{
        describe_addresses::DescribeAddressesError,
        describe_nat_gateways::DescribeNatGatewaysError,
        describe_route_tables::DescribeRouteTablesError, describe_volumes::DescribeVolumesError,
    };
    use aws_sdk_sts::operation::get_caller_identity::GetCallerIdentityError;

    for cause in error.chain() {
        let meta = if let Some(e) = cause.downcast_ref::<SdkError<DescribeAddressesError>>() {
            ProvideErrorMetadata::meta(e)
        } else if let Some(e) = cause.downcast_ref::<SdkError<DescribeNatGatewaysError>>() {
            ProvideErrorMetadata::meta(e)
        } else if let Some(e) = cause.downcast_ref::<SdkError<DescribeRouteTablesError>>() {
            ProvideErrorMetadata::meta(e)
        } else if let Some(e) = cause.downcast_ref::<SdkError<DescribeVolumesError>>() {
            ProvideErrorMetadata::meta(e)
        } else if let Some(e) =
            cause.downcast_ref::<aws_sdk_sts::error::SdkError<GetCallerIdentityError>>()
        {
            aws_sdk_sts::error::ProvideErrorMetadata::meta(e)
        } else {
            continue;
        };
        if meta.code().is_some() {
            return classify_aws_error(meta.code(), meta.message());
        }
    }

    // Fallback: extract error code from debug string representation
    let debug_str = format!("{:?}", error);
    if let Some(code) = extract_error_code(&debug_str) {
        return classify_aws_error(Some(&code), Some(&error.to_string()));
    }

    AwsError::Sdk {
        code: None,
        message: error.to_string(),
    }
}

/// Extract an AWS error code from a debug string representation
fn extract_error_code(debug_str: &str) -> Option<String> {
    let known = ACCESS_DENIED_CODES
        .iter()
        .chain(CREDENTIAL_CODES)
        .chain(REGION_CODES)
        .chain(THROTTLING_CODES);
    for code in known {
        if debug_str.contains(code) {
            return Some((*code).to_string());
        }
    }

    // Try to extract any code from `code: Some("...")` pattern
    if let Some(start) = debug_str.find("code: Some(\"") {
        let rest = &debug_str[start + 12..];
        if let Some(end) = rest.find('"') {
            return Some(rest[..end].to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn access_denied_codes() {
        for code in ACCESS_DENIED_CODES {
            let err = classify_aws_error(Some(code), Some("msg"));
            assert!(matches!(err, AwsError::AccessDenied), "code: {code}");
        }
    }

    #[test]
    fn credential_codes() {
        for code in CREDENTIAL_CODES {
            let err = classify_aws_error(Some(code), Some("msg"));
            assert!(matches!(err, AwsError::InvalidCredentials), "code: {code}");
        }
    }

    #[test]
    fn opt_in_region() {
        let err = classify_aws_error(Some("OptInRequired"), None);
        assert!(matches!(err, AwsError::RegionNotEnabled));
    }

    #[test]
    fn throttling_codes() {
        for code in THROTTLING_CODES {
            let err = classify_aws_error(Some(code), Some("msg"));
            assert!(matches!(err, AwsError::Throttled), "code: {code}");
        }
    }

    #[test]
    fn unknown_and_missing_codes() {
        let err = classify_aws_error(Some("SomeNewError"), Some("details"));
        assert!(matches!(err, AwsError::Sdk { code: Some(_), .. }));
        assert!(err.suggestion().is_none());

        let err2 = classify_aws_error(None, None);
        match err2 {
            AwsError::Sdk { code, message } => {
                assert!(code.is_none());
                assert_eq!(message, "Unknown error");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn classify_falls_back_to_debug_string() {
        let err = anyhow!("UnauthorizedOperation: not allowed")
            .context("Failed to describe EBS volumes");
        assert!(matches!(
            classify_anyhow_error(&err),
            AwsError::AccessDenied
        ));
    }

    #[test]
    fn classify_unrelated_error() {
        let err = anyhow!("connection refused");
        assert!(matches!(
            classify_anyhow_error(&err),
            AwsError::Sdk { code: None, .. }
        ));
    }

    #[test]
    fn extract_code_from_code_field() {
        let debug_str = r#"SdkError { code: Some("SomeRandomCode"), message: "fail" }"#;
        assert_eq!(
            extract_error_code(debug_str).as_deref(),
            Some("SomeRandomCode")
        );
        assert!(extract_error_code("connection refused").is_none());
    }

    #[test]
    fn known_categories_have_suggestions() {
        for err in [
            AwsError::AccessDenied,
            AwsError::InvalidCredentials,
            AwsError::RegionNotEnabled,
            AwsError::Throttled,
        ] {
            assert!(err.suggestion().is_some(), "no suggestion for {err:?}");
        }
    }
}
