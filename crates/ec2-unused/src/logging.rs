//! Tracing setup for the CLI
//!
//! Logs go to stderr so JSON on stdout stays parseable. `RUST_LOG` is
//! honoured as given; without it the level is `info`. AWS SDK crates are
//! capped at `warn` unless `RUST_LOG` names them explicitly.

use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset or empty
const DEFAULT_DIRECTIVE: &str = "info";

/// Caps for the chatty AWS SDK targets
const AWS_SDK_CAPS: &[&str] = &[
    "aws_config=warn",
    "aws_sdk_ec2=warn",
    "aws_sdk_sts=warn",
    "aws_smithy_runtime=warn",
    "aws_smithy_runtime_api=warn",
    "aws_smithy_http=warn",
    "aws_smithy_types=warn",
];

/// Build the filter from an optional `RUST_LOG` value.
pub fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    let user = rust_log.map(str::trim).filter(|s| !s.is_empty());
    let base = user.unwrap_or(DEFAULT_DIRECTIVE);

    let mut directives = vec![base.to_string()];
    for cap in AWS_SDK_CAPS {
        let target = cap.split('=').next().unwrap_or(cap);
        if !user.is_some_and(|u| u.contains(target)) {
            directives.push((*cap).to_string());
        }
    }

    EnvFilter::builder().parse_lossy(directives.join(","))
}

/// Install the global fmt subscriber using `RUST_LOG` from the environment.
pub fn init() {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter(rust_log.as_deref()))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    fn rendered(filter: &EnvFilter) -> String {
        filter.to_string().to_lowercase()
    }

    #[test]
    fn test_default_is_info() {
        let filter = env_filter(None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));

        let blank = env_filter(Some("  "));
        assert_eq!(blank.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_rust_log_level_is_not_overridden() {
        let filter = env_filter(Some("debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let filter = env_filter(Some("trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn test_aws_sdk_targets_are_capped() {
        let out = rendered(&env_filter(None));
        for cap in AWS_SDK_CAPS {
            assert!(out.contains(cap), "missing {cap} in {out}");
        }
    }

    #[test]
    fn test_explicit_sdk_target_wins_over_cap() {
        let out = rendered(&env_filter(Some("info,aws_sdk_ec2=debug")));
        assert!(out.contains("aws_sdk_ec2=debug"));
        assert!(!out.contains("aws_sdk_ec2=warn"));
        assert!(out.contains("aws_sdk_sts=warn"));
    }
}
