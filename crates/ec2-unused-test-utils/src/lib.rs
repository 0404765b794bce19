//! Test utilities for ec2-unused
//!
//! Shared helpers for the live AWS integration tests. Those tests are all
//! `#[ignore]`d and only run with credentials:
//!
//! ```text
//! AWS_PROFILE=your_profile cargo test -p ec2-unused -- --ignored
//! ```

/// Get the AWS region for tests.
///
/// Checks environment variables in order:
/// 1. AWS_REGION
/// 2. AWS_DEFAULT_REGION
/// 3. Falls back to us-east-1
///
/// # Example
///
/// ```
/// use ec2_unused_test_utils::get_test_region;
///
/// let region = get_test_region();
/// assert!(!region.is_empty());
/// ```
pub fn get_test_region() -> String {
    std::env::var("AWS_REGION")
        .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
        .unwrap_or_else(|_| "us-east-1".to_string())
}

/// Get the optional AWS profile for tests (`AWS_PROFILE`).
pub fn get_test_profile() -> Option<String> {
    std::env::var("AWS_PROFILE").ok().filter(|p| !p.is_empty())
}
