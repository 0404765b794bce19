//! ec2-unused: report Elastic IPs, NAT gateways and EBS volumes nothing uses
//!
//! Lists each resource kind per region and prints the ones matching the
//! kind's "unused" predicate as a table or JSON.

use anyhow::Result;
use clap::{Parser, Subcommand};
use ec2_unused::aws::tags::TagMatcher;
use ec2_unused::aws::{
    AwsContext, Ec2Client, FromAwsContext, UnusedFinder, classify_anyhow_error,
    get_current_account_id, resolve_region,
};
use ec2_unused::config::{self, OutputFormat};
use ec2_unused::logging;
use ec2_unused::report::{self, Report};
use ec2_unused_common::ResourceKind;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "ec2-unused")]
#[command(about = "Find unused Elastic IPs, NAT gateways and EBS volumes")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

/// Arguments for the scan command
#[derive(clap::Args, Debug)]
struct ScanArgs {
    /// AWS region to scan (repeatable; default: the region from AWS_REGION or the profile)
    #[arg(long = "region", value_delimiter = ',')]
    regions: Vec<String>,

    /// AWS profile to use (overrides AWS_PROFILE env var)
    #[arg(long)]
    aws_profile: Option<String>,

    /// Resource kind to check: elastic-ip, nat-gateway, ebs-volume (repeatable, default all)
    #[arg(long = "kind", value_delimiter = ',')]
    kinds: Vec<ResourceKind>,

    /// Never report resources with this tag, as KEY or KEY=VALUE (repeatable)
    #[arg(long = "ignore-tag")]
    ignore_tags: Vec<TagMatcher>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl From<ScanArgs> for config::ScanConfig {
    fn from(args: ScanArgs) -> Self {
        Self {
            aws: config::AwsConfig {
                regions: args.regions,
                aws_profile: args.aws_profile,
            },
            filter: config::FilterConfig {
                kinds: args.kinds,
                ignore_tags: args.ignore_tags,
            },
            format: args.format,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan regions for unused resources
    Scan(ScanArgs),

    /// List the supported resource kinds and when each counts as unused
    Kinds,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if let Some(suggestion) = classify_anyhow_error(e).suggestion() {
        let _ = writeln!(stderr, "\n\x1b[36mHint:\x1b[0m {suggestion}");
    }

    if std::env::var("RUST_BACKTRACE").is_err() {
        let _ = writeln!(
            stderr,
            "\n\x1b[2mSet RUST_BACKTRACE=1 for a detailed backtrace\x1b[0m"
        );
    } else {
        let backtrace = e.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            let _ = writeln!(stderr, "\n\x1b[2mBacktrace:\x1b[0m\n{backtrace}");
        }
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();
    logging::init();

    match args.command {
        Command::Scan(scan_args) => {
            if let Some(profile) = &scan_args.aws_profile {
                info!(profile = %profile, "Using AWS profile");
            }
            handle_scan(scan_args.into()).await?;
        }
        Command::Kinds => {
            for kind in ResourceKind::ALL {
                println!("{:<12} {}", kind.as_str(), kind.predicate());
            }
        }
    }

    Ok(())
}

/// Handle the scan command
async fn handle_scan(config: config::ScanConfig) -> Result<()> {
    let resolved = if config.needs_resolved_region() {
        resolve_region(config.aws_profile()).await
    } else {
        None
    };
    let regions = config.regions(resolved);
    let kinds = config.kinds();
    let kind_names: Vec<_> = kinds.iter().map(|k| k.as_str()).collect();

    info!(
        regions = ?regions,
        kinds = ?kind_names,
        ignore_tags = config.ignore_tags().len(),
        "Scanning for unused resources"
    );

    let mut account_id = None;
    let mut resources = Vec::new();

    for region in &regions {
        let aws = AwsContext::with_profile(region, config.aws_profile()).await;
        if account_id.is_none() {
            account_id = Some(get_current_account_id(&aws).await?);
        }

        let finder = UnusedFinder::<Ec2Client>::from_context(&aws)
            .with_ignore_tags(config.ignore_tags().to_vec());
        resources.extend(finder.find_all(&kinds).await?);
    }

    let report = Report::new(account_id.map(|a| a.to_string()), regions, resources);
    match config.format {
        OutputFormat::Table => print!("{}", report::render_table(&report)),
        OutputFormat::Json => println!("{}", report::render_json(&report)?),
    }

    Ok(())
}
