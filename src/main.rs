//! SiteSage main entry point
//!
//! This is the command-line interface for the SiteSage page auditor.

use anyhow::Context;
use clap::Parser;
use sitesage::config::{load_config_or_default, Config, ReportFormat};
use sitesage::output::{render_report, summary_line, write_report};
use sitesage::report::{run_audit, MemoryReportStore, ReportStore};
use sitesage::{parse_target, Coordinator};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// SiteSage: on-page SEO auditing
///
/// SiteSage fetches a single page, extracts its title, meta description,
/// headings, images and links, checks the links for breakage, and scores
/// the page from 0 to 100 with a letter grade and a list of issues.
#[derive(Parser, Debug)]
#[command(name = "sitesage")]
#[command(version)]
#[command(about = "On-page SEO auditor", long_about = None)]
struct Cli {
    /// Page to audit (http or https)
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report format (markdown or json); overrides the config file
    #[arg(short, long, value_name = "FORMAT")]
    format: Option<ReportFormat>,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the URL and config and show what would be audited
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }
    let mut config = load_config_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    // Command-line flags win over the config file
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(output) = &cli.output {
        config.output.report_path = Some(output.display().to_string());
    }

    if cli.dry_run {
        handle_dry_run(&config, &cli.url)
    } else {
        handle_audit(config, &cli.url, cli.quiet).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitesage=info,warn"),
            1 => EnvFilter::new("sitesage=debug,info"),
            2 => EnvFilter::new("sitesage=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --dry-run mode: validates the URL and config
fn handle_dry_run(config: &Config, url: &str) -> anyhow::Result<()> {
    let target = parse_target(url).context("Invalid target URL")?;

    println!("=== SiteSage Dry Run ===\n");

    println!("Target:");
    println!("  URL: {}", target);
    println!("  Domain: {}", target.domain());

    println!("\nCrawler Configuration:");
    println!("  Page timeout: {}s", config.crawler.page_timeout_secs);
    println!("  Probe timeout: {}s", config.crawler.probe_timeout_secs);
    println!("  Max links checked: {}", config.crawler.max_links_checked);
    println!("  Max redirects: {}", config.crawler.max_redirects);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Format: {}", config.output.format);
    println!(
        "  Report: {}",
        config.output.report_path.as_deref().unwrap_or("stdout")
    );

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main audit operation
async fn handle_audit(config: Config, url: &str, quiet: bool) -> anyhow::Result<()> {
    let format = config.output.format;
    let report_path = config.output.report_path.clone();

    let coordinator = Coordinator::new(config);
    let mut store = MemoryReportStore::new();
    let id = store.create_report(url)?;

    tracing::info!("Auditing {}", url);

    let outcome = run_audit(&coordinator, &mut store, None, id).await;
    let report = store.get_report(id)?;

    if !quiet {
        eprintln!("{}", summary_line(&report));
    }

    outcome.with_context(|| format!("Audit of {} failed", url))?;

    match report_path {
        Some(path) => write_report(&report, format, Path::new(&path))?,
        None => println!("{}", render_report(&report, format)?),
    }

    Ok(())
}
