//! Trawl main entry point
//!
//! This is the command-line interface for the Trawl crawler.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use trawl::config::{load_config_with_hash, Config};
use trawl::crawler::run_crawl;
use trawl::frontier::SqliteFrontier;
use trawl::output::{print_statistics, print_verdicts};
use trawl::UrlValidator;

/// Trawl: a single-site trap-aware crawler
///
/// Trawl crawls the hosts allowed by its configuration one page at a time,
/// skipping crawler traps, and writes an analytics report of subdomains,
/// outlinks and word frequencies once the frontier is exhausted.
#[derive(Parser, Debug)]
#[command(name = "trawl")]
#[command(version)]
#[command(about = "A single-site trap-aware crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Discard the persisted frontier and start again from the seeds
    #[arg(long)]
    fresh: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with_all = ["stats", "check"])]
    dry_run: bool,

    /// Show statistics from the frontier database and exit
    #[arg(long, conflicts_with_all = ["dry_run", "check"])]
    stats: bool,

    /// Classify the given URLs as valid or trap and exit
    #[arg(long, value_name = "URL", num_args = 1.., conflicts_with_all = ["dry_run", "stats"])]
    check: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else if !cli.check.is_empty() {
        handle_check(&config, &cli.check);
    } else {
        handle_crawl(&config, cli.fresh).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("trawl=info,warn"),
            1 => EnvFilter::new("trawl=debug,info"),
            2 => EnvFilter::new("trawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the validated config and seeds
fn handle_dry_run(config: &Config) {
    println!("=== Trawl Dry Run ===\n");

    println!("Crawler Configuration:");
    println!(
        "  Allowed host suffixes: {}",
        config.crawler.allowed_host_suffixes.join(", ")
    );
    println!("  Max URL length: {}", config.crawler.max_url_length);
    println!("  Max query length: {}", config.crawler.max_query_length);
    println!("  Max path segments: {}", config.crawler.max_path_segments);
    println!("  Max content size: {} bytes", config.crawler.max_content_size);
    println!(
        "  Rejected HTTP codes: {:?}",
        config.crawler.rejected_http_codes
    );
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nCorpus:");
    println!("  Cache directory: {}", config.corpus.cache_dir);
    println!(
        "  Persisted host suffixes: {}",
        config.persist_host_suffixes().join(", ")
    );
    println!("  Timeout: {}s", config.corpus.timeout_secs);

    println!("\nOutput:");
    println!("  Frontier: {}", config.output.frontier_path);
    println!("  Report: {}", config.output.report_path);

    println!("\nSeeds ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling with {} seed URLs",
        config.seeds.len()
    );
}

/// Handles the --stats mode: shows statistics from the frontier database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Frontier: {}\n", config.output.frontier_path);

    let frontier = SqliteFrontier::open(Path::new(&config.output.frontier_path))
        .with_context(|| format!("failed to open frontier {}", config.output.frontier_path))?;

    print_statistics(&frontier.stats());

    Ok(())
}

/// Handles the --check mode: prints a verdict per URL
fn handle_check(config: &Config, urls: &[String]) {
    let validator = UrlValidator::new(&config.crawler);
    print_verdicts(&validator, urls);
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, fresh: bool) -> anyhow::Result<()> {
    if fresh {
        tracing::info!("Starting fresh crawl (ignoring previous state)");
    } else {
        tracing::info!("Starting crawl (will resume a persisted frontier)");
    }

    tracing::info!(
        "Seeds: {}, allowed host suffixes: {}",
        config.seeds.len(),
        config.crawler.allowed_host_suffixes.join(", ")
    );

    match run_crawl(config, fresh).await {
        Ok(()) => {
            tracing::info!("Crawl completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e).context("crawl aborted, no report written")
        }
    }
}
