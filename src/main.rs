//! Web-Ripple main entry point
//!
//! This is the command-line interface for the Web-Ripple crawler.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use web_ripple::config::{load_config_with_hash, Config};
use web_ripple::crawler::{CrawlRequest, HttpPageParser, ParallelCrawler, WebCrawler};
use web_ripple::output::{write_json_result, write_json_result_to};
use web_ripple::profiler::Profiler;
use web_ripple::url::IgnoreList;

/// Web-Ripple: a parallel word-frequency web crawler
///
/// Web-Ripple crawls from a set of start pages, following links up to a
/// maximum depth until a timeout expires, and reports the most popular
/// words it has seen.
#[derive(Parser, Debug)]
#[command(name = "web-ripple")]
#[command(version)]
#[command(about = "A parallel word-frequency web crawler", long_about = None)]
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

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // Every configuration error surfaces here, before any task is dispatched
    let request = CrawlRequest::from_config(&config.crawler).context("Invalid crawl request")?;

    if cli.dry_run {
        handle_dry_run(&config, &request);
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(request.parallelism())
        .thread_name("web-ripple-worker")
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    runtime.block_on(handle_crawl(config, request))
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("web_ripple=info,warn"),
            1 => EnvFilter::new("web_ripple=debug,info"),
            2 => EnvFilter::new("web_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so that results written to stdout stay parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config, request: &CrawlRequest) {
    println!("=== Web-Ripple Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", request.max_depth());
    println!("  Timeout: {}s", config.crawler.timeout_seconds);
    println!("  Popular word count: {}", request.popular_word_count());
    println!(
        "  Parallelism: {} (requested {})",
        request.parallelism(),
        config
            .crawler
            .parallelism
            .map_or_else(|| "host default".to_string(), |p| p.to_string())
    );

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);

    println!("\nOutput:");
    println!(
        "  Result: {}",
        config.output.result_path.as_deref().unwrap_or("<stdout>")
    );
    println!(
        "  Profile: {}",
        config.output.profile_path.as_deref().unwrap_or("<stdout>")
    );

    println!("\nIgnored URL patterns ({}):", config.crawler.ignored_urls.len());
    for pattern in &config.crawler.ignored_urls {
        println!("  - {}", pattern);
    }

    println!("\nIgnored word patterns ({}):", config.crawler.ignored_words.len());
    for pattern in &config.crawler.ignored_words {
        println!("  - {}", pattern);
    }

    println!("\nStart pages ({}):", request.seeds().len());
    for seed in request.seeds() {
        println!("  * {}", seed);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, request: CrawlRequest) -> anyhow::Result<()> {
    let profiler = Profiler::new();

    let ignored_words = IgnoreList::compile(&config.crawler.ignored_words)?;
    let parser = HttpPageParser::new(&config.user_agent, ignored_words)
        .context("Failed to build the HTTP client")?;
    let crawler = profiler.wrap_crawler(ParallelCrawler::new(Arc::new(
        profiler.wrap_parser(parser),
    )));

    tracing::info!(
        "Total seed URLs: {} (host parallelism {})",
        request.seeds().len(),
        crawler.max_parallelism()
    );

    let result = crawler.crawl(&request).await;

    match output_path(&config.output.result_path) {
        Some(path) => {
            write_json_result(&result, path)
                .with_context(|| format!("Failed to write result to {}", path.display()))?;
            tracing::info!("Result written to {}", path.display());
        }
        None => write_json_result_to(&result, &mut std::io::stdout().lock())?,
    }

    match output_path(&config.output.profile_path) {
        Some(path) => {
            profiler
                .write_data(path)
                .with_context(|| format!("Failed to write profile to {}", path.display()))?;
            tracing::info!("Profile written to {}", path.display());
        }
        None => profiler.write_data_to(&mut std::io::stdout().lock())?,
    }

    Ok(())
}

/// Treats a missing or blank path as "write to stdout"
fn output_path(path: &Option<String>) -> Option<&Path> {
    path.as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(Path::new)
}
