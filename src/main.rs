//! Site-Scribe main entry point
//!
//! This is the command-line interface for the Site-Scribe scraper.

use clap::Parser;
use site_scribe::config::{load_config_with_hash, validate, Config, CrawlConfig};
use site_scribe::crawler::crawl;
use site_scribe::output::{print_statistics, write_outputs, CrawlStatistics};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Scribe: a polite single-site scraper
///
/// Site-Scribe crawls one website breadth-first, extracts the readable text
/// of each page, and saves the documents as JSON and plain text.
#[derive(Parser, Debug)]
#[command(name = "site-scribe")]
#[command(version = "1.0.0")]
#[command(about = "A polite single-site scraper", long_about = None)]
struct Cli {
    /// Root URL to start from (overrides the config file)
    #[arg(value_name = "ROOT_URL")]
    root_url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to scrape
    #[arg(short = 'n', long)]
    max_pages: Option<usize>,

    /// Seconds to wait between requests
    #[arg(short, long)]
    delay: Option<f64>,

    /// Skip URLs containing this substring (repeatable)
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Number of concurrent fetches
    #[arg(short, long)]
    workers: Option<usize>,

    /// JSON output path
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Text output path
    #[arg(long, value_name = "FILE")]
    text: Option<PathBuf>,

    /// Also write documents to this SQLite database
    #[arg(long, value_name = "FILE")]
    sqlite: Option<PathBuf>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e);
        }
    };

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_crawl(config).await?;
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
            0 => EnvFilter::new("site_scribe=info,warn"),
            1 => EnvFilter::new("site_scribe=debug,info"),
            2 => EnvFilter::new("site_scribe=trace,debug"),
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

/// Loads the config file (if any) and applies command-line overrides
fn resolve_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match (&cli.config, &cli.root_url) {
        (Some(path), _) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        (None, Some(root)) => Config::for_root(root.clone()),
        (None, None) => {
            return Err("either a ROOT_URL or --config <FILE> is required".into());
        }
    };

    if let Some(root) = &cli.root_url {
        config.crawl.root_url = root.clone();
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawl.max_pages = max_pages;
    }
    if let Some(delay) = cli.delay {
        config.crawl.delay = delay;
    }
    if !cli.exclude.is_empty() {
        config.crawl.exclude_patterns = cli.exclude.clone();
    }
    if let Some(workers) = cli.workers {
        config.crawl.workers = workers;
    }
    if let Some(json) = &cli.json {
        config.output.json_path = json.clone();
    }
    if let Some(text) = &cli.text {
        config.output.text_path = text.clone();
    }
    if let Some(sqlite) = &cli.sqlite {
        config.output.sqlite_path = Some(sqlite.clone());
    }

    validate(&config)?;
    Ok(config)
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let crawl_config = CrawlConfig::from_settings(&config.crawl)?;

    println!("=== Site-Scribe Dry Run ===\n");

    println!("Crawl Configuration:");
    println!("  Root URL: {}", crawl_config.root_url);
    println!("  Domain: {}", crawl_config.domain);
    println!("  Max pages: {}", crawl_config.max_pages);
    println!("  Delay: {:?}", crawl_config.politeness_delay);
    println!("  Workers: {}", crawl_config.workers);
    println!("  Request timeout: {:?}", crawl_config.request_timeout);
    println!("  User agent: {}", crawl_config.user_agent);

    println!(
        "\nExcluded Patterns ({}):",
        crawl_config.excluded_patterns.len()
    );
    for pattern in &crawl_config.excluded_patterns {
        println!("  - {}", pattern);
    }
    println!(
        "\nExcluded Extensions: {}",
        crawl_config.excluded_extensions.join(" ")
    );

    println!("\nOutput:");
    println!("  JSON: {}", config.output.json_path.display());
    println!("  Text: {}", config.output.text_path.display());
    if let Some(sqlite) = &config.output.sqlite_path {
        println!("  SQLite: {}", sqlite.display());
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let crawl_config = CrawlConfig::from_settings(&config.crawl)?;

    let result = match crawl(crawl_config).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = write_outputs(&result.documents, &config.output) {
        tracing::error!("Failed to save documents: {}", e);
        return Err(e.into());
    }

    print_statistics(&CrawlStatistics::from_result(&result));

    Ok(())
}
