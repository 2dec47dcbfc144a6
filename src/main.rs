//! Site-Mirror main entry point
//!
//! This is the command-line interface for the Site-Mirror crawler.

use anyhow::Context;
use clap::Parser;
use site_mirror::config::{load_config_with_hash, Config};
use site_mirror::crawler::Coordinator;
use site_mirror::input::prompt_seed_url;
use site_mirror::output::print_report;
use site_mirror::storage::{open_storage, Storage};
use site_mirror::url::{extract_host, parse_seed_url};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Site-Mirror: mirror a website to local disk
///
/// Site-Mirror downloads a seed page, follows the links that stay on the
/// same host, and reproduces the site's path structure as a local directory
/// tree with a manifest file at its root.
#[derive(Parser, Debug)]
#[command(name = "site-mirror")]
#[command(version)]
#[command(about = "Mirror a website to local disk", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Seed URL to mirror (prompted for when omitted)
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,

    /// Output directory, overriding `output.directory` from the config
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and seed, show what would be mirrored, then exit
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let seed = read_seed(cli.url.as_deref())?;

    if cli.dry_run {
        handle_dry_run(&config, &seed, cli.output.as_deref());
        return Ok(());
    }

    handle_crawl(config, config_hash, seed, cli.output.as_deref(), cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_mirror=info,warn"),
            1 => EnvFilter::new("site_mirror=debug,info"),
            2 => EnvFilter::new("site_mirror=trace,debug"),
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

/// Takes the seed from the command line, or asks for it interactively
fn read_seed(arg: Option<&str>) -> anyhow::Result<Url> {
    match arg {
        Some(raw) => parse_seed_url(raw).with_context(|| format!("Invalid seed URL '{}'", raw)),
        None => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            prompt_seed_url(&mut stdin.lock(), &mut stdout.lock())
                .context("Failed to read seed URL")
        }
    }
}

/// Handles the --dry-run mode: shows what would be mirrored
fn handle_dry_run(config: &Config, seed: &Url, output: Option<&Path>) {
    let storage = open_storage(&config.output, output);
    let host = extract_host(seed).unwrap_or_default();

    println!("=== Site-Mirror Dry Run ===\n");

    println!("Seed: {}", seed);
    println!("Host scope: {}", host);
    println!("Mirror root: {}", storage.resolve(Path::new(&host)).display());
    println!("Existing files: {:?}", config.output.on_existing);
    if config.crawler.max_pages > 0 {
        println!("Page limit: {}", config.crawler.max_pages);
    }

    println!("\nLink types ({}):", config.crawler.link_types.len());
    for link_type in &config.crawler.link_types {
        println!("  - <{} {}>", link_type.tag, link_type.attribute);
    }

    println!("\nExclude patterns ({}):", config.crawler.exclude.len());
    for pattern in &config.crawler.exclude {
        println!("  - {}", pattern);
    }

    println!("\nManifest: {}", config.manifest.file_name);
    println!("  Project: {}", config.manifest.project);
    println!("  Author: {}", config.manifest.author);
    println!("  License: {}", config.manifest.license);
    println!("  Version: {}", config.manifest.version);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: Config,
    config_hash: String,
    seed: Url,
    output: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let storage = open_storage(&config.output, output);
    let mut coordinator = Coordinator::with_storage(config, seed, Box::new(storage))
        .context("Failed to start crawl")?
        .with_config_hash(config_hash);

    let report = coordinator.run().await.context("Crawl failed")?;

    if !quiet {
        print_report(&report);
    }
    println!("Done!");

    Ok(())
}
