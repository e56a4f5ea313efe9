//! Binary entry point for wikihop.
//!
//! This binary provides the CLI interface for the pathfinding engine.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow printing in the main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use wikihop::config::WikihopConfig;
use wikihop::{
    LinkCache, LinkSource, MediaWikiClient, SearchOrchestrator, SqliteReferenceStore, observability,
};

/// Wikihop - bounded-latency hyperlink pathfinding over the Wikipedia link graph.
#[derive(Parser)]
#[command(name = "wikihop")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Find a link chain between two topics.
    Find {
        /// Starting topic.
        start: String,

        /// Target topic.
        end: String,

        /// Wall-clock budget in seconds.
        #[arg(short, long, default_value = "15")]
        budget: u64,

        /// Output format: plain or json.
        #[arg(short, long, default_value = "plain")]
        format: String,
    },

    /// Show status.
    Status,

    /// Inspect the link cache.
    Cache {
        /// Cache subcommand.
        #[command(subcommand)]
        action: CacheAction,
    },
}

/// Cache subcommands.
#[derive(Subcommand)]
enum CacheAction {
    /// Show tier occupancy.
    Stats,
}

/// Main entry point.
fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    observability::init(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run_command(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: WikihopConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Find {
            start,
            end,
            budget,
            format,
        } => cmd_find(&config, &start, &end, budget, &format),

        Commands::Status => cmd_status(&config),

        Commands::Cache { action } => match action {
            CacheAction::Stats => cmd_cache_stats(&config),
        },
    }
}

/// Loads configuration.
fn load_config(path: Option<&str>) -> Result<WikihopConfig, Box<dyn std::error::Error>> {
    // If a path is provided, load from that file
    if let Some(config_path) = path {
        return WikihopConfig::load_from_file(std::path::Path::new(config_path))
            .map_err(std::convert::Into::into);
    }

    // Environment override for config path
    if let Ok(config_path) = std::env::var("WIKIHOP_CONFIG_PATH") {
        if !config_path.trim().is_empty() {
            return WikihopConfig::load_from_file(std::path::Path::new(&config_path))
                .map_err(std::convert::Into::into);
        }
    }

    // Otherwise, load from default location
    Ok(WikihopConfig::load_default())
}

/// Builds the engine stack from configuration.
fn build_orchestrator(
    config: &WikihopConfig,
) -> Result<(Arc<LinkCache>, SearchOrchestrator), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(&config.data_dir)?;

    let mut client = MediaWikiClient::new().with_http_config(&config.http_config());
    if let Some(endpoint) = &config.source.endpoint {
        client = client.with_endpoint(endpoint);
    }
    if let Some(fallback) = &config.source.fallback_title {
        client = client.with_fallback_title(fallback);
    }
    let source: Arc<dyn LinkSource> = Arc::new(client);

    let store = Arc::new(SqliteReferenceStore::new(config.db_path())?);
    let cache = Arc::new(LinkCache::with_capacities(
        Arc::clone(&source),
        store,
        config.cache.hot_capacity,
        config.cache.recent_capacity,
    ));

    let orchestrator =
        SearchOrchestrator::new(Arc::clone(&cache), source).with_limits(config.limits());
    Ok((cache, orchestrator))
}

/// Find command.
fn cmd_find(
    config: &WikihopConfig,
    start: &str,
    end: &str,
    budget: u64,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_cache, orchestrator) = build_orchestrator(config)?;

    let path = orchestrator.find_path(start, end, Duration::from_secs(budget));

    if format.eq_ignore_ascii_case("json") {
        println!("{}", serde_json::to_string(&path)?);
        return Ok(());
    }

    if path.is_empty() {
        println!("No path found within {budget}s.");
    } else {
        println!("{} hops: {}", path.len() - 1, path.join(" -> "));
    }

    Ok(())
}

/// Status command.
fn cmd_status(config: &WikihopConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Wikihop Status");
    println!("==============");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let data_status = if config.data_dir.exists() {
        "Configured"
    } else {
        "Will be created on first use"
    };
    println!("Data Directory: {data_status}");
    println!("  Path: {}", config.data_dir.display());

    let db_path = config.db_path();
    let db_status = if db_path.exists() {
        "Available"
    } else {
        "Not initialized"
    };
    println!("Reference Cache: {db_status}");
    println!("  Path: {}", db_path.display());

    println!(
        "Source Endpoint: {}",
        config
            .source
            .endpoint
            .as_deref()
            .unwrap_or(MediaWikiClient::DEFAULT_ENDPOINT)
    );
    println!(
        "Search: depth {}, budget {}s, ceiling {} nodes",
        config.search.max_depth, config.search.time_budget_secs, config.search.node_ceiling
    );

    Ok(())
}

/// Cache stats command.
fn cmd_cache_stats(config: &WikihopConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (cache, _orchestrator) = build_orchestrator(config)?;
    let stats = cache.stats();

    println!("Cache Tiers");
    println!("===========");
    println!("Recent (LRU): {} entries", stats.recent_entries);
    println!("Hot (in-process): {} entries", stats.hot_entries);
    match stats.durable_records {
        Some(count) => println!("Durable (SQLite): {count} records"),
        None => println!("Durable (SQLite): unavailable"),
    }

    Ok(())
}
