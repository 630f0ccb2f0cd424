//! Bulletin Crawler CLI
//!
//! Local execution entry point.

use std::path::PathBuf;
use std::sync::Arc;

use bulletin_crawler::{
    error::Result,
    models::Config,
    pipeline,
    services::BulletinService,
    storage::BulletinCache,
};
use clap::{Parser, Subcommand};

const DEFAULT_CONFIG: &str = "bulletins.toml";

/// bulletin-crawler - COVID-19 state bulletin fetcher
#[derive(Parser, Debug)]
#[command(
    name = "bulletin-crawler",
    version,
    about = "Fetches the latest COVID-19 bulletins from Indian state health departments"
)]
struct Cli {
    /// Path to the TOML configuration (default: bulletins.toml, if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for cached bulletin PDFs (overrides the configuration)
    #[arg(short, long, global = true)]
    resources_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve the latest bulletin of each source and update the cache
    Fetch {
        /// Only fetch these sources (repeatable, default: all)
        #[arg(short, long = "source")]
        sources: Vec<String>,

        /// Report failing sources and carry on with the rest
        #[arg(long)]
        keep_going: bool,

        /// Print the records as JSON
        #[arg(long)]
        json: bool,
    },

    /// List configured sources
    Sources,

    /// Validate the configuration
    Validate,

    /// Show cached bulletins per source
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            log::info!("Loaded configuration from {}", path.display());
            config
        }
        None if PathBuf::from(DEFAULT_CONFIG).exists() => Config::load_or_default(DEFAULT_CONFIG),
        None => Config::default(),
    };

    if let Some(dir) = &cli.resources_dir {
        config.storage.resources_dir = dir.to_string_lossy().into_owned();
    }
    Ok(config)
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;

    match cli.command {
        Command::Fetch {
            sources,
            keep_going,
            json,
        } => {
            config.validate()?;
            let cache = BulletinCache::new(config.storage.resources_path());
            cache.ensure_dir().await?;

            let service = BulletinService::from_config(Arc::new(config))?;
            let report = pipeline::run_fetch(&service, &sources, keep_going).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for record in &report.records {
                    println!("{}", record.summary());
                }
                for failure in &report.failures {
                    eprintln!("{}: failed: {}", failure.source, failure.error);
                }
            }
        }

        Command::Sources => {
            for source in &config.sources {
                let detail = if source.detail.is_some() {
                    " (via detail page)"
                } else {
                    ""
                };
                println!("{:<14} {}{}", source.name, source.listing_url, detail);
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!(
                "✓ Config OK ({} sources, cache in {})",
                config.sources.len(),
                config.storage.resources_dir
            );
        }

        Command::Info => {
            let cache = BulletinCache::new(config.storage.resources_path());
            log::info!("Resources directory: {}", cache.root().display());

            for source in &config.sources {
                let cached = cache.list_cached(&source.name)?;
                match cached.last() {
                    Some(newest) => println!(
                        "{:<14} {} cached, newest {} ({})",
                        source.name,
                        cached.len(),
                        newest.date,
                        newest.path.display()
                    ),
                    None => println!("{:<14} nothing cached", source.name),
                }
            }
        }
    }

    Ok(())
}
