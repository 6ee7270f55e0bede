//! modelvault CLI
//!
//! Command-line interface for loading model bundles and syncing the
//! local artifact tree to object storage.

mod commands;

use clap::{Parser, Subcommand};
use modelvault_core::LoaderConfig;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// modelvault - model artifact loader for the trading agent
#[derive(Parser, Debug)]
#[command(name = "modelvault")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Artifact source (local or remote)
    #[arg(long, global = true)]
    source: Option<String>,

    /// Base directory for the local source
    #[arg(long, global = true)]
    base_path: Option<PathBuf>,

    /// Bucket name for the remote source
    #[arg(long, global = true)]
    bucket: Option<String>,

    /// Region for the remote source
    #[arg(long, global = true)]
    region: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load the model bundle for a ticker
    Load {
        /// Ticker symbol (e.g., SMH)
        ticker: String,

        /// Load planned assets anyway
        #[arg(long)]
        allow_inactive: bool,
    },

    /// Print the resolved artifact path for a ticker
    Path {
        /// Ticker symbol
        ticker: String,
    },

    /// List registry entries
    Tickers,

    /// Upload the local artifact tree to the remote store
    Upload {
        /// Local directory to upload
        #[arg(long, default_value = "models_storage")]
        local_dir: PathBuf,

        /// Show what would be uploaded without uploading
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Config file, then flag overrides
    let mut config = match &cli.config {
        Some(path) => LoaderConfig::from_file(path)?,
        None => LoaderConfig::default(),
    };
    if let Some(source) = &cli.source {
        config.source = source.parse()?;
    }
    if let Some(base_path) = &cli.base_path {
        config.local.base_path = base_path.clone();
    }
    if let Some(bucket) = &cli.bucket {
        config.remote.bucket = Some(bucket.clone());
    }
    if let Some(region) = &cli.region {
        config.remote.region = region.clone();
    }

    match cli.command {
        Commands::Load {
            ticker,
            allow_inactive,
        } => {
            config.allow_inactive = config.allow_inactive || allow_inactive;
            commands::load(&config, &ticker).await?;
        }
        Commands::Path { ticker } => {
            commands::path(&config, &ticker).await?;
        }
        Commands::Tickers => {
            commands::tickers(&config).await?;
        }
        Commands::Upload { local_dir, dry_run } => {
            commands::upload(&config, &local_dir, dry_run).await?;
        }
    }

    Ok(())
}
