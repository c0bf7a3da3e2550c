//! rulegen - build AdGuard Home DNS split rules from public domain feeds.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use domain_feeds::SourceFetcher;
use rulegen::extract::{extract_source, preview};
use rulegen::{generate, Settings};

#[derive(Parser)]
#[command(name = "rulegen")]
#[command(about = "Generate DNS split rules from domain-list feeds")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect every configured feed and write the rule files
    Generate {
        /// Directory holding config.json and the DNS/override files
        #[arg(long)]
        config_dir: Option<PathBuf>,

        /// Directory the rule files are written to
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Feeds fetched at once
        #[arg(long)]
        concurrency: Option<usize>,

        /// Per-feed fetch timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// Fetch one source and print what it yields
    Extract {
        /// URL or local path
        source: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,domain_feeds=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Generate {
            config_dir,
            output_dir,
            concurrency,
            timeout_secs,
        } => {
            let mut settings = settings;
            if let Some(dir) = config_dir {
                settings = settings.with_config_dir(dir);
            }
            if let Some(dir) = output_dir {
                settings = settings.with_output_dir(dir);
            }
            if let Some(concurrency) = concurrency {
                settings = settings.with_concurrency(concurrency);
            }
            if let Some(secs) = timeout_secs {
                settings = settings.with_fetch_timeout(Duration::from_secs(secs));
            }

            let fetcher = SourceFetcher::new().with_timeout(settings.fetch_timeout);
            let report = generate(&settings, fetcher)
                .await
                .context("Rule generation failed")?;

            tracing::info!(
                cn = report.cn_domains,
                foreign = report.blacklist_domains,
                files = report.files.len(),
                "Done"
            );
        }
        Commands::Extract { source } => {
            let fetcher = SourceFetcher::new().with_timeout(settings.fetch_timeout);
            let domains = extract_source(&fetcher, &source).await?;
            print!("{}", preview(&domains));
        }
    }

    Ok(())
}
