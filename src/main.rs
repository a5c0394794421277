use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use wallet_wrap::{
    config::Settings,
    models::{Archetype, WalletAddress, WalletMetrics, WrapSummary},
    providers::{CachedMetricsProvider, HttpMetricsProvider, MetricsProvider, StaticMetricsProvider},
    WrapGenerator,
};

#[derive(Parser)]
#[clap(name = "wallet-wrap")]
#[clap(about = "Classify crypto wallets into trading archetypes", long_about = None)]
struct Cli {
    /// Settings file to load over the defaults
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch metrics for one or more wallets and generate the wrap
    Wrap {
        /// EVM or Solana addresses
        #[clap(required = true)]
        addresses: Vec<String>,

        /// Serve metrics from a JSON fixture file instead of the API
        #[clap(long)]
        fixtures: Option<PathBuf>,

        /// Print the summary as JSON
        #[clap(long)]
        json: bool,
    },

    /// Classify metrics from a local JSON file (one record or an array)
    Classify {
        #[clap(short, long)]
        file: PathBuf,

        /// Print the summary as JSON
        #[clap(long)]
        json: bool,
    },

    /// List every archetype with its tagline
    Archetypes,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MetricsFile {
    Many(Vec<WalletMetrics>),
    One(WalletMetrics),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::new().unwrap_or_else(|_| Settings::default()),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.app.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    match cli.command {
        Commands::Wrap { addresses, fixtures, json } => {
            let addresses = addresses
                .iter()
                .map(|a| WalletAddress::parse(a))
                .collect::<Result<Vec<_>, _>>()?;

            let upstream: Arc<dyn MetricsProvider> = match fixtures {
                Some(path) => Arc::new(StaticMetricsProvider::from_file(path)?),
                None => {
                    info!("Using metrics API at {}", settings.provider.base_url);
                    Arc::new(HttpMetricsProvider::new(&settings.provider)?)
                }
            };

            let provider: Arc<dyn MetricsProvider> = if settings.cache.enabled {
                Arc::new(CachedMetricsProvider::new(upstream, settings.cache.ttl()))
            } else {
                upstream
            };

            let generator = WrapGenerator::new(provider, settings.classifier.clone());
            let summary = generator.generate(&addresses).await?;
            print_summary(&summary, json)?;
        }

        Commands::Classify { file, json } => {
            let contents = std::fs::read_to_string(&file)?;
            let wallets = match serde_json::from_str::<MetricsFile>(&contents)? {
                MetricsFile::Many(wallets) => wallets,
                MetricsFile::One(wallet) => vec![wallet],
            };

            let generator = WrapGenerator::new(
                Arc::new(StaticMetricsProvider::new()),
                settings.classifier.clone(),
            );
            let summary = generator.generate_offline(&wallets)?;
            print_summary(&summary, json)?;
        }

        Commands::Archetypes => {
            for archetype in Archetype::ALL {
                println!("{:<20} {}", archetype.as_str(), archetype.tagline());
            }
        }
    }

    Ok(())
}

fn print_summary(summary: &WrapSummary, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("\n=== Your Onchain Wrap ===");
    if let Some(label) = &summary.address_label {
        println!("Wallets: {}", label);
    }
    println!("Persona: {} [{}]", summary.archetype, summary.card_template);
    println!("         {}", summary.tagline);
    println!("\nOverall PnL:    {}", summary.overall_pnl);
    println!("Total Volume:   {}", summary.total_volume);
    println!("Win Rate:       {}", summary.win_rate);
    println!("Biggest Profit: {}", describe_extreme(&summary.biggest_profit));
    println!("Biggest Loss:   {}", describe_extreme(&summary.biggest_loss));

    Ok(())
}

fn describe_extreme(extreme: &wallet_wrap::models::ExtremeDisplay) -> String {
    let mut text = extreme.display.clone();
    if let Some(symbol) = extreme.token.as_ref().and_then(|t| t.symbol.as_deref()) {
        text.push_str(&format!(" on {}", symbol));
    }
    if let Some(pct) = &extreme.pnl_percent {
        text.push_str(&format!(" ({})", pct));
    }
    text
}
