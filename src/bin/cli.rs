//! equisync CLI
//!
//! Fetches all equity symbols for a region from the Yahoo Finance screener
//! and stores per-symbol company data in MongoDB.

use clap::Parser;
use equisync::{
    config::{Config, HttpConfig, MongoConfig, ScreenerConfig, SummaryConfig},
    error::Result,
    pipeline,
    services::{QuoteSummaryClient, ScreenerClient},
    storage::{CompanyStore, MongoStore},
    utils::http,
};

/// equisync - equity universe company data sync
#[derive(Parser, Debug)]
#[command(
    name = "equisync",
    version,
    about = "Fetch all equity symbols from the Yahoo Finance screener and store company data in MongoDB"
)]
struct Cli {
    /// MongoDB connection URI
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "market_data")]
    mongodb_db: String,

    /// MongoDB collection name
    #[arg(long, env = "MONGODB_COLLECTION", default_value = "us_equities")]
    mongodb_collection: String,

    /// Number of symbols to fetch per quote summary batch
    #[arg(long, env = "BATCH_SIZE", default_value_t = 50)]
    batch_size: usize,

    /// Number of symbols to request per screener page
    #[arg(long, env = "SCREENER_PAGE_SIZE", default_value_t = 250)]
    screener_page_size: usize,

    /// Optional limit for the number of symbols to process
    #[arg(long, env = "MAX_SYMBOLS")]
    max_symbols: Option<usize>,

    /// Comma-separated list of quote summary modules to fetch
    #[arg(
        long,
        env = "MODULES",
        value_delimiter = ',',
        default_value = "assetProfile,summaryProfile,quoteType,price,summaryDetail,defaultKeyStatistics,financialData"
    )]
    modules: Vec<String>,

    /// Screener region filter
    #[arg(long, env = "REGION", default_value = "us")]
    region: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Build the immutable application configuration.
    fn into_config(self) -> Config {
        Config {
            mongo: MongoConfig {
                uri: self.mongodb_uri,
                database: self.mongodb_db,
                collection: self.mongodb_collection,
            },
            screener: ScreenerConfig {
                page_size: self.screener_page_size,
                region: self.region,
                max_symbols: self.max_symbols,
                ..ScreenerConfig::default()
            },
            summary: SummaryConfig {
                batch_size: self.batch_size,
                modules: self
                    .modules
                    .into_iter()
                    .map(|module| module.trim().to_string())
                    .filter(|module| !module.is_empty())
                    .collect(),
                ..SummaryConfig::default()
            },
            http: HttpConfig::default(),
        }
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("equisync starting...");

    let config = cli.into_config();
    config.validate()?;

    let client = http::create_async_client(&config.http)?;
    let screener = ScreenerClient::new(client.clone(), config.screener.clone());
    let summaries = QuoteSummaryClient::new(client, config.summary.max_concurrent);

    let store = MongoStore::connect(&config.mongo).await?;
    store.ensure_indexes().await?;
    log::info!(
        "Connected to {}.{}",
        config.mongo.database,
        config.mongo.collection
    );

    let report = pipeline::run_sync(&config, &screener, &summaries, &store).await?;

    log::info!(
        "Done! {} symbols across {} batches.",
        report.symbol_count,
        report.batch_count
    );

    Ok(())
}
