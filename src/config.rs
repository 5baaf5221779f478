// src/config.rs

//! Application configuration structures.
//!
//! The configuration is built once in the binary from CLI arguments (each
//! overridable by an environment variable) and passed by reference into the
//! pipeline. No component reads ambient globals.

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// MongoDB connection settings
    pub mongo: MongoConfig,

    /// Screener enumeration settings
    pub screener: ScreenerConfig,

    /// Quote summary fetch settings
    pub summary: SummaryConfig,

    /// HTTP client settings
    pub http: HttpConfig,
}

impl Config {
    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.mongo.uri.trim().is_empty() {
            return Err(AppError::config("mongo.uri is empty"));
        }
        if self.mongo.database.trim().is_empty() {
            return Err(AppError::config("mongo.database is empty"));
        }
        if self.mongo.collection.trim().is_empty() {
            return Err(AppError::config("mongo.collection is empty"));
        }
        if self.screener.page_size == 0 {
            return Err(AppError::config("screener.page_size must be > 0"));
        }
        if self.screener.region.trim().is_empty() {
            return Err(AppError::config("screener.region is empty"));
        }
        if self.summary.batch_size == 0 {
            return Err(AppError::config("summary.batch_size must be > 0"));
        }
        if self.summary.modules.is_empty() {
            return Err(AppError::config("summary.modules must not be empty"));
        }
        if self.summary.max_concurrent == 0 {
            return Err(AppError::config("summary.max_concurrent must be > 0"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::config("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::config("http.timeout_secs must be > 0"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mongo: MongoConfig::default(),
            screener: ScreenerConfig::default(),
            summary: SummaryConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

/// MongoDB connection settings.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// Connection URI
    pub uri: String,

    /// Database name
    pub database: String,

    /// Collection name
    pub collection: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: defaults::mongo_uri(),
            database: defaults::mongo_database(),
            collection: defaults::mongo_collection(),
        }
    }
}

/// Screener enumeration settings.
#[derive(Debug, Clone)]
pub struct ScreenerConfig {
    /// Symbols requested per screener page
    pub page_size: usize,

    /// Region operand of the screener query (e.g. "us")
    pub region: String,

    /// Quote type operand of the screener query
    pub quote_type: String,

    /// Optional cap on the total number of symbols enumerated
    pub max_symbols: Option<usize>,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::page_size(),
            region: defaults::region(),
            quote_type: defaults::quote_type(),
            max_symbols: None,
        }
    }
}

/// Quote summary fetch settings.
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    /// Symbols fetched and upserted per batch
    pub batch_size: usize,

    /// Quote summary modules to request per symbol
    pub modules: Vec<String>,

    /// Maximum concurrent per-symbol requests within a batch
    pub max_concurrent: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            batch_size: defaults::batch_size(),
            modules: defaults::modules(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    pub user_agent: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

mod defaults {
    // Mongo defaults
    pub fn mongo_uri() -> String {
        "mongodb://localhost:27017".into()
    }
    pub fn mongo_database() -> String {
        "market_data".into()
    }
    pub fn mongo_collection() -> String {
        "us_equities".into()
    }

    // Screener defaults
    pub fn page_size() -> usize {
        250
    }
    pub fn region() -> String {
        "us".into()
    }
    pub fn quote_type() -> String {
        "EQUITY".into()
    }

    // Summary defaults
    pub fn batch_size() -> usize {
        50
    }
    pub fn modules() -> Vec<String> {
        [
            "assetProfile",
            "summaryProfile",
            "quoteType",
            "price",
            "summaryDetail",
            "defaultKeyStatistics",
            "financialData",
        ]
        .iter()
        .map(|m| m.to_string())
        .collect()
    }
    pub fn max_concurrent() -> usize {
        5
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; equisync/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
}
