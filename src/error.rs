// src/error.rs

//! Unified error handling for the sync application.

use std::fmt;

use thiserror::Error;

/// Result type alias for sync operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// MongoDB operation failed
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// BSON conversion failed
    #[error("BSON error: {0}")]
    Bson(#[from] mongodb::bson::ser::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Screener page could not be enumerated
    #[error("Screener error at offset {offset}: {message}")]
    Screener { offset: usize, message: String },

    /// Quote summary fetch failed for a symbol
    #[error("Quote summary error for {symbol}: {message}")]
    Summary { symbol: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a screener error with the failing page offset.
    pub fn screener(offset: usize, message: impl fmt::Display) -> Self {
        Self::Screener {
            offset,
            message: message.to_string(),
        }
    }

    /// Create a quote summary error for a symbol.
    pub fn summary(symbol: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Summary {
            symbol: symbol.into(),
            message: message.to_string(),
        }
    }
}
