// src/models/screener.rs

//! Wire formats for the Yahoo Finance screener endpoint.

use serde::{Deserialize, Serialize};

/// Request body for one screener page.
///
/// Results are sorted by descending market cap so that successive
/// offset-based pages stay logically disjoint even though the endpoint has
/// no cursor semantics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerRequest {
    /// Number of quotes requested for this page
    pub size: usize,

    /// Zero-based offset of the first quote
    pub offset: usize,

    /// Ranking key for the stable sort
    pub sort_field: String,

    /// Sort direction
    pub sort_type: String,

    /// Quote type filter (e.g. "EQUITY")
    pub quote_type: String,

    /// Nested filter predicate
    pub query: ScreenerQuery,
}

impl ScreenerRequest {
    /// Build the request for one page of equities in a region.
    pub fn equities(size: usize, offset: usize, region: &str, quote_type: &str) -> Self {
        Self {
            size,
            offset,
            sort_field: "marketCap".to_string(),
            sort_type: "DESC".to_string(),
            quote_type: quote_type.to_string(),
            query: ScreenerQuery {
                operator: "AND".to_string(),
                operands: vec![ScreenerOperand {
                    operator: "EQ".to_string(),
                    operands: vec![
                        serde_json::Value::String("region".to_string()),
                        serde_json::Value::String(region.to_string()),
                    ],
                }],
            },
        }
    }
}

/// Top-level screener filter predicate.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenerQuery {
    pub operator: String,
    pub operands: Vec<ScreenerOperand>,
}

/// One field/value operand of a screener query.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenerOperand {
    pub operator: String,
    pub operands: Vec<serde_json::Value>,
}

/// Response envelope of the screener endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreenerResponse {
    pub finance: ScreenerFinance,
}

/// `finance` field of a screener response.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreenerFinance {
    #[serde(default)]
    pub result: Vec<ScreenerResult>,

    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// One result document holding the page's quotes.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreenerResult {
    #[serde(default)]
    pub quotes: Vec<ScreenerQuote>,
}

/// A single quote entry. Entries without a symbol token are tolerated and
/// skipped by the paginator.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreenerQuote {
    #[serde(default)]
    pub symbol: Option<String>,
}
