// src/services/quote_summary.rs

//! Quote summary client: fetches company data for one batch of symbols.
//!
//! One logical fetch per batch; per-symbol requests run concurrently up to
//! the configured limit and all results converge before the batch returns.

use std::collections::HashMap;

use futures::stream::{self, StreamExt};
use reqwest::Client;

use serde::Deserialize;

use crate::error::{AppError, Result};

/// Production quote summary endpoint base; the symbol is appended as a path
/// segment.
pub const QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";

/// Response envelope of the quote summary endpoint.
#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: Option<QuoteSummaryEnvelope>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    #[serde(default)]
    result: Option<Vec<serde_json::Value>>,
}

/// Client for the per-symbol quote summary endpoint.
pub struct QuoteSummaryClient {
    client: Client,
    base_url: String,
    max_concurrent: usize,
}

impl QuoteSummaryClient {
    /// Create a client against the production endpoint.
    pub fn new(client: Client, max_concurrent: usize) -> Self {
        Self::with_base_url(client, max_concurrent, QUOTE_SUMMARY_URL)
    }

    /// Create a client against a custom endpoint URL.
    pub fn with_base_url(
        client: Client,
        max_concurrent: usize,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Fetch the requested modules for every symbol in one batch.
    ///
    /// Symbols with no data (delisted, invalid, throttled) are absent from
    /// the returned map; the caller decides what to persist for them. A
    /// transport-level error on any sub-request aborts the whole batch.
    pub async fn fetch_chunk(
        &self,
        symbols: &[String],
        modules: &[String],
    ) -> Result<HashMap<String, serde_json::Value>> {
        let module_param = modules.join(",");

        let results: Vec<(String, Result<Option<serde_json::Value>>)> =
            stream::iter(symbols.iter().cloned())
                .map(|symbol| {
                    let modules = module_param.clone();
                    async move {
                        let result = self.fetch_symbol(&symbol, &modules).await;
                        (symbol, result)
                    }
                })
                .buffer_unordered(self.max_concurrent)
                .collect()
                .await;

        let mut data = HashMap::with_capacity(symbols.len());
        for (symbol, result) in results {
            match result? {
                Some(payload) => {
                    data.insert(symbol, payload);
                }
                None => log::debug!("No quote summary data for {}", symbol),
            }
        }
        Ok(data)
    }

    /// Fetch the quote summary for a single symbol.
    ///
    /// Returns `None` when the endpoint has nothing for the symbol (error
    /// status or empty result array).
    async fn fetch_symbol(
        &self,
        symbol: &str,
        modules: &str,
    ) -> Result<Option<serde_json::Value>> {
        let url = format!("{}/{}", self.base_url, symbol);
        let response = self
            .client
            .get(&url)
            .query(&[("modules", modules)])
            .send()
            .await
            .map_err(|e| AppError::summary(symbol, e))?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let body: QuoteSummaryResponse = response.json().await?;
        let payload = body
            .quote_summary
            .and_then(|envelope| envelope.result)
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            });
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn client_for(server: &MockServer) -> QuoteSummaryClient {
        QuoteSummaryClient::with_base_url(Client::new(), 2, server.url("/quoteSummary"))
    }

    fn summary_body(payload: serde_json::Value) -> serde_json::Value {
        json!({"quoteSummary": {"result": [payload], "error": null}})
    }

    #[tokio::test]
    async fn fetches_all_symbols_in_chunk() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/quoteSummary/AAPL")
                    .query_param("modules", "price,summaryDetail");
                then.status(200)
                    .json_body(summary_body(json!({"price": {"symbol": "AAPL"}})));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/quoteSummary/MSFT");
                then.status(200)
                    .json_body(summary_body(json!({"price": {"symbol": "MSFT"}})));
            })
            .await;

        let client = client_for(&server);
        let symbols = vec!["AAPL".to_string(), "MSFT".to_string()];
        let modules = vec!["price".to_string(), "summaryDetail".to_string()];
        let data = client.fetch_chunk(&symbols, &modules).await.unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(data["AAPL"]["price"]["symbol"], "AAPL");
        assert_eq!(data["MSFT"]["price"]["symbol"], "MSFT");
    }

    #[tokio::test]
    async fn symbol_without_data_is_absent_from_map() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/quoteSummary/AAPL");
                then.status(200)
                    .json_body(summary_body(json!({"price": {}})));
            })
            .await;
        // Delisted symbol: endpoint answers 404.
        server
            .mock_async(|when, then| {
                when.method(GET).path("/quoteSummary/GONE");
                then.status(404);
            })
            .await;

        let client = client_for(&server);
        let symbols = vec!["AAPL".to_string(), "GONE".to_string()];
        let modules = vec!["price".to_string()];
        let data = client.fetch_chunk(&symbols, &modules).await.unwrap();

        assert_eq!(data.len(), 1);
        assert!(data.contains_key("AAPL"));
        assert!(!data.contains_key("GONE"));
    }

    #[tokio::test]
    async fn transport_error_aborts_the_chunk() {
        // Nothing listens on port 1, so every sub-request fails to connect.
        let client =
            QuoteSummaryClient::with_base_url(Client::new(), 2, "http://127.0.0.1:1/quoteSummary");
        let symbols = vec!["AAPL".to_string()];
        let modules = vec!["price".to_string()];
        assert!(client.fetch_chunk(&symbols, &modules).await.is_err());
    }

    #[tokio::test]
    async fn empty_result_array_is_treated_as_missing() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/quoteSummary/AAPL");
                then.status(200)
                    .json_body(json!({"quoteSummary": {"result": [], "error": null}}));
            })
            .await;

        let client = client_for(&server);
        let symbols = vec!["AAPL".to_string()];
        let modules = vec!["price".to_string()];
        let data = client.fetch_chunk(&symbols, &modules).await.unwrap();
        assert!(data.is_empty());
    }
}
