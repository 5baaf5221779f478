// src/services/screener.rs

//! Screener client: enumerates the symbol universe page by page.
//!
//! The endpoint has no cursor; pages are addressed by offset against a
//! stable marketCap-descending ranking. If that ranking shifts between two
//! page requests, symbols can repeat or go missing across pages. That is an
//! upstream limitation this client preserves rather than papering over with
//! a de-duplication pass.

use reqwest::Client;

use crate::config::ScreenerConfig;
use crate::error::{AppError, Result};
use crate::models::{ScreenerRequest, ScreenerResponse};

/// Production screener endpoint.
pub const SCREENER_URL: &str = "https://query2.finance.yahoo.com/v1/finance/screener";

/// Client for the paginated screener endpoint.
pub struct ScreenerClient {
    client: Client,
    base_url: String,
    config: ScreenerConfig,
}

impl ScreenerClient {
    /// Create a client against the production endpoint.
    pub fn new(client: Client, config: ScreenerConfig) -> Self {
        Self::with_base_url(client, config, SCREENER_URL)
    }

    /// Create a client against a custom endpoint URL.
    pub fn with_base_url(client: Client, config: ScreenerConfig, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            config,
        }
    }

    /// Enumerate all symbols in the configured universe.
    ///
    /// Drives a [`SymbolPager`] until the endpoint is exhausted or the
    /// configured symbol cap is reached. The cap is checked before each page
    /// request and the result is truncated exactly to it, preserving order.
    /// A transport error on any page aborts enumeration without returning a
    /// partial list.
    pub async fn fetch_symbols(&self) -> Result<Vec<String>> {
        let mut symbols: Vec<String> = Vec::new();
        let mut pager = SymbolPager::new(self);

        loop {
            if let Some(max) = self.config.max_symbols {
                if symbols.len() >= max {
                    log::info!("Reached max symbol limit: {}", max);
                    break;
                }
            }

            let Some(page) = pager.next_page().await? else {
                break;
            };
            symbols.extend(page);

            log::info!(
                "Fetched {} symbols (offset {})",
                symbols.len(),
                pager.last_offset()
            );
        }

        if let Some(max) = self.config.max_symbols {
            symbols.truncate(max);
        }
        Ok(symbols)
    }

    /// Fetch one raw screener page at the given offset.
    async fn fetch_page(&self, offset: usize) -> Result<ScreenerResponse> {
        let request = ScreenerRequest::equities(
            self.config.page_size,
            offset,
            &self.config.region,
            &self.config.quote_type,
        );

        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::screener(offset, format!("HTTP status {status}")));
        }

        let body: ScreenerResponse = response.json().await?;
        if let Some(error) = &body.finance.error {
            if !error.is_null() {
                return Err(AppError::screener(offset, error));
            }
        }
        Ok(body)
    }
}

/// Pull-based pager over the screener endpoint.
///
/// Holds the enumeration state (`offset`, `exhausted`) explicitly; it can
/// only be restarted from offset zero by constructing a new pager.
pub struct SymbolPager<'a> {
    client: &'a ScreenerClient,
    offset: usize,
    exhausted: bool,
}

impl<'a> SymbolPager<'a> {
    /// Create a pager starting at offset zero.
    pub fn new(client: &'a ScreenerClient) -> Self {
        Self {
            client,
            offset: 0,
            exhausted: false,
        }
    }

    /// Offset of the most recently fetched page.
    pub fn last_offset(&self) -> usize {
        self.offset.saturating_sub(self.client.config.page_size)
    }

    /// Fetch the next page of symbols, or `None` once exhausted.
    ///
    /// An empty page ends enumeration; a short page (fewer raw quotes than
    /// the page size) is returned and marks the pager exhausted. Entries
    /// missing a symbol token are skipped, so the returned page can be
    /// shorter than the raw quote count without ending enumeration.
    pub async fn next_page(&mut self) -> Result<Option<Vec<String>>> {
        if self.exhausted {
            return Ok(None);
        }

        let page_size = self.client.config.page_size;
        let response = self.client.fetch_page(self.offset).await?;

        let quotes = match response.finance.result.first() {
            Some(result) if !result.quotes.is_empty() => &result.quotes,
            _ => {
                self.exhausted = true;
                return Ok(None);
            }
        };

        // Termination is decided on the raw quote count, before malformed
        // entries are dropped.
        if quotes.len() < page_size {
            self.exhausted = true;
        }

        let symbols: Vec<String> = quotes
            .iter()
            .filter_map(|quote| quote.symbol.clone())
            .filter(|symbol| !symbol.is_empty())
            .collect();

        let skipped = quotes.len() - symbols.len();
        if skipped > 0 {
            log::debug!(
                "Skipped {} entries without a symbol token (offset {})",
                skipped,
                self.offset
            );
        }

        self.offset += page_size;
        Ok(Some(symbols))
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn client_for(server: &MockServer, config: ScreenerConfig) -> ScreenerClient {
        ScreenerClient::with_base_url(Client::new(), config, server.url("/screener"))
    }

    fn page_body(symbols: &[serde_json::Value]) -> serde_json::Value {
        json!({"finance": {"result": [{"quotes": symbols}], "error": null}})
    }

    fn config(page_size: usize, max_symbols: Option<usize>) -> ScreenerConfig {
        ScreenerConfig {
            page_size,
            max_symbols,
            ..ScreenerConfig::default()
        }
    }

    #[tokio::test]
    async fn enumerates_until_short_page() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/screener")
                    .json_body_partial(r#"{"offset": 0}"#);
                then.status(200).json_body(page_body(&[
                    json!({"symbol": "A"}),
                    json!({"symbol": "B"}),
                ]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/screener")
                    .json_body_partial(r#"{"offset": 2}"#);
                then.status(200)
                    .json_body(page_body(&[json!({"symbol": "C"})]));
            })
            .await;

        let client = client_for(&server, config(2, None));
        let symbols = client.fetch_symbols().await.unwrap();
        assert_eq!(symbols, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn cap_stops_before_next_page_and_truncates() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/screener")
                    .json_body_partial(r#"{"offset": 0}"#);
                then.status(200).json_body(page_body(&[
                    json!({"symbol": "A"}),
                    json!({"symbol": "B"}),
                ]));
            })
            .await;
        let second_page = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/screener")
                    .json_body_partial(r#"{"offset": 2}"#);
                then.status(200)
                    .json_body(page_body(&[json!({"symbol": "C"})]));
            })
            .await;

        let client = client_for(&server, config(2, Some(2)));
        let symbols = client.fetch_symbols().await.unwrap();
        assert_eq!(symbols, vec!["A", "B"]);
        second_page.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn cap_truncates_mid_page() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/screener");
                then.status(200).json_body(page_body(&[
                    json!({"symbol": "A"}),
                    json!({"symbol": "B"}),
                    json!({"symbol": "C"}),
                ]));
            })
            .await;

        let client = client_for(&server, config(3, Some(2)));
        let symbols = client.fetch_symbols().await.unwrap();
        assert_eq!(symbols, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn empty_page_ends_enumeration() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/screener");
                then.status(200).json_body(page_body(&[]));
            })
            .await;

        let client = client_for(&server, config(2, None));
        let symbols = client.fetch_symbols().await.unwrap();
        assert!(symbols.is_empty());
    }

    #[tokio::test]
    async fn malformed_entries_are_skipped_without_ending_enumeration() {
        let server = MockServer::start_async().await;

        // Full raw page (2 of 2) with one malformed entry, then a short page.
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/screener")
                    .json_body_partial(r#"{"offset": 0}"#);
                then.status(200).json_body(page_body(&[
                    json!({"symbol": "A"}),
                    json!({"name": "missing token"}),
                ]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/screener")
                    .json_body_partial(r#"{"offset": 2}"#);
                then.status(200)
                    .json_body(page_body(&[json!({"symbol": "B"})]));
            })
            .await;

        let client = client_for(&server, config(2, None));
        let symbols = client.fetch_symbols().await.unwrap();
        assert_eq!(symbols, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn http_error_aborts_enumeration() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/screener");
                then.status(500);
            })
            .await;

        let client = client_for(&server, config(2, None));
        let error = client.fetch_symbols().await.unwrap_err();
        assert!(matches!(error, AppError::Screener { offset: 0, .. }));
    }

    #[tokio::test]
    async fn pager_is_exhausted_after_short_page() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/screener");
                then.status(200)
                    .json_body(page_body(&[json!({"symbol": "A"})]));
            })
            .await;

        let client = client_for(&server, config(2, None));
        let mut pager = SymbolPager::new(&client);
        assert_eq!(pager.next_page().await.unwrap(), Some(vec!["A".to_string()]));
        assert_eq!(pager.next_page().await.unwrap(), None);
        assert_eq!(pager.next_page().await.unwrap(), None);
    }
}
