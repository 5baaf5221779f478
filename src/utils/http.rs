// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::config::HttpConfig;
use crate::error::Result;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &HttpConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}
