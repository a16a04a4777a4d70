// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::Result;
use crate::models::HttpConfig;

/// Create the HTTP client used for the board fetch.
///
/// Carries the configured browser-profile headers as defaults and the
/// configured request timeout. Malformed header entries are logged and
/// skipped rather than failing client construction.
pub fn create_client(config: &HttpConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .default_headers(build_headers(config))
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

fn build_headers(config: &HttpConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for header in &config.headers {
        let name = match HeaderName::try_from(header.name.as_str()) {
            Ok(name) => name,
            Err(e) => {
                log::warn!("Skipping invalid header name '{}': {}", header.name, e);
                continue;
            }
        };
        let value = match HeaderValue::from_str(&header.value) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Skipping invalid header value for '{}': {}", header.name, e);
                continue;
            }
        };
        headers.insert(name, value);
    }
    headers
}
