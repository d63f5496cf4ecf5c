// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP transport used by the comment fetcher
//!
//! The fetcher never builds its own client; it is handed something that can
//! perform a GET and report the raw status and body. `HttpTransport` is the
//! reqwest-backed implementation.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::config::FetcherConfig;
use super::types::{CommentError, Result, TransportResponse};

/// Something that can perform a GET request
///
/// Implementations report every HTTP status as-is; interpreting it is the
/// fetcher's job.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a GET request with the given query parameters
    async fn get(&self, url: &str, query: &[(&'static str, String)]) -> Result<TransportResponse>;

    /// Transport name for logging
    fn name(&self) -> &'static str;
}

/// reqwest-backed transport carrying the configured default headers
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport from configuration
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let headers = Self::default_headers(config)?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    fn default_headers(config: &FetcherConfig) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value(&config.user_agent)?);
        if let Some(cookie) = &config.cookie {
            headers.insert(COOKIE, header_value(cookie)?);
        }
        for (name, value) in &config.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| CommentError::Config {
                reason: format!("invalid header name {:?}: {}", name, e),
            })?;
            headers.insert(name, header_value(value)?);
        }
        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| CommentError::Config {
        reason: format!("invalid header value {:?}: {}", value, e),
    })
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, query: &[(&'static str, String)]) -> Result<TransportResponse> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(TransportResponse { status, body })
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}
