// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the comment fetcher and its HTTP transport

use std::env;
use url::Url;

/// Host serving the comment API
pub const DEFAULT_BASE_URL: &str = "https://bcy.net";

/// Path of the comment listing endpoint
pub const REPLY_LIST_PATH: &str = "/apiv3/cmt/reply/list";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for fetching comment pages
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Scheme and host of the API, optionally with a path prefix
    pub base_url: String,
    /// Request timeout in milliseconds, enforced by the transport
    pub request_timeout_ms: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Optional session cookie
    pub cookie: Option<String>,
    /// Page size used when the caller does not pick one
    pub default_limit: u32,
    /// Extra headers sent with every request
    pub default_headers: Vec<(String, String)>,
}

impl FetcherConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("BCY_BASE_URL").unwrap_or(defaults.base_url),
            request_timeout_ms: env::var("BCY_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_ms),
            user_agent: env::var("BCY_USER_AGENT").unwrap_or(defaults.user_agent),
            cookie: env::var("BCY_COOKIE").ok().filter(|v| !v.is_empty()),
            default_limit: env::var("BCY_DEFAULT_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_limit),
            default_headers: defaults.default_headers,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid base URL {}: {}", self.base_url, e))?;
        if !["http", "https"].contains(&url.scheme()) {
            return Err(format!("Base URL must be http or https: {}", self.base_url));
        }
        if self.request_timeout_ms == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }
        if self.default_limit == 0 {
            return Err("Default limit must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Full URL of the comment listing endpoint
    ///
    /// A path prefix on the base URL is kept: `http://host/bcy` resolves to
    /// `http://host/bcy/apiv3/cmt/reply/list`.
    pub fn endpoint_url(&self) -> Result<Url, url::ParseError> {
        let mut base = Url::parse(&self.base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(REPLY_LIST_PATH.trim_start_matches('/'))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 10000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cookie: None,
            default_limit: 15,
            default_headers: vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("Referer".to_string(), "https://bcy.net/".to_string()),
            ],
        }
    }
}
