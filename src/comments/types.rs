// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for comment page fetching

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Result alias for comment operations
pub type Result<T> = std::result::Result<T, CommentError>;

/// Ordering of returned comments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Most recent first
    #[default]
    Time,
    /// Most engaged first
    Hot,
}

impl SortMode {
    /// Value sent in the `sort` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Time => "time",
            SortMode::Hot => "hot",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = CommentError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "time" => Ok(SortMode::Time),
            "hot" => Ok(SortMode::Hot),
            other => Err(CommentError::InvalidArgument {
                reason: format!("sort must be one of time/hot, got {:?}", other),
            }),
        }
    }
}

/// Parameters of a single comment page query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPageRequest {
    /// Parent item (post/moment) whose comments are listed
    pub item_id: u64,
    /// 1-based page number
    pub page: u32,
    /// Maximum comments per page
    pub limit: u32,
    /// Ordering of comments
    pub sort: SortMode,
}

impl CommentPageRequest {
    /// Default page size used by the platform's web client
    pub const DEFAULT_LIMIT: u32 = 15;

    /// First page of `item_id` with default limit and sort
    pub fn new(item_id: u64) -> Self {
        Self {
            item_id,
            page: 1,
            limit: Self::DEFAULT_LIMIT,
            sort: SortMode::default(),
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Check the page/limit bounds
    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(CommentError::InvalidArgument {
                reason: "page must be at least 1".to_string(),
            });
        }
        if self.limit == 0 {
            return Err(CommentError::InvalidArgument {
                reason: "limit must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Query string pairs in wire order
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("item_id", self.item_id.to_string()),
            ("limit", self.limit.to_string()),
            ("sort", self.sort.as_str().to_string()),
        ]
    }
}

/// A successful comment page, kept as the raw JSON document
///
/// Serializes back to exactly the JSON it was parsed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentPageResponse(Value);

impl CommentPageResponse {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Application status code, if present and integral
    pub fn code(&self) -> Option<i64> {
        self.0.get("code").and_then(Value::as_i64)
    }

    /// Error message sent alongside a non-zero code
    pub fn msg(&self) -> Option<&str> {
        self.0.get("msg").and_then(Value::as_str)
    }

    /// Comment records under `data.data`; empty when absent or not a list
    pub fn replies(&self) -> &[Value] {
        self.0
            .get("data")
            .and_then(|data| data.get("data"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn reply_count(&self) -> usize {
        self.replies().len()
    }

    pub fn has_replies(&self) -> bool {
        !self.replies().is_empty()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Raw HTTP exchange result handed back by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Errors that can occur while fetching a comment page
#[derive(Debug, Error)]
pub enum CommentError {
    /// Request parameters rejected before any network call
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the arguments
        reason: String,
    },

    /// Endpoint answered with a non-2xx HTTP status
    #[error("HTTP status {status}: {body}")]
    Transport {
        /// HTTP status code
        status: u16,
        /// Response body, unmodified
        body: String,
    },

    /// Endpoint answered with a non-zero application code
    #[error("Comment API error: {message}")]
    Api {
        /// `code` field of the payload, if it had one
        code: Option<i64>,
        /// `msg` field of the payload
        message: String,
    },

    /// Page 1 came back empty: the item has no comments
    #[error("Item {item_id} has no comments")]
    NoComments {
        /// Item that was queried
        item_id: u64,
    },

    /// A later page came back empty: pagination is complete
    #[error("Page {page} is out of range for item {item_id}")]
    PageOutOfRange {
        /// Item that was queried
        item_id: u64,
        /// Page that came back empty
        page: u32,
    },

    /// Transport could not be built from configuration
    #[error("Configuration error: {reason}")]
    Config {
        /// What was wrong with the configuration
        reason: String,
    },

    /// Request could not be sent or its body not read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// 2xx body was not valid JSON
    #[error("Invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CommentError {
    /// True for the two expected pagination outcomes
    pub fn is_sentinel(&self) -> bool {
        matches!(
            self,
            CommentError::NoComments { .. } | CommentError::PageOutOfRange { .. }
        )
    }
}
