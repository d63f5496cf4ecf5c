// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! bcy.net comment listing client
//!
//! Queries `/apiv3/cmt/reply/list` one page at a time:
//! - Single page fetch with success / no-comments / page-out-of-range outcomes
//! - Sequential crawl of every page of an item
//! - Pluggable transport with explicit default headers
//!
//! No retries, no caching, no rate limiting: every transport failure is
//! handed back to the caller unmodified.

pub mod config;
pub mod crawler;
pub mod fetcher;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use config::FetcherConfig;
pub use crawler::{CommentCrawler, CrawlSummary};
pub use fetcher::{classify, CommentPageFetcher};
pub use transport::{HttpTransport, Transport};
pub use types::{
    CommentError, CommentPageRequest, CommentPageResponse, Result, SortMode, TransportResponse,
};
