// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cli;
pub mod comments;
pub mod storage;

// Re-export main types
pub use comments::{
    classify, CommentCrawler, CommentError, CommentPageFetcher, CommentPageRequest,
    CommentPageResponse, CrawlSummary, FetcherConfig, HttpTransport, SortMode, Transport,
    TransportResponse,
};
pub use storage::{JsonArchive, StorageError};
