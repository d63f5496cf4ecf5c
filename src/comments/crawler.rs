// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Sequential page crawling for one item
//!
//! Walks pages 1, 2, 3... until the API reports the page is out of range.
//! The two pagination sentinels end the walk; any other error is yielded
//! once and also ends it. No retries, no concurrency.

use chrono::{DateTime, Utc};
use futures::stream::{self, Stream, TryStreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::fetcher::CommentPageFetcher;
use super::transport::{HttpTransport, Transport};
use super::types::{CommentError, CommentPageRequest, CommentPageResponse, Result, SortMode};

/// Every page collected for one item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlSummary {
    pub item_id: u64,
    pub sort: SortMode,
    pub limit: u32,
    /// Number of non-empty pages fetched
    pub page_count: usize,
    /// Total comments across all pages
    pub reply_count: usize,
    pub finished_at: DateTime<Utc>,
    pub pages: Vec<CommentPageResponse>,
}

impl CrawlSummary {
    fn new(item_id: u64, sort: SortMode, limit: u32, pages: Vec<CommentPageResponse>) -> Self {
        Self {
            item_id,
            sort,
            limit,
            page_count: pages.len(),
            reply_count: pages.iter().map(CommentPageResponse::reply_count).sum(),
            finished_at: Utc::now(),
            pages,
        }
    }

    /// The item had no comments at all
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Crawls the comment pages of an item one after another
pub struct CommentCrawler<T: Transport + ?Sized = HttpTransport> {
    fetcher: CommentPageFetcher<T>,
    limit: u32,
    sort: SortMode,
    max_pages: Option<u32>,
}

impl<T: Transport + ?Sized> CommentCrawler<T> {
    pub fn new(fetcher: CommentPageFetcher<T>) -> Self {
        let limit = fetcher.default_limit();
        Self {
            fetcher,
            limit,
            sort: SortMode::default(),
            max_pages: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Stop after `max_pages` pages even if more exist
    pub fn max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Stream the pages of `item_id` in order
    pub fn pages(&self, item_id: u64) -> impl Stream<Item = Result<CommentPageResponse>> + '_ {
        stream::unfold(Some(1u32), move |next_page| async move {
            let page = next_page?;

            if self.max_pages.is_some_and(|max| page > max) {
                debug!("Reached page cap for item {} at page {}", item_id, page - 1);
                return None;
            }

            let request = CommentPageRequest {
                item_id,
                page,
                limit: self.limit,
                sort: self.sort,
            };

            info!("Fetching comment page {} for item {}", page, item_id);

            match self.fetcher.fetch(&request).await {
                Ok(response) => Some((Ok(response), page.checked_add(1))),
                Err(CommentError::PageOutOfRange { .. }) => {
                    info!("Finished crawling item {} after {} pages", item_id, page - 1);
                    None
                }
                Err(CommentError::NoComments { .. }) => None,
                Err(e) => {
                    warn!("Crawl of item {} stopped at page {}: {}", item_id, page, e);
                    Some((Err(e), None))
                }
            }
        })
    }

    /// Fetch every page of `item_id`
    pub async fn collect(&self, item_id: u64) -> Result<CrawlSummary> {
        let pages: Vec<CommentPageResponse> = self.pages(item_id).try_collect().await?;
        let summary = CrawlSummary::new(item_id, self.sort, self.limit, pages);

        info!(
            "Collected {} comments over {} pages for item {}",
            summary.reply_count, summary.page_count, item_id
        );

        Ok(summary)
    }
}
