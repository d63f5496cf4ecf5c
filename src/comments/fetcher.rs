// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Comment page fetching
//!
//! One call, one GET. The response is sorted into three outcomes: a page
//! with comments, an item with no comments at all, or a page past the end.
//! The API sends the same empty payload for the last two, so the page number
//! the caller asked for is what tells them apart.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use super::config::FetcherConfig;
use super::transport::{HttpTransport, Transport};
use super::types::{
    CommentError, CommentPageRequest, CommentPageResponse, Result, SortMode, TransportResponse,
};

/// Fetches single pages from the comment listing endpoint
pub struct CommentPageFetcher<T: Transport + ?Sized = HttpTransport> {
    transport: Arc<T>,
    endpoint: String,
    default_limit: u32,
}

impl CommentPageFetcher<HttpTransport> {
    /// Create a fetcher with a reqwest transport built from `config`
    pub fn from_config(config: &FetcherConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(config)?);
        Self::new(transport, config)
    }
}

impl<T: Transport + ?Sized> CommentPageFetcher<T> {
    /// Create a fetcher over an existing transport
    pub fn new(transport: Arc<T>, config: &FetcherConfig) -> Result<Self> {
        let endpoint = config
            .endpoint_url()
            .map_err(|e| CommentError::Config {
                reason: format!("invalid base URL {}: {}", config.base_url, e),
            })?
            .to_string();

        Ok(Self {
            transport,
            endpoint,
            default_limit: config.default_limit,
        })
    }

    /// Fetch one comment page
    ///
    /// # Errors
    /// * `InvalidArgument` - page is 0 or limit is 0; nothing is sent
    /// * `Transport` - non-2xx HTTP status
    /// * `Api` - non-zero `code` in the payload
    /// * `NoComments` - page 1 had no comments
    /// * `PageOutOfRange` - a later page had no comments
    pub async fn fetch(&self, request: &CommentPageRequest) -> Result<CommentPageResponse> {
        request.validate()?;

        debug!(
            "Fetching comments for item {} (page {}, limit {}, sort {}) via {}",
            request.item_id,
            request.page,
            request.limit,
            request.sort,
            self.transport.name()
        );

        let response = self
            .transport
            .get(&self.endpoint, &request.query_pairs())
            .await?;

        classify(request, response)
    }

    /// Fetch one page with the sort mode given as text
    ///
    /// An unknown `sort` fails with `InvalidArgument` before any request.
    pub async fn fetch_page(
        &self,
        item_id: u64,
        page: u32,
        limit: u32,
        sort: &str,
    ) -> Result<CommentPageResponse> {
        let sort: SortMode = sort.parse()?;
        let request = CommentPageRequest {
            item_id,
            page,
            limit,
            sort,
        };
        self.fetch(&request).await
    }

    /// First-page request for `item_id` using the configured page size
    pub fn request(&self, item_id: u64) -> CommentPageRequest {
        CommentPageRequest::new(item_id).limit(self.default_limit)
    }

    pub fn default_limit(&self) -> u32 {
        self.default_limit
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl<T: Transport + ?Sized> Clone for CommentPageFetcher<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            endpoint: self.endpoint.clone(),
            default_limit: self.default_limit,
        }
    }
}

/// Interpret a raw response to `request`
pub fn classify(
    request: &CommentPageRequest,
    response: TransportResponse,
) -> Result<CommentPageResponse> {
    if !response.is_success() {
        return Err(CommentError::Transport {
            status: response.status,
            body: response.body,
        });
    }

    let value: Value = serde_json::from_str(&response.body)?;
    let page = CommentPageResponse::new(value);

    let code = page.code();
    if code != Some(0) {
        return Err(CommentError::Api {
            code,
            message: page.msg().unwrap_or_default().to_string(),
        });
    }

    if page.has_replies() {
        return Ok(page);
    }

    if request.page == 1 {
        info!("Item {} has no comments: {}", request.item_id, response.body);
        return Err(CommentError::NoComments {
            item_id: request.item_id,
        });
    }

    info!(
        "Page {} out of range for item {}: {}",
        request.page, request.item_id, response.body
    );
    Err(CommentError::PageOutOfRange {
        item_id: request.item_id,
        page: request.page,
    })
}
