// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! On-disk JSON archive of fetched comment pages

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::info;

use crate::comments::{CommentPageResponse, CrawlSummary};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Archive entry not found: {0}")]
    NotFound(PathBuf),
}

/// Serialize `value` as UTF-8 JSON indented by four spaces
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, StorageError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write `value` to `path`, creating parent directories
async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(path, to_pretty_json(value)?).await?;
    Ok(())
}

/// Read a JSON document written by [`write_json`]
async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    if !fs::try_exists(path).await? {
        return Err(StorageError::NotFound(path.to_path_buf()));
    }
    let contents = fs::read(path).await?;
    Ok(serde_json::from_slice(&contents)?)
}

/// Directory layout: `<base>/<item_id>/page-<n>.json` and `<base>/<item_id>/comments.json`
#[derive(Debug, Clone)]
pub struct JsonArchive {
    base_path: PathBuf,
}

impl JsonArchive {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn page_path(&self, item_id: u64, page: u32) -> PathBuf {
        self.base_path
            .join(item_id.to_string())
            .join(format!("page-{}.json", page))
    }

    pub fn crawl_path(&self, item_id: u64) -> PathBuf {
        self.base_path.join(item_id.to_string()).join("comments.json")
    }

    /// Save a single page
    pub async fn write_page(
        &self,
        item_id: u64,
        page: u32,
        response: &CommentPageResponse,
    ) -> Result<PathBuf, StorageError> {
        let path = self.page_path(item_id, page);
        write_json(&path, response).await?;
        info!("Saved page {} of item {} to {:?}", page, item_id, path);
        Ok(path)
    }

    /// Load a page saved by [`JsonArchive::write_page`]
    pub async fn read_page(
        &self,
        item_id: u64,
        page: u32,
    ) -> Result<CommentPageResponse, StorageError> {
        read_json(&self.page_path(item_id, page)).await
    }

    /// Save a full crawl
    pub async fn write_crawl(&self, summary: &CrawlSummary) -> Result<PathBuf, StorageError> {
        let path = self.crawl_path(summary.item_id);
        write_json(&path, summary).await?;
        info!(
            "Saved {} pages of item {} to {:?}",
            summary.page_count, summary.item_id, path
        );
        Ok(path)
    }

    pub async fn read_crawl(&self, item_id: u64) -> Result<CrawlSummary, StorageError> {
        read_json(&self.crawl_path(item_id)).await
    }
}
