// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use bcy_comments::cli::comments::{crawl_item, fetch_page, CrawlArgs, FetchArgs};
use bcy_comments::{JsonArchive, SortMode};
use std::path::Path;
use tempfile::TempDir;

use super::support::spawn_server;

fn fetch_args(base_url: &str, item_id: u64, page: u32, output: Option<&Path>) -> FetchArgs {
    FetchArgs {
        item_id,
        page,
        limit: None,
        sort: "time".to_string(),
        output: output.map(Path::to_path_buf),
        base_url: Some(base_url.to_string()),
    }
}

fn crawl_args(base_url: &str, item_id: u64, sort: &str, output: Option<&Path>) -> CrawlArgs {
    CrawlArgs {
        item_id,
        limit: None,
        sort: sort.to_string(),
        max_pages: None,
        output: output.map(Path::to_path_buf),
        base_url: Some(base_url.to_string()),
    }
}

#[tokio::test]
async fn test_fetch_reports_pagination_sentinels_without_failing() {
    let server = spawn_server().await;
    let dir = TempDir::new().unwrap();

    // Item without comments
    fetch_page(fetch_args(&server.base_url, 2, 1, Some(dir.path())))
        .await
        .expect("no comments should not fail");
    assert!(!dir.path().join("2").exists());

    // Page past the end
    fetch_page(fetch_args(&server.base_url, 1, 3, Some(dir.path())))
        .await
        .expect("page out of range should not fail");
    assert!(!dir.path().join("1").join("page-3.json").exists());

    assert_eq!(server.hits(), 2);
}

#[tokio::test]
async fn test_fetch_surfaces_api_errors() {
    let server = spawn_server().await;

    let result = fetch_page(fetch_args(&server.base_url, 7, 1, None)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_fetch_writes_pretty_utf8_page() {
    let server = spawn_server().await;
    let dir = TempDir::new().unwrap();

    fetch_page(fetch_args(&server.base_url, 1, 1, Some(dir.path())))
        .await
        .expect("fetch failed");

    let path = dir.path().join("1").join("page-1.json");
    let text = std::fs::read_to_string(&path).expect("page not written");
    assert!(text.starts_with("{\n    \""));
    assert!(text.contains("评论"));
    assert!(!text.contains("\\u"));

    let loaded = JsonArchive::new(dir.path()).read_page(1, 1).await.unwrap();
    assert_eq!(loaded.reply_count(), 1);
}

#[tokio::test]
async fn test_crawl_rejects_bad_sort_before_any_request() {
    let server = spawn_server().await;
    let dir = TempDir::new().unwrap();

    let result = crawl_item(crawl_args(&server.base_url, 1, "likes", Some(dir.path()))).await;

    assert!(result.is_err());
    assert_eq!(server.hits(), 0);
    assert!(!dir.path().join("1").exists());
}

#[tokio::test]
async fn test_crawl_writes_archive() {
    let server = spawn_server().await;
    let dir = TempDir::new().unwrap();

    crawl_item(crawl_args(&server.base_url, 1, "hot", Some(dir.path())))
        .await
        .expect("crawl failed");

    let path = dir.path().join("1").join("comments.json");
    let text = std::fs::read_to_string(&path).expect("crawl not written");
    assert!(text.contains("\n    \"itemId\": 1"));
    assert!(text.contains("评论"));

    let summary = JsonArchive::new(dir.path()).read_crawl(1).await.unwrap();
    assert_eq!(summary.sort, SortMode::Hot);
    assert_eq!(summary.page_count, 2);
    assert_eq!(summary.reply_count, 2);
    // Two pages plus the out-of-range request
    assert_eq!(server.hits(), 3);
}

#[tokio::test]
async fn test_crawl_item_without_comments_writes_nothing() {
    let server = spawn_server().await;
    let dir = TempDir::new().unwrap();

    crawl_item(crawl_args(&server.base_url, 2, "time", Some(dir.path())))
        .await
        .expect("empty crawl should not fail");

    assert!(!dir.path().join("2").exists());
    assert_eq!(server.hits(), 1);
}
