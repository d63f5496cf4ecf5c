// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use bcy_comments::{
    CommentCrawler, CommentError, CommentPageFetcher, CommentPageRequest, FetcherConfig, SortMode,
};

use super::support::spawn_server;

async fn fetcher_for(base_url: String) -> CommentPageFetcher {
    let mut config = FetcherConfig::default().with_base_url(base_url);
    config.cookie = Some("sessionid=test".to_string());
    CommentPageFetcher::from_config(&config).expect("Failed to create fetcher")
}

#[tokio::test]
async fn test_fetch_over_http_sends_query_and_headers() {
    let fetcher = fetcher_for(spawn_server().await.base_url).await;

    let request = CommentPageRequest::new(99)
        .page(3)
        .limit(20)
        .sort(SortMode::Hot);
    let response = fetcher.fetch(&request).await.expect("fetch failed");

    let echoed = &response.replies()[0];
    assert_eq!(echoed["query"]["page"], "3");
    assert_eq!(echoed["query"]["item_id"], "99");
    assert_eq!(echoed["query"]["limit"], "20");
    assert_eq!(echoed["query"]["sort"], "hot");
    assert_eq!(echoed["referer"], "https://bcy.net/");
    assert_eq!(echoed["cookie"], "sessionid=test");
    assert!(echoed["user_agent"].as_str().unwrap().starts_with("Mozilla/5.0"));
}

#[tokio::test]
async fn test_fetch_over_http_classifies_outcomes() {
    let fetcher = fetcher_for(spawn_server().await.base_url).await;

    let page = fetcher.fetch_page(1, 1, 15, "time").await.unwrap();
    assert_eq!(page.reply_count(), 1);
    assert_eq!(page.replies()[0]["content"], "评论");

    let result = fetcher.fetch_page(2, 1, 15, "time").await;
    assert!(matches!(result, Err(CommentError::NoComments { item_id: 2 })));

    let result = fetcher.fetch_page(1, 3, 15, "time").await;
    assert!(matches!(result, Err(CommentError::PageOutOfRange { page: 3, .. })));

    let result = fetcher.fetch_page(7, 1, 15, "hot").await;
    assert!(matches!(result, Err(CommentError::Api { code: Some(7), .. })));

    match fetcher.fetch_page(500, 1, 15, "hot").await {
        Err(CommentError::Transport { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_crawl_over_http() {
    let fetcher = fetcher_for(spawn_server().await.base_url).await;

    let summary = CommentCrawler::new(fetcher).collect(1).await.unwrap();
    assert_eq!(summary.page_count, 2);
    assert_eq!(summary.reply_count, 2);
    assert_eq!(summary.pages[1].replies()[0]["id"], 2);
}

#[tokio::test]
async fn test_connection_failure_surfaces_http_error() {
    // Reserve a port, then free it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let fetcher = fetcher_for(format!("http://{}", addr)).await;
    let result = fetcher.fetch(&CommentPageRequest::new(1)).await;
    assert!(matches!(result, Err(CommentError::Http(_))));
}

#[tokio::test]
async fn test_fetch_through_base_url_with_path_prefix() {
    let server = spawn_server().await;
    let fetcher = fetcher_for(format!("{}/bcy", server.base_url)).await;
    assert_eq!(
        fetcher.endpoint(),
        format!("{}/bcy/apiv3/cmt/reply/list", server.base_url)
    );

    let page = fetcher.fetch_page(1, 1, 15, "time").await.unwrap();
    assert_eq!(page.reply_count(), 1);
    assert_eq!(server.hits(), 1);
}
