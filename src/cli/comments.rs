// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use crate::comments::{CommentCrawler, CommentPageFetcher, FetcherConfig, SortMode};
use crate::storage::{to_pretty_json, JsonArchive};

/// Arguments for fetch command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Item (post/moment) whose comments to fetch
    pub item_id: u64,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Comments per page (defaults to BCY_DEFAULT_LIMIT or 15)
    #[arg(long)]
    pub limit: Option<u32>,

    /// Sort order: time or hot
    #[arg(long, default_value = "time")]
    pub sort: String,

    /// Archive directory to save the page into instead of printing it
    /// (written as `<DIR>/<ITEM_ID>/page-<PAGE>.json`)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// API host override
    #[arg(long, env = "BCY_BASE_URL")]
    pub base_url: Option<String>,
}

/// Arguments for crawl command
#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Item (post/moment) whose comments to crawl
    pub item_id: u64,

    /// Comments per page (defaults to BCY_DEFAULT_LIMIT or 15)
    #[arg(long)]
    pub limit: Option<u32>,

    /// Sort order: time or hot
    #[arg(long, default_value = "time")]
    pub sort: String,

    /// Stop after this many pages
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Archive directory to save the crawl into
    /// (written as `<DIR>/<ITEM_ID>/comments.json`)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// API host override
    #[arg(long, env = "BCY_BASE_URL")]
    pub base_url: Option<String>,
}

fn load_config(base_url: Option<String>) -> Result<FetcherConfig> {
    let mut config = FetcherConfig::from_env();
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;
    Ok(config)
}

/// Fetch a single comment page
///
/// An item without comments or a page past the end is reported, not failed.
pub async fn fetch_page(args: FetchArgs) -> Result<()> {
    let config = load_config(args.base_url)?;
    let fetcher = CommentPageFetcher::from_config(&config)?;
    let limit = args.limit.unwrap_or(config.default_limit);

    info!(
        "Fetching page {} of item {} from {}",
        args.page,
        args.item_id,
        fetcher.endpoint()
    );

    let response = match fetcher
        .fetch_page(args.item_id, args.page, limit, &args.sort)
        .await
    {
        Ok(response) => response,
        Err(e) if e.is_sentinel() => {
            println!("{}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    match args.output {
        Some(dir) => {
            let archive = JsonArchive::new(dir);
            let path = archive
                .write_page(args.item_id, args.page, &response)
                .await
                .with_context(|| {
                    format!("Failed to archive into {}", archive.base_path().display())
                })?;
            println!(
                "Saved {} comments from page {} to {}",
                response.reply_count(),
                args.page,
                path.display()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&to_pretty_json(&response)?)?;
        }
    }

    Ok(())
}

/// Crawl every comment page of an item
pub async fn crawl_item(args: CrawlArgs) -> Result<()> {
    let config = load_config(args.base_url)?;
    let sort: SortMode = args.sort.parse()?;
    let limit = args.limit.unwrap_or(config.default_limit);

    let fetcher = CommentPageFetcher::from_config(&config)?;
    info!(
        "Crawling comments for item {} from {}",
        args.item_id,
        fetcher.endpoint()
    );

    let crawler = CommentCrawler::new(fetcher)
        .limit(limit)
        .sort(sort)
        .max_pages(args.max_pages);
    let summary = crawler.collect(args.item_id).await?;

    if summary.is_empty() {
        println!("Item {} has no comments", args.item_id);
        return Ok(());
    }

    println!(
        "Collected {} comments over {} pages",
        summary.reply_count, summary.page_count
    );

    if let Some(dir) = args.output {
        let archive = JsonArchive::new(dir);
        let path = archive
            .write_crawl(&summary)
            .await
            .with_context(|| {
                format!("Failed to archive into {}", archive.base_path().display())
            })?;
        println!("Saved to {}", path.display());
    }

    Ok(())
}
