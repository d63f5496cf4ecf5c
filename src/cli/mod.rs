// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod comments;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// bcy.net comment client
#[derive(Parser, Debug)]
#[command(name = "bcy-comments")]
#[command(version)]
#[command(about = "Fetch comment pages from bcy.net", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a single comment page
    Fetch(comments::FetchArgs),

    /// Fetch every comment page of an item
    Crawl(comments::CrawlArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Fetch(args) => comments::fetch_page(args).await,
        Commands::Crawl(args) => comments::crawl_item(args).await,
    }
}
