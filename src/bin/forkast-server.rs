// ABOUTME: Forkast server binary
// ABOUTME: Loads configuration from the environment, applies CLI overrides, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forkast

//! # Forkast Server Binary
//!
//! Starts the recipe REST API on the configured address.

use anyhow::Result;
use clap::Parser;
use forkast_server::{
    config::{DatabaseUrl, ServerConfig},
    logging, server,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "forkast-server")]
#[command(about = "Forkast - recipe discovery by ingredient overlap")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (`sqlite:path` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(url);
    }

    info!("Starting Forkast server");
    info!("{}", config.summary());

    if let Err(e) = server::run(config).await {
        error!(error = %e, "Server failed");
        return Err(e);
    }
    Ok(())
}
