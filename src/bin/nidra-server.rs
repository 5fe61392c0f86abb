// ABOUTME: Server binary for the Nidra sleep inference API
// ABOUTME: Loads configuration, initializes logging, eagerly loads the model, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

//! # Nidra Server Binary
//!
//! Starts the HTTP API. A missing or corrupt model artifact is not fatal: the
//! server keeps serving and retries the load on the next prediction. Failing to
//! bind the service port is the only fatal startup error.

use anyhow::{Context, Result};
use clap::Parser;
use nidra_core::constants::service::BINARY_NAME;
use nidra_server::{
    config::environment::ServerConfig, logging, resources::ServerResources, routes,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "nidra-server")]
#[command(about = "Nidra - sleep-state inference and dosha-aware diet recommendations")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override the model artifact path
    #[arg(long)]
    model_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(model_path) = args.model_path {
        config.model.path = model_path;
    }

    logging::init_from_env()?;

    info!("Starting {BINARY_NAME}");
    info!("{}", config.summary());

    let bind_addr = format!("{}:{}", config.host, config.http_port);
    let resources = Arc::new(ServerResources::from_config(config));

    let loader = Arc::clone(&resources.prediction);
    let loaded = tokio::task::spawn_blocking(move || loader.load_model())
        .await
        .context("Model load task failed")?;
    if loaded {
        info!("Sleep classifier ready");
    } else {
        warn!("Sleep classifier unavailable at startup; predictions will retry the load");
    }

    let app = routes::router(&resources);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;
    info!(address = %bind_addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
