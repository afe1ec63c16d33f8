// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;
use tracing::info;

use nsbench::bench;
use nsbench::config::Config;
use nsbench::constants::DEBUG_LISTEN_ADDR;
use nsbench::debug::{spawn_debug_listener, DebugInfo};
use nsbench::kubernetes::create_client;
use nsbench::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing, defaulting to info so per-call failures are visible
    logging::init();

    let config = Config::parse();

    // Diagnostics are best effort and never block the benchmark
    spawn_debug_listener(DEBUG_LISTEN_ADDR, DebugInfo::from(&config));

    println!(
        "qps: {};  burst: {}; count: {}",
        config.qps, config.burst, config.count
    );

    let client = create_client(&config).await?;
    info!("Connected to Kubernetes cluster");

    let report = bench::run(&client, config.operation, config.count).await?;
    println!("{}", report);

    Ok(())
}
