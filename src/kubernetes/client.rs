// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Credential resolution and rate-limited client creation

use crate::config::Config;
use crate::error::{BenchError, Result};
use crate::kubernetes::rate_limit::{RateLimitConfig, RateLimitLayer};
use kube::{
    client::ClientBuilder,
    config::{KubeConfigOptions, Kubeconfig},
    Client, Config as KConfig,
};
use std::path::Path;
use tracing::{info, instrument};

/// Create the benchmark client from a kubeconfig file, or from the
/// in-cluster service account when no kubeconfig was given
#[instrument(skip(config))]
pub async fn create_client(config: &Config) -> Result<Client> {
    let client_config = match config.kubeconfig_path() {
        Some(path) => load_kubeconfig(path).await?,
        None => {
            info!("No kubeconfig given, using in-cluster configuration");
            KConfig::incluster().map_err(|e| BenchError::InClusterError(e.to_string()))?
        }
    };

    info!("Connecting to {}", client_config.cluster_url);
    build_client(client_config, config.rate_limit())
}

/// Load a client config from the current context of a kubeconfig file
pub async fn load_kubeconfig(path: &Path) -> Result<KConfig> {
    info!("Loading kubeconfig from {}", path.display());

    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        BenchError::KubeconfigError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let kubeconfig: Kubeconfig = serde_yaml::from_str(&contents).map_err(|e| {
        BenchError::KubeconfigError(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    KConfig::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| BenchError::KubeconfigError(format!("Failed to create config: {}", e)))
}

/// Build a client on kube's default service stack with the rate limiter on top
pub fn build_client(client_config: KConfig, rate_limit: RateLimitConfig) -> Result<Client> {
    let layer = RateLimitLayer::new(rate_limit);
    let limits = layer.config();
    if limits.is_enabled() {
        info!(
            "Client-side rate limit: qps={}, burst={}",
            limits.effective_qps(),
            limits.effective_burst()
        );
    } else {
        info!("Client-side rate limit disabled (qps={})", limits.qps);
    }

    let builder = ClientBuilder::try_from(client_config)
        .map_err(|e| BenchError::ClientError(e.to_string()))?;

    Ok(builder.with_layer(&layer).build())
}
