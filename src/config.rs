// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::bench::Operation;
use crate::constants::defaults;
use crate::kubernetes::RateLimitConfig;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Benchmark configuration parsed from the command line
#[derive(Debug, Clone, Parser)]
#[command(name = "nsbench")]
#[command(about = "Measure Kubernetes namespace API latency")]
#[command(version)]
#[command(
    after_help = "Long options take two dashes (--count 10 or --count=10). \
                  The single-dash form (-count 10) is not accepted."
)]
pub struct Config {
    /// Absolute path to the kubeconfig file; in-cluster credentials are used when unset
    #[arg(long, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Client-side steady-state request rate
    #[arg(long, default_value_t = defaults::QPS, allow_negative_numbers = true)]
    pub qps: i32,

    /// Client-side burst allowance
    #[arg(long, default_value_t = defaults::BURST, allow_negative_numbers = true)]
    pub burst: i32,

    /// Number of times the operation is repeated
    #[arg(long, default_value_t = defaults::COUNT)]
    pub count: usize,

    /// Namespace operation to benchmark
    #[arg(long, value_enum, default_value_t = Operation::Watch)]
    pub operation: Operation,
}

impl Config {
    /// Kubeconfig path, treating an empty value the same as an absent one
    pub fn kubeconfig_path(&self) -> Option<&Path> {
        self.kubeconfig
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Rate limiter settings, passed through without validation
    pub fn rate_limit(&self) -> RateLimitConfig {
        RateLimitConfig {
            qps: self.qps as f32,
            burst: self.burst,
        }
    }
}
