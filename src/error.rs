// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::bench::Operation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("In-cluster configuration unavailable: {0}")]
    InClusterError(String),

    #[error("Failed to create client: {0}")]
    ClientError(String),

    #[error("{operation} call #{index} failed: {source}")]
    OperationFailed {
        operation: Operation,
        index: usize,
        source: Box<BenchError>,
    },
}

pub type Result<T> = std::result::Result<T, BenchError>;
