// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The measurement loop

use crate::bench::{BenchReport, ErrorPolicy, Operation};
use crate::constants::NAMESPACE_PREFIX;
use crate::error::{BenchError, Result};
use crate::kubernetes::{create_namespace, delete_namespace, list_namespaces, open_namespace_watch};
use kube::Client;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument};

/// Name of the namespace touched by iteration `index` of create/delete
pub fn namespace_name(index: usize) -> String {
    format!("{}{}", NAMESPACE_PREFIX, index)
}

/// Repeat `operation` `count` times with the operation's own error policy
pub async fn run(client: &Client, operation: Operation, count: usize) -> Result<BenchReport> {
    run_with_policy(client, operation, count, operation.error_policy()).await
}

/// Repeat `operation` `count` times, one call at a time, and time the whole batch
#[instrument(skip(client))]
pub async fn run_with_policy(
    client: &Client,
    operation: Operation,
    count: usize,
    policy: ErrorPolicy,
) -> Result<BenchReport> {
    info!("Running {} {} times", operation, count);

    let mut failures = 0;
    let start = Instant::now();
    for index in 0..count {
        if let Err(e) = execute(client, operation, index).await {
            match policy {
                ErrorPolicy::AbortOnError => {
                    return Err(BenchError::OperationFailed {
                        operation,
                        index,
                        source: Box::new(e),
                    });
                }
                ErrorPolicy::ContinueOnError => {
                    error!("{} call #{} failed: {}", operation, index, e);
                    failures += 1;
                }
            }
        }
    }
    let elapsed = start.elapsed();

    info!(
        "Finished {} {} times in {:?} ({} failed)",
        operation, count, elapsed, failures
    );

    Ok(BenchReport {
        operation,
        count,
        failures,
        elapsed,
    })
}

/// Issue a single call of the operation
async fn execute(client: &Client, operation: Operation, index: usize) -> Result<()> {
    match operation {
        Operation::List => {
            list_namespaces(client).await?;
        }
        Operation::Create => {
            create_namespace(client, &namespace_name(index)).await?;
        }
        Operation::Delete => {
            delete_namespace(client, &namespace_name(index)).await?;
        }
        Operation::Watch => {
            let watch = open_namespace_watch(client).await?;
            debug!("Watch #{} opened", index);
            watch.close();
        }
    }
    Ok(())
}
