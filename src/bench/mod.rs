// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Timed repetition of a single namespace operation.

pub mod runner;

pub use runner::{namespace_name, run, run_with_policy};

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// The namespace operation repeated by a benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// List all namespaces
    List,
    /// Create namespaces `ns0..nsN`
    Create,
    /// Delete namespaces `ns0..nsN`
    Delete,
    /// Open a watch over all namespaces
    Watch,
}

impl Operation {
    /// How a failing call affects the rest of the run
    pub fn error_policy(self) -> ErrorPolicy {
        match self {
            Operation::List | Operation::Create | Operation::Delete => ErrorPolicy::AbortOnError,
            Operation::Watch => ErrorPolicy::ContinueOnError,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Delete => "delete",
            Operation::Watch => "watch",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do when a single call fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop the run and report the error, no timing is produced
    AbortOnError,
    /// Log the error, count it and carry on with the next iteration
    ContinueOnError,
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct BenchReport {
    pub operation: Operation,
    pub count: usize,
    pub failures: usize,
    pub elapsed: Duration,
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.elapsed.as_secs_f64();
        let summary = match self.operation {
            Operation::List => write!(f, "time to list namespaces {} times: {}s", self.count, secs),
            Operation::Create => write!(f, "time to create {} namespaces: {}s", self.count, secs),
            Operation::Delete => write!(f, "time to delete {} namespaces: {}s", self.count, secs),
            Operation::Watch => write!(f, "time to create {} watches: {}s", self.count, secs),
        };
        summary?;
        if self.failures > 0 {
            write!(f, " ({} failed)", self.failures)?;
        }
        Ok(())
    }
}
