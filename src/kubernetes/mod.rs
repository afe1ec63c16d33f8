// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client creation, rate limiting and the namespace calls under test.

pub mod client;
pub mod namespaces;
pub mod rate_limit;

pub use client::create_client;
pub use namespaces::{
    create_namespace, delete_namespace, list_namespaces, open_namespace_watch, NamespaceWatch,
};
pub use rate_limit::{RateLimitConfig, RateLimitLayer};
