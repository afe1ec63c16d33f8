// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod bench;
pub mod config;
pub mod constants;
pub mod debug;
pub mod error;
pub mod kubernetes;
pub mod logging;

#[cfg(test)]
pub mod test_utils;
