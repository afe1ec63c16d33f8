// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Prefix for the namespaces created and deleted by the benchmark (`ns0`, `ns1`, ...)
pub const NAMESPACE_PREFIX: &str = "ns";

/// Fixed address of the diagnostic HTTP listener
pub const DEBUG_LISTEN_ADDR: &str = "localhost:6060";

/// Command-line defaults
pub mod defaults {
    /// Steady-state client-side request rate
    pub const QPS: i32 = 20;
    /// Burst allowance on top of the steady-state rate
    pub const BURST: i32 = 20;
    /// Repetitions of the selected operation
    pub const COUNT: usize = 100;
}

/// Limiter values used when QPS or burst is given as zero
pub mod rate_limit {
    pub const QPS: f32 = 5.0;
    pub const BURST: i32 = 10;
}
