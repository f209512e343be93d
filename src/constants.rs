// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Environment variables read by the runner
pub mod env {
    /// Path to a kubeconfig file; empty or unset means in-cluster credentials
    pub const KUBECONFIG_FILE: &str = "KUBECONFIG_FILE";
    pub const MASTER_HOST: &str = "MASTER_HOST";
    /// Namespace resync interval in seconds, 0 disables resync
    pub const NAMESPACE_RESYNC_SECS: &str = "NAMESPACE_RESYNC_SECS";
}

/// Namespace watch configuration
pub mod watch {
    pub const DEFAULT_RESYNC_SECS: u64 = 30;
    /// Longest accepted resync interval (one week)
    pub const MAX_RESYNC_SECS: u64 = 7 * 24 * 60 * 60;
    /// Events buffered between the watch task and the consumer
    pub const EVENT_BUFFER: usize = 256;
}
