// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{
    env as vars,
    watch::{DEFAULT_RESYNC_SECS, MAX_RESYNC_SECS},
};
use crate::kubernetes::ClusterConfig;
use anyhow::{ensure, Context, Result};
use std::env;
use std::time::Duration;

/// Runner configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub cluster: ClusterConfig,
    pub master_host: String,
    pub resync_period: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let kubeconfig = lookup(vars::KUBECONFIG_FILE).unwrap_or_default();
        let master_host = lookup(vars::MASTER_HOST).unwrap_or_default();
        let resync_secs = match lookup(vars::NAMESPACE_RESYNC_SECS) {
            Some(raw) => raw.trim().parse::<u64>().with_context(|| {
                format!("{} must be a number of seconds, got {:?}", vars::NAMESPACE_RESYNC_SECS, raw)
            })?,
            None => DEFAULT_RESYNC_SECS,
        };
        ensure!(
            resync_secs <= MAX_RESYNC_SECS,
            "{} must be at most {} seconds, got {}",
            vars::NAMESPACE_RESYNC_SECS,
            MAX_RESYNC_SECS,
            resync_secs
        );

        Ok(Config {
            cluster: ClusterConfig::from_path(kubeconfig.trim()),
            master_host,
            resync_period: Duration::from_secs(resync_secs),
        })
    }
}
