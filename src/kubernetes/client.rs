// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client creation from in-cluster credentials or a kubeconfig file

use crate::error::{KubeutilError, Result};
use kube::{
    config::{KubeConfigOptions, Kubeconfig},
    Client, Config as KConfig,
};
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument};

/// Where cluster credentials come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterConfig {
    /// Service account credentials mounted into the pod we run in
    Ambient,
    /// A kubeconfig file; its current context is used
    Kubeconfig(PathBuf),
}

impl ClusterConfig {
    /// An empty path means we are running inside the cluster
    pub fn from_path(path: &str) -> Self {
        if path.is_empty() {
            ClusterConfig::Ambient
        } else {
            ClusterConfig::Kubeconfig(PathBuf::from(path))
        }
    }
}

/// Resolve client configuration, attempting exactly one credential source
pub async fn resolve_config(cluster_config: &ClusterConfig) -> Result<KConfig> {
    match cluster_config {
        ClusterConfig::Ambient => {
            info!("Using in-cluster Kubernetes config");
            Ok(KConfig::incluster()?)
        }
        ClusterConfig::Kubeconfig(path) => {
            info!(
                "Using out-of-cluster Kubernetes config with kubeconfig file: {}",
                path.display()
            );
            config_from_kubeconfig_file(path).await.inspect_err(|e| {
                error!("Got error trying to create client config: {}", e);
            })
        }
    }
}

/// Create a Kubernetes client for the given credential source
#[instrument]
pub async fn create_client(cluster_config: &ClusterConfig) -> Result<Client> {
    let config = resolve_config(cluster_config).await?;
    client_from_config(config)
}

fn client_from_config(config: KConfig) -> Result<Client> {
    Client::try_from(config)
        .map_err(|e| KubeutilError::ClientBuild(e.to_string()))
        .inspect_err(|e| error!("Got error trying to create client: {}", e))
}

async fn config_from_kubeconfig_file(path: &Path) -> Result<KConfig> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| KubeutilError::KubeconfigRead {
            path: path.display().to_string(),
            source,
        })?;

    let kubeconfig: Kubeconfig = serde_yaml::from_str(&raw)
        .map_err(|e| KubeutilError::KubeconfigParse(e.to_string()))?;

    KConfig::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| KubeutilError::ClientConfig(e.to_string()))
}
