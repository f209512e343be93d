// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::ResourceExt;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kubeutil::config::Config;
use kubeutil::KubeUtil;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config);

    let kube = KubeUtil::new(config.cluster.clone(), config.master_host.clone()).await?;
    info!("Connected to Kubernetes cluster");

    let namespaces = kube.list_namespaces().await?;
    info!("Found {} namespaces", namespaces.items.len());

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for shutdown signal: {}", e);
        }
        info!("Shutting down");
        shutdown.cancel();
    });

    kube.watch_namespaces(config.resync_period, &cancel, |ns| {
        info!("Namespace {} observed", ns.name_any());
        Ok::<(), std::convert::Infallible>(())
    })
    .await;

    Ok(())
}
