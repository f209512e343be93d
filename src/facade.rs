// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed access to core cluster resources through a single client handle.

use crate::error::Result;
use crate::kubernetes::{self, ClusterConfig};
use crate::watch::NamespaceWatcher;
use futures::StreamExt;
use k8s_openapi::api::core::v1::{Namespace, Secret, ServiceAccount};
use kube::{api::ObjectList, Api, Client, ResourceExt};
use std::fmt::Display;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Client facade for namespaces, secrets and service accounts.
///
/// Every operation goes straight to the API server. Failures are logged and
/// returned as-is; nothing is retried or cached.
#[derive(Clone)]
pub struct KubeUtil {
    client: Client,
    master_host: String,
}

impl KubeUtil {
    /// Resolve credentials and build the client
    pub async fn new(cluster_config: ClusterConfig, master_host: impl Into<String>) -> Result<Self> {
        let client = kubernetes::create_client(&cluster_config).await?;
        Ok(Self::from_client(client, master_host))
    }

    pub fn from_client(client: Client, master_host: impl Into<String>) -> Self {
        Self {
            client,
            master_host: master_host.into(),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// The control endpoint host this facade was configured with
    pub fn master_host(&self) -> &str {
        &self.master_host
    }

    pub async fn list_namespaces(&self) -> Result<ObjectList<Namespace>> {
        kubernetes::list_namespaces(&self.client).await
    }

    pub async fn get_secret(&self, namespace: &str, name: &str) -> Result<Secret> {
        kubernetes::get_secret(&self.client, namespace, name).await
    }

    pub async fn create_secret(&self, namespace: &str, secret: &Secret) -> Result<()> {
        kubernetes::create_secret(&self.client, namespace, secret).await
    }

    /// Replace the secret wholesale; fetch it first to avoid clobbering concurrent changes
    pub async fn update_secret(&self, namespace: &str, secret: &Secret) -> Result<()> {
        kubernetes::update_secret(&self.client, namespace, secret).await
    }

    pub async fn get_service_account(&self, namespace: &str, name: &str) -> Result<ServiceAccount> {
        kubernetes::get_service_account(&self.client, namespace, name).await
    }

    /// Replace the service account wholesale
    pub async fn update_service_account(
        &self,
        namespace: &str,
        account: &ServiceAccount,
    ) -> Result<()> {
        kubernetes::update_service_account(&self.client, namespace, account).await
    }

    /// Stream add/update events for all namespaces, re-delivering the cached
    /// state every `resync` (zero disables resync)
    pub fn namespace_events(&self, resync: Duration, cancel: &CancellationToken) -> NamespaceWatcher {
        NamespaceWatcher::spawn(Api::all(self.client.clone()), resync, cancel)
    }

    /// Call `handler` for every namespace event until `cancel` fires.
    ///
    /// Handler errors are logged and the next event is delivered as usual.
    pub async fn watch_namespaces<F, E>(
        &self,
        resync: Duration,
        cancel: &CancellationToken,
        mut handler: F,
    ) where
        F: FnMut(&Namespace) -> std::result::Result<(), E>,
        E: Display,
    {
        let mut events = self.namespace_events(resync, cancel);

        while let Some(event) = events.next().await {
            if let Err(e) = handler(event.namespace()) {
                error!(
                    "Namespace handler failed for {}: {}",
                    event.namespace().name_any(),
                    e
                );
            }
        }

        info!("Namespace watch finished");
    }
}
