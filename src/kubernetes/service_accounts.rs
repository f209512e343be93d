// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Service account get and replace

use crate::error::{KubeutilError, Result};
use k8s_openapi::api::core::v1::ServiceAccount;
use kube::{api::PostParams, Api, Client};
use tracing::{debug, error, instrument};

/// Get a service account by name
#[instrument(skip(client))]
pub async fn get_service_account(
    client: &Client,
    namespace: &str,
    name: &str,
) -> Result<ServiceAccount> {
    let accounts: Api<ServiceAccount> = Api::namespaced(client.clone(), namespace);

    accounts.get(name).await.map_err(|e| {
        error!("Error getting service account {}/{}: {}", namespace, name, e);
        e.into()
    })
}

/// Replace a service account with the given object
#[instrument(skip(client, account), fields(account = account.metadata.name.as_deref().unwrap_or_default()))]
pub async fn update_service_account(
    client: &Client,
    namespace: &str,
    account: &ServiceAccount,
) -> Result<()> {
    let Some(name) = account.metadata.name.as_deref() else {
        error!("Error updating service account in namespace {}: no name set", namespace);
        return Err(KubeutilError::MissingName("ServiceAccount"));
    };
    let accounts: Api<ServiceAccount> = Api::namespaced(client.clone(), namespace);

    if let Err(e) = accounts.replace(name, &PostParams::default(), account).await {
        error!("Error updating service account {}/{}: {}", namespace, name, e);
        return Err(e.into());
    }

    debug!("Service account {}/{} replaced", namespace, name);
    Ok(())
}
