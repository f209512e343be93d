// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret get, create and replace

use crate::error::{KubeutilError, Result};
use k8s_openapi::api::core::v1::Secret;
use kube::{api::PostParams, Api, Client};
use tracing::{debug, error, instrument};

/// Get a secret by name
#[instrument(skip(client))]
pub async fn get_secret(client: &Client, namespace: &str, name: &str) -> Result<Secret> {
    let secrets: Api<Secret> = Api::namespaced(client.clone(), namespace);

    secrets.get(name).await.map_err(|e| {
        error!("Error getting secret {}/{}: {}", namespace, name, e);
        e.into()
    })
}

/// Create a secret in the given namespace
#[instrument(skip(client, secret), fields(secret = secret.metadata.name.as_deref().unwrap_or_default()))]
pub async fn create_secret(client: &Client, namespace: &str, secret: &Secret) -> Result<()> {
    let secrets: Api<Secret> = Api::namespaced(client.clone(), namespace);

    if let Err(e) = secrets.create(&PostParams::default(), secret).await {
        error!("Error creating secret in namespace {}: {}", namespace, e);
        return Err(e.into());
    }

    debug!("Secret created in namespace {}", namespace);
    Ok(())
}

/// Replace a secret with the given object.
///
/// This is a full PUT: anything not present in `secret` is dropped on the server.
#[instrument(skip(client, secret), fields(secret = secret.metadata.name.as_deref().unwrap_or_default()))]
pub async fn update_secret(client: &Client, namespace: &str, secret: &Secret) -> Result<()> {
    let Some(name) = secret.metadata.name.as_deref() else {
        error!("Error updating secret in namespace {}: no name set", namespace);
        return Err(KubeutilError::MissingName("Secret"));
    };
    let secrets: Api<Secret> = Api::namespaced(client.clone(), namespace);

    if let Err(e) = secrets.replace(name, &PostParams::default(), secret).await {
        error!("Error updating secret {}/{}: {}", namespace, name, e);
        return Err(e.into());
    }

    debug!("Secret {}/{} replaced", namespace, name);
    Ok(())
}
