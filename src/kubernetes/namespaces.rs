// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace lookups

use crate::error::Result;
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::{ListParams, ObjectList},
    Api, Client,
};
use tracing::{debug, error, instrument};

/// List all namespaces in the cluster
#[instrument(skip(client))]
pub async fn list_namespaces(client: &Client) -> Result<ObjectList<Namespace>> {
    let namespaces: Api<Namespace> = Api::all(client.clone());

    match namespaces.list(&ListParams::default()).await {
        Ok(list) => {
            debug!("Listed {} namespaces", list.items.len());
            Ok(list)
        }
        Err(e) => {
            error!("Error getting namespaces: {}", e);
            Err(e.into())
        }
    }
}
