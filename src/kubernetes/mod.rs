// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation and core resource access.

pub mod client;
pub mod namespaces;
pub mod secrets;
pub mod service_accounts;

pub use client::{create_client, resolve_config, ClusterConfig};
pub use namespaces::list_namespaces;
pub use secrets::{create_secret, get_secret, update_secret};
pub use service_accounts::{get_service_account, update_service_account};
