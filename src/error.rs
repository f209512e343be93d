// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KubeutilError {
    /// Errors from the Kubernetes API are passed through untouched.
    #[error(transparent)]
    Kube(#[from] kube::Error),

    #[error("Failed to load in-cluster config: {0}")]
    InClusterConfig(#[from] kube::config::InClusterError),

    #[error("Failed to read kubeconfig {path}: {source}")]
    KubeconfigRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse kubeconfig: {0}")]
    KubeconfigParse(String),

    #[error("Failed to create config: {0}")]
    ClientConfig(String),

    #[error("Failed to create client: {0}")]
    ClientBuild(String),

    #[error("{0} has no metadata.name")]
    MissingName(&'static str),
}

pub type Result<T> = std::result::Result<T, KubeutilError>;
