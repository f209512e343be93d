// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod error;
pub mod facade;
pub mod kubernetes;
pub mod watch;

#[cfg(test)]
mod test_utils;

pub use error::{KubeutilError, Result};
pub use facade::KubeUtil;
pub use kubernetes::ClusterConfig;
pub use watch::{NamespaceEvent, NamespaceWatcher};
