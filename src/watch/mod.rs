// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Change notifications for cluster resources.

pub mod namespaces;

pub use namespaces::{NamespaceEvent, NamespaceWatcher};
