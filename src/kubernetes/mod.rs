// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for config resolution, the typed client, namespaces and pod exec.

pub mod client;
pub mod exec;
pub mod namespaces;
pub mod scheme;

pub use client::{resolve_config, TypedClient};
pub use exec::{ExecError, ExecOutput, ExecRequest, KubeExecutor, PodExecutor, PodRef};
pub use namespaces::{resolve_namespace, ResolvedNamespace};
pub use scheme::Scheme;
