// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::kubernetes::exec::ExecError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Failed to resolve cluster configuration: {0}")]
    ConfigResolution(String),

    #[error("Failed to construct Kubernetes client: {0}")]
    ClientConstruction(String),

    #[error("Failed to resolve namespace: {0}")]
    NamespaceResolution(String),

    #[error("Cluster {0} has no current primary")]
    NoPrimary(String),

    #[error("Kube error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Failed to materialize {object}: {source}")]
    Materialization {
        object: String,
        #[source]
        source: MaterializationFailure,
    },

    #[error("Failed to execute command in pod {pod}: {source}")]
    Execution {
        pod: String,
        #[source]
        source: ExecError,
    },
}

/// Cause of a failed render or create of a single object
#[derive(Error, Debug)]
pub enum MaterializationFailure {
    #[error("Kubernetes API error: {0}")]
    Api(#[from] kube::Error),

    #[error("kind {0} is not registered in the client scheme")]
    UnregisteredKind(String),

    #[error("object has no apiVersion/kind")]
    MissingTypeMeta,

    #[error("serialization failed: {0}")]
    Serialize(String),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PluginError>;
