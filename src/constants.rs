// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Name of the container running PostgreSQL inside instance pods
pub const POSTGRES_CONTAINER_NAME: &str = "postgres";

/// Namespace used when neither an override nor the kubeconfig context names one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Diagnostic exec settings
pub mod controldata {
    /// Command printing the PostgreSQL control file
    pub const COMMAND: &str = "pg_controldata";
    /// Hard upper bound for the exec call, in seconds
    pub const TIMEOUT_SECS: u64 = 10;
}

/// Environment variables read into the configuration source
pub mod env {
    pub const KUBECONFIG: &str = "CNPG_KUBECONFIG";
    pub const CONTEXT: &str = "CNPG_CONTEXT";
    pub const CLUSTER: &str = "CNPG_CLUSTER";
    pub const USER: &str = "CNPG_USER";
    pub const NAMESPACE: &str = "CNPG_NAMESPACE";
}

/// Separator written after every rendered document
pub const DOCUMENT_SEPARATOR: &str = "---";
