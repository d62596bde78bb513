// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::env as vars;
use kube::config::KubeConfigOptions;
use std::env;
use std::path::PathBuf;

/// Where to find cluster access configuration, the equivalent of kubectl's config flags
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    /// Explicit kubeconfig file; the default lookup is used when unset
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    pub cluster: Option<String>,
    pub user: Option<String>,
    /// Namespace override; marks the resolved namespace as explicit
    pub namespace: Option<String>,
}

impl ConfigSource {
    /// Load the configuration source from environment variables
    pub fn from_env() -> Self {
        ConfigSource {
            kubeconfig: non_empty_var(vars::KUBECONFIG).map(PathBuf::from),
            context: non_empty_var(vars::CONTEXT),
            cluster: non_empty_var(vars::CLUSTER),
            user: non_empty_var(vars::USER),
            namespace: non_empty_var(vars::NAMESPACE),
        }
    }

    /// Whether any context, cluster or user override was requested
    pub fn has_overrides(&self) -> bool {
        self.context.is_some() || self.cluster.is_some() || self.user.is_some()
    }

    pub fn kube_config_options(&self) -> KubeConfigOptions {
        KubeConfigOptions {
            context: self.context.clone(),
            cluster: self.cluster.clone(),
            user: self.user.clone(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
