// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The connection context shared by every plugin command

use crate::config::ConfigSource;
use crate::controldata::get_pg_control_data;
use crate::error::{PluginError, Result};
use crate::kubernetes::exec::{KubeExecutor, PodRef};
use crate::kubernetes::scheme::Scheme;
use crate::kubernetes::{resolve_config, resolve_namespace, ResolvedNamespace, TypedClient};
use crate::types::Cluster;
use k8s_openapi::api::core::v1::Pod;
use kube::{config::Kubeconfig, Api, Client, Config as KConfig};
use tracing::{debug, info, instrument, warn};

/// Connection handle, exec handle and working namespace, built once per invocation
#[derive(Clone)]
pub struct ClientContext {
    client: TypedClient,
    exec: KubeExecutor,
    namespace: ResolvedNamespace,
}

impl ClientContext {
    /// Build the context from a configuration source. Nothing is returned unless every step succeeds.
    #[instrument(skip(source))]
    pub async fn setup(source: &ConfigSource) -> Result<Self> {
        let config = resolve_config(source).await?;
        Self::from_config(config, source)
    }

    /// Build the context from an already loaded kubeconfig
    pub async fn setup_with_kubeconfig(kubeconfig: Kubeconfig, source: &ConfigSource) -> Result<Self> {
        let config = crate::kubernetes::client::config_from_kubeconfig(kubeconfig, source).await?;
        Self::from_config(config, source)
    }

    fn from_config(config: KConfig, source: &ConfigSource) -> Result<Self> {
        let client = TypedClient::from_config(config.clone())?;
        let namespace = resolve_namespace(source, &config)?;
        let exec = KubeExecutor::new(client.client().clone());

        info!(
            "Client context ready: namespace={} explicit={}",
            namespace.name, namespace.explicit
        );
        Ok(Self {
            client,
            exec,
            namespace,
        })
    }

    /// Build a context around an existing client
    pub fn from_parts(client: Client, scheme: Scheme, namespace: ResolvedNamespace) -> Self {
        Self {
            exec: KubeExecutor::new(client.clone()),
            client: TypedClient::new(client, scheme),
            namespace,
        }
    }

    pub fn client(&self) -> &TypedClient {
        &self.client
    }

    pub fn executor(&self) -> &KubeExecutor {
        &self.exec
    }

    pub fn namespace(&self) -> &str {
        &self.namespace.name
    }

    pub fn namespace_explicit(&self) -> bool {
        self.namespace.explicit
    }

    /// Fetch the pod the operator reports as primary for a cluster in the working namespace
    #[instrument(skip(self))]
    pub async fn primary_pod(&self, cluster_name: &str) -> Result<Pod> {
        let clusters: Api<Cluster> = Api::namespaced(self.client.client().clone(), self.namespace());
        let cluster = clusters.get(cluster_name).await?;

        if !cluster.is_healthy() {
            warn!("Cluster {} is not in a healthy state", cluster_name);
        }
        let Some(primary) = cluster.current_primary() else {
            return Err(PluginError::NoPrimary(cluster_name.to_string()));
        };
        debug!("Cluster {} primary is {}", cluster_name, primary);

        let pods: Api<Pod> = Api::namespaced(self.client.client().clone(), self.namespace());
        Ok(pods.get(primary).await?)
    }

    /// Run `pg_controldata` in the postgres container of `pod`
    pub async fn pg_control_data(&self, pod: &Pod) -> Result<String> {
        get_pg_control_data(&self.exec, &PodRef::from_pod(pod, self.namespace())).await
    }
}
