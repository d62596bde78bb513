// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster configuration resolution and the scheme-bound client

use crate::config::ConfigSource;
use crate::error::{MaterializationFailure, PluginError, Result};
use crate::kubernetes::scheme::{describe_gvk, gvk_from_type_meta, Scheme};
use crate::materialize::ManagedObject;
use kube::{
    api::{DynamicObject, PostParams},
    config::{Kubeconfig, KubeconfigError},
    discovery::Scope,
    Api, Client, Config as KConfig,
};
use std::sync::Arc;
use std::{env, io};
use tracing::{debug, info, instrument};

const KUBECONFIG_ENV: &str = "KUBECONFIG";

/// Resolve a concrete connection configuration from the configuration source
#[instrument(skip(source))]
pub async fn resolve_config(source: &ConfigSource) -> Result<KConfig> {
    let kubeconfig = match &source.kubeconfig {
        Some(path) => {
            debug!("Reading kubeconfig from {}", path.display());
            Some(Kubeconfig::read_from(path).map_err(|e| {
                PluginError::ConfigResolution(format!(
                    "Failed to read kubeconfig {}: {}",
                    path.display(),
                    e
                ))
            })?)
        }
        None => match Kubeconfig::read() {
            Ok(kubeconfig) => Some(kubeconfig),
            Err(e) if is_missing_kubeconfig(&e) && !source.has_overrides() => {
                debug!("No kubeconfig available ({}), trying in-cluster config", e);
                None
            }
            Err(e) => {
                return Err(PluginError::ConfigResolution(format!(
                    "Failed to read kubeconfig {}: {}",
                    default_kubeconfig_location(),
                    e
                )))
            }
        },
    };

    match kubeconfig {
        Some(kubeconfig) => config_from_kubeconfig(kubeconfig, source).await,
        None => KConfig::incluster().map_err(|e| {
            PluginError::ConfigResolution(format!("Failed to load in-cluster config: {}", e))
        }),
    }
}

/// True when the default lookup failed only because no kubeconfig file exists
fn is_missing_kubeconfig(err: &KubeconfigError) -> bool {
    match err {
        KubeconfigError::FindPath => true,
        KubeconfigError::ReadConfig(source, _) => source.kind() == io::ErrorKind::NotFound,
        _ => false,
    }
}

fn default_kubeconfig_location() -> String {
    env::var(KUBECONFIG_ENV).unwrap_or_else(|_| "~/.kube/config".to_string())
}

/// Resolve a connection configuration from an already loaded kubeconfig
pub async fn config_from_kubeconfig(kubeconfig: Kubeconfig, source: &ConfigSource) -> Result<KConfig> {
    KConfig::from_custom_kubeconfig(kubeconfig, &source.kube_config_options())
        .await
        .map_err(|e| PluginError::ConfigResolution(format!("Failed to create config: {}", e)))
}

/// A Kubernetes client bound to the type registry used to address objects
#[derive(Clone)]
pub struct TypedClient {
    client: Client,
    scheme: Arc<Scheme>,
}

impl TypedClient {
    /// Compose the plugin scheme and construct the client from a resolved config
    #[instrument(skip(config), fields(cluster_url = %config.cluster_url))]
    pub fn from_config(config: KConfig) -> Result<Self> {
        let scheme = Scheme::plugin_default()
            .map_err(|e| PluginError::ClientConstruction(format!("Invalid scheme: {}", e)))?;
        let client = Client::try_from(config)
            .map_err(|e| PluginError::ClientConstruction(format!("Failed to create client: {}", e)))?;

        info!("Kubernetes client ready with {} registered kinds", scheme.len());
        Ok(Self::new(client, scheme))
    }

    pub fn new(client: Client, scheme: Scheme) -> Self {
        Self {
            client,
            scheme: Arc::new(scheme),
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Submit an object for creation, in its declared namespace or `default_namespace`
    #[instrument(skip(self, object), fields(object = %object.describe()))]
    pub async fn create(
        &self,
        object: &ManagedObject,
        default_namespace: &str,
    ) -> std::result::Result<DynamicObject, MaterializationFailure> {
        let gvk = gvk_from_type_meta(object.types());
        let Some(registration) = self.scheme.lookup(&gvk) else {
            return Err(MaterializationFailure::UnregisteredKind(describe_gvk(&gvk)));
        };

        let api: Api<DynamicObject> = match registration.scope {
            Scope::Namespaced => {
                let namespace = object.namespace().unwrap_or(default_namespace);
                Api::namespaced_with(self.client.clone(), namespace, &registration.resource)
            }
            Scope::Cluster => Api::all_with(self.client.clone(), &registration.resource),
        };

        let created = api.create(&PostParams::default(), object.as_dynamic()).await?;
        debug!("Created {}", object.describe());
        Ok(created)
    }
}
