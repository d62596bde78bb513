// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Type registry mapping group/version/kind to the API resource used for requests

use crate::types::{Backup, Cluster, VolumeSnapshot};
use k8s_openapi::api::{
    apps::v1::Deployment,
    core::v1::{
        ConfigMap, Namespace, PersistentVolumeClaim, Pod, Secret, Service, ServiceAccount,
    },
    rbac::v1::{ClusterRole, ClusterRoleBinding, Role, RoleBinding},
};
use k8s_openapi::NamespaceResourceScope;
use kube::{
    core::{ApiResource, GroupVersionKind, TypeMeta},
    discovery::Scope,
    Resource,
};
use std::any::TypeId;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemeError {
    #[error("kind {0} is registered twice")]
    Duplicate(String),
}

/// A registered kind: how to address it and whether it lives in a namespace
#[derive(Debug, Clone)]
pub struct Registration {
    pub resource: ApiResource,
    pub scope: Scope,
}

#[derive(Debug, Clone, Default)]
pub struct Scheme {
    kinds: HashMap<GroupVersionKind, Registration>,
}

impl Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the scheme used by the plugin: built-in kinds, CloudNativePG kinds and volume snapshots
    pub fn plugin_default() -> Result<Self, SchemeError> {
        let mut scheme = Scheme::new();
        scheme.add_builtin()?;
        scheme.add_cnpg()?;
        scheme.add_volume_snapshot()?;
        Ok(scheme)
    }

    pub fn add_builtin(&mut self) -> Result<(), SchemeError> {
        self.add::<Namespace>()?;
        self.add::<ConfigMap>()?;
        self.add::<Secret>()?;
        self.add::<Service>()?;
        self.add::<ServiceAccount>()?;
        self.add::<Pod>()?;
        self.add::<PersistentVolumeClaim>()?;
        self.add::<Deployment>()?;
        self.add::<Role>()?;
        self.add::<RoleBinding>()?;
        self.add::<ClusterRole>()?;
        self.add::<ClusterRoleBinding>()
    }

    pub fn add_cnpg(&mut self) -> Result<(), SchemeError> {
        self.add::<Cluster>()?;
        self.add::<Backup>()
    }

    pub fn add_volume_snapshot(&mut self) -> Result<(), SchemeError> {
        self.add::<VolumeSnapshot>()
    }

    /// Register a statically typed resource
    pub fn add<K>(&mut self) -> Result<(), SchemeError>
    where
        K: Resource<DynamicType = ()>,
        K::Scope: 'static,
    {
        let resource = ApiResource::erase::<K>(&());
        let gvk = GroupVersionKind::gvk(&resource.group, &resource.version, &resource.kind);
        if self.kinds.contains_key(&gvk) {
            return Err(SchemeError::Duplicate(describe_gvk(&gvk)));
        }

        let scope = if TypeId::of::<K::Scope>() == TypeId::of::<NamespaceResourceScope>() {
            Scope::Namespaced
        } else {
            Scope::Cluster
        };

        self.kinds.insert(gvk, Registration { resource, scope });
        Ok(())
    }

    pub fn lookup(&self, gvk: &GroupVersionKind) -> Option<&Registration> {
        self.kinds.get(gvk)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// Split an object's apiVersion/kind into a group/version/kind triple
pub fn gvk_from_type_meta(types: &TypeMeta) -> GroupVersionKind {
    let (group, version) = match types.api_version.split_once('/') {
        Some((group, version)) => (group, version),
        None => ("", types.api_version.as_str()),
    };
    GroupVersionKind::gvk(group, version, &types.kind)
}

pub fn describe_gvk(gvk: &GroupVersionKind) -> String {
    if gvk.group.is_empty() {
        format!("{}/{}", gvk.version, gvk.kind)
    } else {
        format!("{}/{}/{}", gvk.group, gvk.version, gvk.kind)
    }
}
