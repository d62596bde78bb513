// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Type-erased objects handed to the materializer

use crate::error::{MaterializationFailure, PluginError, Result};
use kube::{
    core::{DynamicObject, TypeMeta},
    Resource, ResourceExt,
};
use serde::Serialize;

/// A resource identified in the cluster by namespace, kind and name
#[derive(Debug, Clone)]
pub struct ManagedObject {
    object: DynamicObject,
    types: TypeMeta,
}

impl ManagedObject {
    /// Erase a typed resource, keeping its apiVersion and kind
    pub fn new<K>(resource: &K) -> Result<Self>
    where
        K: Resource<DynamicType = ()> + Serialize,
    {
        let types = TypeMeta {
            api_version: K::api_version(&()).to_string(),
            kind: K::kind(&()).to_string(),
        };
        let describe = || {
            let name = resource.meta().name.clone().unwrap_or_default();
            format!("{}/{}", types.kind, name)
        };

        let mut object: DynamicObject = serde_json::to_value(resource)
            .and_then(serde_json::from_value)
            .map_err(|e| PluginError::Materialization {
                object: describe(),
                source: MaterializationFailure::Serialize(e.to_string()),
            })?;
        object.types = Some(types.clone());

        Ok(Self { object, types })
    }

    /// Wrap a dynamic object; it must carry apiVersion and kind
    pub fn from_dynamic(object: DynamicObject) -> Result<Self> {
        match object.types.clone() {
            Some(types) if !types.api_version.is_empty() && !types.kind.is_empty() => {
                Ok(Self { object, types })
            }
            _ => Err(PluginError::Materialization {
                object: object.name_any(),
                source: MaterializationFailure::MissingTypeMeta,
            }),
        }
    }

    pub fn types(&self) -> &TypeMeta {
        &self.types
    }

    pub fn kind(&self) -> &str {
        &self.types.kind
    }

    pub fn name(&self) -> String {
        self.object.name_any()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.object.metadata.namespace.as_deref()
    }

    pub fn as_dynamic(&self) -> &DynamicObject {
        &self.object
    }

    /// `Kind/name`, as printed in status lines and errors
    pub fn describe(&self) -> String {
        format!("{}/{}", self.kind(), self.name())
    }
}
