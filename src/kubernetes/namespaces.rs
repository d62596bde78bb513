// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Working namespace resolution

use crate::config::ConfigSource;
use crate::constants::DEFAULT_NAMESPACE;
use crate::error::{PluginError, Result};
use tracing::debug;

/// The namespace commands operate in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNamespace {
    pub name: String,
    /// True when the operator passed the namespace, false when it came from the context
    pub explicit: bool,
}

/// Resolve the working namespace: an explicit override wins over the context namespace
pub fn resolve_namespace(source: &ConfigSource, config: &kube::Config) -> Result<ResolvedNamespace> {
    let resolved = match source.namespace.as_deref() {
        Some(ns) if !ns.is_empty() => ResolvedNamespace {
            name: ns.to_string(),
            explicit: true,
        },
        _ if !config.default_namespace.is_empty() => ResolvedNamespace {
            name: config.default_namespace.clone(),
            explicit: false,
        },
        _ => ResolvedNamespace {
            name: DEFAULT_NAMESPACE.to_string(),
            explicit: false,
        },
    };

    validate_namespace_name(&resolved.name)?;
    debug!(
        "Resolved namespace {} (explicit: {})",
        resolved.name, resolved.explicit
    );
    Ok(resolved)
}

/// Namespace names must be RFC 1123 labels
fn validate_namespace_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= 63
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        && !name.starts_with('-')
        && !name.ends_with('-');

    if valid {
        Ok(())
    } else {
        Err(PluginError::NamespaceResolution(format!(
            "'{}' is not a valid namespace name",
            name
        )))
    }
}
