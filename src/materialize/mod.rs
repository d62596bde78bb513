// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create objects in the cluster or render them as manifests.

pub mod object;
pub mod printer;

pub use object::ManagedObject;
pub use printer::{print, OutputFormat};

use crate::constants::DOCUMENT_SEPARATOR;
use crate::context::ClientContext;
use crate::error::{MaterializationFailure, PluginError, Result};
use std::io::Write;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterializeMode {
    /// Print manifests only, the cluster is never contacted
    Render,
    /// Create every object in the cluster
    Create,
}

impl MaterializeMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            MaterializeMode::Render
        } else {
            MaterializeMode::Create
        }
    }
}

/// Render or create `objects` in order, stopping at the first failure.
///
/// Objects already created before a failure are left in place.
pub async fn materialize<W: Write + ?Sized>(
    context: &ClientContext,
    objects: &[ManagedObject],
    mode: MaterializeMode,
    out: &mut W,
) -> Result<()> {
    match mode {
        MaterializeMode::Render => render_objects(objects, OutputFormat::Yaml, out),
        MaterializeMode::Create => create_objects(context, objects, out).await,
    }
}

/// Write every object as a document followed by a `---` separator line
pub fn render_objects<W: Write + ?Sized>(
    objects: &[ManagedObject],
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    for object in objects {
        print(object.as_dynamic(), format, out).map_err(|source| failed(object, source))?;
        writeln!(out, "{}", DOCUMENT_SEPARATOR).map_err(|e| failed(object, e.into()))?;
    }
    Ok(())
}

#[instrument(skip_all, fields(count = objects.len(), namespace = %context.namespace()))]
async fn create_objects<W: Write + ?Sized>(
    context: &ClientContext,
    objects: &[ManagedObject],
    out: &mut W,
) -> Result<()> {
    for object in objects {
        context
            .client()
            .create(object, context.namespace())
            .await
            .map_err(|source| failed(object, source))?;

        info!("Created {}", object.describe());
        writeln!(out, "{} created", object.describe())
            .map_err(|e| failed(object, e.into()))?;
    }
    Ok(())
}

fn failed(object: &ManagedObject, source: MaterializationFailure) -> PluginError {
    PluginError::Materialization {
        object: object.describe(),
        source,
    }
}
