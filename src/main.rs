// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Result};
use k8s_openapi::api::core::v1::Namespace;
use kube::api::ObjectMeta;
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cnpg_plugin::config::ConfigSource;
use cnpg_plugin::context::ClientContext;
use cnpg_plugin::materialize::{materialize, ManagedObject, MaterializeMode};

const USAGE: &str =
    "usage: kubectl-cnpg controldata <cluster> | create-namespace <name> [--dry-run]";

enum Command {
    ControlData { cluster: String },
    CreateNamespace { name: String, dry_run: bool },
}

impl Command {
    fn parse(args: &[String]) -> Result<Self> {
        match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
            ["controldata", cluster] => Ok(Command::ControlData {
                cluster: cluster.to_string(),
            }),
            ["create-namespace", name, rest @ ..] if rest.iter().all(|a| *a == "--dry-run") => {
                Ok(Command::CreateNamespace {
                    name: name.to_string(),
                    dry_run: !rest.is_empty(),
                })
            }
            _ => bail!(USAGE),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout carries manifests and command output
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let source = ConfigSource::from_env();
    let context = ClientContext::setup(&source).await?;
    info!(
        "Using namespace {} (explicit: {})",
        context.namespace(),
        context.namespace_explicit()
    );

    match command {
        Command::ControlData { cluster } => {
            let pod = context.primary_pod(&cluster).await?;
            let control_data = context.pg_control_data(&pod).await?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(control_data.as_bytes())?;
            stdout.flush()?;
        }
        Command::CreateNamespace { name, dry_run } => {
            let namespace = Namespace {
                metadata: ObjectMeta {
                    name: Some(name),
                    ..Default::default()
                },
                ..Default::default()
            };
            let objects = vec![ManagedObject::new(&namespace)?];
            let mut stdout = io::stdout();
            materialize(
                &context,
                &objects,
                MaterializeMode::from_dry_run(dry_run),
                &mut stdout,
            )
            .await?;
        }
    }

    Ok(())
}
