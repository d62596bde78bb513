// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Retrieval of PostgreSQL control data from instance pods

use crate::constants::{controldata, POSTGRES_CONTAINER_NAME};
use crate::error::{PluginError, Result};
use crate::kubernetes::exec::{ExecRequest, PodExecutor, PodRef};
use std::time::Duration;
use tracing::{debug, instrument};

/// The fixed `pg_controldata` request for a pod
pub fn pg_controldata_request(pod: &PodRef) -> ExecRequest {
    ExecRequest {
        pod: pod.clone(),
        container: POSTGRES_CONTAINER_NAME.to_string(),
        command: vec![controldata::COMMAND.to_string()],
        timeout: Duration::from_secs(controldata::TIMEOUT_SECS),
    }
}

/// Run `pg_controldata` in the pod and return its stdout untouched.
///
/// Any executor failure, including the timeout, discards whatever output was captured.
#[instrument(skip(executor, pod), fields(pod = %pod))]
pub async fn get_pg_control_data<E: PodExecutor>(executor: &E, pod: &PodRef) -> Result<String> {
    let request = pg_controldata_request(pod);

    let output = executor
        .exec(&request)
        .await
        .map_err(|source| PluginError::Execution {
            pod: pod.to_string(),
            source,
        })?;

    if !output.stderr.is_empty() {
        debug!("pg_controldata stderr: {}", output.stderr);
    }
    Ok(output.stdout)
}
