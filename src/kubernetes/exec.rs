// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Command execution inside pod containers over the exec subresource

use k8s_openapi::api::core::v1::Pod;
use kube::{
    api::{Api, AttachParams},
    Client, ResourceExt,
};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("command did not finish within {0:?}")]
    Timeout(Duration),
    #[error("Kube error: {0}")]
    Kube(#[from] kube::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0} stream not available")]
    MissingStream(&'static str),
    #[error("command failed: {message}")]
    Failed { message: String, stderr: String },
}

/// A pod addressed by namespace and name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodRef {
    pub namespace: String,
    pub name: String,
}

impl PodRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Address a pod object, using `default_namespace` when it carries none
    pub fn from_pod(pod: &Pod, default_namespace: &str) -> Self {
        Self {
            namespace: pod
                .namespace()
                .unwrap_or_else(|| default_namespace.to_string()),
            name: pod.name_any(),
        }
    }
}

impl fmt::Display for PodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecRequest {
    pub pod: PodRef,
    pub container: String,
    pub command: Vec<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs a command inside a container and captures both output streams
pub trait PodExecutor {
    fn exec(
        &self,
        request: &ExecRequest,
    ) -> impl Future<Output = Result<ExecOutput, ExecError>> + Send;
}

/// Executor backed by the Kubernetes exec subresource
#[derive(Clone)]
pub struct KubeExecutor {
    client: Client,
}

impl KubeExecutor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn run(&self, request: &ExecRequest) -> Result<ExecOutput, ExecError> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), &request.pod.namespace);
        let params = AttachParams::default()
            .container(request.container.as_str())
            .stdin(false)
            .stdout(true)
            .stderr(true);

        let mut attached = pods
            .exec(&request.pod.name, request.command.clone(), &params)
            .await?;

        let stdout = attached.stdout().ok_or(ExecError::MissingStream("stdout"))?;
        let stderr = attached.stderr().ok_or(ExecError::MissingStream("stderr"))?;
        let status = attached
            .take_status()
            .ok_or(ExecError::MissingStream("status"))?;

        let (stdout, stderr) = futures::try_join!(read_stream(stdout), read_stream(stderr))?;
        let status = status.await;

        let succeeded = status
            .as_ref()
            .and_then(|s| s.status.as_deref())
            .is_some_and(|s| s == "Success");
        if !succeeded {
            let message = status
                .and_then(|s| s.message)
                .unwrap_or_else(|| "no status reported".to_string());
            return Err(ExecError::Failed { message, stderr });
        }

        attached
            .join()
            .await
            .map_err(|e| ExecError::Failed {
                message: e.to_string(),
                stderr: String::new(),
            })?;

        Ok(ExecOutput { stdout, stderr })
    }
}

impl PodExecutor for KubeExecutor {
    #[instrument(skip(self, request), fields(pod = %request.pod, container = %request.container))]
    async fn exec(&self, request: &ExecRequest) -> Result<ExecOutput, ExecError> {
        debug!("Running {:?}", request.command);
        tokio::time::timeout(request.timeout, self.run(request))
            .await
            .map_err(|_| ExecError::Timeout(request.timeout))?
    }
}

async fn read_stream(mut reader: impl AsyncRead + Unpin) -> Result<String, ExecError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    String::from_utf8(buf)
        .map_err(|e| ExecError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::StalledService;
    use kube::api::ObjectMeta;

    fn make_pod(namespace: Option<&str>) -> Pod {
        Pod {
            metadata: ObjectMeta {
                name: Some("pg-main-1".to_string()),
                namespace: namespace.map(str::to_string),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_pod_ref_uses_pod_namespace() {
        let pod_ref = PodRef::from_pod(&make_pod(Some("databases")), "default");
        assert_eq!(pod_ref, PodRef::new("databases", "pg-main-1"));
    }

    #[test]
    fn test_pod_ref_falls_back_to_default_namespace() {
        let pod_ref = PodRef::from_pod(&make_pod(None), "team-a");
        assert_eq!(pod_ref.namespace, "team-a");
        assert_eq!(pod_ref.to_string(), "team-a/pg-main-1");
    }

    #[tokio::test]
    async fn test_exec_times_out_when_api_server_stalls() {
        let executor = KubeExecutor::new(StalledService.into_client());
        let request = ExecRequest {
            pod: PodRef::new("databases", "pg-main-1"),
            container: "postgres".to_string(),
            command: vec!["pg_controldata".to_string()],
            timeout: Duration::from_millis(200),
        };

        let started = std::time::Instant::now();
        let result = executor.exec(&request).await;

        match result {
            Err(ExecError::Timeout(limit)) => assert_eq!(limit, Duration::from_millis(200)),
            other => panic!("expected a timeout, got {other:?}"),
        }
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_read_stream_keeps_bytes() {
        let text = "line one\n  line two  \n";
        let out = read_stream(text.as_bytes()).await.unwrap();
        assert_eq!(out, text);
    }

    #[tokio::test]
    async fn test_read_stream_rejects_invalid_utf8() {
        let bytes: &[u8] = &[0xff, 0xfe];
        assert!(matches!(
            read_stream(bytes).await,
            Err(ExecError::Io(_))
        ));
    }
}
