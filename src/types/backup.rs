// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "postgresql.cnpg.io", version = "v1", kind = "Backup")]
#[kube(namespaced)]
#[kube(status = "BackupStatus")]
#[serde(rename_all = "camelCase")]
pub struct BackupSpec {
    pub cluster: LocalObjectReference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
pub struct LocalObjectReference {
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackupStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::api::ObjectMeta;

    fn make_backup(phase: Option<&str>) -> Backup {
        Backup {
            metadata: ObjectMeta {
                name: Some("pg-main-nightly".to_string()),
                ..Default::default()
            },
            spec: BackupSpec {
                cluster: LocalObjectReference {
                    name: "pg-main".to_string(),
                },
                method: Some("volumeSnapshot".to_string()),
            },
            status: phase.map(|p| BackupStatus {
                phase: Some(p.to_string()),
                error: None,
            }),
        }
    }

    #[test]
    fn test_backup_serializes_cluster_reference() {
        let value = serde_json::to_value(make_backup(None)).unwrap();

        assert_eq!(value["kind"], "Backup");
        assert_eq!(value["spec"]["cluster"]["name"], "pg-main");
        assert_eq!(value["spec"]["method"], "volumeSnapshot");
        assert!(value.get("status").is_none() || value["status"].is_null());
    }

    #[test]
    fn test_backup_status_reads_phase() {
        let backup: Backup = serde_json::from_value(serde_json::json!({
            "apiVersion": "postgresql.cnpg.io/v1",
            "kind": "Backup",
            "metadata": {"name": "pg-main-nightly"},
            "spec": {"cluster": {"name": "pg-main"}},
            "status": {"phase": "completed"}
        }))
        .unwrap();

        assert_eq!(
            backup.status.and_then(|s| s.phase).as_deref(),
            Some("completed")
        );
        assert_eq!(make_backup(Some("running")).spec.cluster.name, "pg-main");
    }
}
