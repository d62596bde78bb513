// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resource types known to the plugin.

pub mod backup;
pub mod cluster;
pub mod volume_snapshot;

pub use backup::Backup;
pub use cluster::Cluster;
pub use volume_snapshot::VolumeSnapshot;
