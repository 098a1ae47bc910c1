//! Cluster data collection
//!
//! The report needs two independently fetched inputs: the pods with their
//! declared container requests, and the current usage samples. Both come
//! from a [`ClusterSource`], which lets the Kubernetes-backed collector be
//! swapped for fixtures in tests.

use crate::models::{PodRecord, UsageIndex};
use anyhow::Result;

pub use async_trait::async_trait;

/// Provider of the pod inventory and its usage samples
#[async_trait]
pub trait ClusterSource: Send + Sync {
    /// List pods, across all namespaces when `namespace` is `None`
    async fn list_pods(&self, namespace: Option<&str>) -> Result<Vec<PodRecord>>;

    /// Fetch current usage samples, across all namespaces when `namespace` is `None`
    async fn usage_index(&self, namespace: Option<&str>) -> Result<UsageIndex>;
}
