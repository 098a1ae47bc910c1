//! Point-in-time capture of the cluster inputs

use crate::models::{PodRecord, ReportRow, UsageIndex};
use crate::reconcile::reconcile;
use crate::source::ClusterSource;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// Pods and usage samples fetched together
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub namespace: Option<String>,
    pub taken_at: DateTime<Utc>,
    pub pods: Vec<PodRecord>,
    pub usage: UsageIndex,
}

impl Snapshot {
    /// Fetch both inputs concurrently. Any collector failure is fatal.
    pub async fn capture(source: &dyn ClusterSource, namespace: Option<&str>) -> Result<Self> {
        let taken_at = Utc::now();
        let (pods, usage) = tokio::try_join!(
            source.list_pods(namespace),
            source.usage_index(namespace)
        )?;

        info!(
            namespace = namespace.unwrap_or("<all>"),
            pods = pods.len(),
            sampled_pods = usage.pod_count(),
            "Captured cluster snapshot"
        );

        Ok(Self {
            namespace: namespace.map(str::to_string),
            taken_at,
            pods,
            usage,
        })
    }

    /// Report rows for the running containers of this snapshot
    pub fn rows(&self) -> impl Iterator<Item = ReportRow> + '_ {
        reconcile(&self.pods, &self.usage)
    }

    /// Materialize the full report
    pub fn report(&self) -> Report {
        Report {
            namespace: self.namespace.clone(),
            taken_at: self.taken_at,
            rows: self.rows().collect(),
        }
    }
}

/// Serializable form of a finished report
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub taken_at: DateTime<Utc>,
    pub rows: Vec<ReportRow>,
}
