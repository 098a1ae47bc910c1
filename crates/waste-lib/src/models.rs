//! Core data models for the waste report

use crate::dimension::DimensionCells;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Pod phase that qualifies a pod for the report
pub const RUNNING_PHASE: &str = "Running";

/// Report column headers, in row order
pub const REPORT_HEADERS: [&str; 8] = [
    "POD",
    "CONTAINER",
    "CPU_REQ",
    "CPU_USED",
    "CPU_PCT",
    "MEM_REQ",
    "MEM_USED",
    "MEM_PCT",
];

/// Declared resource requests of one container, keyed by resource name
pub type ResourceRequestSet = BTreeMap<String, String>;

/// Sampled resource usage of one container, keyed by resource name
pub type ResourceUsage = BTreeMap<String, String>;

/// A container and its declared requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerRequests {
    pub name: String,
    #[serde(default)]
    pub requests: ResourceRequestSet,
}

impl ContainerRequests {
    pub fn new(name: impl Into<String>, requests: ResourceRequestSet) -> Self {
        Self {
            name: name.into(),
            requests,
        }
    }
}

/// A pod as seen at snapshot time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodRecord {
    pub name: String,
    pub phase: Option<String>,
    /// Containers in declaration order
    pub containers: Vec<ContainerRequests>,
}

impl PodRecord {
    pub fn is_running(&self) -> bool {
        self.phase.as_deref() == Some(RUNNING_PHASE)
    }
}

/// Usage samples indexed by pod name, then container name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageIndex {
    pods: HashMap<String, HashMap<String, ResourceUsage>>,
}

impl UsageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the usage sample of one container, replacing any previous one
    pub fn insert(
        &mut self,
        pod: impl Into<String>,
        container: impl Into<String>,
        usage: ResourceUsage,
    ) {
        self.pods
            .entry(pod.into())
            .or_default()
            .insert(container.into(), usage);
    }

    /// Usage sample for a container, if the metrics pipeline reported one
    pub fn get(&self, pod: &str, container: &str) -> Option<&ResourceUsage> {
        self.pods.get(pod)?.get(container)
    }

    pub fn pod_count(&self) -> usize {
        self.pods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pods.is_empty()
    }
}

/// One line of the report: a container's CPU and memory utilization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub pod: String,
    pub container: String,
    pub cpu: DimensionCells,
    pub memory: DimensionCells,
}

impl ReportRow {
    /// Display cells in `REPORT_HEADERS` order
    pub fn cells(&self) -> [&str; 8] {
        [
            &self.pod,
            &self.container,
            &self.cpu.request,
            &self.cpu.usage,
            &self.cpu.percentage,
            &self.memory.request,
            &self.memory.usage,
            &self.memory.percentage,
        ]
    }
}
