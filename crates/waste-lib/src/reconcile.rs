//! Joining declared requests with sampled usage
//!
//! Produces one report row per container of every running pod, in the
//! order the pods and their containers were supplied.

use crate::dimension::{format_dimension, Dimension};
use crate::models::{ContainerRequests, PodRecord, ReportRow, UsageIndex};

/// Lazily reconcile pods against the usage index.
///
/// Pods not in the `Running` phase are skipped. Rows are never dropped
/// because of bad data; failures only degrade individual cells.
pub fn reconcile<'a>(
    pods: &'a [PodRecord],
    usage: &'a UsageIndex,
) -> impl Iterator<Item = ReportRow> + 'a {
    pods.iter()
        .filter(|pod| {
            if !pod.is_running() {
                tracing::trace!(pod = %pod.name, phase = ?pod.phase, "Skipping pod that is not running");
            }
            pod.is_running()
        })
        .flat_map(move |pod| {
            pod.containers
                .iter()
                .map(move |container| container_row(pod, container, usage))
        })
}

fn container_row(pod: &PodRecord, container: &ContainerRequests, usage: &UsageIndex) -> ReportRow {
    let _span = tracing::debug_span!("container", pod = %pod.name, container = %container.name)
        .entered();

    let observed = usage.get(&pod.name, &container.name);
    if observed.is_none() {
        tracing::debug!("No usage sample, treating usage as zero");
    }

    let [cpu, memory] =
        Dimension::ALL.map(|dimension| format_dimension(dimension, &container.requests, observed));

    ReportRow {
        pod: pod.name.clone(),
        container: container.name.clone(),
        cpu,
        memory,
    }
}
