//! Kubernetes-backed cluster source
//!
//! Lists pods from the core API and usage samples from metrics.k8s.io.

use crate::metrics::PodMetrics;
use anyhow::{Context, Result};
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, ListParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Client;
use std::path::Path;
use tracing::debug;
use waste_lib::{
    source::async_trait, ClusterSource, ContainerRequests, PodRecord, ResourceRequestSet,
    UsageIndex,
};

/// Cluster source talking to a Kubernetes API server
pub struct KubeSource {
    client: Client,
}

impl KubeSource {
    /// Connect using the given kubeconfig file and context.
    ///
    /// With neither set, the configuration is inferred (in-cluster service
    /// account, then `KUBECONFIG` / `~/.kube/config`).
    pub async fn connect(kubeconfig: Option<&Path>, context: Option<&str>) -> Result<Self> {
        let config = match (kubeconfig, context) {
            (None, None) => kube::Config::infer()
                .await
                .context("Failed to infer Kubernetes configuration")?,
            (path, context) => {
                let options = KubeConfigOptions {
                    context: context.map(str::to_string),
                    ..Default::default()
                };
                match path {
                    Some(path) => {
                        let kubeconfig = Kubeconfig::read_from(path).with_context(|| {
                            format!("Failed to read kubeconfig {}", path.display())
                        })?;
                        kube::Config::from_custom_kubeconfig(kubeconfig, &options)
                            .await
                            .context("Failed to load kubeconfig")?
                    }
                    None => kube::Config::from_kubeconfig(&options)
                        .await
                        .context("Failed to load kubeconfig")?,
                }
            }
        };

        debug!(cluster_url = %config.cluster_url, "Connecting to cluster");
        let client = Client::try_from(config).context("Failed to create Kubernetes client")?;

        Ok(Self { client })
    }

    fn api<K>(&self, namespace: Option<&str>) -> Api<K>
    where
        K: kube::Resource<Scope = k8s_openapi::NamespaceResourceScope>,
        <K as kube::Resource>::DynamicType: Default,
    {
        match namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        }
    }
}

#[async_trait]
impl ClusterSource for KubeSource {
    async fn list_pods(&self, namespace: Option<&str>) -> Result<Vec<PodRecord>> {
        let pods = self
            .api::<Pod>(namespace)
            .list(&ListParams::default())
            .await
            .context("Failed to list pods")?;

        Ok(pods.items.into_iter().filter_map(pod_record).collect())
    }

    async fn usage_index(&self, namespace: Option<&str>) -> Result<UsageIndex> {
        let metrics = self
            .api::<PodMetrics>(namespace)
            .list(&ListParams::default())
            .await
            .context("Failed to list pod metrics (is metrics-server installed?)")?;

        Ok(usage_index(metrics.items))
    }
}

/// Extract name, phase and container requests from a pod.
///
/// Pods without a name are dropped; containers without requests get an
/// empty request set.
pub fn pod_record(pod: Pod) -> Option<PodRecord> {
    let name = pod.metadata.name?;
    let phase = pod.status.and_then(|status| status.phase);
    let containers = pod
        .spec
        .map(|spec| {
            spec.containers
                .into_iter()
                .map(|container| {
                    let requests: ResourceRequestSet = container
                        .resources
                        .and_then(|resources| resources.requests)
                        .map(|requests| {
                            requests
                                .into_iter()
                                .map(|(resource, quantity)| (resource, quantity.0))
                                .collect()
                        })
                        .unwrap_or_default();
                    ContainerRequests::new(container.name, requests)
                })
                .collect()
        })
        .unwrap_or_default();

    Some(PodRecord {
        name,
        phase,
        containers,
    })
}

/// Index pod metrics by pod name and container name
pub fn usage_index(metrics: impl IntoIterator<Item = PodMetrics>) -> UsageIndex {
    let mut index = UsageIndex::new();
    for pod in metrics {
        let Some(name) = pod.metadata.name else {
            continue;
        };
        for container in pod.containers {
            index.insert(name.clone(), container.name, container.usage);
        }
    }
    index
}
