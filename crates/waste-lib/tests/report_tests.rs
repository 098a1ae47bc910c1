//! Integration tests for snapshot capture and report generation
//!
//! These tests use an in-memory cluster source so the full
//! capture-then-reconcile flow runs without a Kubernetes API server.

use anyhow::{bail, Result};
use waste_lib::{
    source::async_trait, ClusterSource, ContainerRequests, PodRecord, ResourceRequestSet,
    ResourceUsage, Snapshot, UsageIndex,
};

/// Fixture source returning canned pods and usage
struct StaticSource {
    pods: Vec<PodRecord>,
    usage: UsageIndex,
}

#[async_trait]
impl ClusterSource for StaticSource {
    async fn list_pods(&self, _namespace: Option<&str>) -> Result<Vec<PodRecord>> {
        Ok(self.pods.clone())
    }

    async fn usage_index(&self, _namespace: Option<&str>) -> Result<UsageIndex> {
        Ok(self.usage.clone())
    }
}

/// Source whose metrics endpoint is unavailable
struct NoMetricsSource;

#[async_trait]
impl ClusterSource for NoMetricsSource {
    async fn list_pods(&self, _namespace: Option<&str>) -> Result<Vec<PodRecord>> {
        Ok(vec![])
    }

    async fn usage_index(&self, _namespace: Option<&str>) -> Result<UsageIndex> {
        bail!("the server could not find the requested resource (metrics.k8s.io)")
    }
}

fn quantities(pairs: &[(&str, &str)]) -> ResourceRequestSet {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn pod(name: &str, phase: &str, containers: Vec<ContainerRequests>) -> PodRecord {
    PodRecord {
        name: name.to_string(),
        phase: Some(phase.to_string()),
        containers,
    }
}

fn cluster() -> StaticSource {
    let pods = vec![
        pod(
            "web-1",
            "Running",
            vec![
                ContainerRequests::new("app", quantities(&[("cpu", "500m"), ("memory", "256Mi")])),
                ContainerRequests::new("proxy", quantities(&[("cpu", "100m"), ("memory", "64Mi")])),
            ],
        ),
        pod(
            "migrate-abc",
            "Succeeded",
            vec![ContainerRequests::new("migrate", quantities(&[("cpu", "1")]))],
        ),
        pod(
            "db-0",
            "Running",
            vec![ContainerRequests::new("postgres", quantities(&[("cpu", "2"), ("memory", "4Gi")]))],
        ),
        pod(
            "cron-1",
            "Running",
            vec![ContainerRequests::new("job", quantities(&[("memory", "128Mi")]))],
        ),
    ];

    let mut usage = UsageIndex::new();
    usage.insert("web-1", "app", quantities(&[("cpu", "100m"), ("memory", "128Mi")]));
    usage.insert("web-1", "proxy", quantities(&[("cpu", "12345678n"), ("memory", "70000Ki")]));
    usage.insert("db-0", "postgres", quantities(&[("cpu", "1500m"), ("memory", "1Gi")]));
    usage.insert("gone-pod", "app", ResourceUsage::new());

    StaticSource { pods, usage }
}

#[tokio::test]
async fn test_full_report() {
    let source = cluster();
    let snapshot = Snapshot::capture(&source, None).await.unwrap();

    let rows: Vec<Vec<String>> = snapshot
        .rows()
        .map(|row| row.cells().iter().map(|c| c.to_string()).collect())
        .collect();

    assert_eq!(
        rows,
        vec![
            vec!["web-1", "app", "500m", "100m", "20.0%", "256Mi", "128Mi", "50.0%"],
            vec!["web-1", "proxy", "100m", "12m", "12.3%", "64Mi", "68Mi", "106.8%"],
            vec!["db-0", "postgres", "2000m", "1500m", "75.0%", "4096Mi", "1024Mi", "25.0%"],
            vec!["cron-1", "job", "-", "0", "fail:'cpu'", "128Mi", "0Mi", "0.0%"],
        ]
    );
}

#[tokio::test]
async fn test_capture_records_namespace() {
    let source = cluster();
    let snapshot = Snapshot::capture(&source, Some("team-a")).await.unwrap();

    assert_eq!(snapshot.namespace.as_deref(), Some("team-a"));
    assert_eq!(snapshot.pods.len(), 4);

    let report = snapshot.report();
    assert_eq!(report.namespace.as_deref(), Some("team-a"));
    assert_eq!(report.rows.len(), 4);
}

#[tokio::test]
async fn test_collector_failure_is_fatal() {
    let err = Snapshot::capture(&NoMetricsSource, None).await.unwrap_err();
    assert!(err.to_string().contains("metrics.k8s.io"));
}

#[test]
fn test_report_serializes_to_json() {
    let source = cluster();
    let snapshot = tokio_test::block_on(Snapshot::capture(&source, None)).unwrap();

    let json = serde_json::to_value(snapshot.report()).unwrap();
    assert!(json.get("namespace").is_none());
    assert!(json.get("taken_at").is_some());

    let first = &json["rows"][0];
    assert_eq!(first["pod"], "web-1");
    assert_eq!(first["container"], "app");
    assert_eq!(first["cpu"]["percentage"], "20.0%");
    assert_eq!(first["memory"]["request"], "256Mi");

    let failed = &json["rows"][3];
    assert_eq!(failed["cpu"]["percentage"], "fail:'cpu'");
}

#[tokio::test]
async fn test_empty_cluster() {
    let source = StaticSource {
        pods: vec![],
        usage: UsageIndex::new(),
    };
    let snapshot = Snapshot::capture(&source, None).await.unwrap();
    assert_eq!(snapshot.rows().count(), 0);
}
