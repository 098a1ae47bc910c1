//! Request-vs-usage reconciliation for Kubernetes containers
//!
//! This crate provides the core of the waste report:
//! - Quantity parsing into millicores and mebibytes
//! - Per-resource utilization with per-cell failure handling
//! - Reconciliation of pod requests against metrics samples
//! - Snapshot capture from a pluggable cluster source

pub mod dimension;
pub mod error;
pub mod models;
pub mod quantity;
pub mod reconcile;
pub mod snapshot;
pub mod source;

pub use dimension::{
    evaluate_dimension, format_dimension, Dimension, DimensionCells, ResourceQuantity, Utilization,
};
pub use error::DimensionError;
pub use models::*;
pub use quantity::{parse_cpu, parse_memory, ParseError};
pub use reconcile::reconcile;
pub use snapshot::{Report, Snapshot};
pub use source::ClusterSource;
