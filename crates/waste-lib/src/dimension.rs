//! Per-resource utilization formatting
//!
//! CPU and memory share the same shape: look up the request, parse request
//! and usage into the dimension's base unit, compute the utilization
//! percentage and render three display cells. Any failure on the way
//! degrades the three cells instead of the whole row.

use crate::error::DimensionError;
use crate::models::{ResourceRequestSet, ResourceUsage};
use crate::quantity::{parse_cpu, parse_memory, ParseError};
use serde::Serialize;
use std::fmt;

/// A tracked resource axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Normalized to millicores
    Cpu,
    /// Normalized to mebibytes
    Memory,
}

impl Dimension {
    /// Dimensions in report column order
    pub const ALL: [Dimension; 2] = [Dimension::Cpu, Dimension::Memory];

    /// Resource name used in requests and metrics
    pub fn key(self) -> &'static str {
        match self {
            Dimension::Cpu => "cpu",
            Dimension::Memory => "memory",
        }
    }

    /// Display suffix of the base unit
    pub fn unit(self) -> &'static str {
        match self {
            Dimension::Cpu => "m",
            Dimension::Memory => "Mi",
        }
    }

    /// Parse a raw quantity string into this dimension's base unit
    pub fn parse(self, text: &str) -> Result<ResourceQuantity, ParseError> {
        let value = match self {
            Dimension::Cpu => parse_cpu(text)?,
            Dimension::Memory => parse_memory(text)?,
        };
        Ok(ResourceQuantity::new(self, value))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// An amount of one resource in its base unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceQuantity {
    dimension: Dimension,
    value: f64,
}

impl ResourceQuantity {
    pub fn new(dimension: Dimension, value: f64) -> Self {
        Self { dimension, value }
    }

    pub fn zero(dimension: Dimension) -> Self {
        Self::new(dimension, 0.0)
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Value in millicores or mebibytes
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for ResourceQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}{}", self.value, self.dimension.unit())
    }
}

/// Requested vs used amount of one resource for one container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Utilization {
    pub requested: ResourceQuantity,
    pub used: ResourceQuantity,
    /// `100 * used / requested`
    pub percent: f64,
}

/// The request, usage and percentage cells of one dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionCells {
    pub request: String,
    pub usage: String,
    pub percentage: String,
}

impl DimensionCells {
    /// Whether the cells carry a `fail:` marker instead of a percentage
    pub fn is_failure(&self) -> bool {
        self.percentage.starts_with("fail:")
    }

    /// Best-effort raw values plus the failure reason
    fn degraded(
        dimension: Dimension,
        requested: &ResourceRequestSet,
        observed: Option<&ResourceUsage>,
        error: &DimensionError,
    ) -> Self {
        let key = dimension.key();
        let request = requested
            .get(key)
            .cloned()
            .unwrap_or_else(|| "-".to_string());
        let usage = match observed {
            Some(usage) => usage.get(key).cloned().unwrap_or_else(|| "-".to_string()),
            None => "0".to_string(),
        };

        Self {
            request,
            usage,
            percentage: format!("fail:{}", error),
        }
    }
}

impl From<Utilization> for DimensionCells {
    fn from(utilization: Utilization) -> Self {
        Self {
            request: utilization.requested.to_string(),
            usage: utilization.used.to_string(),
            percentage: format!("{:.1}%", utilization.percent),
        }
    }
}

/// Compute the utilization of one dimension.
///
/// A missing usage map, or a usage map without this dimension, counts as
/// zero usage. A missing or zero request is an error.
pub fn evaluate_dimension(
    dimension: Dimension,
    requested: &ResourceRequestSet,
    observed: Option<&ResourceUsage>,
) -> Result<Utilization, DimensionError> {
    let key = dimension.key();
    let raw_request = requested
        .get(key)
        .ok_or_else(|| DimensionError::MissingKey(key.to_string()))?;
    let requested = dimension.parse(raw_request)?;

    let used = match observed.and_then(|usage| usage.get(key)) {
        Some(raw_usage) => dimension.parse(raw_usage)?,
        None => ResourceQuantity::zero(dimension),
    };

    if requested.value() == 0.0 {
        return Err(DimensionError::ZeroRequest);
    }

    Ok(Utilization {
        requested,
        used,
        percent: 100.0 * used.value() / requested.value(),
    })
}

/// Render one dimension's cells, degrading them on any failure
pub fn format_dimension(
    dimension: Dimension,
    requested: &ResourceRequestSet,
    observed: Option<&ResourceUsage>,
) -> DimensionCells {
    match evaluate_dimension(dimension, requested, observed) {
        Ok(utilization) => utilization.into(),
        Err(error) => {
            tracing::debug!(dimension = %dimension, reason = %error, "Degraded resource cells");
            DimensionCells::degraded(dimension, requested, observed, &error)
        }
    }
}
