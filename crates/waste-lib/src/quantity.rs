//! Kubernetes resource quantity parsing
//!
//! Normalizes the quantity strings found in pod specs and in the
//! metrics.k8s.io API into a fixed base unit per resource:
//! - CPU: millicores (`"250m"`, `"1.5"`, `"500000000n"`)
//! - Memory: mebibytes (`"512Mi"`, `"1Gi"`, `"1048576Ki"`)
//!
//! Memory parsing is deliberately strict: only binary-suffixed integer
//! mantissas are accepted.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Bytes in a kibibyte
const KIB: f64 = 1024.0;
/// Bytes in a mebibyte
const MIB: f64 = KIB * 1024.0;
/// Bytes in a gibibyte
const GIB: f64 = MIB * 1024.0;

static CPU_PATTERN: OnceLock<Regex> = OnceLock::new();
static MEMORY_PATTERN: OnceLock<Regex> = OnceLock::new();

fn cpu_pattern() -> &'static Regex {
    CPU_PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+(?:\.\d+)?)([mn]?)$").expect("CPU quantity pattern is valid")
    })
}

fn memory_pattern() -> &'static Regex {
    MEMORY_PATTERN
        .get_or_init(|| Regex::new(r"^(\d+)([KMG]i)$").expect("memory quantity pattern is valid"))
}

/// A quantity string that does not match its resource's grammar.
///
/// Displays as the offending text so it can be surfaced verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{text}")]
pub struct ParseError {
    text: String,
}

impl ParseError {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The text that failed to parse
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Parse a CPU quantity into millicores.
///
/// No suffix means whole cores, `m` is millicores and `n` is nanocores.
pub fn parse_cpu(text: &str) -> Result<f64, ParseError> {
    let caps = cpu_pattern()
        .captures(text)
        .ok_or_else(|| ParseError::new(text))?;

    let number: f64 = caps[1].parse().map_err(|_| ParseError::new(text))?;
    let divisor = match &caps[2] {
        "" => 1.0,
        "m" => 1_000.0,
        "n" => 1_000_000_000.0,
        _ => return Err(ParseError::new(text)),
    };

    Ok(number / divisor * 1_000.0)
}

/// Parse a memory quantity into mebibytes.
///
/// Accepts `Ki`, `Mi` and `Gi` suffixes on an integer mantissa only.
pub fn parse_memory(text: &str) -> Result<f64, ParseError> {
    let caps = memory_pattern()
        .captures(text)
        .ok_or_else(|| ParseError::new(text))?;

    let number: f64 = caps[1].parse().map_err(|_| ParseError::new(text))?;
    let multiplier = match &caps[2] {
        "Ki" => KIB,
        "Mi" => MIB,
        "Gi" => GIB,
        _ => return Err(ParseError::new(text)),
    };

    Ok(number * multiplier / MIB)
}
