//! Per-cell failure kinds

use crate::quantity::ParseError;
use thiserror::Error;

/// Why one resource dimension of a row could not be computed.
///
/// The display text becomes the `fail:` marker in the report, so a parse
/// failure shows the raw quantity while a missing key shows the quoted key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimensionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("'{0}'")]
    MissingKey(String),

    #[error("zero request")]
    ZeroRequest,
}
