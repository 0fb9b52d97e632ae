//! Error type shared by table construction and evaluation.
use std::collections::TryReserveError;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type TableResult<V> = Result<V, TableError>;

/// Failures from building or evaluating a table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// Shape of the inputs does not describe a valid table or point.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// Breakpoints of a dimension are not finite and strictly increasing.
    #[error(
        "breakpoints of dimension {dim} must be finite and strictly increasing, with finite spacing"
    )]
    NonMonotonic { dim: usize },

    /// A coordinate fell outside its breakpoints while extrapolation was disabled.
    #[error("coordinate {value} is outside the breakpoints of dimension {dim}")]
    OutOfRange { dim: usize, value: f64 },

    /// Unrecognised interpolation or extrapolation method.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    /// Table storage could not be reserved.
    #[error("failed to allocate table storage")]
    AllocationFailure(#[from] TryReserveError),

    /// A sample in a batch failed; later samples were not evaluated.
    #[error("sample {index} failed: {source}")]
    Sample {
        index: usize,
        #[source]
        source: Box<TableError>,
    },
}

impl TableError {
    pub(crate) fn dimension(msg: impl Into<String>) -> Self {
        TableError::InvalidDimension(msg.into())
    }

    /// The error of the failing sample, unwrapping batch context.
    pub fn root(&self) -> &TableError {
        match self {
            TableError::Sample { source, .. } => source.root(),
            other => other,
        }
    }
}
