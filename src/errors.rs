//! Centralized error handling for axagg
//!
//! This module provides structured error types for the aggregation API,
//! enabling better error context and type safety than a generic
//! `Box<dyn Error>`.

use std::fmt;

/// Main error type for aggregation operations
#[derive(Debug)]
pub enum AggregatorError {
    /// A required aggregation parameter is missing or ill-typed
    InvalidParameter { name: String, message: String },

    /// Requested axis is outside the array's dimensionality
    UnsupportedAxis { axis: usize, ndim: usize },

    /// Lazy path requested for a statistic with no lazy kernel
    LazyUnsupported { name: String },

    /// Data and mask shapes disagree when building a masked array
    MaskMismatch {
        data_shape: Vec<usize>,
        mask_shape: Vec<usize>,
    },

    /// Array shape or dimension error
    ArrayError(ndarray::ShapeError),

    /// Thread pool configuration error
    ThreadPoolError(String),

    /// Generic error for backward compatibility
    Generic(String),
}

impl fmt::Display for AggregatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregatorError::InvalidParameter { name, message } => {
                write!(f, "Invalid parameter '{}': {}", name, message)
            }
            AggregatorError::UnsupportedAxis { axis, ndim } => {
                write!(
                    f,
                    "Axis {} is out of bounds for array with {} dimensions",
                    axis, ndim
                )
            }
            AggregatorError::LazyUnsupported { name } => {
                write!(f, "Aggregator '{}' does not support lazy aggregation", name)
            }
            AggregatorError::MaskMismatch {
                data_shape,
                mask_shape,
            } => {
                write!(
                    f,
                    "Mask shape {:?} does not match data shape {:?}",
                    mask_shape, data_shape
                )
            }
            AggregatorError::ArrayError(e) => write!(f, "Array error: {}", e),
            AggregatorError::ThreadPoolError(msg) => write!(f, "Thread pool error: {}", msg),
            AggregatorError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AggregatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AggregatorError::ArrayError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ndarray::ShapeError> for AggregatorError {
    fn from(error: ndarray::ShapeError) -> Self {
        AggregatorError::ArrayError(error)
    }
}

impl From<String> for AggregatorError {
    fn from(error: String) -> Self {
        AggregatorError::Generic(error)
    }
}

impl From<&str> for AggregatorError {
    fn from(error: &str) -> Self {
        AggregatorError::Generic(error.to_string())
    }
}

/// Result type alias for aggregation operations
pub type Result<T> = std::result::Result<T, AggregatorError>;
