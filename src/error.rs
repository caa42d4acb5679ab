// src/error.rs
//! Unified error handling for the filter engine
//!
//! Every fallible operation in the crate returns a [`FilterResult`]. Errors are
//! local and non-fatal: they are detected before any state is touched, so a
//! caller may retry with corrected parameters on the same instance.
//!
//! A zero leading pole in an IIR filter is deliberately *not* an error. It is
//! reported in-band as a NaN output sample (see [`crate::IirFilter`]).

use crate::processing::filters::FilterKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type shared by all filters, synthesizers and the configuration layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// Malformed construction or update argument
    #[error("invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        /// Name of the offending argument
        parameter: &'static str,
        /// Human readable explanation
        reason: String,
    },

    /// Operation invoked on a filter slot that never completed construction
    #[error("{filter} filter is not initialized")]
    Uninitialized {
        /// Kind of filter the slot was meant to hold
        filter: FilterKind,
    },
}

impl FilterError {
    /// Shorthand for [`FilterError::InvalidParameter`]
    pub fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        FilterError::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`FilterError::Uninitialized`]
    pub fn uninitialized(filter: FilterKind) -> Self {
        FilterError::Uninitialized { filter }
    }

    /// Status tag this error maps to
    pub fn status(&self) -> FilterStatus {
        FilterStatus::Error
    }

    /// Name of the rejected parameter, if any
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            FilterError::InvalidParameter { parameter, .. } => Some(parameter),
            FilterError::Uninitialized { .. } => None,
        }
    }
}

/// Result type alias for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

/// Coarse outcome of an operation: `Ok` or `Error`
///
/// Useful at FFI-like boundaries where only a status code is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterStatus {
    /// Operation completed
    Ok,
    /// Precondition violated, no state change performed
    Error,
}

impl FilterStatus {
    /// True for [`FilterStatus::Ok`]
    pub fn is_ok(self) -> bool {
        self == FilterStatus::Ok
    }
}

impl<T> From<&FilterResult<T>> for FilterStatus {
    fn from(result: &FilterResult<T>) -> Self {
        match result {
            Ok(_) => FilterStatus::Ok,
            Err(err) => err.status(),
        }
    }
}
