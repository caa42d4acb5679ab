//! Common utility functions for the filter engine
//!
//! Parameter checks shared by the constructors and the coefficient
//! synthesizers. Bounds live in [`crate::config::constants`].

pub mod validation;

pub use validation::{check_count, check_cutoff, check_length, check_open_range, check_sample_rate};
