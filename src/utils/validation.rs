//! Parameter checks shared by constructors and coefficient setters
//!
//! Every check runs before any state is touched, which is what makes failed
//! operations side-effect free.

use crate::config::constants::frequency::NYQUIST_FRACTION;
use crate::error::{FilterError, FilterResult};

/// Sample rate must be finite and strictly positive
pub fn check_sample_rate(fs: f32) -> FilterResult<()> {
    if fs.is_finite() && fs > 0.0 {
        Ok(())
    } else {
        Err(FilterError::invalid(
            "fs",
            format!("sample rate must be positive and finite, got {}", fs),
        ))
    }
}

/// Cutoff must be positive and strictly below the Nyquist frequency of `fs`
pub fn check_cutoff(fc: f32, fs: f32) -> FilterResult<()> {
    check_sample_rate(fs)?;

    let nyquist = fs * NYQUIST_FRACTION;
    if !fc.is_finite() || fc <= 0.0 {
        return Err(FilterError::invalid(
            "fc",
            format!("cutoff must be positive and finite, got {}", fc),
        ));
    }
    if fc >= nyquist {
        return Err(FilterError::invalid(
            "fc",
            format!("cutoff {} Hz violates Nyquist limit {} Hz", fc, nyquist),
        ));
    }
    Ok(())
}

/// `value` must lie in the open interval `(min, max)`
pub fn check_open_range(parameter: &'static str, value: f32, min: f32, max: f32) -> FilterResult<()> {
    if value > min && value < max {
        Ok(())
    } else {
        Err(FilterError::invalid(
            parameter,
            format!("{} is outside ({}, {})", value, min, max),
        ))
    }
}

/// Count must lie in `[min, max]`
pub fn check_count(parameter: &'static str, value: usize, min: usize, max: usize) -> FilterResult<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(FilterError::invalid(
            parameter,
            format!("{} is outside [{}, {}]", value, min, max),
        ))
    }
}

/// Replacement arrays must match the size allocated at construction
pub fn check_length(parameter: &'static str, actual: usize, expected: usize) -> FilterResult<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(FilterError::invalid(
            parameter,
            format!("expected {} values, got {}", expected, actual),
        ))
    }
}
