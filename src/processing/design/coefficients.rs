//! Coefficient synthesis for first-order sections and 2nd-order biquads
//!
//! The biquad formulas are the bilinear-transform "cookbook" forms with
//! `ω = 2π·fc/fs`. They are returned un-normalised: `pole[0]` is generally not
//! `1.0`, and [`crate::IirFilter`] divides by it on every sample.

use serde::{Deserialize, Serialize};

use crate::config::constants::{biquad, frequency::TWO_PI};
use crate::error::FilterResult;
use crate::utils::validation::{check_cutoff, check_open_range};

/// Zero (numerator) and pole (denominator) coefficients of a biquad
///
/// Plain value type: copied into filters and analyzers, never shared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiquadCoefficients {
    /// Numerator `b0, b1, b2`
    pub zero: [f32; biquad::TAPS],
    /// Denominator `a0, a1, a2`
    pub pole: [f32; biquad::TAPS],
}

impl BiquadCoefficients {
    /// Pass-through section (`H(z) = 1`)
    pub const fn identity() -> Self {
        Self {
            zero: [1.0, 0.0, 0.0],
            pole: [1.0, 0.0, 0.0],
        }
    }
}

/// Smoothing factor of an RC (low-pass) section: `1 / (1 + fs/(2π·fc))`
pub fn rc_alpha(fc: f32, fs: f32) -> FilterResult<f32> {
    check_cutoff(fc, fs)?;
    Ok(1.0 / (1.0 + fs / (TWO_PI * fc)))
}

/// Smoothing factor of a CR (high-pass) section: `RC / (1/fs + RC)`
pub fn cr_alpha(fc: f32, fs: f32) -> FilterResult<f32> {
    check_cutoff(fc, fs)?;
    let rc = 1.0 / (TWO_PI * fc);
    Ok(rc / (1.0 / fs + rc))
}

/// Shared `ω`, `sin ω`, `cos ω` for the biquad designs
fn angular(fc: f32, fs: f32) -> (f32, f32) {
    let omega = TWO_PI * (fc / fs);
    (omega.sin(), omega.cos())
}

/// 2nd-order low-pass
///
/// `zeta` scales `sin ω` directly (`α = sin ω · zeta`); it is a damping-style
/// shape parameter, not a classical Q.
pub fn lowpass_2nd(fc: f32, zeta: f32, fs: f32) -> FilterResult<BiquadCoefficients> {
    check_cutoff(fc, fs)?;

    let (sin_omega, cos_omega) = angular(fc, fs);
    let alpha = sin_omega * zeta;

    Ok(BiquadCoefficients {
        zero: [(1.0 - cos_omega) / 2.0, 1.0 - cos_omega, (1.0 - cos_omega) / 2.0],
        pole: [1.0 + alpha, -2.0 * cos_omega, 1.0 - alpha],
    })
}

/// 2nd-order high-pass, same parameterisation as [`lowpass_2nd`]
pub fn highpass_2nd(fc: f32, zeta: f32, fs: f32) -> FilterResult<BiquadCoefficients> {
    check_cutoff(fc, fs)?;

    let (sin_omega, cos_omega) = angular(fc, fs);
    let alpha = sin_omega * zeta;

    Ok(BiquadCoefficients {
        zero: [(1.0 + cos_omega) / 2.0, -(1.0 + cos_omega), (1.0 + cos_omega) / 2.0],
        pole: [1.0 + alpha, -2.0 * cos_omega, 1.0 - alpha],
    })
}

/// 2nd-order notch (band-stop) centred on `fc`
///
/// Zeros sit on the unit circle at `±ω`, poles at radius `r` on the same
/// angle. `r` closer to `1` gives a narrower notch.
pub fn notch_2nd(fc: f32, r: f32, fs: f32) -> FilterResult<BiquadCoefficients> {
    check_open_range("r", r, biquad::NOTCH_RADIUS_MIN, biquad::NOTCH_RADIUS_MAX)?;
    check_cutoff(fc, fs)?;

    let (_, cos_omega) = angular(fc, fs);

    Ok(BiquadCoefficients {
        zero: [1.0, -2.0 * cos_omega, 1.0],
        pole: [1.0, -2.0 * r * cos_omega, r * r],
    })
}
