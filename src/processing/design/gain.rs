//! Gain analysis and unity-gain normalisation
//!
//! Gains are evaluated straight from the coefficient sums:
//! DC gain at `z = 1` and Nyquist gain at `z = -1` (odd-index terms negated).

use super::coefficients::BiquadCoefficients;

/// Anything exposing pole/zero coefficient arrays
pub trait CoefficientSet {
    /// Denominator coefficients, `pole[0]` is the normalisation divisor
    fn pole(&self) -> &[f32];
    /// Numerator coefficients
    fn zero(&self) -> &[f32];
    /// Mutable numerator coefficients, used by normalisation
    fn zero_mut(&mut self) -> &mut [f32];
}

impl CoefficientSet for BiquadCoefficients {
    fn pole(&self) -> &[f32] {
        &self.pole
    }

    fn zero(&self) -> &[f32] {
        &self.zero
    }

    fn zero_mut(&mut self) -> &mut [f32] {
        &mut self.zero
    }
}

/// Point on the unit circle the transfer function is evaluated at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Evaluation {
    /// `z = 1`
    Dc,
    /// `z = -1`
    Nyquist,
}

impl Evaluation {
    fn sign(self, index: usize) -> f32 {
        match self {
            Evaluation::Dc => 1.0,
            Evaluation::Nyquist if index % 2 == 1 => -1.0,
            Evaluation::Nyquist => 1.0,
        }
    }
}

fn gain_at<C: CoefficientSet + ?Sized>(coeffs: &C, at: Evaluation) -> f32 {
    let pole = coeffs.pole();
    let lead = match pole.first() {
        Some(&lead) if lead != 0.0 => lead,
        _ => return f32::NAN,
    };

    let pole_sum: f32 = pole
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, &p)| at.sign(i) * p)
        .sum();
    let zero_sum: f32 = coeffs
        .zero()
        .iter()
        .enumerate()
        .map(|(i, &z)| at.sign(i) * z)
        .sum();

    let denominator = pole_sum / lead + 1.0;
    if denominator == 0.0 {
        return f32::NAN;
    }

    zero_sum / denominator / lead
}

/// DC gain; NaN when `pole[0] == 0` or the denominator vanishes
pub fn lpf_gain<C: CoefficientSet + ?Sized>(coeffs: &C) -> f32 {
    gain_at(coeffs, Evaluation::Dc)
}

/// Nyquist-frequency gain; NaN when `pole[0] == 0` or the denominator vanishes
pub fn hpf_gain<C: CoefficientSet + ?Sized>(coeffs: &C) -> f32 {
    gain_at(coeffs, Evaluation::Nyquist)
}

fn normalize<C: CoefficientSet + ?Sized>(coeffs: &mut C, gain: f32) -> f32 {
    // NaN fails this comparison as well
    if gain > 0.0 {
        coeffs.zero_mut().iter_mut().for_each(|z| *z /= gain);
    }
    gain
}

/// Scale the zeros so the DC gain becomes 1
///
/// Poles are untouched. A gain that is `<= 0` or NaN leaves the coefficients
/// unchanged; the measured gain is returned so callers can detect that case.
pub fn normalize_to_unity_gain_lpf<C: CoefficientSet + ?Sized>(coeffs: &mut C) -> f32 {
    let gain = lpf_gain(coeffs);
    normalize(coeffs, gain)
}

/// Scale the zeros so the Nyquist-frequency gain becomes 1
///
/// Same no-op rules as [`normalize_to_unity_gain_lpf`].
pub fn normalize_to_unity_gain_hpf<C: CoefficientSet + ?Sized>(coeffs: &mut C) -> f32 {
    let gain = hpf_gain(coeffs);
    normalize(coeffs, gain)
}
