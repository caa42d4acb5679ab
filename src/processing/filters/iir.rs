// src/processing/filters/iir.rs
//! IIR (Infinite Impulse Response) digital filters

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::{FilterKind, SampleFilter};
use crate::error::{FilterError, FilterResult};
use crate::history::{RingHistory, SampleHistory};
use crate::processing::design::{BiquadCoefficients, CoefficientSet};
use crate::utils::validation::check_length;

/// Filter coefficients for IIR filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IirCoefficients {
    /// Denominator coefficients, `pole[0]` divides every output
    pub pole: Vec<f32>,
    /// Numerator coefficients
    pub zero: Vec<f32>,
}

impl IirCoefficients {
    /// Build from pole and zero slices
    pub fn new(pole: &[f32], zero: &[f32]) -> Self {
        Self {
            pole: pole.to_vec(),
            zero: zero.to_vec(),
        }
    }
}

impl CoefficientSet for IirCoefficients {
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

impl From<BiquadCoefficients> for IirCoefficients {
    fn from(biquad: BiquadCoefficients) -> Self {
        Self::new(&biquad.pole, &biquad.zero)
    }
}

/// General-order pole/zero difference equation
///
/// ```text
/// y[n] = ( Σ zero[i]·x[n-i]  −  Σ_{i≥1} pole[i]·y[n-i] ) / pole[0]
/// ```
///
/// A `pole[0]` of exactly zero is accepted; every output computed while it
/// holds is NaN, and that NaN enters the output history like any other
/// sample. Through the feedback terms it keeps propagating until the filter
/// is [`reset`](IirFilter::reset), so a degenerate coefficient set stays
/// visible in the output stream instead of being masked.
#[derive(Debug, Clone)]
pub struct IirFilter<H = RingHistory> {
    coefficients: IirCoefficients,
    inputs: H,
    outputs: H,
}

impl IirFilter<RingHistory> {
    /// Create filter from coefficients; both histories start at zero
    pub fn new<C: CoefficientSet + ?Sized>(coefficients: &C) -> FilterResult<Self> {
        check_sizes(coefficients)?;

        let inputs = RingHistory::new(coefficients.zero().len())?;
        let outputs = RingHistory::new(coefficients.pole().len())?;
        Self::with_history(coefficients, inputs, outputs)
    }

    /// Create filter from raw pole and zero slices
    pub fn from_slices(pole: &[f32], zero: &[f32]) -> FilterResult<Self> {
        Self::new(&IirCoefficients::new(pole, zero))
    }
}

impl<H: SampleHistory> IirFilter<H> {
    /// Create filter on caller-supplied histories
    ///
    /// `inputs` must hold `num_zero` samples and `outputs` `num_pole` samples.
    pub fn with_history<C: CoefficientSet + ?Sized>(
        coefficients: &C,
        mut inputs: H,
        mut outputs: H,
    ) -> FilterResult<Self> {
        check_sizes(coefficients)?;
        check_length("input history", inputs.capacity(), coefficients.zero().len())?;
        check_length("output history", outputs.capacity(), coefficients.pole().len())?;

        inputs.fill(0.0);
        outputs.fill(0.0);

        debug!(
            num_pole = coefficients.pole().len(),
            num_zero = coefficients.zero().len(),
            "IIR filter initialized"
        );

        Ok(Self {
            coefficients: IirCoefficients::new(coefficients.pole(), coefficients.zero()),
            inputs,
            outputs,
        })
    }

    /// Process single sample
    pub fn handle(&mut self, input: f32) -> f32 {
        self.inputs.push(input);

        let output = match self.coefficients.pole.split_first() {
            Some((&lead, feedback)) if lead != 0.0 => {
                // outputs[0] is y[n-1], so feedback taps line up from lookback 0
                let acc = self.inputs.dot(&self.coefficients.zero) - self.outputs.dot(feedback);
                acc / lead
            }
            _ => f32::NAN,
        };

        self.outputs.push(output);
        output
    }

    /// Zero both histories, coefficients are kept
    pub fn reset(&mut self) {
        trace!("IIR filter reset");
        self.inputs.fill(0.0);
        self.outputs.fill(0.0);
    }

    /// Copy new coefficients in place
    ///
    /// Pole and zero counts must match the ones given at construction.
    pub fn set_coefficients<C: CoefficientSet + ?Sized>(&mut self, coefficients: &C) -> FilterResult<()> {
        check_length("pole", coefficients.pole().len(), self.num_pole())
            .and_then(|_| check_length("zero", coefficients.zero().len(), self.num_zero()))
            .map_err(|err| {
                warn!(error = %err, "rejected IIR coefficient change");
                err
            })?;

        self.coefficients.pole.copy_from_slice(coefficients.pole());
        self.coefficients.zero.copy_from_slice(coefficients.zero());
        trace!(lead_pole = self.coefficients.pole[0], "IIR coefficients replaced");
        Ok(())
    }

    /// Current coefficients
    pub fn coefficients(&self) -> &IirCoefficients {
        &self.coefficients
    }

    /// Number of pole coefficients
    pub fn num_pole(&self) -> usize {
        self.coefficients.pole.len()
    }

    /// Number of zero coefficients
    pub fn num_zero(&self) -> usize {
        self.coefficients.zero.len()
    }

    /// Most recent output, `0.0` before the first call
    pub fn output(&self) -> f32 {
        self.outputs.get(0)
    }
}

fn check_sizes<C: CoefficientSet + ?Sized>(coefficients: &C) -> FilterResult<()> {
    if coefficients.pole().is_empty() || coefficients.zero().is_empty() {
        warn!("rejected IIR filter without poles or zeros");
        return Err(FilterError::invalid(
            "coefficients",
            "IIR filter needs at least one pole and one zero",
        ));
    }
    Ok(())
}

impl<H: SampleHistory> SampleFilter for IirFilter<H> {
    type Sample = f32;
    type Output = f32;

    const KIND: FilterKind = FilterKind::Iir;

    fn handle(&mut self, input: f32) -> f32 {
        IirFilter::handle(self, input)
    }

    fn reset_state(&mut self) {
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::design::{lowpass_2nd, lpf_gain};

    #[test]
    fn test_first_order_recursion() {
        // y[n] = x[n] + 0.5·y[n-1]
        let mut filter = IirFilter::from_slices(&[1.0, -0.5], &[1.0]).unwrap();

        assert_eq!(filter.handle(1.0), 1.0);
        assert_eq!(filter.handle(0.0), 0.5);
        assert_eq!(filter.handle(0.0), 0.25);
        assert_eq!(filter.output(), 0.25);
    }

    #[test]
    fn test_leading_pole_normalizes() {
        let mut filter = IirFilter::from_slices(&[2.0], &[1.0, 1.0]).unwrap();
        assert_eq!(filter.handle(4.0), 2.0);
        assert_eq!(filter.handle(2.0), 3.0);
    }

    #[test]
    fn test_biquad_lowpass_settles_at_dc_gain() {
        let coeffs = lowpass_2nd(100.0, 0.707, 1000.0).unwrap();
        let mut filter = IirFilter::new(&coeffs).unwrap();

        let mut y = 0.0;
        for _ in 0..500 {
            y = filter.handle(1.0);
        }
        assert!((y - lpf_gain(&coeffs)).abs() < 1e-3);
    }

    #[test]
    fn test_zero_leading_pole_outputs_nan() {
        let mut filter = IirFilter::from_slices(&[0.0], &[1.0]).unwrap();
        for _ in 0..4 {
            assert!(filter.handle(1.0).is_nan());
        }

        // No feedback terms: correcting pole[0] recovers on the next sample
        filter.set_coefficients(&IirCoefficients::new(&[1.0], &[1.0])).unwrap();
        assert_eq!(filter.handle(3.0), 3.0);
    }

    #[test]
    fn test_nan_recirculates_until_reset() {
        let mut filter = IirFilter::from_slices(&[0.0, -0.5], &[1.0]).unwrap();
        assert!(filter.handle(1.0).is_nan());

        filter.set_coefficients(&IirCoefficients::new(&[1.0, -0.5], &[1.0])).unwrap();
        assert!(filter.handle(1.0).is_nan());

        filter.reset();
        assert_eq!(filter.handle(1.0), 1.0);
    }

    #[test]
    fn test_set_coefficients_length_mismatch() {
        let mut filter = IirFilter::from_slices(&[1.0, -0.5], &[1.0]).unwrap();
        let before = filter.coefficients().clone();

        assert!(filter.set_coefficients(&IirCoefficients::new(&[1.0], &[1.0])).is_err());
        assert!(filter.set_coefficients(&IirCoefficients::new(&[1.0, 0.0], &[1.0, 0.0])).is_err());
        assert!(filter.set_coefficients(&lowpass_2nd(10.0, 0.7, 100.0).unwrap()).is_err());
        assert_eq!(filter.coefficients(), &before);
    }

    #[test]
    fn test_set_coefficients_from_biquad() {
        let mut filter = IirFilter::new(&BiquadCoefficients::identity()).unwrap();
        let coeffs = lowpass_2nd(10.0, 0.7, 100.0).unwrap();

        filter.set_coefficients(&coeffs).unwrap();
        assert_eq!(filter.coefficients(), &IirCoefficients::from(coeffs));
    }

    #[test]
    fn test_reset_keeps_coefficients() {
        let mut filter = IirFilter::from_slices(&[1.0, -0.9], &[1.0]).unwrap();
        for _ in 0..10 {
            filter.handle(1.0);
        }

        filter.reset();
        assert_eq!(filter.output(), 0.0);
        assert_eq!(filter.coefficients().pole, vec![1.0, -0.9]);
        assert_eq!(filter.handle(1.0), 1.0);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(IirFilter::from_slices(&[], &[1.0]).is_err());
        assert!(IirFilter::from_slices(&[1.0], &[]).is_err());
    }
}
