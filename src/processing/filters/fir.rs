// src/processing/filters/fir.rs
//! FIR (Finite Impulse Response) digital filters

use tracing::{debug, trace, warn};

use super::{FilterKind, SampleFilter};
use crate::error::{FilterError, FilterResult};
use crate::history::{RingHistory, SampleHistory};
use crate::utils::validation::check_length;

/// Direct-form convolution over a sliding window of the last `order` inputs
///
/// `out = Σ a[i]·x[i]` with `x[0]` the sample just received, so `a[0]` weights
/// the current input and `a[order-1]` the oldest one retained.
#[derive(Debug, Clone)]
pub struct FirFilter<H = RingHistory> {
    coefficients: Vec<f32>,
    history: H,
    init_value: f32,
}

impl FirFilter<RingHistory> {
    /// Create FIR filter from coefficients, history pre-filled with `init_value`
    pub fn new(coefficients: &[f32], init_value: f32) -> FilterResult<Self> {
        if coefficients.is_empty() {
            warn!("rejected FIR filter without taps");
            return Err(FilterError::invalid("order", "FIR filter needs at least one tap"));
        }

        let history = RingHistory::with_value(coefficients.len(), init_value)?;
        Self::with_history(coefficients, history, init_value)
    }
}

impl<H: SampleHistory> FirFilter<H> {
    /// Create FIR filter on top of a caller-supplied history container
    ///
    /// The history capacity must equal the tap count; it is filled with
    /// `init_value`.
    pub fn with_history(coefficients: &[f32], mut history: H, init_value: f32) -> FilterResult<Self> {
        if coefficients.is_empty() {
            return Err(FilterError::invalid("order", "FIR filter needs at least one tap"));
        }
        check_length("history", history.capacity(), coefficients.len())?;

        history.fill(init_value);
        debug!(order = coefficients.len(), init_value, "FIR filter initialized");

        Ok(Self {
            coefficients: coefficients.to_vec(),
            history,
            init_value,
        })
    }

    /// Process single sample
    pub fn handle(&mut self, input: f32) -> f32 {
        self.history.push(input);
        self.history.dot(&self.coefficients)
    }

    /// Clear the history and refill it with `value`
    pub fn reset(&mut self, value: f32) {
        trace!(value, "FIR filter reset");
        self.history.reset();
        self.history.fill(value);
    }

    /// Replace the taps in place, history is left as is
    ///
    /// The new slice must have exactly `order()` values. Stale history mixed
    /// with new taps is accepted; call [`FirFilter::reset`] for a clean start.
    pub fn set_coefficients(&mut self, coefficients: &[f32]) -> FilterResult<()> {
        check_length("coefficients", coefficients.len(), self.coefficients.len()).map_err(|err| {
            warn!(error = %err, "rejected FIR coefficient change");
            err
        })?;

        self.coefficients.copy_from_slice(coefficients);
        trace!(order = self.coefficients.len(), "FIR coefficients replaced");
        Ok(())
    }

    /// Get coefficients
    pub fn coefficients(&self) -> &[f32] {
        &self.coefficients
    }

    /// Number of taps
    pub fn order(&self) -> usize {
        self.coefficients.len()
    }

    /// Input history, newest sample at lookback 0
    pub fn history(&self) -> &H {
        &self.history
    }
}

impl<H: SampleHistory> SampleFilter for FirFilter<H> {
    type Sample = f32;
    type Output = f32;

    const KIND: FilterKind = FilterKind::Fir;

    fn handle(&mut self, input: f32) -> f32 {
        FirFilter::handle(self, input)
    }

    fn reset_state(&mut self) {
        self.reset(self.init_value);
    }
}
