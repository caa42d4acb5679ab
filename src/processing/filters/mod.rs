// src/processing/filters/mod.rs
//! Causal single-channel filters driven one sample at a time

pub mod boolean;
pub mod fir;
pub mod first_order;
pub mod iir;
pub mod slot;

pub use boolean::*;
pub use fir::*;
pub use first_order::*;
pub use iir::*;
pub use slot::*;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, FilterResult};

/// Filter families provided by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Cascaded first-order low-pass
    Rc,
    /// Cascaded first-order high-pass
    Cr,
    /// Finite impulse response
    Fir,
    /// Infinite impulse response
    Iir,
    /// Low-pass plus hysteretic comparator
    Boolean,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::Rc => write!(f, "RC"),
            FilterKind::Cr => write!(f, "CR"),
            FilterKind::Fir => write!(f, "FIR"),
            FilterKind::Iir => write!(f, "IIR"),
            FilterKind::Boolean => write!(f, "Boolean"),
        }
    }
}

/// Common per-sample interface
///
/// `handle` must be called once every `1/fs` seconds by the host; the filter
/// keeps no notion of time itself.
pub trait SampleFilter {
    /// Input sample type
    type Sample: Copy;
    /// Output sample type
    type Output: Copy;

    /// Filter family
    const KIND: FilterKind;

    /// Consume one input sample and produce one output sample
    fn handle(&mut self, input: Self::Sample) -> Self::Output;

    /// Return to the state right after construction, keeping coefficients
    fn reset_state(&mut self);

    /// Run `handle` over a block, writing into `output`
    fn process_block(
        &mut self,
        input: &[Self::Sample],
        output: &mut [Self::Output],
    ) -> FilterResult<()> {
        if input.len() != output.len() {
            return Err(FilterError::invalid(
                "output",
                format!(
                    "output block holds {} samples, input has {}",
                    output.len(),
                    input.len()
                ),
            ));
        }

        for (x, y) in input.iter().zip(output.iter_mut()) {
            *y = self.handle(*x);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(FilterKind::Rc.to_string(), "RC");
        assert_eq!(FilterKind::Boolean.to_string(), "Boolean");
    }

    #[test]
    fn test_process_block_matches_handle_loop() {
        let input = [1.0, 0.5, -0.25, 2.0, 0.0];

        let mut block = RcFilter::new(10.0, 100.0, 2, 0.0).unwrap();
        let mut output = [0.0; 5];
        block.process_block(&input, &mut output).unwrap();

        let mut single = RcFilter::new(10.0, 100.0, 2, 0.0).unwrap();
        for (x, y) in input.iter().zip(output.iter()) {
            assert_eq!(single.handle(*x), *y);
        }
    }

    #[test]
    fn test_process_block_length_mismatch() {
        let mut filter = FirFilter::new(&[0.5, 0.5], 0.0).unwrap();
        let mut output = [0.0; 2];
        let err = filter.process_block(&[1.0, 2.0, 3.0], &mut output).unwrap_err();
        assert_eq!(err.parameter(), Some("output"));
    }
}
