// src/processing/filters/boolean.rs
//! Debounce filter for binary signals
//!
//! The input is mapped to `1.0`/`0.0`, smoothed by a single RC section, then
//! fed to a schmitt-trigger comparator. The output only rises once the
//! smoothed level reaches `1 - comp_lvl` and only falls once it drops to
//! `comp_lvl`; anything in between holds the previous output.

use tracing::{debug, trace, warn};

use super::{FilterKind, RcFilter, SampleFilter};
use crate::config::constants::threshold::{
    COMP_LVL_MAX, COMP_LVL_MIN, HIGH_LEVEL, LOWPASS_ORDER, LOW_LEVEL,
};
use crate::error::FilterResult;
use crate::utils::validation::check_open_range;

/// Low-pass plus hysteretic comparator
#[derive(Debug, Clone)]
pub struct BoolFilter {
    lowpass: RcFilter,
    comp_lvl: f32,
    output: bool,
}

impl BoolFilter {
    /// Create a debounce filter
    ///
    /// `comp_lvl` sets the half-width of the dead band around the switching
    /// levels and must lie in `(0, 0.4)`.
    pub fn new(fc: f32, fs: f32, comp_lvl: f32) -> FilterResult<Self> {
        let lowpass = check_open_range("comp_lvl", comp_lvl, COMP_LVL_MIN, COMP_LVL_MAX)
            .and_then(|_| RcFilter::new(fc, fs, LOWPASS_ORDER, LOW_LEVEL))
            .map_err(|err| {
                warn!(fc, fs, comp_lvl, error = %err, "rejected boolean filter parameters");
                err
            })?;

        debug!(fc, fs, comp_lvl, "boolean filter initialized");

        Ok(Self {
            lowpass,
            comp_lvl,
            output: false,
        })
    }

    /// Filter one binary sample
    pub fn handle(&mut self, input: bool) -> bool {
        let level = self
            .lowpass
            .handle(if input { HIGH_LEVEL } else { LOW_LEVEL });

        if !self.output && level >= HIGH_LEVEL - self.comp_lvl {
            self.output = true;
        } else if self.output && level <= LOW_LEVEL + self.comp_lvl {
            self.output = false;
        }
        self.output
    }

    /// Drain the low-pass and drop the output to `false`
    pub fn reset(&mut self) {
        trace!("boolean filter reset");
        self.lowpass.reset(LOW_LEVEL);
        self.output = false;
    }

    /// Change the low-pass cutoff, see [`RcFilter::set_cutoff`]
    pub fn set_cutoff(&mut self, fc: f32) -> FilterResult<()> {
        self.lowpass.set_cutoff(fc)
    }

    /// Low-pass cutoff in Hz
    pub fn cutoff(&self) -> f32 {
        self.lowpass.cutoff()
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> f32 {
        self.lowpass.sample_rate()
    }

    /// Comparator dead-band half-width
    pub fn comp_lvl(&self) -> f32 {
        self.comp_lvl
    }

    /// Current comparator state
    pub fn output(&self) -> bool {
        self.output
    }

    /// Smoothed level the comparator last saw
    pub fn level(&self) -> f32 {
        self.lowpass.output()
    }
}

impl SampleFilter for BoolFilter {
    type Sample = bool;
    type Output = bool;

    const KIND: FilterKind = FilterKind::Boolean;

    fn handle(&mut self, input: bool) -> bool {
        BoolFilter::handle(self, input)
    }

    fn reset_state(&mut self) {
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rises_when_level_reaches_upper_threshold() {
        let mut filter = BoolFilter::new(5.0, 100.0, 0.1).unwrap();
        let mut reference = RcFilter::new(5.0, 100.0, 1, 0.0).unwrap();

        let mut flips = 0;
        let mut previous = false;
        for _ in 0..200 {
            let level = reference.handle(1.0);
            let out = filter.handle(true);
            assert_eq!(out, level >= 0.9);
            if out != previous {
                flips += 1;
            }
            previous = out;
        }
        assert_eq!(flips, 1);
        assert!(filter.output());
    }

    #[test]
    fn test_falls_when_level_reaches_lower_threshold() {
        let mut filter = BoolFilter::new(5.0, 100.0, 0.1).unwrap();
        for _ in 0..200 {
            filter.handle(true);
        }
        assert!(filter.output());

        let mut reference = RcFilter::new(5.0, 100.0, 1, filter.level()).unwrap();
        for _ in 0..200 {
            let level = reference.handle(0.0);
            assert_eq!(filter.handle(false), level > 0.1);
        }
        assert!(!filter.output());
    }

    #[test]
    fn test_dead_band_holds_output() {
        let mut filter = BoolFilter::new(5.0, 100.0, 0.1).unwrap();

        // Alternating input keeps the level inside the dead band
        for _ in 0..20 {
            filter.handle(true);
            filter.handle(false);
        }
        let level = filter.level();
        assert!(level > 0.1 && level < 0.9);
        assert!(!filter.output());
    }

    #[test]
    fn test_reset() {
        let mut filter = BoolFilter::new(5.0, 100.0, 0.2).unwrap();
        for _ in 0..100 {
            filter.handle(true);
        }
        assert!(filter.output());

        filter.reset();
        assert!(!filter.output());
        assert_eq!(filter.level(), 0.0);
        assert_eq!(filter.cutoff(), 5.0);
    }

    #[test]
    fn test_set_cutoff() {
        let mut filter = BoolFilter::new(5.0, 100.0, 0.1).unwrap();
        filter.set_cutoff(10.0).unwrap();
        assert_eq!(filter.cutoff(), 10.0);

        assert!(filter.set_cutoff(50.0).is_err());
        assert_eq!(filter.cutoff(), 10.0);
        assert_eq!(filter.sample_rate(), 100.0);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(BoolFilter::new(5.0, 100.0, 0.0).is_err());
        assert!(BoolFilter::new(5.0, 100.0, 0.4).is_err());
        assert!(BoolFilter::new(5.0, 100.0, -0.1).is_err());
        assert!(BoolFilter::new(50.0, 100.0, 0.1).is_err());

        let filter = BoolFilter::new(5.0, 100.0, 0.39).unwrap();
        assert_eq!(filter.comp_lvl(), 0.39);
    }
}
