// src/processing/filters/first_order.rs
//! Cascaded first-order sections (RC low-pass, CR high-pass)
//!
//! `order` identical one-pole sections share a single smoothing factor. Each
//! stage feeds the next within the same call, so stages are always evaluated
//! from first to last.

use std::marker::PhantomData;

use tracing::{debug, trace, warn};

use super::{FilterKind, SampleFilter};
use crate::config::constants::filters::{MAX_CASCADE_ORDER, MIN_ORDER};
use crate::error::FilterResult;
use crate::processing::design::{cr_alpha, rc_alpha};
use crate::utils::validation::check_count;

/// State of one section: last output and, for CR, last input
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stage {
    /// Section output
    pub y: f32,
    /// Section input seen on the previous call (CR only)
    pub x: f32,
}

/// Per-stage update rule distinguishing the section flavours
pub trait SectionKind {
    /// Reported filter family
    const KIND: FilterKind;

    /// Smoothing factor for cutoff `fc` at sample rate `fs`
    fn alpha(fc: f32, fs: f32) -> FilterResult<f32>;

    /// Advance `stage` by one sample and return its new output
    fn step(alpha: f32, stage: &mut Stage, input: f32) -> f32;
}

/// RC section: `y += α·(x − y)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LowPass;

/// CR section: `y = α·y + α·(x − x_prev)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighPass;

impl SectionKind for LowPass {
    const KIND: FilterKind = FilterKind::Rc;

    fn alpha(fc: f32, fs: f32) -> FilterResult<f32> {
        rc_alpha(fc, fs)
    }

    #[inline]
    fn step(alpha: f32, stage: &mut Stage, input: f32) -> f32 {
        stage.y += alpha * (input - stage.y);
        stage.y
    }
}

impl SectionKind for HighPass {
    const KIND: FilterKind = FilterKind::Cr;

    fn alpha(fc: f32, fs: f32) -> FilterResult<f32> {
        cr_alpha(fc, fs)
    }

    #[inline]
    fn step(alpha: f32, stage: &mut Stage, input: f32) -> f32 {
        stage.y = alpha * stage.y + alpha * (input - stage.x);
        stage.x = input;
        stage.y
    }
}

/// `order` cascaded first-order sections of flavour `K`
#[derive(Debug, Clone)]
pub struct CascadedFirstOrder<K> {
    stages: Vec<Stage>,
    alpha: f32,
    fc: f32,
    fs: f32,
    init_value: f32,
    _kind: PhantomData<K>,
}

/// Cascaded RC low-pass
pub type RcFilter = CascadedFirstOrder<LowPass>;

/// Cascaded CR high-pass
pub type CrFilter = CascadedFirstOrder<HighPass>;

impl<K: SectionKind> CascadedFirstOrder<K> {
    fn build(fc: f32, fs: f32, order: usize, init_value: f32) -> FilterResult<Self> {
        let alpha = check_count("order", order, MIN_ORDER, MAX_CASCADE_ORDER)
            .and_then(|_| K::alpha(fc, fs))
            .map_err(|err| {
                warn!(kind = %K::KIND, fc, fs, order, error = %err, "rejected filter parameters");
                err
            })?;

        debug!(kind = %K::KIND, fc, fs, order, alpha, "first-order cascade initialized");

        Ok(Self {
            stages: vec![
                Stage {
                    y: init_value,
                    x: 0.0,
                };
                order
            ],
            alpha,
            fc,
            fs,
            init_value,
            _kind: PhantomData,
        })
    }

    /// Filter one sample; the output is the last stage
    pub fn handle(&mut self, input: f32) -> f32 {
        let alpha = self.alpha;
        self.stages
            .iter_mut()
            .fold(input, |signal, stage| K::step(alpha, stage, signal))
    }

    /// Set every stage output to `value` and clear the CR input history
    ///
    /// Cutoff, sample rate and order are kept.
    pub fn reset(&mut self, value: f32) {
        trace!(kind = %K::KIND, value, "first-order cascade reset");
        for stage in &mut self.stages {
            stage.y = value;
            stage.x = 0.0;
        }
    }

    /// Change the cutoff on the fly, keeping the stored sample rate
    ///
    /// On failure cutoff and smoothing factor stay as they were.
    pub fn set_cutoff(&mut self, fc: f32) -> FilterResult<()> {
        let alpha = K::alpha(fc, self.fs).map_err(|err| {
            warn!(kind = %K::KIND, fc, fs = self.fs, error = %err, "rejected cutoff change");
            err
        })?;

        trace!(kind = %K::KIND, from = self.fc, to = fc, alpha, "cutoff changed");
        self.alpha = alpha;
        self.fc = fc;
        Ok(())
    }

    /// Cutoff frequency in Hz
    pub fn cutoff(&self) -> f32 {
        self.fc
    }

    /// Sample rate in Hz, fixed at construction
    pub fn sample_rate(&self) -> f32 {
        self.fs
    }

    /// Number of cascaded sections
    pub fn order(&self) -> usize {
        self.stages.len()
    }

    /// Current smoothing factor
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Output of the last stage after the most recent call
    pub fn output(&self) -> f32 {
        self.stages.last().map_or(self.init_value, |stage| stage.y)
    }

    /// Per-stage state, first stage first
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }
}

impl CascadedFirstOrder<LowPass> {
    /// RC low-pass of `order` sections, every stage seeded with `init_value`
    pub fn new(fc: f32, fs: f32, order: usize, init_value: f32) -> FilterResult<Self> {
        Self::build(fc, fs, order, init_value)
    }
}

impl CascadedFirstOrder<HighPass> {
    /// CR high-pass of `order` sections, starting from rest
    pub fn new(fc: f32, fs: f32, order: usize) -> FilterResult<Self> {
        Self::build(fc, fs, order, 0.0)
    }

    /// Return every stage to rest
    pub fn reset_zero(&mut self) {
        self.reset(0.0);
    }
}

impl<K: SectionKind> SampleFilter for CascadedFirstOrder<K> {
    type Sample = f32;
    type Output = f32;

    const KIND: FilterKind = K::KIND;

    fn handle(&mut self, input: f32) -> f32 {
        CascadedFirstOrder::handle(self, input)
    }

    fn reset_state(&mut self) {
        self.reset(self.init_value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rc_step_converges_monotonically() {
        let mut filter = RcFilter::new(10.0, 100.0, 1, 0.0).unwrap();

        let mut prev = 0.0;
        for _ in 0..200 {
            let y = filter.handle(1.0);
            assert!(y >= prev);
            assert!(y <= 1.0 + 1e-6);
            prev = y;
        }
        for _ in 0..50 {
            assert!((filter.handle(1.0) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_rc_cascade_first_sample() {
        let mut filter = RcFilter::new(10.0, 100.0, 3, 0.0).unwrap();
        let alpha = filter.alpha();

        let y = filter.handle(1.0);
        assert!((y - alpha.powi(3)).abs() < 1e-6);
        assert!((filter.stages()[0].y - alpha).abs() < 1e-6);
        assert!((filter.stages()[1].y - alpha * alpha).abs() < 1e-6);
    }

    #[test]
    fn test_rc_init_value_seeds_stages() {
        let mut filter = RcFilter::new(5.0, 100.0, 2, 3.0).unwrap();
        assert_eq!(filter.output(), 3.0);
        // Holding the input at the seed value keeps the output there
        assert!((filter.handle(3.0) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_cr_step_response() {
        let mut filter = CrFilter::new(10.0, 100.0, 2).unwrap();
        let alpha = filter.alpha();

        let y = filter.handle(1.0);
        assert!((filter.stages()[0].y - alpha).abs() < 1e-6);
        assert_eq!(filter.stages()[0].x, 1.0);
        assert!((y - alpha * alpha).abs() < 1e-6);
        assert!((filter.stages()[1].x - alpha).abs() < 1e-6);
    }

    #[test]
    fn test_cr_blocks_dc() {
        let mut filter = CrFilter::new(10.0, 100.0, 1).unwrap();
        let mut y = 0.0;
        for _ in 0..300 {
            y = filter.handle(5.0);
        }
        assert!(y.abs() < 1e-4);
    }

    #[test]
    fn test_reset_keeps_coefficients() {
        let mut filter = CrFilter::new(10.0, 100.0, 2).unwrap();
        let alpha = filter.alpha();
        for _ in 0..10 {
            filter.handle(1.0);
        }

        filter.reset(0.0);
        assert!(filter.stages().iter().all(|s| s.x == 0.0 && s.y == 0.0));
        assert_eq!(filter.alpha(), alpha);
        assert_eq!(filter.order(), 2);
        assert_eq!(filter.sample_rate(), 100.0);
    }

    #[test]
    fn test_reset_state_restores_init_value() {
        let mut filter = RcFilter::new(10.0, 100.0, 1, 2.0).unwrap();
        filter.handle(-4.0);
        filter.reset_state();
        assert_eq!(filter.output(), 2.0);
    }

    #[test]
    fn test_set_cutoff() {
        let mut filter = RcFilter::new(10.0, 100.0, 1, 0.0).unwrap();
        let old_alpha = filter.alpha();

        filter.set_cutoff(20.0).unwrap();
        assert_eq!(filter.cutoff(), 20.0);
        assert!(filter.alpha() > old_alpha);
        assert!((filter.alpha() - rc_alpha(20.0, 100.0).unwrap()).abs() < 1e-7);
    }

    #[test]
    fn test_set_cutoff_failure_is_atomic() {
        let mut rc = RcFilter::new(10.0, 100.0, 1, 0.0).unwrap();
        let mut cr = CrFilter::new(10.0, 100.0, 1).unwrap();

        for fc in [50.0, 75.0, 0.0, -1.0, f32::NAN] {
            let (rc_alpha_before, cr_alpha_before) = (rc.alpha(), cr.alpha());
            assert!(rc.set_cutoff(fc).is_err());
            assert!(cr.set_cutoff(fc).is_err());
            assert_eq!(rc.cutoff(), 10.0);
            assert_eq!(cr.cutoff(), 10.0);
            assert_eq!(rc.alpha(), rc_alpha_before);
            assert_eq!(cr.alpha(), cr_alpha_before);
        }
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(RcFilter::new(10.0, 100.0, 0, 0.0).is_err());
        assert!(RcFilter::new(50.0, 100.0, 1, 0.0).is_err());
        assert!(RcFilter::new(10.0, 100.0, 256, 0.0).is_err());
        assert!(CrFilter::new(10.0, 100.0, 0).is_err());
        assert!(CrFilter::new(0.0, 100.0, 1).is_err());
        assert!(CrFilter::new(10.0, 0.0, 1).is_err());
        assert!(CrFilter::new(10.0, -100.0, 1).is_err());
    }
}
