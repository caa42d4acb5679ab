// src/config/filter_config.rs
//! Declarative filter descriptions
//!
//! A [`FilterConfig`] carries the construction arguments of one filter and
//! turns into a live instance through [`FilterConfig::build`]. Validation is
//! the constructors' own: a config that deserializes fine can still be
//! rejected at build time.

use serde::{Deserialize, Serialize};

use crate::error::FilterResult;
use crate::processing::design::{
    highpass_2nd, lowpass_2nd, normalize_to_unity_gain_hpf, normalize_to_unity_gain_lpf,
    notch_2nd, BiquadCoefficients,
};
use crate::processing::filters::{
    BoolFilter, CrFilter, FilterKind, FirFilter, IirFilter, RcFilter, SampleFilter,
};

/// Biquad response synthesized by [`FilterConfig::Biquad`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiquadResponse {
    /// 2nd-order low-pass, `shape` is the damping factor
    Lowpass,
    /// 2nd-order high-pass, `shape` is the damping factor
    Highpass,
    /// Notch, `shape` is the pole radius
    Notch,
}

impl BiquadResponse {
    fn default_shape(self) -> f32 {
        match self {
            BiquadResponse::Lowpass | BiquadResponse::Highpass => defaults::zeta(),
            BiquadResponse::Notch => defaults::notch_radius(),
        }
    }
}

/// Construction arguments of a single filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterConfig {
    /// Cascaded RC low-pass
    Rc {
        /// Cutoff in Hz
        fc: f32,
        /// Sample rate in Hz
        fs: f32,
        /// Number of sections
        #[serde(default = "defaults::order")]
        order: usize,
        /// Initial output of every section
        #[serde(default = "defaults::init_value")]
        init_value: f32,
    },

    /// Cascaded CR high-pass
    Cr {
        /// Cutoff in Hz
        fc: f32,
        /// Sample rate in Hz
        fs: f32,
        /// Number of sections
        #[serde(default = "defaults::order")]
        order: usize,
    },

    /// FIR with explicit taps
    Fir {
        /// Taps, newest sample first
        coefficients: Vec<f32>,
        /// Initial history value
        #[serde(default = "defaults::init_value")]
        init_value: f32,
    },

    /// IIR with explicit poles and zeros
    Iir {
        /// Denominator coefficients
        pole: Vec<f32>,
        /// Numerator coefficients
        zero: Vec<f32>,
    },

    /// IIR built from synthesized biquad coefficients
    Biquad {
        /// Response shape
        response: BiquadResponse,
        /// Cutoff or notch centre in Hz
        fc: f32,
        /// Sample rate in Hz
        fs: f32,
        /// Damping factor or notch radius; response default when absent
        #[serde(default)]
        shape: Option<f32>,
        /// Scale the zeros to unity gain in the passband
        #[serde(default)]
        normalize: bool,
    },

    /// Debounce filter for binary inputs
    Boolean {
        /// Low-pass cutoff in Hz
        fc: f32,
        /// Sample rate in Hz
        fs: f32,
        /// Comparator dead-band half-width
        #[serde(default = "defaults::comp_lvl")]
        comp_lvl: f32,
    },
}

impl FilterConfig {
    /// Family of the filter this config builds
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterConfig::Rc { .. } => FilterKind::Rc,
            FilterConfig::Cr { .. } => FilterKind::Cr,
            FilterConfig::Fir { .. } => FilterKind::Fir,
            FilterConfig::Iir { .. } | FilterConfig::Biquad { .. } => FilterKind::Iir,
            FilterConfig::Boolean { .. } => FilterKind::Boolean,
        }
    }

    /// Construct the described filter
    pub fn build(&self) -> FilterResult<ConfiguredFilter> {
        match self {
            FilterConfig::Rc {
                fc,
                fs,
                order,
                init_value,
            } => RcFilter::new(*fc, *fs, *order, *init_value).map(ConfiguredFilter::Rc),
            FilterConfig::Cr { fc, fs, order } => {
                CrFilter::new(*fc, *fs, *order).map(ConfiguredFilter::Cr)
            }
            FilterConfig::Fir {
                coefficients,
                init_value,
            } => FirFilter::new(coefficients, *init_value).map(ConfiguredFilter::Fir),
            FilterConfig::Iir { pole, zero } => {
                IirFilter::from_slices(pole, zero).map(ConfiguredFilter::Iir)
            }
            FilterConfig::Biquad {
                response,
                fc,
                fs,
                shape,
                normalize,
            } => {
                let coefficients = synthesize(*response, *fc, *fs, *shape, *normalize)?;
                IirFilter::new(&coefficients).map(ConfiguredFilter::Iir)
            }
            FilterConfig::Boolean { fc, fs, comp_lvl } => {
                BoolFilter::new(*fc, *fs, *comp_lvl).map(ConfiguredFilter::Boolean)
            }
        }
    }
}

fn synthesize(
    response: BiquadResponse,
    fc: f32,
    fs: f32,
    shape: Option<f32>,
    normalize: bool,
) -> FilterResult<BiquadCoefficients> {
    let shape = shape.unwrap_or_else(|| response.default_shape());
    let mut coefficients = match response {
        BiquadResponse::Lowpass => lowpass_2nd(fc, shape, fs)?,
        BiquadResponse::Highpass => highpass_2nd(fc, shape, fs)?,
        BiquadResponse::Notch => notch_2nd(fc, shape, fs)?,
    };

    if normalize {
        match response {
            BiquadResponse::Lowpass | BiquadResponse::Notch => {
                normalize_to_unity_gain_lpf(&mut coefficients);
            }
            BiquadResponse::Highpass => {
                normalize_to_unity_gain_hpf(&mut coefficients);
            }
        }
    }
    Ok(coefficients)
}

/// Live filter produced from a [`FilterConfig`]
#[derive(Debug, Clone)]
pub enum ConfiguredFilter {
    /// RC low-pass
    Rc(RcFilter),
    /// CR high-pass
    Cr(CrFilter),
    /// FIR
    Fir(FirFilter),
    /// IIR, explicit or synthesized
    Iir(IirFilter),
    /// Debounce filter
    Boolean(BoolFilter),
}

impl ConfiguredFilter {
    /// Family of the held filter
    pub fn kind(&self) -> FilterKind {
        match self {
            ConfiguredFilter::Rc(_) => RcFilter::KIND,
            ConfiguredFilter::Cr(_) => CrFilter::KIND,
            ConfiguredFilter::Fir(_) => <FirFilter as SampleFilter>::KIND,
            ConfiguredFilter::Iir(_) => <IirFilter as SampleFilter>::KIND,
            ConfiguredFilter::Boolean(_) => BoolFilter::KIND,
        }
    }

    /// Return the held filter to its post-construction state
    pub fn reset(&mut self) {
        match self {
            ConfiguredFilter::Rc(filter) => filter.reset_state(),
            ConfiguredFilter::Cr(filter) => filter.reset_state(),
            ConfiguredFilter::Fir(filter) => filter.reset_state(),
            ConfiguredFilter::Iir(filter) => filter.reset_state(),
            ConfiguredFilter::Boolean(filter) => filter.reset_state(),
        }
    }
}

/// A filter description with the name it is looked up by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedFilterConfig {
    /// Unique name within the bank
    pub name: String,
    /// Filter description
    #[serde(flatten)]
    pub filter: FilterConfig,
}

/// Set of named filters loaded together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterBankConfig {
    /// Filters in declaration order
    #[serde(default)]
    pub filters: Vec<NamedFilterConfig>,
}

impl FilterBankConfig {
    /// Look up a filter description by name
    pub fn get(&self, name: &str) -> Option<&FilterConfig> {
        self.filters
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.filter)
    }
}

/// Default value providers using constants
mod defaults {
    use crate::config::constants::*;

    pub fn order() -> usize { filters::DEFAULT_ORDER }
    pub fn init_value() -> f32 { filters::DEFAULT_INIT_VALUE }
    pub fn comp_lvl() -> f32 { threshold::DEFAULT_COMP_LVL }
    pub fn zeta() -> f32 { biquad::DEFAULT_ZETA }
    pub fn notch_radius() -> f32 { biquad::DEFAULT_NOTCH_RADIUS }
}
