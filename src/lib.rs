//! Filter-Core: real-time causal filter engine for sampled signals
//!
//! This library provides single-channel digital filters that are driven one
//! sample at a time at a fixed rate chosen by the host. It features:
//!
//! - Cascaded first-order RC low-pass and CR high-pass sections
//! - FIR convolution and general pole/zero IIR filters
//! - A debounce filter for binary signals with hysteresis
//! - Biquad coefficient synthesis and DC / Nyquist gain analysis
//! - Declarative filter banks loaded from TOML or JSON
//!
//! Construction validates everything up front and returns a [`FilterResult`];
//! once built, `handle` never fails and never allocates.
//!
//! # Quick Start
//!
//! ```rust
//! use filter_core::{lowpass_2nd, normalize_to_unity_gain_lpf, IirFilter, RcFilter};
//!
//! fn main() -> Result<(), filter_core::FilterError> {
//!     // Two-stage RC smoother at 10 Hz for a 100 Hz stream
//!     let mut smoother = RcFilter::new(10.0, 100.0, 2, 0.0)?;
//!     let smoothed = smoother.handle(1.0);
//!     assert!(smoothed > 0.0 && smoothed < 1.0);
//!
//!     // Biquad low-pass normalised to unity DC gain
//!     let mut coeffs = lowpass_2nd(100.0, 0.707, 1000.0)?;
//!     normalize_to_unity_gain_lpf(&mut coeffs);
//!     let mut biquad = IirFilter::new(&coeffs)?;
//!     let _ = biquad.handle(0.5);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod error;
pub mod history;
pub mod processing;
pub mod utils;

// Re-export commonly used types for convenience
pub use error::{FilterError, FilterResult, FilterStatus};

pub use history::{RingHistory, SampleHistory};

pub use processing::filters::{
    BoolFilter, CascadedFirstOrder, CrFilter, FilterKind, FilterSlot, FirFilter, HighPass,
    IirCoefficients, IirFilter, LowPass, RcFilter, SampleFilter, SectionKind,
};

pub use processing::design::{
    cr_alpha, highpass_2nd, hpf_gain, lowpass_2nd, lpf_gain, normalize_to_unity_gain_hpf,
    normalize_to_unity_gain_lpf, notch_2nd, rc_alpha, BiquadCoefficients, CoefficientSet,
};

pub use config::{ConfigError, ConfigLoader, ConfiguredFilter, FilterBankConfig, FilterConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: "Real-time causal filter engine".to_string(),
        features: vec![
            "Cascaded RC/CR first-order filters".to_string(),
            "FIR and IIR filters".to_string(),
            "Boolean debounce filter".to_string(),
            "Biquad synthesis and gain analysis".to_string(),
            "TOML/JSON filter bank configuration".to_string(),
        ],
    }
}

/// Library version information
#[derive(Debug, Clone)]
pub struct VersionInfo {
    /// Library name
    pub name: String,
    /// Version string
    pub version: String,
    /// Description
    pub description: String,
    /// List of features
    pub features: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        let info = version_info();
        assert_eq!(info.name, NAME);
        assert_eq!(info.version, VERSION);
        assert!(!info.features.is_empty());
    }

    #[test]
    fn test_constants() {
        assert!(!VERSION.is_empty());
        assert!(!NAME.is_empty());
    }

    #[test]
    fn test_filters_are_send() {
        fn assert_send<T: Send>() {}
        assert_send::<RcFilter>();
        assert_send::<CrFilter>();
        assert_send::<FirFilter>();
        assert_send::<IirFilter>();
        assert_send::<BoolFilter>();
        assert_send::<FilterSlot<IirFilter>>();
    }
}
