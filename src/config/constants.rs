// src/config/constants.rs
//! Engine-wide limits and defaults
//!
//! Kept in one place so the filters, the synthesizers and the configuration
//! layer agree on the same bounds.

/// Cascade, tap and history sizing
pub mod filters {
    /// Smallest cascade depth or tap count
    pub const MIN_ORDER: usize = 1;
    /// Cascade depth of RC/CR sections; the stage count is stored as a byte
    pub const MAX_CASCADE_ORDER: usize = u8::MAX as usize;
    /// Cascade depth when a config leaves it out
    pub const DEFAULT_ORDER: usize = 1;
    /// Initial output/history value when a config leaves it out
    pub const DEFAULT_INIT_VALUE: f32 = 0.0;
}

/// Boolean (debounce) filter comparator
pub mod threshold {
    /// Exclusive lower bound of the comparator level
    pub const COMP_LVL_MIN: f32 = 0.0;
    /// Exclusive upper bound of the comparator level
    pub const COMP_LVL_MAX: f32 = 0.4;
    /// Comparator level when a config leaves it out
    pub const DEFAULT_COMP_LVL: f32 = 0.1;

    /// Analog value of a `true` input
    pub const HIGH_LEVEL: f32 = 1.0;
    /// Analog value of a `false` input
    pub const LOW_LEVEL: f32 = 0.0;

    /// The boolean filter always runs a single RC section
    pub const LOWPASS_ORDER: usize = 1;
}

/// Second-order section synthesis
pub mod biquad {
    /// Zero and pole count of a biquad
    pub const TAPS: usize = 3;
    /// Damping factor when a config leaves it out
    pub const DEFAULT_ZETA: f32 = 0.707;

    /// Exclusive bounds of the notch pole radius
    pub const NOTCH_RADIUS_MIN: f32 = 0.0;
    /// Exclusive upper bound of the notch pole radius
    pub const NOTCH_RADIUS_MAX: f32 = 1.0;
    /// Notch pole radius when a config leaves it out
    pub const DEFAULT_NOTCH_RADIUS: f32 = 0.95;
}

/// Frequency helpers
pub mod frequency {
    /// `2π` in single precision
    pub const TWO_PI: f32 = 2.0 * std::f32::consts::PI;
    /// Nyquist limit as a fraction of the sample rate
    pub const NYQUIST_FRACTION: f32 = 0.5;
}
