// src/processing/design/mod.rs
//! Coefficient synthesis and gain analysis

pub mod coefficients;
pub mod gain;

pub use coefficients::*;
pub use gain::*;
