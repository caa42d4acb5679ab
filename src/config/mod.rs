// src/config/mod.rs
//! Filter configuration: constants, declarative descriptions and loading

pub mod constants;
pub mod filter_config;
pub mod loader;

pub use filter_config::{
    BiquadResponse, ConfiguredFilter, FilterBankConfig, FilterConfig, NamedFilterConfig,
};
pub use loader::{ConfigError, ConfigFormat, ConfigLoader};
