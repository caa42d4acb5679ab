// src/processing/mod.rs
//! Filter engine and coefficient design

pub mod design;
pub mod filters;

pub use design::*;
pub use filters::*;
