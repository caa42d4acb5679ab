// src/history/mod.rs
//! Fixed-capacity sample history consumed by the FIR and IIR evaluators

pub mod ring_buffer;

pub use ring_buffer::*;
