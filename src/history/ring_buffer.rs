// src/history/ring_buffer.rs
//! Overwriting ring buffer used as a lookback window over recent samples
//!
//! The filters only rely on the [`SampleHistory`] contract, so any container
//! that offers the same capabilities can stand in for [`RingHistory`]:
//!
//! - capacity fixed at construction
//! - `push` evicts the oldest sample once full
//! - `get(k)` returns the sample pushed `k` calls ago (`0` = newest)
//! - `fill` overwrites every slot, `reset` clears every slot to `0.0`
//!
//! None of these may allocate; only construction does.

use crate::error::{FilterError, FilterResult};

/// Minimum capability a history container must provide to back a filter
pub trait SampleHistory {
    /// Number of samples retained
    fn capacity(&self) -> usize;

    /// Insert a sample, evicting the oldest one when full
    fn push(&mut self, value: f32);

    /// Sample at `lookback` distance from the newest, `None` past capacity
    fn try_get(&self, lookback: usize) -> Option<f32>;

    /// Overwrite every slot with `value`
    fn fill(&mut self, value: f32);

    /// Clear every slot to `0.0` and rewind the write position
    fn reset(&mut self);

    /// Sample at `lookback` distance from the newest.
    ///
    /// Callers keep `lookback < capacity()`; anything further back reads as `0.0`.
    fn get(&self, lookback: usize) -> f32 {
        self.try_get(lookback).unwrap_or(0.0)
    }

    /// Weighted sum `Σ coeffs[i] · get(i)`, newest sample first
    fn dot(&self, coeffs: &[f32]) -> f32 {
        coeffs
            .iter()
            .enumerate()
            .map(|(i, &c)| c * self.get(i))
            .sum()
    }
}

/// Heap-backed ring buffer sized once at construction
#[derive(Debug, Clone, PartialEq)]
pub struct RingHistory {
    buffer: Vec<f32>,
    head: usize,
}

impl RingHistory {
    /// Create a history of `capacity` samples, all zero
    pub fn new(capacity: usize) -> FilterResult<Self> {
        Self::with_value(capacity, 0.0)
    }

    /// Create a history of `capacity` samples, all set to `value`
    pub fn with_value(capacity: usize, value: f32) -> FilterResult<Self> {
        if capacity == 0 {
            return Err(FilterError::invalid(
                "capacity",
                "history must hold at least one sample",
            ));
        }

        Ok(Self {
            buffer: vec![value; capacity],
            head: 0,
        })
    }

    /// Samples from newest to oldest
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.buffer.len()).map(move |k| self.get(k))
    }

    fn slot(&self, lookback: usize) -> usize {
        let capacity = self.buffer.len();
        (self.head + capacity - 1 - lookback) % capacity
    }
}

impl SampleHistory for RingHistory {
    fn capacity(&self) -> usize {
        self.buffer.len()
    }

    fn push(&mut self, value: f32) {
        self.buffer[self.head] = value;
        self.head = (self.head + 1) % self.buffer.len();
    }

    fn try_get(&self, lookback: usize) -> Option<f32> {
        if lookback < self.buffer.len() {
            Some(self.buffer[self.slot(lookback)])
        } else {
            None
        }
    }

    fn fill(&mut self, value: f32) {
        self.buffer.fill(value);
    }

    fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.head = 0;
    }

    fn dot(&self, coeffs: &[f32]) -> f32 {
        // [0, head) holds the newest samples, [head, capacity) the oldest
        let (recent, stale) = self.buffer.split_at(self.head);
        recent
            .iter()
            .rev()
            .chain(stale.iter().rev())
            .zip(coeffs)
            .map(|(&x, &c)| x * c)
            .sum()
    }
}
