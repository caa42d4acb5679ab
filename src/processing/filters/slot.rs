//! Two-state holder for a filter that may not be configured yet
//!
//! Filters themselves can only be obtained through a successful constructor,
//! so a constructed value is always usable. `FilterSlot` covers the case
//! where a host keeps a filter in a field before its parameters are known:
//! until `init` succeeds every operation reports
//! [`FilterError::Uninitialized`] and touches nothing.

use tracing::warn;

use super::SampleFilter;
use crate::error::{FilterError, FilterResult};

/// `Uninitialized` until a constructor succeeds, then `Ready`
#[derive(Debug, Clone)]
pub enum FilterSlot<F> {
    /// No successful construction yet
    Uninitialized,
    /// Constructed filter
    Ready(F),
}

impl<F: SampleFilter> FilterSlot<F> {
    /// Empty slot
    pub const fn new() -> Self {
        FilterSlot::Uninitialized
    }

    /// Run `build` and store the filter on success
    ///
    /// On failure the slot keeps whatever it held before.
    pub fn init(&mut self, build: impl FnOnce() -> FilterResult<F>) -> FilterResult<&mut F> {
        match build() {
            Ok(filter) => {
                *self = FilterSlot::Ready(filter);
                self.get_mut()
            }
            Err(err) => {
                warn!(kind = %F::KIND, error = %err, "filter initialization rejected");
                Err(err)
            }
        }
    }

    /// Whether a filter has been constructed into this slot
    pub fn is_init(&self) -> bool {
        matches!(self, FilterSlot::Ready(_))
    }

    /// Shared access to the ready filter
    pub fn get(&self) -> FilterResult<&F> {
        match self {
            FilterSlot::Ready(filter) => Ok(filter),
            FilterSlot::Uninitialized => Err(FilterError::uninitialized(F::KIND)),
        }
    }

    /// Exclusive access to the ready filter
    pub fn get_mut(&mut self) -> FilterResult<&mut F> {
        match self {
            FilterSlot::Ready(filter) => Ok(filter),
            FilterSlot::Uninitialized => Err(FilterError::uninitialized(F::KIND)),
        }
    }

    /// Filter one sample
    pub fn handle(&mut self, input: F::Sample) -> FilterResult<F::Output> {
        Ok(self.get_mut()?.handle(input))
    }

    /// Reset the held filter to its post-construction state
    pub fn reset(&mut self) -> FilterResult<()> {
        self.get_mut()?.reset_state();
        Ok(())
    }

    /// Move the filter out, leaving the slot uninitialized
    pub fn take(&mut self) -> Option<F> {
        match std::mem::replace(self, FilterSlot::Uninitialized) {
            FilterSlot::Ready(filter) => Some(filter),
            FilterSlot::Uninitialized => None,
        }
    }
}

impl<F> Default for FilterSlot<F> {
    fn default() -> Self {
        FilterSlot::Uninitialized
    }
}

impl<F> From<F> for FilterSlot<F> {
    fn from(filter: F) -> Self {
        FilterSlot::Ready(filter)
    }
}
