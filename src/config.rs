//! Sizing and load-factor policy for [`HashTable`](crate::HashTable).

use crate::error::TableError;

/// Base size used by `HashTable::new()`; also the default floor.
pub const DEFAULT_BASE_SIZE: usize = 10;
/// Grow when the load, in whole percent, rises above this before an insert.
pub const DEFAULT_GROW_ABOVE_PERCENT: usize = 70;
/// Shrink when the load, in whole percent, drops below this before a delete.
pub const DEFAULT_SHRINK_BELOW_PERCENT: usize = 10;

/// Largest base size a table accepts. No bucket array above this many
/// slots fits in the address space, and a prime at or above it always
/// fits in a `usize`.
pub const MAX_BASE_SIZE: usize = isize::MAX as usize / 64;

/// Table sizing policy.
///
/// Load is measured as `count * 100 / capacity` using integer division.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableConfig {
    /// Base size of a freshly built table. Clamped up to `min_base_size`.
    pub initial_base_size: usize,
    /// Floor below which a shrink request is ignored.
    pub min_base_size: usize,
    pub grow_above_percent: usize,
    pub shrink_below_percent: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_base_size: DEFAULT_BASE_SIZE,
            min_base_size: DEFAULT_BASE_SIZE,
            grow_above_percent: DEFAULT_GROW_ABOVE_PERCENT,
            shrink_below_percent: DEFAULT_SHRINK_BELOW_PERCENT,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_base_size(mut self, base_size: usize) -> Self {
        self.initial_base_size = base_size;
        self
    }

    pub fn with_min_base_size(mut self, floor: usize) -> Self {
        self.min_base_size = floor;
        self
    }

    pub fn with_grow_above_percent(mut self, percent: usize) -> Self {
        self.grow_above_percent = percent;
        self
    }

    pub fn with_shrink_below_percent(mut self, percent: usize) -> Self {
        self.shrink_below_percent = percent;
        self
    }

    /// Rejects policies that could leave the table without a free slot or
    /// make it oscillate between growing and shrinking.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.min_base_size == 0 {
            return Err(TableError::invalid_config("min_base_size must be at least 1"));
        }
        if self.initial_base_size > MAX_BASE_SIZE || self.min_base_size > MAX_BASE_SIZE {
            return Err(TableError::invalid_config(format!(
                "base sizes must be at most {}, got initial {} and minimum {}",
                MAX_BASE_SIZE, self.initial_base_size, self.min_base_size
            )));
        }
        if self.grow_above_percent == 0 || self.grow_above_percent >= 100 {
            return Err(TableError::invalid_config(format!(
                "grow_above_percent must be in 1..100, got {}",
                self.grow_above_percent
            )));
        }
        // Doubling roughly halves the load, so a shrink threshold at or above
        // half the grow threshold would shrink right after growing.
        if self.shrink_below_percent.saturating_mul(2) > self.grow_above_percent {
            return Err(TableError::invalid_config(format!(
                "shrink_below_percent ({}) must be at most half of grow_above_percent ({})",
                self.shrink_below_percent, self.grow_above_percent
            )));
        }
        Ok(())
    }

    /// Initial base size after clamping to the floor.
    pub(crate) fn effective_initial_base_size(&self) -> usize {
        self.initial_base_size.max(self.min_base_size)
    }
}
