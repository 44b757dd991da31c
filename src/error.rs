//! Errors surfaced by table construction and mutation.
//!
//! A missing key is not an error: `search` yields `None` and `delete`
//! yields `Ok(None)`.

use std::collections::TryReserveError;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The bucket array could not be allocated. The table is unchanged.
    #[error("failed to allocate a bucket array of {capacity} slots")]
    AllocationFailed {
        capacity: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("invalid table configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A grow would need a base size past `config::MAX_BASE_SIZE`.
    #[error("base size {base_size} exceeds the largest supported bucket array")]
    CapacityOverflow { base_size: usize },

    /// No free slot was left for an entry. Load checks run before every
    /// insert and a resize only targets arrays that can hold every live
    /// entry, so this guards a broken invariant rather than a reachable
    /// state.
    #[error("no free slot in a table of capacity {capacity}")]
    Full { capacity: usize },
}

impl TableError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Allocation failures leave the table intact, so the caller may retry
    /// once memory is available. Configuration errors never resolve on retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }
}
