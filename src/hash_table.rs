//! HashTable: open-addressing string table with double hashing and tombstones.

use crate::config::{TableConfig, DEFAULT_BASE_SIZE, MAX_BASE_SIZE};
use crate::error::TableError;
use crate::prime::next_prime;
use crate::probe::ProbeSeq;
use tracing::{debug, trace};

#[derive(Debug)]
struct Entry {
    key: String,
    value: String,
}

/// One bucket. `Tombstone` marks a deleted entry: lookups probe past it,
/// inserts may reclaim it.
#[derive(Debug, Default)]
enum Slot {
    #[default]
    Empty,
    Tombstone,
    Occupied(Entry),
}

/// String-to-string map over a prime-sized bucket array.
///
/// Grows (base size doubled) when the load rises above the configured
/// threshold before an insert, and shrinks (base size halved, never below
/// the floor) when it drops below the shrink threshold before a delete.
#[derive(Debug)]
pub struct HashTable {
    config: TableConfig,
    base_size: usize,
    count: usize,
    slots: Vec<Slot>,
}

/// `next_prime(DEFAULT_BASE_SIZE)`.
const DEFAULT_CAPACITY: usize = 11;

/// Prime capacity for `base_size`, refusing sizes no table can reach.
fn capacity_for(base_size: usize) -> Result<usize, TableError> {
    if base_size > MAX_BASE_SIZE {
        return Err(TableError::CapacityOverflow { base_size });
    }
    next_prime(base_size).ok_or(TableError::CapacityOverflow { base_size })
}

fn empty_slots(capacity: usize) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, Slot::default);
    slots
}

fn try_empty_slots(capacity: usize) -> Result<Vec<Slot>, TableError> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|source| TableError::AllocationFailed { capacity, source })?;
    slots.resize_with(capacity, Slot::default);
    Ok(slots)
}

impl HashTable {
    pub fn new() -> Self {
        Self {
            config: TableConfig::default(),
            base_size: DEFAULT_BASE_SIZE,
            count: 0,
            slots: empty_slots(DEFAULT_CAPACITY),
        }
    }

    /// Default policy with a different starting base size. Sizes below the
    /// floor are clamped up to it.
    pub fn with_base_size(base_size: usize) -> Result<Self, TableError> {
        Self::with_config(TableConfig::default().with_initial_base_size(base_size))
    }

    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        let base_size = config.effective_initial_base_size();
        let slots = try_empty_slots(capacity_for(base_size)?)?;
        Ok(Self {
            config,
            base_size,
            count: 0,
            slots,
        })
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Length of the bucket array; always prime.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn base_size(&self) -> usize {
        self.base_size
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Occupied slots as a whole percentage of capacity, rounded down.
    pub fn load_percent(&self) -> usize {
        self.count * 100 / self.capacity()
    }

    /// Deleted slots not yet cleared by a resize.
    pub fn tombstones(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Tombstone))
            .count()
    }

    /// Insert `key -> value`, returning the previous value if the key was
    /// already present. An overwrite does not change `len()`.
    pub fn insert(&mut self, key: &str, value: &str) -> Result<Option<String>, TableError> {
        if self.load_percent() > self.config.grow_above_percent {
            self.resize(self.base_size.saturating_mul(2))?;
        }

        // Walk past tombstones until an empty slot so a copy of `key` further
        // down the chain is overwritten rather than duplicated.
        let mut reclaim = None;
        for idx in ProbeSeq::new(key, self.capacity()) {
            match &mut self.slots[idx] {
                Slot::Empty => {
                    reclaim.get_or_insert(idx);
                    break;
                }
                Slot::Tombstone => {
                    reclaim.get_or_insert(idx);
                }
                Slot::Occupied(entry) if entry.key == key => {
                    let old = std::mem::replace(&mut entry.value, value.to_owned());
                    return Ok(Some(old));
                }
                Slot::Occupied(_) => {}
            }
        }

        let idx = reclaim.ok_or(TableError::Full {
            capacity: self.capacity(),
        })?;
        self.slots[idx] = Slot::Occupied(Entry {
            key: key.to_owned(),
            value: value.to_owned(),
        });
        self.count += 1;
        Ok(None)
    }

    pub fn search(&self, key: &str) -> Option<&str> {
        match &self.slots[self.find_slot(key)?] {
            Slot::Occupied(entry) => Some(entry.value.as_str()),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_slot(key).is_some()
    }

    /// Remove `key`, returning its value. Absent keys are a no-op.
    pub fn delete(&mut self, key: &str) -> Result<Option<String>, TableError> {
        if self.load_percent() < self.config.shrink_below_percent {
            self.resize(self.base_size / 2)?;
        }

        let Some(idx) = self.find_slot(key) else {
            return Ok(None);
        };
        match std::mem::replace(&mut self.slots[idx], Slot::Tombstone) {
            Slot::Occupied(entry) => {
                self.count -= 1;
                Ok(Some(entry.value))
            }
            other => {
                self.slots[idx] = other;
                Ok(None)
            }
        }
    }

    /// Index of the occupied slot holding `key`. Tombstones are probed past;
    /// an empty slot ends the chain.
    fn find_slot(&self, key: &str) -> Option<usize> {
        for idx in ProbeSeq::new(key, self.capacity()) {
            match &self.slots[idx] {
                Slot::Empty => return None,
                Slot::Tombstone => {}
                Slot::Occupied(entry) if entry.key == key => return Some(idx),
                Slot::Occupied(_) => {}
            }
        }
        None
    }

    /// Rebuild into `next_prime(new_base_size)` slots, moving every live
    /// entry and dropping tombstones. Requests below the floor, or too small
    /// to hold the live entries, leave the table as is.
    fn resize(&mut self, new_base_size: usize) -> Result<(), TableError> {
        if new_base_size < self.config.min_base_size {
            trace!(
                new_base_size,
                min_base_size = self.config.min_base_size,
                "resize below floor ignored"
            );
            return Ok(());
        }
        let capacity = capacity_for(new_base_size)?;
        if capacity < self.count {
            trace!(capacity, count = self.count, "resize too small for live entries ignored");
            return Ok(());
        }

        let mut slots = try_empty_slots(capacity)?;
        let old_capacity = self.capacity();
        let mut moved = 0;
        for slot in std::mem::take(&mut self.slots) {
            let Slot::Occupied(entry) = slot else {
                continue;
            };
            // A fresh array has no tombstones or duplicates: the first empty
            // slot in the sequence is the entry's home. `capacity >= count`
            // guarantees one exists.
            let home =
                ProbeSeq::new(&entry.key, capacity).find(|&i| matches!(slots[i], Slot::Empty));
            let Some(idx) = home else {
                debug_assert!(moved >= capacity, "empty slot missed during resize");
                // Keep what was moved so `count` still matches the array.
                self.slots = slots;
                self.base_size = new_base_size;
                self.count = moved;
                return Err(TableError::Full { capacity });
            };
            slots[idx] = Slot::Occupied(entry);
            moved += 1;
        }
        debug_assert_eq!(moved, self.count);

        self.slots = slots;
        self.base_size = new_base_size;
        debug!(
            old_capacity,
            new_capacity = capacity,
            base_size = new_base_size,
            count = self.count,
            "resized bucket array"
        );
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn occupied_keys(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter_map(|s| match s {
                Slot::Occupied(e) => Some(e.key.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}
