//! HashTable: string-to-string map over a prime-sized slot array.
//!
//! Collisions are resolved by open addressing with double hashing (see
//! [`crate::probe`]). Deleted slots become tombstones so that probe
//! sequences passing through them stay intact; only a never-used slot ends
//! a lookup. The table grows when an insert finds the load above
//! [`MAX_LOAD_PERCENT`] and shrinks when a delete finds it below
//! [`MIN_LOAD_PERCENT`]. Resizing rebuilds the table at a new base size,
//! which drops every tombstone.

use crate::error::{Result, TableError};
use crate::prime::checked_next_prime;
use crate::probe::Probe;

/// Initial and minimum base size. Prime, so it is also the initial capacity.
pub const MIN_BASE_SIZE: usize = 53;
/// An insert that finds the load above this percentage grows the table first.
pub const MAX_LOAD_PERCENT: usize = 70;
/// A delete that finds the load below this percentage shrinks the table first.
pub const MIN_LOAD_PERCENT: usize = 10;

#[derive(Debug)]
struct Entry {
    key: String,
    value: String,
}

impl Entry {
    fn new(key: &str, value: &str) -> Self {
        Entry {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }
}

#[derive(Debug, Default)]
enum Slot {
    #[default]
    Empty,
    Occupied(Entry),
    Tombstone,
}

/// Result of walking a key's probe sequence for insertion.
enum Lookup {
    /// Slot holding the key.
    Found(usize),
    /// Key absent; first tombstone or empty slot on the walk.
    Vacant(usize),
    /// Walk ended without a match or a free slot.
    Exhausted,
}

#[cfg(test)]
thread_local! {
    /// When set, the next slot-array allocation on this thread fails.
    static FAIL_NEXT_ALLOC: core::cell::Cell<bool> = const { core::cell::Cell::new(false) };
}

/// Slot array of `capacity` empty slots.
fn alloc_slots(capacity: usize) -> Result<Vec<Slot>> {
    #[cfg(test)]
    if FAIL_NEXT_ALLOC.with(|f| f.replace(false)) {
        return Err(TableError::AllocFailed { slots: capacity });
    }
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|_| TableError::AllocFailed { slots: capacity })?;
    slots.resize_with(capacity, Slot::default);
    Ok(slots)
}

#[derive(Debug)]
pub struct HashTable {
    base_size: usize,
    slots: Vec<Slot>,
    count: usize,
}

impl HashTable {
    /// Creates an empty table at [`MIN_BASE_SIZE`].
    ///
    /// # Panics
    ///
    /// Panics if the slot array cannot be allocated; see [`try_new`](Self::try_new).
    pub fn new() -> Self {
        match Self::try_new() {
            Ok(t) => t,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new() -> Result<Self> {
        let t = Self::with_base_size(MIN_BASE_SIZE)?;
        log::trace!("created table with capacity {}", t.capacity());
        Ok(t)
    }

    fn with_base_size(base_size: usize) -> Result<Self> {
        let capacity = checked_next_prime(base_size).ok_or(TableError::CapacityOverflow {
            requested: base_size,
        })?;
        let slots = alloc_slots(capacity)?;
        Ok(HashTable {
            base_size,
            slots,
            count: 0,
        })
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Length of the slot array; always prime.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Size requested at creation or at the last resize, before rounding up
    /// to a prime.
    pub fn base_size(&self) -> usize {
        self.base_size
    }

    /// `len * 100 / capacity`, rounded down.
    pub fn load_percentage(&self) -> usize {
        self.count * 100 / self.capacity()
    }

    /// Inserts `key` with `value`, replacing the value if `key` is present.
    /// Both strings are copied.
    ///
    /// # Panics
    ///
    /// Panics if a resize is needed and cannot allocate; see
    /// [`try_insert`](Self::try_insert).
    pub fn insert(&mut self, key: &str, value: &str) {
        if let Err(e) = self.try_insert(key, value) {
            panic!("{e}");
        }
    }

    /// Fallible [`insert`](Self::insert). On error no entry has been added,
    /// changed or lost.
    ///
    /// Besides the load threshold, the table also grows when the key's probe
    /// walk runs through every attempt without a free slot. That grow can
    /// happen below [`MAX_LOAD_PERCENT`], and a later delete may shrink the
    /// table back.
    pub fn try_insert(&mut self, key: &str, value: &str) -> Result<()> {
        if self.load_percentage() > MAX_LOAD_PERCENT {
            self.grow()?;
        }
        loop {
            match self.locate(key) {
                Lookup::Found(i) => {
                    self.slots[i] = Slot::Occupied(Entry::new(key, value));
                    return Ok(());
                }
                Lookup::Vacant(i) => {
                    self.slots[i] = Slot::Occupied(Entry::new(key, value));
                    self.count += 1;
                    return Ok(());
                }
                Lookup::Exhausted => {
                    log::warn!(
                        "probe sequence for key of length {} exhausted at capacity {}; growing",
                        key.len(),
                        self.capacity()
                    );
                    self.grow()?;
                }
            }
        }
    }

    /// Returns the value stored for `key`.
    pub fn search(&self, key: &str) -> Option<&str> {
        let i = self.find(key)?;
        match &self.slots[i] {
            Slot::Occupied(e) => Some(e.value.as_str()),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key` if present, leaving a tombstone in its slot.
    ///
    /// # Panics
    ///
    /// Panics if a shrink is needed and cannot allocate; see
    /// [`try_delete`](Self::try_delete).
    pub fn delete(&mut self, key: &str) {
        if let Err(e) = self.try_delete(key) {
            panic!("{e}");
        }
    }

    /// Fallible [`delete`](Self::delete). On error the table is unchanged.
    pub fn try_delete(&mut self, key: &str) -> Result<()> {
        if self.load_percentage() < MIN_LOAD_PERCENT {
            self.shrink()?;
        }
        if let Some(i) = self.find(key) {
            self.slots[i] = Slot::Tombstone;
            self.count -= 1;
        }
        Ok(())
    }

    /// Consumes the table, releasing every entry and the slot array.
    pub fn destroy(self) {
        log::trace!(
            "destroying table: {} entries, capacity {}",
            self.count,
            self.capacity()
        );
    }

    fn grow(&mut self) -> Result<()> {
        let doubled = self
            .base_size
            .checked_mul(2)
            .ok_or(TableError::CapacityOverflow {
                requested: self.base_size,
            })?;
        self.resize(doubled)
    }

    fn shrink(&mut self) -> Result<()> {
        self.resize(self.base_size / 2)
    }

    /// Rebuilds the table at `base_size`. Requests below [`MIN_BASE_SIZE`]
    /// are ignored. Live entries are re-inserted into the new storage, which
    /// is swapped in only once every entry has been placed.
    fn resize(&mut self, base_size: usize) -> Result<()> {
        if base_size < MIN_BASE_SIZE {
            return Ok(());
        }
        let mut fresh = Self::with_base_size(base_size)?;
        for slot in &self.slots {
            if let Slot::Occupied(e) = slot {
                fresh.try_insert(&e.key, &e.value)?;
            }
        }
        log::debug!(
            "resized table: base {} -> {}, capacity {} -> {}, {} entries",
            self.base_size,
            fresh.base_size,
            self.capacity(),
            fresh.capacity(),
            fresh.count
        );
        *self = fresh;
        Ok(())
    }

    /// Index of the slot holding `key`. Tombstones are skipped; the first
    /// empty slot ends the walk.
    fn find(&self, key: &str) -> Option<usize> {
        for i in Probe::new(key, self.capacity()) {
            match &self.slots[i] {
                Slot::Empty => return None,
                Slot::Occupied(e) if e.key == key => return Some(i),
                Slot::Occupied(_) | Slot::Tombstone => {}
            }
        }
        None
    }

    /// Like `find`, but also remembers the first reusable slot so a missing
    /// key can be placed there. A match anywhere before the first empty slot
    /// wins over an earlier tombstone.
    fn locate(&self, key: &str) -> Lookup {
        let mut free = None;
        for i in Probe::new(key, self.capacity()) {
            match &self.slots[i] {
                Slot::Empty => return Lookup::Vacant(free.unwrap_or(i)),
                Slot::Occupied(e) if e.key == key => return Lookup::Found(i),
                Slot::Occupied(_) => {}
                Slot::Tombstone => {
                    if free.is_none() {
                        free = Some(i);
                    }
                }
            }
        }
        match free {
            Some(i) => Lookup::Vacant(i),
            None => Lookup::Exhausted,
        }
    }

    #[cfg(test)]
    pub(crate) fn tombstones(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Tombstone))
            .count()
    }

    /// Panics if a structural invariant does not hold.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        use std::collections::HashSet;

        assert!(crate::prime::is_prime(self.capacity()).is_prime());
        assert!(self.capacity() >= MIN_BASE_SIZE);
        assert!(self.base_size >= MIN_BASE_SIZE);
        assert_eq!(self.capacity(), crate::prime::next_prime(self.base_size));

        let mut keys = HashSet::new();
        for (i, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied(e) = slot {
                assert!(keys.insert(e.key.as_str()), "duplicate key {:?}", e.key);
                assert_eq!(self.find(&e.key), Some(i), "key {:?} unreachable", e.key);
            }
        }
        assert_eq!(keys.len(), self.count);
        assert!(self.count <= self.capacity());
    }
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}
