//! The hopscotch table that backs [`HashMap`](crate::HashMap).
//!
//! Entries live in three dense, parallel arrays (keys, values and cached
//! hashes) with no holes. The [`SlotTable`] maps home buckets to array
//! indices: every entry sits within `width` slots of its home bucket, and the
//! home bucket's bitmap records where. Lookups therefore touch at most `width`
//! slots no matter how loaded the table is.
//!
//! Removal swaps the last entry into the hole and repoints the slot that
//! referenced it, so iteration order is insertion order until the first
//! removal.

#[cfg(any(test, feature = "stats"))]
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::Error;
use crate::slot_table::EMPTY;
use crate::slot_table::MIN_CAPACITY;
use crate::slot_table::SlotTable;

mod displace;
mod growth;

/// Maximum density numerator: growth happens once `len / capacity` reaches
/// `MAX_DENSITY_NUM / MAX_DENSITY_DEN`.
const MAX_DENSITY_NUM: u128 = 4;
const MAX_DENSITY_DEN: u128 = 5;

#[inline(always)]
fn exceeds_density(len: usize, capacity: usize) -> bool {
    len as u128 * MAX_DENSITY_DEN >= capacity as u128 * MAX_DENSITY_NUM
}

/// Smallest slot count that holds `len` entries below the maximum density.
fn capacity_for(len: usize) -> Result<usize, Error> {
    let mut capacity = MIN_CAPACITY;
    while exceeds_density(len, capacity) {
        capacity = capacity
            .checked_mul(2)
            .ok_or(Error::InvalidArgument("capacity overflow"))?;
    }
    Ok(capacity)
}

/// Where a key was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Found {
    /// Slot holding the entry.
    pub(crate) slot: usize,
    /// Index into the entry arrays.
    pub(crate) index: usize,
    /// Home bucket of the entry.
    pub(crate) home: usize,
    /// Distance from `home` to `slot`.
    pub(crate) offset: usize,
}

/// Debug statistics for hash table analysis.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of entries currently in the table
    pub populated: usize,
    /// Number of slots in the slot table
    pub capacity: usize,
    /// Neighborhood width in bits
    pub neighborhood_width: usize,
    /// Number of slots currently occupied
    pub occupied_slots: usize,
    /// Number of entries stored away from their home bucket
    pub displaced_entries: usize,
    /// Largest distance between an entry and its home bucket
    pub max_displacement: usize,
    /// Load factor (populated / capacity)
    pub load_factor: f64,
    /// Bytes used by the slot table
    pub slot_bytes: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hop Map Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.populated,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Neighborhood: {} bits, {} displaced entries, max displacement {}",
            self.neighborhood_width, self.displaced_entries, self.max_displacement
        );
        println!("Occupied slots: {}", self.occupied_slots);
        println!("Slot table: {} bytes", self.slot_bytes);
    }
}

/// Hopscotch table over dense key/value arrays.
///
/// Operations take the key's hash plus an equality predicate, the map layer
/// supplies both.
#[derive(Clone)]
pub(crate) struct HashTable<K, V> {
    slots: SlotTable,
    keys: Vec<K>,
    values: Vec<V>,
    hashes: Vec<u64>,
}

impl<K, V> Debug for HashTable<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HashTable")
            .field("populated", &self.keys.len())
            .field("hashes", &self.hashes)
            .field("slots", &self.slots)
            .finish()
    }
}

impl<K, V> HashTable<K, V> {
    #[cfg(test)]
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a table that holds `capacity` entries without growing.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let slots = capacity_for(capacity)
            .and_then(SlotTable::allocate)
            .expect("capacity overflow");
        Self {
            slots,
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            hashes: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of slots in the slot table.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    #[inline]
    pub(crate) fn neighborhood_width(&self) -> usize {
        self.slots.width()
    }

    #[inline]
    pub(crate) fn keys(&self) -> &[K] {
        &self.keys
    }

    #[inline]
    pub(crate) fn values(&self) -> &[V] {
        &self.values
    }

    #[inline]
    pub(crate) fn values_mut(&mut self) -> &mut [V] {
        &mut self.values
    }

    #[inline]
    pub(crate) fn entries_mut(&mut self) -> (&[K], &mut [V]) {
        (&self.keys, &mut self.values)
    }

    /// Resets the table to the freshly created state.
    pub(crate) fn clear(&mut self) {
        self.keys.clear();
        self.values.clear();
        self.hashes.clear();
        self.slots = SlotTable::allocate(MIN_CAPACITY).expect("minimum capacity is valid");
    }

    /// Takes every entry out of the table, leaving it freshly created.
    pub(crate) fn take_entries(&mut self) -> (Vec<K>, Vec<V>) {
        let keys = core::mem::take(&mut self.keys);
        let values = core::mem::take(&mut self.values);
        self.clear();
        (keys, values)
    }

    #[inline]
    fn hash_at(&self, index: usize) -> Result<u64, Error> {
        self.hashes
            .get(index)
            .copied()
            .ok_or(Error::InternalConsistency("slot refers past the entry arrays"))
    }

    /// Searches the neighborhood of `hash`'s home bucket for an entry
    /// accepted by `eq`.
    pub(crate) fn find(&self, hash: u64, eq: impl Fn(&K) -> bool) -> Result<Option<Found>, Error> {
        let home = self.slots.home(hash);
        for offset in self.slots.neighbors(home) {
            let slot = self.slots.wrap(home, offset);
            let index = self.slots.data(slot);
            if index == EMPTY {
                return Err(Error::InternalConsistency(
                    "neighbor bit set for an empty slot",
                ));
            }
            if self.hash_at(index)? == hash && eq(&self.keys[index]) {
                return Ok(Some(Found {
                    slot,
                    index,
                    home,
                    offset,
                }));
            }
        }

        Ok(None)
    }

    /// Finds the slot that references array `index`.
    pub(crate) fn locate(&self, index: usize) -> Result<Found, Error> {
        let home = self.slots.home(self.hash_at(index)?);
        self.slots
            .neighbors(home)
            .map(|offset| (offset, self.slots.wrap(home, offset)))
            .find(|&(_, slot)| self.slots.data(slot) == index)
            .map(|(offset, slot)| Found {
                slot,
                index,
                home,
                offset,
            })
            .ok_or(Error::InternalConsistency(
                "entry missing from its home neighborhood",
            ))
    }

    #[inline]
    pub(crate) fn entry_at(&self, index: usize) -> (&K, &V) {
        (&self.keys[index], &self.values[index])
    }

    #[inline]
    pub(crate) fn entry_at_mut(&mut self, index: usize) -> (&K, &mut V) {
        (&self.keys[index], &mut self.values[index])
    }

    /// Overwrites the key and value stored at `index`, returning the old pair.
    pub(crate) fn replace_at(&mut self, index: usize, key: K, value: V) -> (K, V) {
        (
            core::mem::replace(&mut self.keys[index], key),
            core::mem::replace(&mut self.values[index], value),
        )
    }

    /// Inserts an entry known to be absent and returns its array index.
    ///
    /// Grows the table when no slot can be opened near the home bucket, and
    /// again afterwards if the insertion pushed the table to its maximum
    /// density.
    pub(crate) fn insert_new(&mut self, hash: u64, key: K, value: V) -> Result<usize, Error> {
        let index = self.keys.len();
        while !self.claim_slot(hash, index)? {
            self.check_growable(hash)?;
            self.grow()?;
        }

        self.keys.push(key);
        self.values.push(value);
        self.hashes.push(hash);

        if exceeds_density(self.keys.len(), self.slots.capacity()) {
            self.grow()?;
        }

        Ok(index)
    }

    /// Removes the entry at `found`, compacting the arrays by moving the last
    /// entry into the vacated index.
    pub(crate) fn remove_at(&mut self, found: Found) -> Result<(K, V), Error> {
        let Found {
            slot,
            index,
            home,
            offset,
        } = found;
        if self.slots.data(slot) != index {
            return Err(Error::InternalConsistency(
                "removal target does not match its slot",
            ));
        }

        self.slots.clear_occupied(home, offset)?;
        self.slots.set_data(slot, EMPTY)?;

        let last = self.keys.len() - 1;
        if index != last {
            let moved = self.locate(last)?;
            self.slots.set_data(moved.slot, index)?;
        }

        self.hashes.swap_remove(index);
        let key = self.keys.swap_remove(index);
        let value = self.values.swap_remove(index);
        Ok((key, value))
    }

    /// Removes and returns the entry at the end of the arrays.
    pub(crate) fn pop_last(&mut self) -> Result<Option<(K, V)>, Error> {
        if self.keys.is_empty() {
            return Ok(None);
        }
        let found = self.locate(self.keys.len() - 1)?;
        self.remove_at(found).map(Some)
    }

    /// Keeps only the entries accepted by `keep`.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&K, &mut V) -> bool) -> Result<(), Error> {
        // Walking backward means the entry swapped into a hole has already
        // been visited.
        for index in (0..self.keys.len()).rev() {
            if !keep(&self.keys[index], &mut self.values[index]) {
                let found = self.locate(index)?;
                self.remove_at(found)?;
            }
        }
        Ok(())
    }

    /// Verifies every structural invariant of the table.
    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn check_invariants(&self) -> Result<(), Error> {
        let capacity = self.slots.capacity();
        if !capacity.is_power_of_two() || capacity < MIN_CAPACITY {
            return Err(Error::InternalConsistency("capacity is not a power of two"));
        }
        if crate::slot_table::neighborhood_width(capacity)? != self.slots.width() {
            return Err(Error::InternalConsistency(
                "neighborhood width does not match capacity",
            ));
        }
        let len = self.keys.len();
        if self.values.len() != len || self.hashes.len() != len {
            return Err(Error::InternalConsistency("entry arrays differ in length"));
        }
        if len > 0 && exceeds_density(len, capacity) {
            return Err(Error::InternalConsistency("table exceeds maximum density"));
        }

        let mut referenced = vec![false; len];
        for home in 0..capacity {
            let (data, neighbors) = self.slots.get_slot(home)?;
            if data != EMPTY && data >= len {
                return Err(Error::InternalConsistency(
                    "slot refers past the entry arrays",
                ));
            }
            if neighbors.is_empty() {
                continue;
            }
            for offset in neighbors {
                if offset >= self.slots.width() {
                    return Err(Error::InternalConsistency("bit set beyond the neighborhood"));
                }
                let index = self.slots.data(self.slots.wrap(home, offset));
                if index == EMPTY || index >= len {
                    return Err(Error::InternalConsistency(
                        "neighbor bit set for an empty slot",
                    ));
                }
                if self.slots.home(self.hashes[index]) != home {
                    return Err(Error::InternalConsistency(
                        "entry flagged by a bucket that is not its home",
                    ));
                }
                if core::mem::replace(&mut referenced[index], true) {
                    return Err(Error::InternalConsistency("entry referenced twice"));
                }
            }
        }

        if referenced.iter().any(|seen| !seen) {
            return Err(Error::InternalConsistency(
                "entry not reachable from its home bucket",
            ));
        }
        if self.slots.occupied() != len {
            return Err(Error::InternalConsistency(
                "occupied slot not flagged by any home bucket",
            ));
        }
        Ok(())
    }

    /// Computes how many entries sit at each distance from their home bucket.
    ///
    /// The returned vector has one bin per neighborhood offset.
    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn probe_histogram(&self) -> Vec<usize> {
        let mut hist = vec![0usize; self.slots.width()];
        for home in 0..self.slots.capacity() {
            for offset in self.slots.neighbors(home) {
                hist[offset] += 1;
            }
        }
        hist
    }

    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn debug_stats(&self) -> DebugStats {
        let hist = self.probe_histogram();
        let capacity = self.slots.capacity();
        DebugStats {
            populated: self.keys.len(),
            capacity,
            neighborhood_width: self.slots.width(),
            occupied_slots: self.slots.occupied(),
            displaced_entries: hist.iter().skip(1).sum(),
            max_displacement: hist.iter().rposition(|&count| count > 0).unwrap_or(0),
            load_factor: self.keys.len() as f64 / capacity as f64,
            slot_bytes: self.slots.allocated_bytes(),
        }
    }
}
