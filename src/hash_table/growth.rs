//! Growth policy and rehashing.

use super::HashTable;
use super::capacity_for;
use crate::error::Error;
use crate::slot_table::MAX_WIDTH;
use crate::slot_table::SlotTable;

/// Tables below this many slots quadruple on growth, larger ones double.
const QUADRUPLE_BELOW: usize = 1 << 16;

/// Widest neighborhood that growth will reach for a single repeated hash.
const WIDEST_GROWN_WIDTH: usize = 32;

/// Next capacity under the growth policy.
pub(super) fn next_capacity(capacity: usize) -> Result<usize, Error> {
    let factor = if capacity < QUADRUPLE_BELOW { 4 } else { 2 };
    capacity
        .checked_mul(factor)
        .ok_or(Error::InvalidArgument("capacity overflow"))
}

impl<K, V> HashTable<K, V> {
    /// Grows the slot table one step and rehashes every entry.
    #[cold]
    pub(super) fn grow(&mut self) -> Result<(), Error> {
        let capacity = next_capacity(self.slots.capacity())?;
        self.resize(capacity)
    }

    /// Makes room for at least `additional` more entries without growth.
    pub(crate) fn reserve(&mut self, additional: usize) -> Result<(), Error> {
        let required = self.len().saturating_add(additional);
        let capacity = capacity_for(required)?;
        if capacity > self.slots.capacity() {
            self.resize(capacity)?;
        }
        Ok(())
    }

    /// Replaces the slot table with an empty one of `capacity` slots and
    /// places every entry again, in array order.
    ///
    /// A freshly grown table is sparse enough that every entry must find a
    /// slot; if one does not, the old table is kept and the failure reported
    /// as a broken invariant.
    pub(super) fn resize(&mut self, capacity: usize) -> Result<(), Error> {
        if !capacity.is_power_of_two() {
            return Err(Error::InvalidArgument("capacity must be a power of two"));
        }
        if capacity <= self.slots.capacity() {
            return Err(Error::InvalidArgument("tables only grow"));
        }

        let slots = SlotTable::allocate_with_width(capacity, self.slots.width())?;
        let old = core::mem::replace(&mut self.slots, slots);

        debug_event!(
            entries = self.len(),
            old_capacity = old.capacity(),
            new_capacity = capacity,
            old_width = old.width(),
            new_width = self.slots.width(),
            "growing hop table"
        );

        for index in 0..self.len() {
            let hash = self.hash_at(index)?;
            if !self.claim_slot(hash, index)? {
                self.slots = old;
                return Err(Error::InternalConsistency(
                    "entry could not be placed in a freshly grown table",
                ));
            }
        }

        Ok(())
    }

    /// Rejects growth that cannot help.
    ///
    /// Entries sharing one full hash always share a home bucket, so only a
    /// wider neighborhood can take more of them. Going past 32 bits takes
    /// 2^32 slots, so a full neighborhood of identical hashes is refused from
    /// width 32 on, and any full neighborhood is refused at 64.
    pub(super) fn check_growable(&self, hash: u64) -> Result<(), Error> {
        let home = self.slots.home(hash);
        let width = self.slots.width();
        let neighbors = self.slots.neighbors(home);
        if neighbors.count() < width {
            return Ok(());
        }
        if width == MAX_WIDTH {
            return Err(Error::InvalidArgument(
                "neighborhood full at the maximum width",
            ));
        }
        if width >= WIDEST_GROWN_WIDTH {
            for offset in neighbors {
                let index = self.slots.data(self.slots.wrap(home, offset));
                if self.hash_at(index)? != hash {
                    return Ok(());
                }
            }
            return Err(Error::InvalidArgument(
                "neighborhood full of entries with the same hash",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_quadruples_then_doubles() {
        assert_eq!(next_capacity(8), Ok(32));
        assert_eq!(next_capacity(1 << 14), Ok(1 << 16));
        assert_eq!(next_capacity(1 << 16), Ok(1 << 17));
        assert!(matches!(
            next_capacity(usize::MAX / 2 + 1),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn resize_rejects_bad_capacities() {
        let mut table: HashTable<u64, u64> = HashTable::with_capacity(20);
        assert!(matches!(table.resize(48), Err(Error::InvalidArgument(_))));
        assert!(matches!(table.resize(32), Err(Error::InvalidArgument(_))));
        assert!(matches!(table.resize(16), Err(Error::InvalidArgument(_))));
        assert_eq!(table.capacity(), 32);
    }

    #[test]
    fn resize_keeps_entries_in_array_order() {
        let mut table: HashTable<u64, u64> = HashTable::new();
        for key in 0..6u64 {
            table.insert_new(key.wrapping_mul(0x9E37_79B9_7F4A_7C15), key, key * 10).unwrap();
        }
        assert_eq!(table.capacity(), 8);

        table.resize(256).unwrap();
        assert_eq!(table.capacity(), 256);
        assert_eq!(table.neighborhood_width(), 16);
        assert_eq!(table.keys(), &[0, 1, 2, 3, 4, 5]);
        for key in 0..6u64 {
            let hash = key.wrapping_mul(0x9E37_79B9_7F4A_7C15);
            let found = table.find(hash, |k| *k == key).unwrap().unwrap();
            assert_eq!(found.index, key as usize);
            assert_eq!(*table.entry_at(found.index).1, key * 10);
        }
        table.check_invariants().unwrap();
    }

    #[test]
    fn density_triggers_growth() {
        let mut table: HashTable<u64, ()> = HashTable::new();
        for key in 0..6u64 {
            table.insert_new(key, key, ()).unwrap();
        }
        assert_eq!(table.capacity(), 8);

        // 7 / 8 reaches the maximum density.
        table.insert_new(6, 6, ()).unwrap();
        assert_eq!(table.capacity(), 32);
        table.check_invariants().unwrap();
    }

    #[test]
    fn reserve_grows_once() {
        let mut table: HashTable<u64, ()> = HashTable::new();
        table.reserve(1000).unwrap();
        let capacity = table.capacity();
        assert_eq!(capacity, 2048);
        assert_eq!(table.neighborhood_width(), 16);

        table.reserve(10).unwrap();
        assert_eq!(table.capacity(), capacity);
    }

    #[test]
    fn repeated_hash_stops_at_width_32() {
        let mut table: HashTable<u64, ()> = HashTable::new();
        for key in 0..32u64 {
            table.insert_new(0, key, ()).unwrap();
        }
        assert_eq!(table.neighborhood_width(), 32);
        let capacity = table.capacity();
        assert_eq!(capacity, 1 << 17);

        assert!(matches!(
            table.insert_new(0, 32, ()),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(table.len(), 32);
        assert_eq!(table.capacity(), capacity);
        table.check_invariants().unwrap();
    }

    #[test]
    fn shared_home_with_distinct_hashes_keeps_growing() {
        // Every hash lands in bucket 0 until the table reaches 2^18 slots.
        let mut table: HashTable<u64, ()> = HashTable::new();
        for key in 0..40u64 {
            table.insert_new(key << 17, key, ()).unwrap();
        }
        assert_eq!(table.len(), 40);
        assert_eq!(table.capacity(), 1 << 18);
        for key in 0..40u64 {
            let found = table.find(key << 17, |k| *k == key).unwrap().unwrap();
            assert_eq!(found.index, key as usize);
        }
        table.check_invariants().unwrap();
    }
}
