//! Neighborhood search and displacement.
//!
//! When a home bucket's neighborhood is full, entries are hopped toward it:
//! an open slot further along the table is pulled backward, one move at a
//! time, by relocating entries whose own neighborhoods still cover the open
//! slot. Every move keeps each entry within its home neighborhood and updates
//! the home bitmap, so the table is consistent between moves and a failed
//! walk leaves nothing to undo.

use super::HashTable;
use crate::error::Error;
use crate::slot_table::EMPTY;

impl<K, V> HashTable<K, V> {
    /// Offset of the first open slot in the neighborhood of `home`.
    pub(super) fn find_open_neighbor(&self, home: usize) -> Option<usize> {
        (0..self.slots.width()).find(|&offset| self.slots.is_open(self.slots.wrap(home, offset)))
    }

    /// Points an open slot near the home bucket of `hash` at array `index`.
    ///
    /// Returns `false` when no slot could be opened, in which case the table
    /// must grow.
    pub(super) fn claim_slot(&mut self, hash: u64, index: usize) -> Result<bool, Error> {
        let home = self.slots.home(hash);
        let offset = match self.find_open_neighbor(home) {
            Some(offset) => offset,
            None => {
                if !self.free_up(home)? {
                    return Ok(false);
                }
                self.find_open_neighbor(home).ok_or(Error::InternalConsistency(
                    "free-up succeeded without opening a slot",
                ))?
            }
        };

        self.slots.set_data(self.slots.wrap(home, offset), index)?;
        self.slots.mark_occupied(home, offset)?;
        Ok(true)
    }

    /// Opens a slot within the neighborhood of `target` by moving other
    /// entries, returning `false` if no sequence of moves can do it.
    pub(super) fn free_up(&mut self, target: usize) -> Result<bool, Error> {
        if self.find_open_neighbor(target).is_some() {
            return Ok(true);
        }

        // The occupant of `target` may belong to an earlier bucket that still
        // has room.
        let occupant = self.slots.data(target);
        if occupant != EMPTY {
            let occupant_home = self.slots.home(self.hash_at(occupant)?);
            if occupant_home != target {
                if let Some(offset) = self.find_open_neighbor(occupant_home) {
                    let old_offset = self.slots.distance(occupant_home, target);
                    self.relocate(occupant_home, old_offset, offset)?;
                    return Ok(true);
                }
            }
        }

        let width = self.slots.width();
        let Some(mut open) = (width..self.slots.capacity())
            .find(|&distance| self.slots.is_open(self.slots.wrap(target, distance)))
        else {
            trace_event!(bucket = target, "no open slot beyond the neighborhood");
            return Ok(false);
        };

        // `open` is the distance from `target` to the open slot and strictly
        // decreases with every move.
        while open >= width {
            let open_slot = self.slots.wrap(target, open);
            let mut moved = false;

            for distance in (open + 1 - width)..open {
                let slot = self.slots.wrap(target, distance);
                let index = self.slots.data(slot);
                if index == EMPTY {
                    return Err(Error::InternalConsistency(
                        "open slot found before the first open slot",
                    ));
                }

                let home = self.slots.home(self.hash_at(index)?);
                let old_offset = self.slots.distance(home, slot);
                let new_offset = self.slots.distance(home, open_slot);
                if old_offset >= width {
                    return Err(Error::InternalConsistency(
                        "entry stored outside its neighborhood",
                    ));
                }

                if new_offset < width && old_offset < new_offset {
                    self.relocate(home, old_offset, new_offset)?;
                    open = distance;
                    moved = true;
                    break;
                }
            }

            if !moved {
                trace_event!(
                    bucket = target,
                    distance = open,
                    "no entry can hop into the open slot"
                );
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Moves the entry of `home` at `from` to the open slot at `to`.
    fn relocate(&mut self, home: usize, from: usize, to: usize) -> Result<(), Error> {
        let from_slot = self.slots.wrap(home, from);
        let to_slot = self.slots.wrap(home, to);

        let index = self.slots.data(from_slot);
        if index == EMPTY {
            return Err(Error::InternalConsistency("relocating an open slot"));
        }
        if !self.slots.is_open(to_slot) {
            return Err(Error::InternalConsistency(
                "relocating onto an occupied slot",
            ));
        }

        self.slots.clear_occupied(home, from)?;
        self.slots.mark_occupied(home, to)?;
        self.slots.set_data(to_slot, index)?;
        self.slots.set_data(from_slot, EMPTY)
    }
}
