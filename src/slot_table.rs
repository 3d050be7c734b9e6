//! Packed storage of home buckets.
//!
//! Every slot carries the index of the entry stored in it (or [`EMPTY`]) and a
//! neighborhood bitmap. Bit `i` of slot `h`'s bitmap is set when slot
//! `(h + i) & mask` holds an entry whose home bucket is `h`. The bitmaps are
//! kept as native integers whose width is picked from the table capacity, so a
//! small table pays a single byte per bucket.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::Error;

/// Sentinel data index marking a slot with no entry.
pub(crate) const EMPTY: usize = usize::MAX;

/// Capacity of a freshly created (or cleared) table.
pub(crate) const MIN_CAPACITY: usize = 8;

/// Widest supported neighborhood, one native word.
pub(crate) const MAX_WIDTH: usize = 64;

/// Returns the neighborhood width used for a table of `capacity` slots.
///
/// The width is the smallest of 8, 16, 32 and 64 that is at least
/// `log2(capacity) + 1`.
pub(crate) fn neighborhood_width(capacity: usize) -> Result<usize, Error> {
    if !capacity.is_power_of_two() {
        return Err(Error::InvalidArgument("capacity must be a power of two"));
    }

    let required = capacity.trailing_zeros() as usize + 1;
    match required {
        0..=8 => Ok(8),
        9..=16 => Ok(16),
        17..=32 => Ok(32),
        33..=MAX_WIDTH => Ok(64),
        _ => Err(Error::InvalidArgument(
            "neighborhood width exceeds the native word size",
        )),
    }
}

#[derive(Clone)]
enum Hopmap {
    W8(Box<[u8]>),
    W16(Box<[u16]>),
    W32(Box<[u32]>),
    W64(Box<[u64]>),
}

macro_rules! each_width {
    ($hopmap:expr, $bits:ident => $body:expr) => {
        match $hopmap {
            Hopmap::W8($bits) => $body,
            Hopmap::W16($bits) => $body,
            Hopmap::W32($bits) => $body,
            Hopmap::W64($bits) => $body,
        }
    };
}

impl Hopmap {
    fn zeroed(width: usize, capacity: usize) -> Self {
        match width {
            8 => Hopmap::W8(vec![0; capacity].into_boxed_slice()),
            16 => Hopmap::W16(vec![0; capacity].into_boxed_slice()),
            32 => Hopmap::W32(vec![0; capacity].into_boxed_slice()),
            _ => Hopmap::W64(vec![0; capacity].into_boxed_slice()),
        }
    }

    #[inline(always)]
    fn get(&self, home: usize) -> u64 {
        each_width!(self, bits => u64::from(bits[home]))
    }

    #[inline(always)]
    fn set(&mut self, home: usize, offset: usize) {
        each_width!(self, bits => bits[home] |= 1 << offset)
    }

    #[inline(always)]
    fn clear(&mut self, home: usize, offset: usize) {
        each_width!(self, bits => bits[home] &= !(1 << offset))
    }
}

/// Iterator over the offsets flagged in a neighborhood bitmap, lowest first.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Neighbors(u64);

impl Neighbors {
    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub(crate) fn contains(&self, offset: usize) -> bool {
        offset < MAX_WIDTH && self.0 & (1 << offset) != 0
    }
}

impl Iterator for Neighbors {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let offset = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(offset)
    }
}

/// The fixed-capacity array of home buckets.
#[derive(Clone)]
pub(crate) struct SlotTable {
    indices: Box<[usize]>,
    hopmap: Hopmap,
    width: usize,
    mask: usize,
}

impl Debug for SlotTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let slots = (0..self.capacity())
            .map(|slot| {
                let data = if self.indices[slot] == EMPTY {
                    String::from("....")
                } else {
                    format!("{:04}", self.indices[slot])
                };
                let hops = self
                    .neighbors(slot)
                    .map(|offset| format!("{offset}"))
                    .collect::<Vec<_>>()
                    .join(",");
                format!("{data} [{hops}]")
            })
            .collect::<Vec<_>>();

        f.debug_struct("SlotTable")
            .field("capacity", &self.capacity())
            .field("width", &self.width)
            .field("slots", &slots)
            .finish()
    }
}

impl SlotTable {
    /// Allocates an empty table with `capacity` slots.
    pub(crate) fn allocate(capacity: usize) -> Result<Self, Error> {
        let width = neighborhood_width(capacity)?;
        Self::allocate_with_width(capacity, width)
    }

    /// Allocates an empty table, keeping at least `min_width` bits per
    /// neighborhood.
    pub(crate) fn allocate_with_width(capacity: usize, min_width: usize) -> Result<Self, Error> {
        let width = neighborhood_width(capacity)?.max(min_width);
        if width > MAX_WIDTH || !width.is_power_of_two() || width < 8 {
            return Err(Error::InvalidArgument("unsupported neighborhood width"));
        }
        if width > capacity {
            return Err(Error::InvalidArgument(
                "neighborhood wider than the table itself",
            ));
        }

        Ok(Self {
            indices: vec![EMPTY; capacity].into_boxed_slice(),
            hopmap: Hopmap::zeroed(width, capacity),
            width,
            mask: capacity - 1,
        })
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.mask + 1
    }

    #[inline(always)]
    pub(crate) fn width(&self) -> usize {
        self.width
    }

    /// Maps a hash to its home bucket.
    #[inline(always)]
    pub(crate) fn home(&self, hash: u64) -> usize {
        hash as usize & self.mask
    }

    /// Slot reached by stepping `offset` slots forward from `home`, wrapping.
    #[inline(always)]
    pub(crate) fn wrap(&self, home: usize, offset: usize) -> usize {
        home.wrapping_add(offset) & self.mask
    }

    /// Forward distance from `from` to `to`, wrapping.
    #[inline(always)]
    pub(crate) fn distance(&self, from: usize, to: usize) -> usize {
        to.wrapping_sub(from) & self.mask
    }

    /// Data index stored at `slot`, [`EMPTY`] for an open slot.
    #[inline(always)]
    pub(crate) fn data(&self, slot: usize) -> usize {
        self.indices[slot & self.mask]
    }

    #[inline(always)]
    pub(crate) fn is_open(&self, slot: usize) -> bool {
        self.data(slot) == EMPTY
    }

    /// Offsets recorded in the bitmap of `home`.
    #[inline(always)]
    pub(crate) fn neighbors(&self, home: usize) -> Neighbors {
        Neighbors(self.hopmap.get(home & self.mask))
    }

    /// Checked read of a whole slot.
    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn get_slot(&self, slot: usize) -> Result<(usize, Neighbors), Error> {
        if slot > self.mask {
            return Err(Error::InvalidArgument("slot index outside the table"));
        }
        Ok((self.indices[slot], Neighbors(self.hopmap.get(slot))))
    }

    /// Overwrites the data index of `slot`, leaving its bitmap untouched.
    pub(crate) fn set_data(&mut self, slot: usize, data: usize) -> Result<(), Error> {
        if slot > self.mask {
            return Err(Error::InvalidArgument("slot index outside the table"));
        }
        self.indices[slot] = data;
        Ok(())
    }

    /// Records that the slot `offset` past `home` holds one of `home`'s
    /// entries.
    pub(crate) fn mark_occupied(&mut self, home: usize, offset: usize) -> Result<(), Error> {
        self.check_bit(home, offset)?;
        if self.neighbors(home).contains(offset) {
            return Err(Error::InternalConsistency(
                "neighbor bit already set",
            ));
        }
        self.hopmap.set(home, offset);
        Ok(())
    }

    /// Inverse of [`SlotTable::mark_occupied`].
    pub(crate) fn clear_occupied(&mut self, home: usize, offset: usize) -> Result<(), Error> {
        self.check_bit(home, offset)?;
        if !self.neighbors(home).contains(offset) {
            return Err(Error::InternalConsistency(
                "clearing a neighbor bit that is not set",
            ));
        }
        self.hopmap.clear(home, offset);
        Ok(())
    }

    fn check_bit(&self, home: usize, offset: usize) -> Result<(), Error> {
        if home > self.mask {
            return Err(Error::InvalidArgument("home bucket outside the table"));
        }
        if offset >= self.width {
            return Err(Error::InvalidArgument("offset outside the neighborhood"));
        }
        Ok(())
    }

    /// Number of slots holding an entry.
    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn occupied(&self) -> usize {
        self.indices.iter().filter(|&&data| data != EMPTY).count()
    }

    /// Bytes used by the slot array and the bitmaps.
    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn allocated_bytes(&self) -> usize {
        self.capacity() * (core::mem::size_of::<usize>() + self.width / 8)
    }
}
