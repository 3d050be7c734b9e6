#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

cfg_if::cfg_if! {
    if #[cfg(feature = "tracing")] {
        macro_rules! debug_event {
            ($($arg:tt)+) => { tracing::debug!($($arg)+) };
        }
        macro_rules! trace_event {
            ($($arg:tt)+) => { tracing::trace!($($arg)+) };
        }
    } else {
        macro_rules! debug_event {
            ($($arg:tt)+) => {};
        }
        macro_rules! trace_event {
            ($($arg:tt)+) => {};
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used when none is specified.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used when none is specified.
        pub type DefaultHashBuilder = std::collections::hash_map::RandomState;
    } else {
        compile_error!("hop-map needs the `foldhash` or `std` feature to pick a default hasher");
    }
}

/// Error kinds reported by the map.
pub mod error;

/// A HashMap implementation using hopscotch hashing.
///
/// This module provides a `HashMap` that keeps its entries in dense,
/// insertion-ordered arrays and indexes them through a hopscotch slot table.
pub mod hash_map;

mod hash_table;
mod slot_table;

#[cfg(test)]
mod proptests;

pub use error::Error;
pub use hash_map::HashMap;
#[cfg(any(test, feature = "stats"))]
pub use hash_table::DebugStats;
