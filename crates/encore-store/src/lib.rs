//! encore-store — Week persistence and entry bookkeeping.
//!
//! Holds the two live weeks (current and next) behind an explicit handle,
//! backed by JSON files on disk with an archive written on rollover.

pub mod week_store;

pub use week_store::WeekStore;
