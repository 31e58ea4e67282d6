//! encore-ranker — Ballot sanitisation and elimination-ranking engine.
//!
//! Pure in-memory transformations: raw ballots go in, duplicate and
//! out-of-range ratings are dropped, per-voter scales are normalised, and
//! the entries come back in a strict total order with placements assigned.

pub mod normalise;
pub mod rank;
pub mod sanitise;

pub use rank::{count_valid_entries, rank_entries};
pub use sanitise::sanitise_votes;
