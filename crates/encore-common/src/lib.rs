//! encore-common — Shared entity types and errors used across all Encore crates.

pub mod entities;
pub mod error;

// Re-export commonly used types
pub use entities::{Entry, Rating, Vote, Week, WhichWeek};
pub use error::{EncoreError, Result};
