//! Derived views over the player and match store.
//!
//! - **standings**: win/match tallies and the deterministic ranking
//! - **pairings**: next-round pairings built from ranked standings

pub mod pairings;
pub mod standings;

pub use pairings::{compute_pairings, pair_adjacent};
pub use standings::{compute_standings, rank, tally};
