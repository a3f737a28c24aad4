//! # Swiss Pairings
//!
//! Player registry, match results, standings and next-round pairings for a
//! Swiss-system tournament.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, matches, standings, pairings)
//! - **storage**: The `Store` capability and its JSONL and in-memory backends
//! - **calculate**: Standings ranking and adjacent pairing
//! - **tournament**: Validated operations over an injected store
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation
//!
//! Pairing assumes an even number of players and no draws; an odd or empty
//! field is reported as an error rather than handled with a bye.

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;
pub mod tournament;

pub use models::*;
pub use tournament::{PrecheckError, Tournament, TournamentError, TournamentSettings};
