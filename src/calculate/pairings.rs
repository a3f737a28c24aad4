//! Pairing generator.
//!
//! Pairs players who sit next to each other in the standings: positions
//! (0, 1), (2, 3), and so on. After a round with no draws, neighbours have
//! equal or nearly-equal win counts.
//!
//! This is a single-shot adjacent pairing, not a full Swiss matcher: it does
//! not avoid rematches and has no tiebreak history beyond the standings order.

use tracing::{debug, info};

use super::standings::compute_standings;
use crate::models::{Pairing, StandingRecord};
use crate::storage::Store;
use crate::tournament::{PrecheckError, TournamentError};

/// Split ranked standings into adjacent pairs.
///
/// Every player appears in exactly one pairing. Fails without producing any
/// pairs when there are no players or an odd number of them.
pub fn pair_adjacent(standings: &[StandingRecord]) -> Result<Vec<Pairing>, PrecheckError> {
    if standings.is_empty() {
        return Err(PrecheckError::NoPlayers);
    }
    if standings.len() % 2 != 0 {
        return Err(PrecheckError::OddPlayerCount(standings.len()));
    }

    Ok(standings
        .chunks_exact(2)
        .map(|pair| Pairing::from_standings(&pair[0], &pair[1]))
        .collect())
}

/// Compute next-round pairings from the store's current standings.
pub fn compute_pairings(store: &dyn Store) -> Result<Vec<Pairing>, TournamentError> {
    let standings = compute_standings(store)?;
    debug!("Pairing {} players", standings.len());

    let pairings = pair_adjacent(&standings)?;
    for (table, pairing) in pairings.iter().enumerate() {
        let [first, second] = pairing.ids();
        debug!("Table {}: {} vs {}", table + 1, first, second);
    }
    info!("Generated {} pairings", pairings.len());

    Ok(pairings)
}
