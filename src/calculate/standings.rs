//! Standings engine.
//!
//! Derives each player's win and matches-played counts from the match log and
//! orders players for pairing. Ranking is by wins descending; players level on
//! wins are ordered by ascending player id, so the order never depends on how
//! a store happens to return its rows.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::models::{MatchRecord, Player, PlayerId, StandingRecord};
use crate::storage::{StorageError, Store};

/// Aggregate wins and matches played for every player, in player order.
///
/// Players with no matches are included with zero wins and zero matches.
/// Matches naming a player that is not in `players` are ignored.
pub fn tally(players: &[Player], matches: &[MatchRecord]) -> Vec<StandingRecord> {
    let mut counts: HashMap<PlayerId, (u32, u32)> = HashMap::new();

    for record in matches {
        let winner = counts.entry(record.winner).or_default();
        winner.0 += 1;
        winner.1 += 1;
        counts.entry(record.loser).or_default().1 += 1;
    }

    players
        .iter()
        .map(|player| {
            let (wins, played) = counts.get(&player.id).copied().unwrap_or_default();
            StandingRecord::new(player.id, player.name.clone(), wins, played)
        })
        .collect()
}

/// Ranking order: more wins first, then lower player id.
pub fn compare(a: &StandingRecord, b: &StandingRecord) -> Ordering {
    b.wins.cmp(&a.wins).then_with(|| a.id.cmp(&b.id))
}

/// Sort standings into ranking order.
pub fn rank(standings: &mut [StandingRecord]) {
    standings.sort_by(compare);
}

/// Read standings from the store, validate them and return them ranked.
///
/// The ranking is re-applied here so callers get the documented order even
/// from a store that does not honour it.
pub fn compute_standings(store: &dyn Store) -> Result<Vec<StandingRecord>, StorageError> {
    let mut standings = store.read_standings()?;

    for record in &standings {
        record.validate().map_err(StorageError::InvalidRecord)?;
    }

    rank(&mut standings);
    debug!("Computed standings for {} players", standings.len());

    Ok(standings)
}
