//! Pairing model — a head-to-head matchup for the next round.

use serde::{Deserialize, Serialize};

use super::{PlayerId, StandingRecord};

/// Two players drawn together for the next round.
///
/// The pair is unordered as far as the tournament is concerned; player 1 is
/// simply the one ranked higher in the standings it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    /// Player 1 id
    pub player1_id: PlayerId,

    /// Player 1 name
    pub player1_name: String,

    /// Player 2 id
    pub player2_id: PlayerId,

    /// Player 2 name
    pub player2_name: String,
}

impl Pairing {
    /// Create a pairing from explicit ids and names.
    pub fn new(
        player1_id: PlayerId,
        player1_name: String,
        player2_id: PlayerId,
        player2_name: String,
    ) -> Self {
        Self {
            player1_id,
            player1_name,
            player2_id,
            player2_name,
        }
    }

    /// Build a pairing from two standings rows, keeping id and name as given.
    pub fn from_standings(first: &StandingRecord, second: &StandingRecord) -> Self {
        Self::new(
            first.id,
            first.name.clone(),
            second.id,
            second.name.clone(),
        )
    }

    /// Both player ids, higher-ranked first.
    pub fn ids(&self) -> [PlayerId; 2] {
        [self.player1_id, self.player2_id]
    }
}
