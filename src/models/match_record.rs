//! Match result model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PlayerId;
use crate::tournament::PrecheckError;

/// The outcome of a single match. There are no draws: every match has
/// exactly one winner and one loser, and they are different players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Player who won
    pub winner: PlayerId,

    /// Player who lost
    pub loser: PlayerId,

    /// When the result was reported
    pub recorded_at: DateTime<Utc>,
}

impl MatchRecord {
    /// Create a match record, rejecting a player matched against themselves.
    pub fn new(winner: PlayerId, loser: PlayerId) -> Result<Self, PrecheckError> {
        if winner == loser {
            return Err(PrecheckError::SelfMatch(winner));
        }

        Ok(Self {
            winner,
            loser,
            recorded_at: Utc::now(),
        })
    }
}
