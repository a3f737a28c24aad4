//! Derived standings row.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// One player's line in the standings table.
///
/// This is a computed view over players and matches; it has no persisted
/// identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRecord {
    /// Player identifier
    pub id: PlayerId,

    /// Player name as registered
    pub name: String,

    /// Matches won
    pub wins: u32,

    /// Matches played, as winner or loser
    pub matches: u32,
}

impl StandingRecord {
    /// Create a standings row.
    pub fn new(id: PlayerId, name: impl Into<String>, wins: u32, matches: u32) -> Self {
        Self {
            id,
            name: name.into(),
            wins,
            matches,
        }
    }

    /// Matches lost.
    pub fn losses(&self) -> u32 {
        self.matches.saturating_sub(self.wins)
    }

    /// Check that the row is internally consistent.
    pub fn validate(&self) -> Result<(), String> {
        if self.wins > self.matches {
            return Err(format!(
                "player {} has {} wins but only {} matches played",
                self.id, self.wins, self.matches
            ));
        }
        Ok(())
    }
}
