//! Registered tournament player.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PlayerId;

/// A player registered with the tournament.
///
/// Players are only ever created by registration and removed by a bulk
/// reset; nothing mutates them in between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Identifier assigned by the store
    pub id: PlayerId,

    /// Display name (not required to be unique)
    pub name: String,

    /// When the player was registered
    pub registered_at: DateTime<Utc>,
}

impl Player {
    /// Create a player record for a freshly assigned id.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            registered_at: Utc::now(),
        }
    }
}
