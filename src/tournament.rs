//! Tournament operations over an injected store.
//!
//! [`Tournament`] is the entry point for callers: it validates inputs, hands
//! mutations to the [`Store`], and runs the standings and pairing
//! calculations. It keeps no state of its own beyond the store handle and its
//! settings, so concurrent callers only rely on the store's own atomicity.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::calculate::{compute_pairings, compute_standings};
use crate::models::{MatchRecord, Pairing, PlayerId, StandingRecord};
use crate::storage::{StorageError, Store};

/// A precondition was violated; nothing was written or computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrecheckError {
    #[error("No players are registered")]
    NoPlayers,

    #[error("Pairing needs an even number of players, found {0}")]
    OddPlayerCount(usize),

    #[error("Player {0} cannot play against themselves")]
    SelfMatch(PlayerId),

    #[error("Player name must not be empty")]
    EmptyName,
}

/// Errors returned by tournament operations.
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("Store error: {0}")]
    Store(#[from] StorageError),

    #[error("Precondition failed: {0}")]
    Precheck(#[from] PrecheckError),

    #[error("Player not found: {0}")]
    NotFound(PlayerId),
}

/// Behaviour switches for a [`Tournament`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentSettings {
    /// Reject match reports naming players the store does not know
    #[serde(default)]
    pub validate_player_ids: bool,

    /// Hand each computed pairing to the store for later display
    #[serde(default = "default_stage_pairings")]
    pub stage_pairings: bool,
}

fn default_stage_pairings() -> bool {
    true
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            validate_player_ids: false,
            stage_pairings: default_stage_pairings(),
        }
    }
}

/// Swiss-system tournament bound to a store.
#[derive(Clone)]
pub struct Tournament {
    store: Arc<dyn Store>,
    settings: TournamentSettings,
}

impl Tournament {
    pub fn new(store: Arc<dyn Store>, settings: TournamentSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &TournamentSettings {
        &self.settings
    }

    /// Register a player. Names need not be unique.
    pub fn register_player(&self, name: &str) -> Result<PlayerId, TournamentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PrecheckError::EmptyName.into());
        }

        let id = self.store.insert_player(name)?;
        info!("Registered player {} as {}", name, id);
        Ok(id)
    }

    /// Record the result of one match.
    pub fn report_match(&self, winner: PlayerId, loser: PlayerId) -> Result<(), TournamentError> {
        let record = MatchRecord::new(winner, loser).inspect_err(|e| {
            warn!("Rejected match report: {}", e);
        })?;

        if self.settings.validate_player_ids {
            for id in [winner, loser] {
                if self.store.find_player(id)?.is_none() {
                    warn!("Rejected match report: unknown player {}", id);
                    return Err(TournamentError::NotFound(id));
                }
            }
        }

        self.store.insert_match(&record)?;
        info!("Recorded match: {} beat {}", winner, loser);
        Ok(())
    }

    /// Remove all match results. Players stay registered.
    ///
    /// Staged pairings are cleared as well, since they were computed from
    /// records that no longer exist.
    pub fn reset_matches(&self) -> Result<(), TournamentError> {
        self.store.delete_all_matches()?;
        self.store.stage_pairings(&[])?;
        info!("Deleted all matches");
        Ok(())
    }

    /// Remove all players and any staged pairings.
    pub fn reset_players(&self) -> Result<(), TournamentError> {
        self.store.delete_all_players()?;
        self.store.stage_pairings(&[])?;
        info!("Deleted all players");
        Ok(())
    }

    /// Number of registered players.
    pub fn count_players(&self) -> Result<usize, TournamentError> {
        Ok(self.store.count_players()?)
    }

    /// Current standings, ranked by wins then player id.
    pub fn standings(&self) -> Result<Vec<StandingRecord>, TournamentError> {
        Ok(compute_standings(self.store.as_ref())?)
    }

    /// Pairings for the next round.
    ///
    /// Either every registered player is paired or an error is returned; the
    /// result is only staged once it is complete.
    pub fn pairings(&self) -> Result<Vec<Pairing>, TournamentError> {
        let pairings = compute_pairings(self.store.as_ref())?;

        if self.settings.stage_pairings {
            self.store.stage_pairings(&pairings)?;
        }

        Ok(pairings)
    }

    /// Pairings most recently staged in the store.
    pub fn staged_pairings(&self) -> Result<Vec<Pairing>, TournamentError> {
        Ok(self.store.staged_pairings()?)
    }
}
