//! In-process store.
//!
//! Same contract as the JSONL store, without touching the filesystem.

use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use super::{next_player_id, StorageError, Store};
use crate::calculate::standings::{rank, tally};
use crate::models::{MatchRecord, Pairing, Player, PlayerId, StandingRecord};

#[derive(Debug, Default)]
struct Tables {
    players: Vec<Player>,
    matches: Vec<MatchRecord>,
    pairings: Vec<Pairing>,
    last_player_id: Option<PlayerId>,
}

/// Store backed by vectors behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the tables for the duration of one operation.
    fn session(&self) -> Result<MutexGuard<'_, Tables>, StorageError> {
        self.tables.lock().map_err(|_| StorageError::Poisoned)
    }

    /// Number of stored match results.
    pub fn match_count(&self) -> Result<usize, StorageError> {
        Ok(self.session()?.matches.len())
    }
}

impl Store for MemoryStore {
    fn insert_player(&self, name: &str) -> Result<PlayerId, StorageError> {
        let mut tables = self.session()?;
        let id = next_player_id(tables.last_player_id, &tables.players, &tables.matches);
        tables.players.push(Player::new(id, name));
        tables.last_player_id = Some(id);
        debug!("Inserted player {} ({})", id, name);
        Ok(id)
    }

    fn delete_all_players(&self) -> Result<(), StorageError> {
        self.session()?.players.clear();
        Ok(())
    }

    fn count_players(&self) -> Result<usize, StorageError> {
        Ok(self.session()?.players.len())
    }

    fn find_player(&self, id: PlayerId) -> Result<Option<Player>, StorageError> {
        Ok(self
            .session()?
            .players
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    fn insert_match(&self, record: &MatchRecord) -> Result<(), StorageError> {
        self.session()?.matches.push(record.clone());
        Ok(())
    }

    fn delete_all_matches(&self) -> Result<(), StorageError> {
        self.session()?.matches.clear();
        Ok(())
    }

    fn read_standings(&self) -> Result<Vec<StandingRecord>, StorageError> {
        let tables = self.session()?;
        let mut standings = tally(&tables.players, &tables.matches);
        rank(&mut standings);
        Ok(standings)
    }

    fn stage_pairings(&self, pairings: &[Pairing]) -> Result<(), StorageError> {
        self.session()?.pairings = pairings.to_vec();
        Ok(())
    }

    fn staged_pairings(&self) -> Result<Vec<Pairing>, StorageError> {
        Ok(self.session()?.pairings.clone())
    }
}
