//! Durable player and match storage.
//!
//! The tournament core talks to storage only through the [`Store`] trait:
//! - [`JsonlStore`]: JSON Lines files under a data directory
//! - [`MemoryStore`]: process-local vectors, for tests and throwaway runs

mod jsonl;
mod memory;

pub use jsonl::*;
pub use memory::*;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::config::{StorageSettings, StoreBackend};
use crate::models::{MatchRecord, Pairing, Player, PlayerId, StandingRecord};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed record at {path:?} line {line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Storage capability consumed by the tournament core.
///
/// Every call is a single blocking unit: it either completes atomically and
/// is visible to the next read, or fails. Implementations must not retry.
pub trait Store: Send + Sync {
    /// Register a player and return the identifier the store assigned.
    fn insert_player(&self, name: &str) -> Result<PlayerId, StorageError>;

    /// Remove every player.
    fn delete_all_players(&self) -> Result<(), StorageError>;

    /// Number of registered players.
    fn count_players(&self) -> Result<usize, StorageError>;

    /// Look up a single player.
    fn find_player(&self, id: PlayerId) -> Result<Option<Player>, StorageError>;

    /// Record one match result.
    fn insert_match(&self, record: &MatchRecord) -> Result<(), StorageError>;

    /// Remove every match result.
    fn delete_all_matches(&self) -> Result<(), StorageError>;

    /// Win and match-played aggregates for every registered player, ranked by
    /// wins descending then player id ascending.
    fn read_standings(&self) -> Result<Vec<StandingRecord>, StorageError>;

    /// Keep the latest pairings around for presentation. Optional.
    fn stage_pairings(&self, _pairings: &[Pairing]) -> Result<(), StorageError> {
        Ok(())
    }

    /// The most recently staged pairings, if the store keeps any.
    fn staged_pairings(&self) -> Result<Vec<Pairing>, StorageError> {
        Ok(Vec::new())
    }
}

/// Identifier for the next registered player.
///
/// Ids are never handed out twice, even after a player reset: the next id is
/// one past the highest of the last issued id, any registered player, and any
/// player named in the match log.
pub(crate) fn next_player_id(
    last_issued: Option<PlayerId>,
    players: &[Player],
    matches: &[MatchRecord],
) -> PlayerId {
    let registered = players.iter().map(|p| p.id);
    let played = matches.iter().flat_map(|m| [m.winner, m.loser]);

    last_issued
        .into_iter()
        .chain(registered)
        .chain(played)
        .max()
        .map(|id| id.next())
        .unwrap_or_else(|| PlayerId::new(1))
}

/// Open the store selected by the storage settings.
pub fn open_store(settings: &StorageSettings) -> Result<Arc<dyn Store>, StorageError> {
    match settings.backend {
        StoreBackend::Jsonl => {
            let store = JsonlStore::open(StorageConfig::new(settings.data_dir.clone()))?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory store; nothing is kept after exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));

        assert_eq!(
            entity_path(&config, EntityType::Player),
            PathBuf::from("/data/players.jsonl")
        );
        assert_eq!(
            entity_path(&config, EntityType::Match),
            PathBuf::from("/data/matches.jsonl")
        );
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_next_player_id_empty() {
        assert_eq!(next_player_id(None, &[], &[]), PlayerId::new(1));
    }

    #[test]
    fn test_next_player_id_after_gap() {
        let players = vec![
            Player::new(PlayerId::new(1), "Alice"),
            Player::new(PlayerId::new(7), "Bob"),
            Player::new(PlayerId::new(3), "Carol"),
        ];
        assert_eq!(next_player_id(None, &players, &[]), PlayerId::new(8));
    }

    #[test]
    fn test_next_player_id_skips_ids_in_match_log() {
        let matches = vec![MatchRecord::new(PlayerId::new(4), PlayerId::new(9)).unwrap()];
        assert_eq!(next_player_id(None, &[], &matches), PlayerId::new(10));
    }

    #[test]
    fn test_next_player_id_respects_last_issued() {
        let players = vec![Player::new(PlayerId::new(2), "Bob")];
        assert_eq!(
            next_player_id(Some(PlayerId::new(12)), &players, &[]),
            PlayerId::new(13)
        );
    }

    #[test]
    fn test_open_memory_store() {
        let settings = StorageSettings {
            backend: StoreBackend::Memory,
            ..Default::default()
        };
        let store = open_store(&settings).unwrap();
        assert_eq!(store.insert_player("Alice").unwrap(), PlayerId::new(1));
    }

    #[test]
    fn test_open_jsonl_store() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let settings = StorageSettings {
            data_dir: temp_dir.path().join("data"),
            ..Default::default()
        };
        let store = open_store(&settings).unwrap();
        store.insert_player("Alice").unwrap();
        assert!(temp_dir.path().join("data").join("players.jsonl").exists());
    }
}
