//! JSONL (JSON Lines) storage.
//!
//! Players and match results are appended one JSON object per line. A bulk
//! reset truncates the file. Reads are strict: a line that does not parse is
//! reported as [`StorageError::Malformed`] instead of being skipped.
//!
//! Every store operation holds an exclusive lock on `store.lock` in the data
//! directory, so separate handles and separate processes never interleave.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use fs4::fs_std::FileExt;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info};

use super::{next_player_id, StorageConfig, StorageError, Store};
use crate::calculate::standings::{rank, tally};
use crate::models::{MatchRecord, Pairing, Player, PlayerId, StandingRecord};

/// Entity types for JSONL storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Player,
    Match,
    Pairing,
    Sequence,
}

impl EntityType {
    /// Get the filename for this entity type.
    pub fn filename(&self) -> &'static str {
        match self {
            EntityType::Player => "players.jsonl",
            EntityType::Match => "matches.jsonl",
            EntityType::Pairing => "pairings.jsonl",
            EntityType::Sequence => "sequence.jsonl",
        }
    }
}

const LOCK_FILE: &str = "store.lock";

/// Highest player id ever issued, kept across player resets.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IdSequence {
    last_player_id: PlayerId,
}

/// Get the path for an entity file.
pub fn entity_path(config: &StorageConfig, entity: EntityType) -> PathBuf {
    config.data_dir.join(entity.filename())
}

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a writer for a specific entity type.
    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(entity_path(config, entity))
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append a single entity to the file.
    pub fn append(&self, entity: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        // Serialize first so a failure leaves the file untouched.
        let json = serde_json::to_string(entity)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        debug!("Appended entity to {:?}", self.path);
        Ok(())
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let lines = entities
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        for line in &lines {
            writeln!(writer, "{}", line)?;
        }

        writer.flush()?;
        info!("Wrote {} entities to {:?}", lines.len(), self.path);

        Ok(lines.len())
    }

    /// Empty the file.
    pub fn truncate(&self) -> Result<(), StorageError> {
        self.write_all(&[])?;
        Ok(())
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a reader for a specific entity type.
    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(entity_path(config, entity))
    }

    /// Read all entities from the file. A missing file reads as empty.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            let entity = serde_json::from_str(&line).map_err(|e| StorageError::Malformed {
                path: self.path.clone(),
                line: idx + 1,
                reason: e.to_string(),
            })?;
            entities.push(entity);
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }

    /// Read entities matching a predicate.
    pub fn read_where<F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        let all = self.read_all()?;
        Ok(all.into_iter().filter(predicate).collect())
    }
}

/// Durable store over JSONL files in a data directory.
///
/// Each operation takes the in-process mutex and then the directory's file
/// lock, and releases both when it returns.
pub struct JsonlStore {
    config: StorageConfig,
    lock: Mutex<()>,
}

/// Exclusive access to the store files for one operation.
struct Session<'a> {
    config: &'a StorageConfig,
    _file_lock: File,
    _guard: MutexGuard<'a, ()>,
}

impl Session<'_> {
    fn reader<T: DeserializeOwned>(&self, entity: EntityType) -> JsonlReader<T> {
        JsonlReader::for_entity(self.config, entity)
    }

    fn writer<T: Serialize>(&self, entity: EntityType) -> JsonlWriter<T> {
        JsonlWriter::for_entity(self.config, entity)
    }

    fn players(&self) -> Result<Vec<Player>, StorageError> {
        self.reader(EntityType::Player).read_all()
    }

    fn matches(&self) -> Result<Vec<MatchRecord>, StorageError> {
        self.reader(EntityType::Match).read_all()
    }

    fn last_player_id(&self) -> Result<Option<PlayerId>, StorageError> {
        let mut sequence = self.reader::<IdSequence>(EntityType::Sequence).read_all()?;
        Ok(sequence.pop().map(|s| s.last_player_id))
    }
}

impl JsonlStore {
    /// Open (and create, if needed) a store rooted at the configured data dir.
    pub fn open(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        info!("Opened JSONL store at {:?}", config.data_dir);
        Ok(Self {
            config,
            lock: Mutex::new(()),
        })
    }

    /// Root directory of the store files.
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    fn session(&self) -> Result<Session<'_>, StorageError> {
        let guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;

        let file_lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(self.config.data_dir.join(LOCK_FILE))?;
        file_lock.lock_exclusive()?;

        Ok(Session {
            config: &self.config,
            _file_lock: file_lock,
            _guard: guard,
        })
    }
}

impl Store for JsonlStore {
    fn insert_player(&self, name: &str) -> Result<PlayerId, StorageError> {
        let session = self.session()?;
        let id = next_player_id(
            session.last_player_id()?,
            &session.players()?,
            &session.matches()?,
        );
        session
            .writer(EntityType::Sequence)
            .write_all(&[IdSequence { last_player_id: id }])?;
        session
            .writer(EntityType::Player)
            .append(&Player::new(id, name))?;
        Ok(id)
    }

    fn delete_all_players(&self) -> Result<(), StorageError> {
        let session = self.session()?;
        session.writer::<Player>(EntityType::Player).truncate()
    }

    fn count_players(&self) -> Result<usize, StorageError> {
        let session = self.session()?;
        Ok(session.reader::<Player>(EntityType::Player).read_all()?.len())
    }

    fn find_player(&self, id: PlayerId) -> Result<Option<Player>, StorageError> {
        let session = self.session()?;
        let mut found = session
            .reader::<Player>(EntityType::Player)
            .read_where(|p| p.id == id)?;
        Ok(found.pop())
    }

    fn insert_match(&self, record: &MatchRecord) -> Result<(), StorageError> {
        let session = self.session()?;
        session.writer(EntityType::Match).append(record)
    }

    fn delete_all_matches(&self) -> Result<(), StorageError> {
        let session = self.session()?;
        session.writer::<MatchRecord>(EntityType::Match).truncate()
    }

    fn read_standings(&self) -> Result<Vec<StandingRecord>, StorageError> {
        let session = self.session()?;
        let mut standings = tally(&session.players()?, &session.matches()?);
        rank(&mut standings);
        Ok(standings)
    }

    fn stage_pairings(&self, pairings: &[Pairing]) -> Result<(), StorageError> {
        let session = self.session()?;
        session.writer(EntityType::Pairing).write_all(pairings)?;
        Ok(())
    }

    fn staged_pairings(&self) -> Result<Vec<Pairing>, StorageError> {
        let session = self.session()?;
        session.reader(EntityType::Pairing).read_all()
    }
}
