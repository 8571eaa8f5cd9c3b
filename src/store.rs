//! Where validated boards and solutions are kept.

use std::collections::HashMap;

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::board::Board;
use crate::path::Path;

/// Identifies the user owning a record.
pub type UserId = String;

/// A stored board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoardRecord {
    /// Unique id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// User who created the board.
    pub owner: UserId,
    /// The validated layout.
    pub board: Board,
}

/// A stored solution, always attached to a board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SolutionRecord {
    /// Unique id.
    pub id: Uuid,
    /// Board the solution was drawn on.
    pub board_id: Uuid,
    /// User who submitted the solution.
    pub owner: UserId,
    /// Display name.
    pub name: String,
    /// The validated paths.
    pub paths: Vec<Path>,
}

/// Failure of a [`Store`] operation.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum StoreError {
    /// No board has the id.
    #[error("no board with id {0}")]
    BoardNotFound(Uuid),
    /// No solution has the id.
    #[error("no solution with id {0}")]
    SolutionNotFound(Uuid),
    /// A record with the id is already stored.
    #[error("a record with id {0} already exists")]
    Duplicate(Uuid),
}

/// Persistence for boards and their solutions.
///
/// Listings are newest first. Removing a board removes its solutions too.
pub trait Store {
    /// Insert a new board.
    fn insert_board(&mut self, record: BoardRecord) -> Result<(), StoreError>;
    /// Look up a board.
    fn board(&self, id: Uuid) -> Result<&BoardRecord, StoreError>;
    /// Replace the board with the same id, returning the previous record.
    fn replace_board(&mut self, record: BoardRecord) -> Result<BoardRecord, StoreError>;
    /// Remove a board and its solutions, returning the board.
    fn remove_board(&mut self, id: Uuid) -> Result<BoardRecord, StoreError>;
    /// Every board.
    fn boards(&self) -> Vec<&BoardRecord>;

    /// Insert a solution for an existing board.
    fn insert_solution(&mut self, record: SolutionRecord) -> Result<(), StoreError>;
    /// Look up a solution.
    fn solution(&self, id: Uuid) -> Result<&SolutionRecord, StoreError>;
    /// Replace the solution with the same id, returning the previous record.
    fn replace_solution(&mut self, record: SolutionRecord) -> Result<SolutionRecord, StoreError>;
    /// Solutions of one board.
    fn solutions(&self, board_id: Uuid) -> Vec<&SolutionRecord>;
}

#[derive(Clone, Debug)]
struct Entry<T> {
    // insertion order, for newest-first listings
    seq: u64,
    record: T,
}

/// An in-process [`Store`].
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    next_seq: u64,
    boards: HashMap<Uuid, Entry<BoardRecord>>,
    solutions: HashMap<Uuid, Entry<SolutionRecord>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

fn newest_first<'a, T>(entries: impl Iterator<Item = &'a Entry<T>>) -> Vec<&'a T> {
    let mut entries = entries.collect::<Vec<_>>();
    entries.sort_unstable_by(|a, b| b.seq.cmp(&a.seq));
    entries.into_iter().map(|e| &e.record).collect()
}

impl Store for MemoryStore {
    fn insert_board(&mut self, record: BoardRecord) -> Result<(), StoreError> {
        if self.boards.contains_key(&record.id) {
            return Err(StoreError::Duplicate(record.id));
        }

        info!(id = %record.id, owner = %record.owner, "board stored");
        let seq = self.seq();
        self.boards.insert(record.id, Entry { seq, record });
        Ok(())
    }

    fn board(&self, id: Uuid) -> Result<&BoardRecord, StoreError> {
        self.boards.get(&id).map(|e| &e.record).ok_or(StoreError::BoardNotFound(id))
    }

    fn replace_board(&mut self, record: BoardRecord) -> Result<BoardRecord, StoreError> {
        let entry = self.boards.get_mut(&record.id).ok_or(StoreError::BoardNotFound(record.id))?;

        info!(id = %record.id, "board replaced");
        Ok(std::mem::replace(&mut entry.record, record))
    }

    fn remove_board(&mut self, id: Uuid) -> Result<BoardRecord, StoreError> {
        let entry = self.boards.remove(&id).ok_or(StoreError::BoardNotFound(id))?;

        let before = self.solutions.len();
        self.solutions.retain(|_, e| e.record.board_id != id);
        info!(%id, solutions = before - self.solutions.len(), "board removed");
        Ok(entry.record)
    }

    fn boards(&self) -> Vec<&BoardRecord> {
        newest_first(self.boards.values())
    }

    fn insert_solution(&mut self, record: SolutionRecord) -> Result<(), StoreError> {
        if !self.boards.contains_key(&record.board_id) {
            return Err(StoreError::BoardNotFound(record.board_id));
        }
        if self.solutions.contains_key(&record.id) {
            return Err(StoreError::Duplicate(record.id));
        }

        info!(id = %record.id, board = %record.board_id, owner = %record.owner, "solution stored");
        let seq = self.seq();
        self.solutions.insert(record.id, Entry { seq, record });
        Ok(())
    }

    fn solution(&self, id: Uuid) -> Result<&SolutionRecord, StoreError> {
        self.solutions.get(&id).map(|e| &e.record).ok_or(StoreError::SolutionNotFound(id))
    }

    fn replace_solution(&mut self, record: SolutionRecord) -> Result<SolutionRecord, StoreError> {
        let entry = self.solutions.get_mut(&record.id).ok_or(StoreError::SolutionNotFound(record.id))?;

        info!(id = %record.id, "solution replaced");
        Ok(std::mem::replace(&mut entry.record, record))
    }

    fn solutions(&self, board_id: Uuid) -> Vec<&SolutionRecord> {
        newest_first(self.solutions.values().filter(|e| e.record.board_id == board_id))
    }
}
