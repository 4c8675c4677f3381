//! Storage trait definitions

use crate::note::Note;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid note status: {0}")]
    InvalidStatus(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for note storage backends
///
/// The store owns notes; callers get copies. Implementations must be
/// thread-safe (Send + Sync).
pub trait NoteStore: Send + Sync {
    /// All notes, in insertion order
    fn load_all(&self) -> StorageResult<Vec<Note>>;

    /// Load a note by ID
    fn load_note(&self, id: &str) -> StorageResult<Option<Note>>;

    /// Save a note (insert or replace); an existing note keeps its position
    fn save_note(&self, note: &Note) -> StorageResult<()>;

    /// Replace an existing note; `NoteNotFound` if there is none
    fn update_note(&self, note: &Note) -> StorageResult<()>;

    /// Delete a note. Returns whether it existed.
    fn delete_note(&self, id: &str) -> StorageResult<bool>;

    /// Delete every note. Returns how many were removed.
    fn clear(&self) -> StorageResult<usize>;

    fn count(&self) -> StorageResult<usize> {
        Ok(self.load_all()?.len())
    }
}

/// Extension trait for opening stores from paths
pub trait OpenStore: NoteStore + Sized {
    /// Open or create a store at the given path
    fn open(path: impl AsRef<Path>) -> StorageResult<Self>;

    /// Create an in-memory store (useful for testing)
    fn open_in_memory() -> StorageResult<Self>;
}
