//! Note storage
//!
//! Notes are persisted through the `NoteStore` trait. The shipped backend
//! is `SqliteNoteStore`.

mod sqlite;
mod traits;

pub use sqlite::SqliteNoteStore;
pub use traits::{NoteStore, OpenStore, StorageError, StorageResult};
