//! SQLite storage backend for notes

use super::traits::{NoteStore, OpenStore, StorageError, StorageResult};
use crate::note::{Note, NoteStatus};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::Mutex;

const NOTE_COLUMNS: &str =
    "id, content, summary, url, title, timestamp, status, tags_json, related_json";

/// Raw column values of one `notes` row.
type NoteRow = (
    String,
    String,
    Option<String>,
    String,
    String,
    i64,
    String,
    Option<String>,
    Option<String>,
);

/// SQLite-backed note store
///
/// One `notes` table; `seq` keeps insertion order so `load_all` returns
/// notes the way they were captured. Thread-safe via internal mutex on the
/// connection.
pub struct SqliteNoteStore {
    conn: Mutex<Connection>,
}

impl SqliteNoteStore {
    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS notes (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                content TEXT NOT NULL,
                summary TEXT,
                url TEXT NOT NULL DEFAULT '',
                title TEXT NOT NULL DEFAULT '',
                timestamp INTEGER NOT NULL,
                status TEXT NOT NULL,
                tags_json TEXT,
                related_json TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_notes_status ON notes(status);
            CREATE INDEX IF NOT EXISTS idx_notes_timestamp ON notes(timestamp);

            -- Concurrent reads while the CLI writes
            PRAGMA journal_mode = WAL;
            "#,
        )?;
        Ok(())
    }

    fn row_values(row: &Row<'_>) -> rusqlite::Result<NoteRow> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
            row.get(6)?,
            row.get(7)?,
            row.get(8)?,
        ))
    }

    fn row_to_note(values: NoteRow) -> StorageResult<Note> {
        let (id, content, summary, url, title, timestamp, status, tags_json, related_json) = values;
        let status = NoteStatus::parse(&status).ok_or(StorageError::InvalidStatus(status))?;
        Ok(Note {
            id,
            content,
            summary,
            url,
            title,
            timestamp,
            status,
            tags: tags_json.map(|j| serde_json::from_str(&j)).transpose()?,
            related_notes: related_json.map(|j| serde_json::from_str(&j)).transpose()?,
        })
    }

    fn json_column(values: &Option<Vec<String>>) -> StorageResult<Option<String>> {
        Ok(values.as_ref().map(serde_json::to_string).transpose()?)
    }
}

impl OpenStore for SqliteNoteStore {
    fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl NoteStore for SqliteNoteStore {
    fn load_all(&self) -> StorageResult<Vec<Note>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY seq"))?;
        let rows = stmt
            .query_map([], Self::row_values)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(Self::row_to_note).collect()
    }

    fn load_note(&self, id: &str) -> StorageResult<Option<Note>> {
        let conn = self.conn.lock().unwrap();
        let row = conn
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"),
                params![id],
                Self::row_values,
            )
            .optional()?;
        row.map(Self::row_to_note).transpose()
    }

    fn save_note(&self, note: &Note) -> StorageResult<()> {
        let conn = self.conn.lock().unwrap();
        let tags = Self::json_column(&note.tags)?;
        let related = Self::json_column(&note.related_notes)?;

        conn.execute(
            r#"
            INSERT INTO notes (id, content, summary, url, title, timestamp, status, tags_json, related_json)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(id) DO UPDATE SET
                content = excluded.content,
                summary = excluded.summary,
                url = excluded.url,
                title = excluded.title,
                timestamp = excluded.timestamp,
                status = excluded.status,
                tags_json = excluded.tags_json,
                related_json = excluded.related_json
            "#,
            params![
                note.id,
                note.content,
                note.summary,
                note.url,
                note.title,
                note.timestamp,
                note.status.as_str(),
                tags,
                related
            ],
        )?;

        Ok(())
    }

    fn update_note(&self, note: &Note) -> StorageResult<()> {
        let conn = self.conn.lock().unwrap();
        let tags = Self::json_column(&note.tags)?;
        let related = Self::json_column(&note.related_notes)?;

        let rows = conn.execute(
            r#"
            UPDATE notes SET
                content = ?2, summary = ?3, url = ?4, title = ?5,
                timestamp = ?6, status = ?7, tags_json = ?8, related_json = ?9
            WHERE id = ?1
            "#,
            params![
                note.id,
                note.content,
                note.summary,
                note.url,
                note.title,
                note.timestamp,
                note.status.as_str(),
                tags,
                related
            ],
        )?;

        if rows == 0 {
            return Err(StorageError::NoteNotFound(note.id.clone()));
        }
        Ok(())
    }

    fn delete_note(&self, id: &str) -> StorageResult<bool> {
        let conn = self.conn.lock().unwrap();
        let rows = conn.execute("DELETE FROM notes WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    fn clear(&self) -> StorageResult<usize> {
        let conn = self.conn.lock().unwrap();
        Ok(conn.execute("DELETE FROM notes", [])?)
    }

    fn count(&self) -> StorageResult<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
