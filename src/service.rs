//! Note service
//!
//! Capture, batch summarization, connection and export of notes, plus the
//! cached mind map. Sits between a [`NoteStore`] and the summarizer.

use crate::config::MindmapConfig;
use crate::mindmap::{Mindmap, MindmapBuilder, MindmapCache};
use crate::note::{Note, NoteStatus};
use crate::storage::{NoteStore, StorageError};
use crate::summarizer::{Summarizer, SummarizerOptions};
use crate::text::{simple_summary, strip_markup};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Shortest text (in chars, after trimming) accepted as a note.
pub const MIN_NOTE_CHARS: usize = 10;

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("text is too short to save (at least {MIN_NOTE_CHARS} characters)")]
    TextTooShort,

    #[error("select at least two notes to connect")]
    NotEnoughNotes,

    #[error("note not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("export failed: {0}")]
    Export(#[from] serde_json::Error),
}

pub type NoteResult<T> = Result<T, NoteError>;

/// Outcome of a batch summarization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummarizeReport {
    /// Notes summarized by the summarizer
    pub summarized: usize,
    /// Notes given an extractive summary instead
    pub fallback: usize,
    /// Selected ids that were missing or not pending
    pub skipped: usize,
}

pub struct NoteService {
    store: Arc<dyn NoteStore>,
    builder: MindmapBuilder,
    cache: MindmapCache,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>, summarizer: Arc<Summarizer>) -> Self {
        Self {
            store,
            builder: MindmapBuilder::new(summarizer),
            cache: MindmapCache::new(),
        }
    }

    pub fn with_mindmap_config(mut self, config: MindmapConfig) -> Self {
        self.builder = self.builder.with_config(config);
        self
    }

    pub fn summarizer(&self) -> &Summarizer {
        self.builder.summarizer()
    }

    /// Save captured text as a new pending note.
    pub fn collect_text(&mut self, text: &str, url: &str, title: &str) -> NoteResult<Note> {
        if text.trim().chars().count() < MIN_NOTE_CHARS {
            return Err(NoteError::TextTooShort);
        }
        let note = Note::new(text).with_source(url, title);
        self.store.save_note(&note)?;
        self.cache.invalidate();
        tracing::info!(note = %note.id, chars = text.chars().count(), "note captured");
        Ok(note)
    }

    /// Summarize the selected pending notes on one session.
    ///
    /// A note whose summarization fails, or every note when no session can
    /// be created, gets an extractive summary instead. Either way the note
    /// ends up summarized.
    pub async fn summarize_notes(&mut self, ids: &[String]) -> NoteResult<SummarizeReport> {
        let mut report = SummarizeReport::default();
        let mut pending = Vec::new();
        for id in ids {
            match self.store.load_note(id)? {
                Some(note) if note.status == NoteStatus::Pending => pending.push(note),
                Some(_) => report.skipped += 1,
                None => {
                    tracing::warn!(note = %id, "cannot summarize unknown note");
                    report.skipped += 1;
                }
            }
        }
        if pending.is_empty() {
            return Ok(report);
        }

        let summarizer = self.builder.summarizer();
        let session = match summarizer
            .create_session(&SummarizerOptions::default(), None)
            .await
        {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(error = %e, "no summarizer session; using extractive summaries");
                None
            }
        };

        for mut note in pending {
            let generated = match &session {
                Some(session) => match session.summarize(&note.content).await {
                    Ok(summary) if !summary.trim().is_empty() => Some(summary.trim().to_string()),
                    Ok(_) => None,
                    Err(e) => {
                        tracing::warn!(note = %note.id, error = %e, "summarization failed; using extractive summary");
                        None
                    }
                },
                None => None,
            };
            let summary = match generated {
                Some(summary) => {
                    report.summarized += 1;
                    summary
                }
                None => {
                    report.fallback += 1;
                    simple_summary(strip_markup(&note.content).trim())
                }
            };
            note.mark_summarized(summary);
            self.store.update_note(&note)?;
            tracing::debug!(note = %note.id, "note summarized");
        }

        if let Some(session) = session {
            session.destroy().await;
        }
        self.cache.invalidate();
        tracing::info!(
            summarized = report.summarized,
            fallback = report.fallback,
            skipped = report.skipped,
            "batch summarization finished"
        );
        Ok(report)
    }

    /// Link the selected notes to each other.
    pub fn connect_notes(&mut self, ids: &[String]) -> NoteResult<Vec<Note>> {
        let mut seen = HashSet::new();
        let ids: Vec<&String> = ids.iter().filter(|id| seen.insert(id.as_str())).collect();
        if ids.len() < 2 {
            return Err(NoteError::NotEnoughNotes);
        }

        let mut notes = Vec::with_capacity(ids.len());
        for id in &ids {
            let note = self
                .store
                .load_note(id)?
                .ok_or_else(|| NoteError::NotFound(id.to_string()))?;
            notes.push(note);
        }

        for note in &mut notes {
            let related = ids
                .iter()
                .filter(|other| other.as_str() != note.id)
                .map(|other| other.to_string())
                .collect();
            note.mark_connected(related);
            self.store.update_note(note)?;
        }
        self.cache.invalidate();
        tracing::info!(notes = notes.len(), "notes connected");
        Ok(notes)
    }

    pub fn get_note(&self, id: &str) -> NoteResult<Note> {
        self.store
            .load_note(id)?
            .ok_or_else(|| NoteError::NotFound(id.to_string()))
    }

    pub fn list_notes(&self) -> NoteResult<Vec<Note>> {
        Ok(self.store.load_all()?)
    }

    pub fn update_note(&mut self, note: &Note) -> NoteResult<()> {
        match self.store.update_note(note) {
            Ok(()) => {
                self.cache.invalidate();
                Ok(())
            }
            Err(StorageError::NoteNotFound(id)) => Err(NoteError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    pub fn delete_note(&mut self, id: &str) -> NoteResult<()> {
        if !self.store.delete_note(id)? {
            return Err(NoteError::NotFound(id.to_string()));
        }
        self.cache.invalidate();
        Ok(())
    }

    /// Remove every note. Returns how many were removed.
    pub fn clear_notes(&mut self) -> NoteResult<usize> {
        let removed = self.store.clear()?;
        self.cache.invalidate();
        Ok(removed)
    }

    /// All notes as pretty-printed JSON.
    pub fn export_notes(&self) -> NoteResult<String> {
        let notes = self.store.load_all()?;
        Ok(serde_json::to_string_pretty(&notes)?)
    }

    /// The mind map of all notes, rebuilt only when the note count changed
    /// since the cached build.
    pub async fn mindmap(&mut self) -> NoteResult<Mindmap> {
        let notes = self.store.load_all()?;
        if let Some(cached) = self.cache.get(notes.len()) {
            tracing::debug!(notes = notes.len(), "serving cached mind map");
            return Ok(cached.clone());
        }
        let map = self.builder.build(&notes).await;
        self.cache.store(notes.len(), map.clone());
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{OpenStore, SqliteNoteStore};
    use crate::summarizer::{MockCapability, UserActivation};

    fn service_with(cap: MockCapability) -> (NoteService, Arc<MockCapability>, Arc<SqliteNoteStore>) {
        let cap = Arc::new(cap);
        let store = Arc::new(SqliteNoteStore::open_in_memory().unwrap());
        let summarizer = Arc::new(Summarizer::new(cap.clone(), UserActivation::activated()));
        (NoteService::new(store.clone(), summarizer), cap, store)
    }

    #[test]
    fn collect_rejects_short_text() {
        let (mut svc, _, _) = service_with(MockCapability::unavailable());
        assert!(matches!(svc.collect_text("   tiny   ", "", ""), Err(NoteError::TextTooShort)));

        let note = svc
            .collect_text("Long enough to keep", "https://example.com", "Example")
            .unwrap();
        assert_eq!(note.status, NoteStatus::Pending);
        assert_eq!(note.url, "https://example.com");
        assert_eq!(svc.list_notes().unwrap(), vec![note]);
    }

    #[tokio::test]
    async fn summarize_uses_one_session_and_falls_back_per_note() {
        let (mut svc, cap, _) = service_with(
            MockCapability::available()
                .with_response("Photosynthesis", "Plants turn light into sugar.")
                .with_failure_on("broken"),
        );
        let a = svc
            .collect_text("Photosynthesis converts light. It happens in leaves.", "", "")
            .unwrap();
        let b = svc
            .collect_text("This one is broken. It cannot be summarized. Third. Fourth.", "", "")
            .unwrap();

        let report = svc.summarize_notes(&[a.id.clone(), b.id.clone()]).await.unwrap();
        assert_eq!(report.summarized, 1);
        assert_eq!(report.fallback, 1);

        let a = svc.get_note(&a.id).unwrap();
        assert_eq!(a.summary.as_deref(), Some("Plants turn light into sugar."));
        assert_eq!(a.status, NoteStatus::Summarized);
        let b = svc.get_note(&b.id).unwrap();
        assert_eq!(
            b.summary.as_deref(),
            Some("This one is broken.  It cannot be summarized.  Third.")
        );

        let calls = cap.calls();
        assert_eq!(calls.sessions_created, 1);
        assert_eq!(calls.sessions_destroyed, 1);
    }

    #[tokio::test]
    async fn summarize_skips_non_pending_and_unknown() {
        let (mut svc, cap, _) = service_with(MockCapability::unavailable());
        let a = svc.collect_text("A pending note about things.", "", "").unwrap();
        let report = svc.summarize_notes(&[a.id.clone()]).await.unwrap();
        assert_eq!(report.fallback, 1);

        let report = svc
            .summarize_notes(&[a.id.clone(), "missing".to_string()])
            .await
            .unwrap();
        assert_eq!(report, SummarizeReport { summarized: 0, fallback: 0, skipped: 2 });
        assert_eq!(cap.calls().sessions_created, 0);
    }

    #[test]
    fn connect_requires_two_notes() {
        let (mut svc, _, _) = service_with(MockCapability::unavailable());
        let a = svc.collect_text("First note content here", "", "").unwrap();
        let b = svc.collect_text("Second note content here", "", "").unwrap();

        assert!(matches!(
            svc.connect_notes(&[a.id.clone(), a.id.clone()]),
            Err(NoteError::NotEnoughNotes)
        ));
        assert!(matches!(
            svc.connect_notes(&[a.id.clone(), "ghost".into()]),
            Err(NoteError::NotFound(_))
        ));

        svc.connect_notes(&[a.id.clone(), b.id.clone()]).unwrap();
        let a2 = svc.get_note(&a.id).unwrap();
        assert_eq!(a2.status, NoteStatus::Connected);
        assert_eq!(a2.related_notes, Some(vec![b.id.clone()]));
    }

    #[tokio::test]
    async fn mindmap_is_cached_by_note_count() {
        let (mut svc, cap, store) = service_with(MockCapability::unavailable());
        svc.collect_text("Rust programming with the compiler and code", "", "")
            .unwrap();
        let first = svc.mindmap().await.unwrap();
        assert_eq!(first.nodes.len(), 3);
        let checks = cap.calls().availability_checks;

        // Same count: served from cache, no new build
        let again = svc.mindmap().await.unwrap();
        assert_eq!(again, first);
        assert_eq!(cap.calls().availability_checks, checks);

        // A write behind the service's back that changes the count rebuilds
        store
            .save_note(&Note::with_id("x", "Chemistry of molecule reactions"))
            .unwrap();
        let rebuilt = svc.mindmap().await.unwrap();
        assert_eq!(rebuilt.note_nodes().count(), 2);
    }

    #[test]
    fn delete_update_clear_and_export() {
        let (mut svc, _, _) = service_with(MockCapability::unavailable());
        let mut a = svc.collect_text("Note number one content", "", "").unwrap();
        svc.collect_text("Note number two content", "", "").unwrap();

        a.tags = Some(vec!["work".into()]);
        svc.update_note(&a).unwrap();
        assert_eq!(svc.get_note(&a.id).unwrap().tags, Some(vec!["work".to_string()]));
        assert!(matches!(
            svc.update_note(&Note::with_id("ghost", "content")),
            Err(NoteError::NotFound(_))
        ));

        let exported: Vec<Note> = serde_json::from_str(&svc.export_notes().unwrap()).unwrap();
        assert_eq!(exported.len(), 2);

        svc.delete_note(&a.id).unwrap();
        assert!(matches!(svc.delete_note(&a.id), Err(NoteError::NotFound(_))));
        assert_eq!(svc.clear_notes().unwrap(), 1);
        assert!(svc.list_notes().unwrap().is_empty());
    }
}
