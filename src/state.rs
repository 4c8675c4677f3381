//! UI state container
//!
//! One immutable [`AppState`] value transformed by [`reduce`]. The front end
//! dispatches [`Action`]s and renders from the result; derived views
//! (search results, per-status lists) are computed from the state.

use crate::note::{Note, NoteStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Notes,
    Mindmap,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub notes: Vec<Note>,
    pub loading: bool,
    pub error: Option<String>,
    pub view_mode: ViewMode,
    pub search_query: String,
    /// Note open in the detail view
    pub selected_note: Option<String>,
    /// Notes ticked for batch operations, in selection order
    pub selected_notes: Vec<String>,
    pub processing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadStarted,
    NotesLoaded(Vec<Note>),
    LoadFailed(String),
    NoteAdded(Note),
    NoteUpdated(Note),
    NoteRemoved(String),
    SetError(Option<String>),
    SetViewMode(ViewMode),
    SetSearch(String),
    OpenNote(String),
    CloseNote,
    ToggleSelection(String),
    ClearSelection,
    ProcessingStarted,
    ProcessingFinished,
}

/// Apply `action` to `state`.
pub fn reduce(state: AppState, action: Action) -> AppState {
    let mut next = state;
    match action {
        Action::LoadStarted => {
            next.loading = true;
            next.error = None;
        }
        Action::NotesLoaded(notes) => {
            next.notes = notes;
            next.loading = false;
            let known = |id: &String| next.notes.iter().any(|n| &n.id == id);
            next.selected_notes = next.selected_notes.iter().filter(|id| known(id)).cloned().collect();
            next.selected_note = next.selected_note.clone().filter(|id| known(id));
        }
        Action::LoadFailed(message) => {
            next.loading = false;
            next.error = Some(message);
        }
        Action::NoteAdded(note) => next.notes.push(note),
        Action::NoteUpdated(note) => {
            if let Some(existing) = next.notes.iter_mut().find(|n| n.id == note.id) {
                *existing = note;
            }
        }
        Action::NoteRemoved(id) => {
            next.notes.retain(|n| n.id != id);
            next.selected_notes.retain(|s| *s != id);
            if next.selected_note.as_deref() == Some(id.as_str()) {
                next.selected_note = None;
            }
        }
        Action::SetError(error) => next.error = error,
        Action::SetViewMode(mode) => next.view_mode = mode,
        Action::SetSearch(query) => next.search_query = query,
        Action::OpenNote(id) => {
            if next.notes.iter().any(|n| n.id == id) {
                next.selected_note = Some(id);
            }
        }
        Action::CloseNote => next.selected_note = None,
        Action::ToggleSelection(id) => {
            if let Some(pos) = next.selected_notes.iter().position(|s| *s == id) {
                next.selected_notes.remove(pos);
            } else {
                next.selected_notes.push(id);
            }
        }
        Action::ClearSelection => next.selected_notes.clear(),
        Action::ProcessingStarted => next.processing = true,
        Action::ProcessingFinished => {
            next.processing = false;
            next.selected_notes.clear();
        }
    }
    next
}

impl AppState {
    /// Notes matching the search query (case-insensitive, over title,
    /// summary and content). An empty query matches everything.
    pub fn filtered_notes(&self) -> Vec<&Note> {
        let query = self.search_query.to_lowercase();
        self.notes
            .iter()
            .filter(|note| {
                query.is_empty()
                    || note.title.to_lowercase().contains(&query)
                    || note
                        .summary
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase().contains(&query))
                    || note.content.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Filtered notes with the given status.
    pub fn notes_with_status(&self, status: NoteStatus) -> Vec<&Note> {
        self.filtered_notes()
            .into_iter()
            .filter(|n| n.status == status)
            .collect()
    }

    pub fn selected(&self) -> Option<&Note> {
        let id = self.selected_note.as_deref()?;
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_notes.iter().any(|s| s == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> AppState {
        let mut summarized = Note::with_id("b", "Cells divide by mitosis").with_source("", "Biology");
        summarized.mark_summarized("Mitosis overview");
        reduce(
            AppState::default(),
            Action::NotesLoaded(vec![
                Note::with_id("a", "Rust borrow checker").with_source("", "Rust"),
                summarized,
            ]),
        )
    }

    #[test]
    fn load_lifecycle() {
        let state = reduce(AppState::default(), Action::LoadStarted);
        assert!(state.loading);
        let state = reduce(state, Action::LoadFailed("storage offline".into()));
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("storage offline"));
        let state = reduce(state, Action::LoadStarted);
        assert_eq!(state.error, None);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let mut state = reduce(loaded(), Action::SetSearch("MITOSIS".into()));
        let ids: Vec<&str> = state.filtered_notes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);

        state = reduce(state, Action::SetSearch("rust".into()));
        assert_eq!(state.filtered_notes().len(), 1);
        assert!(state.notes_with_status(NoteStatus::Summarized).is_empty());

        state = reduce(state, Action::SetSearch(String::new()));
        assert_eq!(state.filtered_notes().len(), 2);
        assert_eq!(state.notes_with_status(NoteStatus::Pending).len(), 1);
    }

    #[test]
    fn selection_toggles_and_clears_after_processing() {
        let mut state = loaded();
        state = reduce(state, Action::ToggleSelection("a".into()));
        state = reduce(state, Action::ToggleSelection("b".into()));
        assert_eq!(state.selected_notes, vec!["a", "b"]);
        state = reduce(state, Action::ToggleSelection("a".into()));
        assert_eq!(state.selected_notes, vec!["b"]);

        state = reduce(state, Action::ProcessingStarted);
        assert!(state.processing);
        state = reduce(state, Action::ProcessingFinished);
        assert!(!state.processing);
        assert!(state.selected_notes.is_empty());
    }

    #[test]
    fn removing_a_note_drops_it_from_selection() {
        let mut state = loaded();
        state = reduce(state, Action::OpenNote("a".into()));
        state = reduce(state, Action::ToggleSelection("a".into()));
        assert_eq!(state.selected().map(|n| n.id.as_str()), Some("a"));

        state = reduce(state, Action::NoteRemoved("a".into()));
        assert_eq!(state.notes.len(), 1);
        assert!(state.selected_note.is_none());
        assert!(!state.is_selected("a"));
    }

    #[test]
    fn open_unknown_note_is_ignored_and_view_mode_switches() {
        let state = reduce(loaded(), Action::OpenNote("ghost".into()));
        assert!(state.selected_note.is_none());
        let state = reduce(state, Action::SetViewMode(ViewMode::Mindmap));
        assert_eq!(state.view_mode, ViewMode::Mindmap);
    }

    #[test]
    fn update_replaces_in_place() {
        let mut note = Note::with_id("a", "Rust borrow checker");
        note.mark_summarized("Ownership rules");
        let state = reduce(loaded(), Action::NoteUpdated(note));
        assert_eq!(state.notes[0].summary.as_deref(), Some("Ownership rules"));
        assert_eq!(state.notes.len(), 2);
    }
}
