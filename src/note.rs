//! Note model
//!
//! A note is a piece of captured text plus its lifecycle state. Notes are
//! owned by the store; the mind-map pipeline only reads them.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a note.
///
/// `Pending → Summarized` is monotonic. Any note may additionally be marked
/// `Connected` once it has been linked to other notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteStatus {
    Pending,
    Summarized,
    Connected,
}

impl NoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteStatus::Pending => "pending",
            NoteStatus::Summarized => "summarized",
            NoteStatus::Connected => "connected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(NoteStatus::Pending),
            "summarized" => Some(NoteStatus::Summarized),
            "connected" => Some(NoteStatus::Connected),
            _ => None,
        }
    }
}

impl std::fmt::Display for NoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A captured piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    /// Capture time, milliseconds since the Unix epoch (UTC)
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub status: NoteStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_notes: Option<Vec<String>>,
}

impl Note {
    /// Create a pending note with a fresh id, stamped with the current time.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            summary: None,
            url: String::new(),
            title: String::new(),
            timestamp: Utc::now().timestamp_millis(),
            tags: None,
            status: NoteStatus::Pending,
            related_notes: None,
        }
    }

    /// Create a pending note with a caller-chosen id.
    pub fn with_id(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::new(content)
        }
    }

    pub fn with_source(mut self, url: impl Into<String>, title: impl Into<String>) -> Self {
        self.url = url.into();
        self.title = title.into();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_timestamp(mut self, timestamp_ms: i64) -> Self {
        self.timestamp = timestamp_ms;
        self
    }

    /// The text the pipeline works from: the summary when present, else the
    /// raw content.
    pub fn text(&self) -> &str {
        self.summary.as_deref().unwrap_or(&self.content)
    }

    /// Record a generated summary.
    ///
    /// A pending note advances to `Summarized`; a note that is already
    /// summarized or connected keeps its status.
    pub fn mark_summarized(&mut self, summary: impl Into<String>) {
        self.summary = Some(summary.into());
        if self.status == NoteStatus::Pending {
            self.status = NoteStatus::Summarized;
        }
    }

    /// Mark the note as connected to `related` note ids.
    pub fn mark_connected(&mut self, related: Vec<String>) {
        self.status = NoteStatus::Connected;
        self.related_notes = Some(related);
    }
}
