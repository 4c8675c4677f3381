//! Webmind: note capture and mind-map engine
//!
//! Captured text becomes a [`Note`]. Notes are summarized through an
//! on-device summarization capability when one is available, and clustered
//! into a three-level mind map (root → category → note) either from the
//! summarizer's key points or from a keyword heuristic.
//!
//! # Core Concepts
//!
//! - **Notes**: stored text with a `pending → summarized` lifecycle
//! - **Summarizer**: availability state machine over a pluggable capability
//! - **Mind map**: flat node/link graph forming a tree, rendered as a
//!   collapsible tidy tree
//!
//! # Example
//!
//! ```
//! use webmind::text::{extract_top_keywords, infer_category};
//!
//! let text = "atoms form molecules in a chemical reaction";
//! let keywords = extract_top_keywords(text, 5);
//! assert_eq!(infer_category(text, &keywords), "Chemistry");
//! ```

pub mod config;
pub mod mindmap;
pub mod note;
pub mod render;
pub mod service;
pub mod state;
pub mod stats;
pub mod storage;
pub mod summarizer;
pub mod text;

pub use config::{ConfigError, WebmindConfig};
pub use mindmap::{BuildPath, Mindmap, MindmapBuilder, MindmapLink, MindmapNode};
pub use note::{Note, NoteStatus};
pub use render::{ClickOutcome, MindmapView, SelectionListener};
pub use service::{NoteError, NoteService, SummarizeReport};
pub use state::{reduce, Action, AppState, ViewMode};
pub use stats::Statistics;
pub use storage::{NoteStore, OpenStore, SqliteNoteStore, StorageError, StorageResult};
pub use summarizer::{
    probe_capability, AiStatus, Availability, Summarizer, SummarizerCapability, SummarizerError,
    SummarizerOptions, UserActivation,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
