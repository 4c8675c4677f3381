//! Mind-map construction
//!
//! Turns an unordered set of notes into a categorized tree, through the
//! summarizer when it is available and the heuristic text pipeline
//! otherwise.

mod builder;
mod cache;
mod types;

pub use builder::{parse_key_points, BuildPath, MindmapBuilder};
pub use cache::MindmapCache;
pub use types::{Mindmap, MindmapLink, MindmapNode, ROOT_ID, ROOT_LABEL};
