//! Mind-map graph types
//!
//! A flat node/link list that always forms a tree rooted at [`ROOT_ID`]:
//! root → one node per category → one node per note.

use serde::{Deserialize, Serialize};

/// Id of the root node.
pub const ROOT_ID: &str = "root";
pub const ROOT_LABEL: &str = "My Notes";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindmapNode {
    pub id: String,
    pub label: String,
    /// Owning note id for leaves; empty for root and category nodes
    pub note_id: String,
    /// Cluster index: 0 for the root, 1..=K for categories and their notes
    pub group: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_summary: Option<String>,
}

impl MindmapNode {
    pub fn root() -> Self {
        Self {
            id: ROOT_ID.to_string(),
            label: ROOT_LABEL.to_string(),
            note_id: String::new(),
            group: 0,
            full_summary: None,
        }
    }

    /// Whether this node stands for a note.
    pub fn is_note(&self) -> bool {
        !self.note_id.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT_ID
    }
}

/// Directed parent → child edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindmapLink {
    pub source: String,
    pub target: String,
}

impl MindmapLink {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mindmap {
    pub nodes: Vec<MindmapNode>,
    pub links: Vec<MindmapLink>,
}

impl Mindmap {
    /// A map holding only the root.
    pub fn empty() -> Self {
        Self {
            nodes: vec![MindmapNode::root()],
            links: Vec::new(),
        }
    }

    pub fn node(&self, id: &str) -> Option<&MindmapNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Note (leaf) nodes.
    pub fn note_nodes(&self) -> impl Iterator<Item = &MindmapNode> {
        self.nodes.iter().filter(|n| n.is_note())
    }

    /// Category nodes: neither root nor note.
    pub fn category_nodes(&self) -> impl Iterator<Item = &MindmapNode> {
        self.nodes.iter().filter(|n| !n.is_note() && !n.is_root())
    }

    /// Ids of the direct children of `id`, in link order.
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.links
            .iter()
            .filter(move |l| l.source == id)
            .map(|l| l.target.as_str())
    }
}
