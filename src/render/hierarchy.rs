//! Rooted hierarchy over a flat mind-map graph
//!
//! Nodes live in an arena addressed by index (and by id). Collapsing a node
//! only clears its `expanded` flag: descendants stay in the arena and the
//! visible set is derived on demand.

use crate::mindmap::{Mindmap, MindmapNode, ROOT_ID};
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub node: MindmapNode,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub depth: usize,
    pub expanded: bool,
}

#[derive(Debug, Clone)]
pub struct Hierarchy {
    nodes: Vec<TreeNode>,
    index: HashMap<String, usize>,
}

impl Hierarchy {
    /// Build the hierarchy rooted at [`ROOT_ID`] (or the first node when no
    /// root sentinel exists).
    ///
    /// Links naming unknown nodes, pointing at the root, or giving a node a
    /// second parent are ignored. Nodes not reachable from the root are left
    /// out. Returns `None` for a graph without nodes.
    pub fn from_mindmap(map: &Mindmap) -> Option<Self> {
        let mut raw: Vec<&MindmapNode> = Vec::new();
        let mut raw_index: HashMap<&str, usize> = HashMap::new();
        for node in &map.nodes {
            if raw_index.contains_key(node.id.as_str()) {
                tracing::warn!(id = %node.id, "duplicate mind-map node ignored");
                continue;
            }
            raw_index.insert(node.id.as_str(), raw.len());
            raw.push(node);
        }
        let root = raw_index.get(ROOT_ID).copied().or(if raw.is_empty() { None } else { Some(0) })?;

        let mut parent: Vec<Option<usize>> = vec![None; raw.len()];
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); raw.len()];
        for link in &map.links {
            let (Some(&s), Some(&t)) = (
                raw_index.get(link.source.as_str()),
                raw_index.get(link.target.as_str()),
            ) else {
                tracing::warn!(source = %link.source, target = %link.target, "link to unknown node ignored");
                continue;
            };
            if t == root || s == t || parent[t].is_some() {
                tracing::warn!(source = %link.source, target = %link.target, "link would break the tree; ignored");
                continue;
            }
            parent[t] = Some(s);
            children[s].push(t);
        }

        // Breadth-first from the root; unreachable nodes never get an index.
        let mut nodes: Vec<TreeNode> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut queue: VecDeque<(usize, Option<usize>, usize)> = VecDeque::new();
        queue.push_back((root, None, 0));
        while let Some((raw_id, parent_idx, depth)) = queue.pop_front() {
            let idx = nodes.len();
            index.insert(raw[raw_id].id.clone(), idx);
            nodes.push(TreeNode {
                node: raw[raw_id].clone(),
                parent: parent_idx,
                children: Vec::new(),
                depth,
                expanded: true,
            });
            if let Some(p) = parent_idx {
                nodes[p].children.push(idx);
            }
            for &child in &children[raw_id] {
                queue.push_back((child, Some(idx), depth + 1));
            }
        }

        Some(Self { nodes, index })
    }

    pub fn root(&self) -> usize {
        0
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, idx: usize) -> &TreeNode {
        &self.nodes[idx]
    }

    pub fn find(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn has_children(&self, idx: usize) -> bool {
        !self.nodes[idx].children.is_empty()
    }

    pub fn is_expanded(&self, idx: usize) -> bool {
        self.nodes[idx].expanded
    }

    /// Children shown in the current state; empty when collapsed.
    pub fn visible_children(&self, idx: usize) -> &[usize] {
        let node = &self.nodes[idx];
        if node.expanded {
            &node.children
        } else {
            &[]
        }
    }

    /// Set the expanded flag. Returns whether anything changed; nodes
    /// without children cannot change.
    pub fn set_expanded(&mut self, idx: usize, expanded: bool) -> bool {
        if !self.has_children(idx) || self.nodes[idx].expanded == expanded {
            return false;
        }
        self.nodes[idx].expanded = expanded;
        true
    }

    /// Flip the expanded flag. Returns the new state, or `None` for nodes
    /// without children.
    pub fn toggle(&mut self, idx: usize) -> Option<bool> {
        if !self.has_children(idx) {
            return None;
        }
        let node = &mut self.nodes[idx];
        node.expanded = !node.expanded;
        Some(node.expanded)
    }

    /// Visible nodes in pre-order.
    pub fn visible(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(idx) = stack.pop() {
            out.push(idx);
            stack.extend(self.visible_children(idx).iter().rev());
        }
        out
    }

    /// Visible parent → child pairs, in pre-order of the child.
    pub fn visible_links(&self) -> Vec<(usize, usize)> {
        self.visible()
            .into_iter()
            .filter_map(|idx| self.nodes[idx].parent.map(|p| (p, idx)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mindmap::MindmapLink;

    fn node(id: &str, note_id: &str) -> MindmapNode {
        MindmapNode {
            id: id.into(),
            label: id.into(),
            note_id: note_id.into(),
            group: 0,
            full_summary: None,
        }
    }

    fn sample() -> Mindmap {
        Mindmap {
            nodes: vec![
                MindmapNode::root(),
                node("category-1", ""),
                node("note-a", "a"),
                node("note-b", "b"),
                node("category-2", ""),
                node("note-c", "c"),
            ],
            links: vec![
                MindmapLink::new("root", "category-1"),
                MindmapLink::new("category-1", "note-a"),
                MindmapLink::new("category-1", "note-b"),
                MindmapLink::new("root", "category-2"),
                MindmapLink::new("category-2", "note-c"),
            ],
        }
    }

    fn ids(h: &Hierarchy, idxs: &[usize]) -> Vec<String> {
        idxs.iter().map(|&i| h.get(i).node.id.clone()).collect()
    }

    #[test]
    fn builds_tree_with_depths() {
        let h = Hierarchy::from_mindmap(&sample()).unwrap();
        assert_eq!(h.len(), 6);
        assert_eq!(h.get(h.root()).node.id, "root");
        assert_eq!(h.get(h.find("note-c").unwrap()).depth, 2);
        assert_eq!(
            ids(&h, &h.visible()),
            vec!["root", "category-1", "note-a", "note-b", "category-2", "note-c"]
        );
    }

    #[test]
    fn collapse_hides_but_retains_descendants() {
        let mut h = Hierarchy::from_mindmap(&sample()).unwrap();
        let cat = h.find("category-1").unwrap();
        assert_eq!(h.toggle(cat), Some(false));

        assert_eq!(ids(&h, &h.visible()), vec!["root", "category-1", "category-2", "note-c"]);
        assert_eq!(h.visible_links().len(), 3);
        assert!(h.find("note-a").is_some());

        assert_eq!(h.toggle(cat), Some(true));
        assert_eq!(h.visible().len(), 6);
    }

    #[test]
    fn leaves_cannot_toggle() {
        let mut h = Hierarchy::from_mindmap(&sample()).unwrap();
        let leaf = h.find("note-a").unwrap();
        assert_eq!(h.toggle(leaf), None);
        assert!(!h.set_expanded(leaf, false));
    }

    #[test]
    fn ignores_bad_links_and_unreachable_nodes() {
        let mut map = sample();
        map.nodes.push(node("orphan", ""));
        map.links.push(MindmapLink::new("category-2", "note-a")); // second parent
        map.links.push(MindmapLink::new("note-c", "root")); // cycle through root
        map.links.push(MindmapLink::new("ghost", "note-b"));
        let h = Hierarchy::from_mindmap(&map).unwrap();

        assert_eq!(h.len(), 6);
        assert!(h.find("orphan").is_none());
        let a = h.find("note-a").unwrap();
        assert_eq!(h.get(h.get(a).parent.unwrap()).node.id, "category-1");
    }

    #[test]
    fn empty_graph_has_no_hierarchy() {
        let map = Mindmap {
            nodes: vec![],
            links: vec![],
        };
        assert!(Hierarchy::from_mindmap(&map).is_none());
    }
}
