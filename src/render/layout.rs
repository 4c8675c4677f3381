//! Horizontal tidy-tree layout
//!
//! Subtrees are placed bottom-up. Each subtree keeps a contour (the extreme
//! sibling-axis offsets per depth); a new child subtree is shifted just far
//! enough that, at every shared depth, it clears the accumulated right
//! contour by the required separation. Parents are centered over their
//! first and last child.
//!
//! `x` is the depth axis, `y` the sibling axis. Only visible nodes are laid
//! out, so a collapsed node is a layout leaf.

use super::hierarchy::Hierarchy;
use std::collections::HashMap;

/// Node footprint along the sibling axis.
pub const NODE_SPACING: f64 = 100.0;
/// Distance between depth levels.
pub const LEVEL_SPACING: f64 = 250.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Layout {
    positions: HashMap<usize, Position>,
}

impl Layout {
    pub fn get(&self, idx: usize) -> Option<Position> {
        self.positions.get(&idx).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Separation between two adjacent nodes at the same depth, in units of
/// [`NODE_SPACING`].
pub fn separation(a_is_leaf: bool, b_is_leaf: bool, siblings: bool) -> f64 {
    match (a_is_leaf || b_is_leaf, siblings) {
        (true, true) => 1.5,
        (true, false) => 2.0,
        (false, true) => 1.0,
        (false, false) => 1.2,
    }
}

#[derive(Debug, Clone, Copy)]
struct Level {
    left: f64,
    right: f64,
    left_node: usize,
    right_node: usize,
}

impl Level {
    fn single(idx: usize) -> Self {
        Self {
            left: 0.0,
            right: 0.0,
            left_node: idx,
            right_node: idx,
        }
    }

    fn shifted(self, by: f64) -> Self {
        Self {
            left: self.left + by,
            right: self.right + by,
            ..self
        }
    }
}

struct Subtree {
    /// Offsets relative to the subtree root
    offsets: Vec<(usize, f64)>,
    contour: Vec<Level>,
}

/// Lay out the visible part of `hierarchy`. The root sits at (0, 0).
pub fn layout(hierarchy: &Hierarchy) -> Layout {
    if hierarchy.is_empty() {
        return Layout::default();
    }
    let root = hierarchy.root();
    let subtree = place(hierarchy, root);
    let positions = subtree
        .offsets
        .into_iter()
        .map(|(idx, offset)| {
            let depth = hierarchy.get(idx).depth as f64;
            (
                idx,
                Position {
                    x: depth * LEVEL_SPACING,
                    y: offset * NODE_SPACING,
                },
            )
        })
        .collect();
    Layout { positions }
}

fn gap(hierarchy: &Hierarchy, a: usize, b: usize) -> f64 {
    let a_leaf = hierarchy.visible_children(a).is_empty();
    let b_leaf = hierarchy.visible_children(b).is_empty();
    let siblings = hierarchy.get(a).parent == hierarchy.get(b).parent;
    separation(a_leaf, b_leaf, siblings)
}

fn place(hierarchy: &Hierarchy, idx: usize) -> Subtree {
    let children = hierarchy.visible_children(idx);
    if children.is_empty() {
        return Subtree {
            offsets: vec![(idx, 0.0)],
            contour: vec![Level::single(idx)],
        };
    }

    let mut placed: Vec<(Subtree, f64)> = Vec::with_capacity(children.len());
    let mut merged: Vec<Level> = Vec::new();
    for &child in children {
        let sub = place(hierarchy, child);
        let shift = if merged.is_empty() {
            0.0
        } else {
            merged
                .iter()
                .zip(&sub.contour)
                .map(|(l, r)| l.right + gap(hierarchy, l.right_node, r.left_node) - r.left)
                .fold(f64::NEG_INFINITY, f64::max)
        };
        for (depth, level) in sub.contour.iter().enumerate() {
            let level = level.shifted(shift);
            match merged.get_mut(depth) {
                Some(existing) => {
                    existing.right = level.right;
                    existing.right_node = level.right_node;
                }
                None => merged.push(level),
            }
        }
        placed.push((sub, shift));
    }

    let first = placed.first().map(|(_, s)| *s).unwrap_or(0.0);
    let last = placed.last().map(|(_, s)| *s).unwrap_or(0.0);
    let mid = (first + last) / 2.0;

    let mut offsets = vec![(idx, 0.0)];
    for (sub, shift) in placed {
        offsets.extend(sub.offsets.into_iter().map(|(n, o)| (n, o + shift - mid)));
    }
    let mut contour = vec![Level::single(idx)];
    contour.extend(merged.into_iter().map(|l| l.shifted(-mid)));

    Subtree { offsets, contour }
}
