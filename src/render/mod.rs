//! Collapsible tree rendering of a mind map
//!
//! `Mindmap` (flat graph) → [`Hierarchy`] (arena + expanded flags) →
//! [`Layout`] (tidy tree) → [`Scene`] (shapes, labels, link paths) → SVG.
//! [`MindmapView`] ties these together with a [`Viewport`] and handles
//! clicks.

pub mod hierarchy;
pub mod layout;
pub mod scene;
pub mod text_fit;
pub mod view;
pub mod viewport;

pub use hierarchy::{Hierarchy, TreeNode};
pub use layout::{layout, separation, Layout, Position, LEVEL_SPACING, NODE_SPACING};
pub use scene::{color_for_group, RenderedLink, RenderedNode, Scene, Shape, Toggle};
pub use text_fit::{estimate_width, fit_leaf_label, wrap_internal_label};
pub use view::{ClickOutcome, MindmapView, SelectionListener};
pub use viewport::Viewport;
