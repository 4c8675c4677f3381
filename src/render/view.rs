//! Interactive mind-map view
//!
//! Owns the hierarchy, its layout and the viewport. Clicking a node with
//! children toggles it; clicking a note hands the note id to the selection
//! listener and leaves the view untouched.

use super::hierarchy::Hierarchy;
use super::layout::{layout, Layout};
use super::scene::Scene;
use super::viewport::Viewport;
use crate::mindmap::Mindmap;
use std::sync::Arc;

/// Receives "note selected" events from the view (the detail pane).
pub trait SelectionListener: Send + Sync {
    fn note_selected(&self, note_id: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A subtree was shown (`true`) or hidden (`false`)
    Toggled { id: String, expanded: bool },
    NoteSelected(String),
    Ignored,
}

pub struct MindmapView {
    hierarchy: Hierarchy,
    layout: Layout,
    scene: Scene,
    viewport: Viewport,
    width: f64,
    height: f64,
    listener: Option<Arc<dyn SelectionListener>>,
}

impl std::fmt::Debug for MindmapView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MindmapView")
            .field("nodes", &self.hierarchy.len())
            .field("visible", &self.scene.nodes.len())
            .field("viewport", &self.viewport)
            .finish()
    }
}

impl MindmapView {
    /// Everything starts expanded. `None` for a graph with no nodes.
    pub fn new(map: &Mindmap, width: f64, height: f64) -> Option<Self> {
        let hierarchy = Hierarchy::from_mindmap(map)?;
        let layout = layout(&hierarchy);
        let scene = Scene::build(&hierarchy, &layout);
        Some(Self {
            hierarchy,
            layout,
            scene,
            viewport: Viewport::initial(height),
            width,
            height,
            listener: None,
        })
    }

    pub fn with_listener(mut self, listener: Arc<dyn SelectionListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn click(&mut self, id: &str) -> ClickOutcome {
        let Some(idx) = self.hierarchy.find(id) else {
            tracing::debug!(id, "click on unknown node");
            return ClickOutcome::Ignored;
        };
        if self.hierarchy.has_children(idx) {
            return match self.toggle(id) {
                Some(expanded) => ClickOutcome::Toggled {
                    id: id.to_string(),
                    expanded,
                },
                None => ClickOutcome::Ignored,
            };
        }
        let node = &self.hierarchy.get(idx).node;
        if node.is_note() {
            let note_id = node.note_id.clone();
            if let Some(listener) = &self.listener {
                listener.note_selected(&note_id);
            }
            return ClickOutcome::NoteSelected(note_id);
        }
        ClickOutcome::Ignored
    }

    /// Toggle a node with children, re-lay out and reset the viewport.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let idx = self.hierarchy.find(id)?;
        let expanded = self.hierarchy.toggle(idx)?;
        self.refresh();
        Some(expanded)
    }

    /// Returns whether the node changed state.
    pub fn set_expanded(&mut self, id: &str, expanded: bool) -> bool {
        let Some(idx) = self.hierarchy.find(id) else {
            return false;
        };
        let changed = self.hierarchy.set_expanded(idx, expanded);
        if changed {
            self.refresh();
        }
        changed
    }

    pub fn zoom(&mut self, factor: f64, focus: (f64, f64)) {
        self.viewport.zoom_by(factor, focus);
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.viewport.pan(dx, dy);
    }

    pub fn to_svg(&self) -> String {
        self.scene.to_svg(&self.viewport, self.width, self.height)
    }

    fn refresh(&mut self) {
        self.layout = layout(&self.hierarchy);
        self.scene = Scene::build(&self.hierarchy, &self.layout);
        self.viewport.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mindmap::{MindmapLink, MindmapNode};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl SelectionListener for Recorder {
        fn note_selected(&self, note_id: &str) {
            self.0.lock().unwrap().push(note_id.to_string());
        }
    }

    fn three_leaf_map() -> Mindmap {
        let mut nodes = vec![
            MindmapNode::root(),
            MindmapNode {
                id: "category-1".into(),
                label: "🧪 Chemistry".into(),
                note_id: String::new(),
                group: 1,
                full_summary: None,
            },
        ];
        let mut links = vec![MindmapLink::new("root", "category-1")];
        for id in ["a", "b", "c"] {
            nodes.push(MindmapNode {
                id: format!("note-{id}"),
                label: format!("Note {id}"),
                note_id: id.into(),
                group: 1,
                full_summary: None,
            });
            links.push(MindmapLink::new("category-1", format!("note-{id}")));
        }
        Mindmap { nodes, links }
    }

    #[test]
    fn collapse_then_expand_restores_scene() {
        let mut view = MindmapView::new(&three_leaf_map(), 1200.0, 800.0).unwrap();
        let before = view.scene().clone();
        assert_eq!(before.nodes.len(), 5);
        assert_eq!(before.links.len(), 4);

        assert_eq!(
            view.click("category-1"),
            ClickOutcome::Toggled {
                id: "category-1".into(),
                expanded: false
            }
        );
        assert_eq!(view.scene().nodes.len(), 2);
        assert_eq!(view.scene().links.len(), 1);

        view.click("category-1");
        let after = view.scene();
        let ids = |s: &Scene| s.nodes.iter().map(|n| (n.id.clone(), n.lines.clone())).collect::<Vec<_>>();
        assert_eq!(ids(after), ids(&before));
        assert_eq!(after, &before);
    }

    #[test]
    fn note_click_notifies_listener_without_state_change() {
        let recorder = Arc::new(Recorder::default());
        let mut view = MindmapView::new(&three_leaf_map(), 1200.0, 800.0)
            .unwrap()
            .with_listener(recorder.clone());
        let before = view.scene().clone();

        assert_eq!(view.click("note-b"), ClickOutcome::NoteSelected("b".into()));
        assert_eq!(*recorder.0.lock().unwrap(), vec!["b"]);
        assert_eq!(view.scene(), &before);
    }

    #[test]
    fn toggle_resets_viewport() {
        let mut view = MindmapView::new(&three_leaf_map(), 1200.0, 800.0).unwrap();
        view.zoom(2.0, (100.0, 100.0));
        view.pan(30.0, 40.0);
        view.click("category-1");
        assert_eq!(*view.viewport(), Viewport::initial(800.0));
    }

    #[test]
    fn unknown_and_structural_leaf_clicks_ignored() {
        let mut view = MindmapView::new(&three_leaf_map(), 1200.0, 800.0).unwrap();
        assert_eq!(view.click("nope"), ClickOutcome::Ignored);

        let mut lonely = MindmapView::new(&Mindmap::empty(), 1200.0, 800.0).unwrap();
        assert_eq!(lonely.click("root"), ClickOutcome::Ignored);
    }

    #[test]
    fn set_expanded_is_idempotent() {
        let mut view = MindmapView::new(&three_leaf_map(), 1200.0, 800.0).unwrap();
        assert!(!view.set_expanded("category-1", true));
        assert!(view.set_expanded("category-1", false));
        assert!(!view.set_expanded("category-1", false));
    }
}
