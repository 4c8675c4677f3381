//! Drawable scene derived from a laid-out hierarchy, plus SVG output.

use super::hierarchy::Hierarchy;
use super::layout::Layout;
use super::text_fit::{fit_leaf_label, wrap_internal_label};
use super::viewport::Viewport;
use serde::Serialize;
use std::fmt::Write;

pub const ROOT_COLOR: &str = "#1e293b";
pub const GROUP_PALETTE: [&str; 5] = ["#0ea5e9", "#8b5cf6", "#ec4899", "#f59e0b", "#10b981"];

pub const NODE_RADIUS: f64 = 35.0;
pub const LEAF_WIDTH: f64 = 140.0;
pub const LEAF_HEIGHT: f64 = 40.0;
pub const LEAF_CORNER: f64 = 6.0;

pub fn color_for_group(group: usize) -> &'static str {
    if group == 0 {
        ROOT_COLOR
    } else {
        GROUP_PALETTE[(group - 1) % GROUP_PALETTE.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Shape {
    Circle { radius: f64 },
    RoundedRect { width: f64, height: f64, corner: f64 },
}

/// Badge on nodes that have children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    Expanded,
    Collapsed,
}

impl Toggle {
    pub fn symbol(&self) -> &'static str {
        match self {
            Toggle::Expanded => "−",
            Toggle::Collapsed => "+",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedNode {
    pub id: String,
    pub note_id: String,
    pub x: f64,
    pub y: f64,
    pub shape: Shape,
    pub fill: &'static str,
    pub lines: Vec<String>,
    /// Untruncated label, shown as a tooltip
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggle: Option<Toggle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedLink {
    pub source: String,
    pub target: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    pub nodes: Vec<RenderedNode>,
    pub links: Vec<RenderedLink>,
}

/// Horizontal cubic Bézier from parent to child.
pub fn link_path(sx: f64, sy: f64, tx: f64, ty: f64) -> String {
    let mx = (sx + tx) / 2.0;
    format!("M{sx},{sy}C{mx},{sy} {mx},{ty} {tx},{ty}")
}

impl Scene {
    pub fn build(hierarchy: &Hierarchy, layout: &Layout) -> Self {
        let mut scene = Scene::default();
        for idx in hierarchy.visible() {
            let Some(pos) = layout.get(idx) else { continue };
            let tree_node = hierarchy.get(idx);
            let node = &tree_node.node;
            let has_children = hierarchy.has_children(idx);

            let (shape, lines) = if has_children {
                (
                    Shape::Circle { radius: NODE_RADIUS },
                    wrap_internal_label(&node.label),
                )
            } else {
                (
                    Shape::RoundedRect {
                        width: LEAF_WIDTH,
                        height: LEAF_HEIGHT,
                        corner: LEAF_CORNER,
                    },
                    vec![fit_leaf_label(&node.label)],
                )
            };
            let toggle = has_children.then(|| {
                if tree_node.expanded {
                    Toggle::Expanded
                } else {
                    Toggle::Collapsed
                }
            });

            scene.nodes.push(RenderedNode {
                id: node.id.clone(),
                note_id: node.note_id.clone(),
                x: pos.x,
                y: pos.y,
                shape,
                fill: color_for_group(node.group),
                lines,
                title: node.full_summary.clone().unwrap_or_else(|| node.label.clone()),
                toggle,
            });

            if let Some(parent) = tree_node.parent.and_then(|p| layout.get(p).map(|pp| (p, pp))) {
                let (p, pp) = parent;
                scene.links.push(RenderedLink {
                    source: hierarchy.get(p).node.id.clone(),
                    target: node.id.clone(),
                    path: link_path(pp.x, pp.y, pos.x, pos.y),
                });
            }
        }
        scene
    }

    pub fn node(&self, id: &str) -> Option<&RenderedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Standalone SVG document of the scene under `viewport`.
    pub fn to_svg(&self, viewport: &Viewport, width: f64, height: f64) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif" font-size="12">"#
        );
        let _ = writeln!(out, r#"<g transform="{}">"#, viewport.transform());
        for link in &self.links {
            let _ = writeln!(
                out,
                r##"<path class="link" d="{}" fill="none" stroke="#94a3b8" stroke-width="1.5"/>"##,
                link.path
            );
        }
        for node in &self.nodes {
            let _ = writeln!(
                out,
                r#"<g class="node" data-id="{}" transform="translate({},{})">"#,
                escape(&node.id),
                node.x,
                node.y
            );
            let _ = writeln!(out, "<title>{}</title>", escape(&node.title));
            match node.shape {
                Shape::Circle { radius } => {
                    let _ = writeln!(out, r#"<circle r="{radius}" fill="{}"/>"#, node.fill);
                }
                Shape::RoundedRect {
                    width,
                    height,
                    corner,
                } => {
                    let _ = writeln!(
                        out,
                        r#"<rect x="{}" y="{}" width="{width}" height="{height}" rx="{corner}" fill="{}"/>"#,
                        -width / 2.0,
                        -height / 2.0,
                        node.fill
                    );
                }
            }
            let first_dy = if node.lines.len() > 1 { -0.3 } else { 0.35 };
            let _ = write!(out, r#"<text text-anchor="middle" fill="white">"#);
            for (i, line) in node.lines.iter().enumerate() {
                let dy = if i == 0 { first_dy } else { 1.2 };
                let _ = write!(out, r#"<tspan x="0" dy="{dy}em">{}</tspan>"#, escape(line));
            }
            let _ = writeln!(out, "</text>");
            if let Some(toggle) = node.toggle {
                let _ = writeln!(
                    out,
                    r#"<g class="toggle" transform="translate({},0)"><circle r="8" fill="white" stroke="{}"/><text text-anchor="middle" dy="0.35em" fill="{}">{}</text></g>"#,
                    NODE_RADIUS,
                    node.fill,
                    node.fill,
                    toggle.symbol()
                );
            }
            let _ = writeln!(out, "</g>");
        }
        let _ = writeln!(out, "</g>");
        out.push_str("</svg>\n");
        out
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
