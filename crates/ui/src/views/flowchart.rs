//! SVG rendering surface for the roadmap flowchart.
//!
//! Renders the derived node/edge graph on a pannable, zoomable canvas with a
//! minimap overview. Node visuals dispatch on `NodeKind`; clicks bubble the
//! clicked node back to the caller, which decides what (if anything) to do.

use std::collections::HashMap;

use dioxus::html::geometry::WheelDelta;
use dioxus::prelude::*;

use roadmap_core::flowchart::{FlowEdge, FlowNode, NodeKind};

/// Zoom bounds and initial viewport for the canvas.
pub const MIN_ZOOM: f64 = 0.2;
pub const MAX_ZOOM: f64 = 2.0;
pub const INITIAL_ZOOM: f64 = 0.5;

const SECTION_NODE_WIDTH: f64 = 260.0;
const SECTION_NODE_HEIGHT: f64 = 64.0;
const TOPIC_NODE_WIDTH: f64 = 220.0;
const TOPIC_NODE_HEIGHT: f64 = 56.0;

const COMPLETED_COLOR: &str = "#22c55e";
const TOPIC_COLOR: &str = "#6366f1";
const SECTION_COLOR: &str = "#8b5cf6";

fn clamp_zoom(value: f64) -> f64 {
    value.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Minimap fill for a node: completed topics, open topics, and section
/// headers each get their own color.
#[must_use]
pub fn minimap_color(node: &FlowNode) -> &'static str {
    if node.completed {
        COMPLETED_COLOR
    } else {
        match node.kind {
            NodeKind::Topic => TOPIC_COLOR,
            NodeKind::Section => SECTION_COLOR,
        }
    }
}

fn wheel_delta_y(delta: &WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(v) => v.y,
        WheelDelta::Lines(v) => v.y * 20.0,
        WheelDelta::Pages(v) => v.y * 100.0,
    }
}

fn graph_bounds(nodes: &[FlowNode]) -> (f64, f64, f64, f64) {
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    for node in nodes {
        min_x = min_x.min(node.x);
        min_y = min_y.min(node.y);
        max_x = max_x.max(node.x);
        max_y = max_y.max(node.y);
    }
    if nodes.is_empty() {
        return (0.0, 0.0, 1.0, 1.0);
    }
    // Pad by one node footprint so border nodes are not clipped.
    (
        min_x - SECTION_NODE_WIDTH,
        min_y - SECTION_NODE_HEIGHT,
        (max_x - min_x) + 2.0 * SECTION_NODE_WIDTH,
        (max_y - min_y) + 2.0 * SECTION_NODE_HEIGHT,
    )
}

#[component]
pub fn FlowCanvas(
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
    on_node_click: EventHandler<FlowNode>,
) -> Element {
    let mut zoom = use_signal(|| INITIAL_ZOOM);
    let mut pan = use_signal(|| (0.0_f64, 0.0_f64));
    let mut drag_from = use_signal(|| None::<(f64, f64)>);

    let positions: HashMap<String, (f64, f64)> = nodes
        .iter()
        .map(|node| (node.id.clone(), (node.x, node.y)))
        .collect();

    let edge_lines = edges.iter().filter_map(|edge| {
        let (x1, y1) = positions.get(&edge.source)?;
        let (x2, y2) = positions.get(&edge.target)?;
        Some(rsx! {
            line {
                key: "{edge.id}",
                class: "flow-edge",
                x1: "{x1}",
                y1: "{y1}",
                x2: "{x2}",
                y2: "{y2}",
            }
        })
    });

    let node_shapes = nodes.iter().map(|node| {
        let clicked = node.clone();
        let on_node_click = on_node_click;
        let (width, height, radius, class, label_class) = match node.kind {
            NodeKind::Section => (
                SECTION_NODE_WIDTH,
                SECTION_NODE_HEIGHT,
                14.0,
                "flow-node flow-node--section".to_string(),
                "flow-label flow-label--section",
            ),
            NodeKind::Topic => {
                let modifier = if node.completed { " flow-node--completed" } else { "" };
                (
                    TOPIC_NODE_WIDTH,
                    TOPIC_NODE_HEIGHT,
                    10.0,
                    format!("flow-node flow-node--topic{modifier}"),
                    "flow-label",
                )
            }
        };
        let fill = if node.completed {
            COMPLETED_COLOR
        } else {
            match node.kind {
                NodeKind::Section => SECTION_COLOR,
                NodeKind::Topic => TOPIC_COLOR,
            }
        };
        let rect_x = node.x - width / 2.0;
        let rect_y = node.y - height / 2.0;
        rsx! {
            g {
                key: "{node.id}",
                class: "{class}",
                onclick: move |_| on_node_click.call(clicked.clone()),
                rect {
                    x: "{rect_x}",
                    y: "{rect_y}",
                    width: "{width}",
                    height: "{height}",
                    rx: "{radius}",
                    fill,
                }
                text {
                    x: "{node.x}",
                    y: "{node.y}",
                    text_anchor: "middle",
                    dominant_baseline: "middle",
                    class: label_class,
                    "{node.label}"
                }
            }
        }
    });

    let (bounds_x, bounds_y, bounds_w, bounds_h) = graph_bounds(&nodes);
    let minimap_nodes = nodes.iter().map(|node| {
        let fill = minimap_color(node);
        let rect_x = node.x - 60.0;
        let rect_y = node.y - 20.0;
        rsx! {
            rect {
                key: "{node.id}",
                x: "{rect_x}",
                y: "{rect_y}",
                width: "120",
                height: "40",
                rx: "8",
                fill,
            }
        }
    });

    let (pan_x, pan_y) = pan();
    let scale = zoom();
    rsx! {
        div { class: "flow-canvas",
            div { class: "flow-controls",
                button {
                    class: "btn flow-zoom",
                    r#type: "button",
                    onclick: move |_| zoom.set(clamp_zoom(zoom() * 1.2)),
                    "+"
                }
                button {
                    class: "btn flow-zoom",
                    r#type: "button",
                    onclick: move |_| zoom.set(clamp_zoom(zoom() / 1.2)),
                    "−"
                }
                button {
                    class: "btn flow-zoom",
                    r#type: "button",
                    onclick: move |_| {
                        zoom.set(INITIAL_ZOOM);
                        pan.set((0.0, 0.0));
                    },
                    "Reset"
                }
            }
            svg {
                class: "flow-surface",
                onwheel: move |evt| {
                    let factor = if wheel_delta_y(&evt.delta()) > 0.0 { 1.0 / 1.1 } else { 1.1 };
                    zoom.set(clamp_zoom(zoom() * factor));
                },
                onmousedown: move |evt| {
                    let point = evt.element_coordinates();
                    drag_from.set(Some((point.x, point.y)));
                },
                onmousemove: move |evt| {
                    if let Some((last_x, last_y)) = drag_from() {
                        let point = evt.element_coordinates();
                        let (px, py) = pan();
                        pan.set((px + point.x - last_x, py + point.y - last_y));
                        drag_from.set(Some((point.x, point.y)));
                    }
                },
                onmouseup: move |_| drag_from.set(None),
                onmouseleave: move |_| drag_from.set(None),
                g {
                    transform: "translate({pan_x} {pan_y}) scale({scale})",
                    {edge_lines}
                    {node_shapes}
                }
            }
            svg {
                class: "flow-minimap",
                view_box: "{bounds_x} {bounds_y} {bounds_w} {bounds_h}",
                {minimap_nodes}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(kind: NodeKind, completed: bool) -> FlowNode {
        FlowNode {
            id: "n".to_string(),
            kind,
            label: "n".to_string(),
            x: 0.0,
            y: 0.0,
            completed,
        }
    }

    #[test]
    fn minimap_colors_by_state_then_kind() {
        assert_eq!(minimap_color(&node(NodeKind::Topic, true)), "#22c55e");
        assert_eq!(minimap_color(&node(NodeKind::Topic, false)), "#6366f1");
        assert_eq!(minimap_color(&node(NodeKind::Section, false)), "#8b5cf6");
    }

    #[test]
    fn zoom_is_clamped_to_bounds() {
        assert_eq!(clamp_zoom(0.01), MIN_ZOOM);
        assert_eq!(clamp_zoom(5.0), MAX_ZOOM);
        assert_eq!(clamp_zoom(1.0), 1.0);
    }

    #[test]
    fn bounds_pad_the_graph_extent() {
        let nodes = vec![
            FlowNode {
                id: "a".into(),
                kind: NodeKind::Section,
                label: "a".into(),
                x: 800.0,
                y: 0.0,
                completed: false,
            },
            FlowNode {
                id: "b".into(),
                kind: NodeKind::Topic,
                label: "b".into(),
                x: 400.0,
                y: 200.0,
                completed: false,
            },
        ];
        let (x, y, w, h) = graph_bounds(&nodes);
        assert!(x < 400.0 && y < 0.0);
        assert!(w > 400.0 && h > 200.0);
    }
}
