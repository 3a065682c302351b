//! Pure roadmap-to-flowchart layout.
//!
//! Transforms an ordered list of sections into a positioned node/edge graph
//! annotated with completion state. The output is a derived view: callers
//! recompute it whenever sections or the completed-topic set change, and
//! never mutate it in place. Node and edge ids are deterministic functions
//! of section/topic indices, so they are stable across recomputation for the
//! same input.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::Section;

/// Horizontal anchor for section header nodes.
pub const ANCHOR_X: f64 = 800.0;
/// Vertical distance between consecutive rows.
pub const ROW_STEP: f64 = 200.0;
/// Horizontal distance of topic nodes from the anchor column.
pub const BRANCH_OFFSET: f64 = 400.0;

//
// ─── TYPES ─────────────────────────────────────────────────────────────────────
//

/// Node variant; rendering dispatches on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Section,
    Topic,
}

/// A positioned flowchart node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    pub x: f64,
    pub y: f64,
    /// Meaningful for topic nodes only; always false on section headers.
    pub completed: bool,
}

impl FlowNode {
    #[must_use]
    pub fn is_topic(&self) -> bool {
        self.kind == NodeKind::Topic
    }
}

/// A directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// The complete derived graph for one roadmap.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

//
// ─── LAYOUT ────────────────────────────────────────────────────────────────────
//

/// Lays out one node per section header plus one per topic.
///
/// Section headers sit on the anchor column; topic nodes alternate left and
/// right of it by index parity (even indices left). A topic node is marked
/// completed iff its label is in `completed` at generation time.
#[must_use]
pub fn build_nodes(sections: &[Section], completed: &BTreeSet<String>) -> Vec<FlowNode> {
    let mut nodes = Vec::with_capacity(
        sections.len()
            + sections
                .iter()
                .map(|section| section.topics().len())
                .sum::<usize>(),
    );
    let mut y_offset = 0.0;

    for (section_index, section) in sections.iter().enumerate() {
        nodes.push(FlowNode {
            id: section_node_id(section_index),
            kind: NodeKind::Section,
            label: format!("Stage {}: {}", section_index + 1, section.title()),
            x: ANCHOR_X,
            y: y_offset,
            completed: false,
        });
        y_offset += ROW_STEP;

        for (topic_index, topic) in section.topics().iter().enumerate() {
            let branch = if topic_index % 2 == 1 {
                BRANCH_OFFSET
            } else {
                -BRANCH_OFFSET
            };
            nodes.push(FlowNode {
                id: topic_node_id(section_index, topic_index),
                kind: NodeKind::Topic,
                label: topic.clone(),
                x: ANCHOR_X + branch,
                y: y_offset + topic_index as f64 * ROW_STEP,
                completed: completed.contains(topic),
            });
        }

        y_offset += (section.topics().len() + 1) as f64 * ROW_STEP;
    }

    nodes
}

/// Connects the graph into a single linear chain:
/// section 0 → its topics in order → section 1 → ...
///
/// A section with no topics emits no header-to-topic edge and no intra
/// edges; the connector into the next section then sources from the header
/// itself so the chain stays connected.
#[must_use]
pub fn build_edges(sections: &[Section]) -> Vec<FlowEdge> {
    let mut edges = Vec::new();

    for (section_index, section) in sections.iter().enumerate() {
        let topic_count = section.topics().len();

        if topic_count > 0 {
            edges.push(FlowEdge {
                id: format!("e-section-{section_index}"),
                source: section_node_id(section_index),
                target: topic_node_id(section_index, 0),
            });
        }

        for topic_index in 1..topic_count {
            edges.push(FlowEdge {
                id: format!("e-topic-{section_index}-{}", topic_index - 1),
                source: topic_node_id(section_index, topic_index - 1),
                target: topic_node_id(section_index, topic_index),
            });
        }

        if section_index + 1 < sections.len() {
            let source = match topic_count {
                0 => section_node_id(section_index),
                n => topic_node_id(section_index, n - 1),
            };
            edges.push(FlowEdge {
                id: format!("e-section-connect-{section_index}"),
                source,
                target: section_node_id(section_index + 1),
            });
        }
    }

    edges
}

/// Builds the full derived graph in one call.
#[must_use]
pub fn build_graph(sections: &[Section], completed: &BTreeSet<String>) -> FlowGraph {
    FlowGraph {
        nodes: build_nodes(sections, completed),
        edges: build_edges(sections),
    }
}

fn section_node_id(section_index: usize) -> String {
    format!("section-{section_index}")
}

fn topic_node_id(section_index: usize, topic_index: usize) -> String {
    format!("topic-{section_index}-{topic_index}")
}
