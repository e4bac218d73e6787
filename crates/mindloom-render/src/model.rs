use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bounds::Bounds;

/// Pre-order node identifier. The root is always `NodeId(0)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A decorated node: identity, wrapped label and box size are fixed at decoration time; the
/// layout stage only writes `x`/`y` (box centers).
#[derive(Debug, Clone, PartialEq)]
pub struct SizedNode {
    pub id: NodeId,
    pub depth: usize,
    pub title: String,
    pub lines: Vec<String>,
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
    pub children: Vec<NodeId>,
}

/// Decorated tree stored in pre-order.
///
/// A node's index equals its [`NodeId`], and every child sits after its parent. Passes that need
/// bottom-up results iterate in reverse instead of recursing.
#[derive(Debug, Clone, PartialEq)]
pub struct SizedTree {
    nodes: Vec<SizedNode>,
}

impl SizedTree {
    /// `nodes` must be in pre-order with `nodes[i].id == NodeId(i)` and non-empty.
    pub(crate) fn from_preorder(nodes: Vec<SizedNode>) -> Self {
        debug_assert!(!nodes.is_empty());
        debug_assert!(nodes.iter().enumerate().all(|(i, n)| n.id.index() == i));
        Self { nodes }
    }

    pub fn root(&self) -> &SizedNode {
        &self.nodes[0]
    }

    pub fn get(&self, id: NodeId) -> Option<&SizedNode> {
        self.nodes.get(id.index())
    }

    pub fn nodes(&self) -> &[SizedNode] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [SizedNode] {
        &mut self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &SizedNode> + '_ {
        self.get(id)
            .into_iter()
            .flat_map(|n| n.children.iter())
            .filter_map(|c| self.get(*c))
    }
}

/// Output-facing node record. Carries no references to other nodes; see [`LayoutEdge`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    pub id: NodeId,
    pub title: String,
    pub lines: Vec<String>,
    pub depth: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PositionedNode {
    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// True when the two boxes share interior area. Touching edges do not count.
    pub fn overlaps(&self, other: &PositionedNode) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Parent → child relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub from: NodeId,
    pub to: NodeId,
}

/// The positioned diagram handed to both renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindmapLayout {
    pub width: f64,
    pub height: f64,
    /// Pre-order; `nodes[0]` is the root.
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<LayoutEdge>,
}

impl MindmapLayout {
    pub fn root(&self) -> Option<&PositionedNode> {
        self.nodes.first()
    }

    pub fn node(&self, id: NodeId) -> Option<&PositionedNode> {
        // Fast path for layouts produced by the pipeline (pre-order, id == index).
        match self.nodes.get(id.index()) {
            Some(n) if n.id == id => Some(n),
            _ => self.nodes.iter().find(|n| n.id == id),
        }
    }

    /// Tight box around every node, excluding the margins.
    pub fn content_bounds(&self) -> Option<Bounds> {
        Bounds::from_nodes(&self.nodes)
    }
}
