//! Two-sided balanced tree layout.
//!
//! The root sits at the origin. Its children are split into a left and a right group by a greedy
//! running balance of subtree heights; every descendant inherits its branch's side. Columns are a
//! fixed horizontal step apart, so `x = side * depth * step` and only `y` is actually solved:
//! sibling subtrees are stacked by their subtree heights, and an internal node sits at the mean
//! `y` of its direct children.

use mindloom_core::{LayoutConfig, OutlineNode};

use crate::LayoutOptions;
use crate::bounds::normalize_bounds;
use crate::decorate::decorate_tree;
use crate::model::{LayoutEdge, MindmapLayout, NodeId, PositionedNode, SizedTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn sign(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Full pipeline for one outline: decorate, place, flatten, normalize.
pub fn layout_outline(outline: &OutlineNode, options: &LayoutOptions) -> MindmapLayout {
    let config = &options.config.layout;
    let mut tree = decorate_tree(outline, config, options.text_measurer.as_ref());
    place_tree(&mut tree, config);

    let (mut nodes, edges) = flatten_tree(&tree);
    let (width, height) = normalize_bounds(&mut nodes, config.margin);

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        width,
        height,
        "mind-map layout"
    );

    MindmapLayout {
        width,
        height,
        nodes,
        edges,
    }
}

/// Vertical space each subtree needs, indexed by [`NodeId`].
///
/// A leaf needs its own height; an internal node needs the larger of its own height and its
/// stacked children (`vertical_gap` between siblings).
pub fn subtree_heights(tree: &SizedTree, vertical_gap: f64) -> Vec<f64> {
    let mut heights = vec![0.0; tree.len()];
    for node in tree.nodes().iter().rev() {
        heights[node.id.index()] = if node.children.is_empty() {
            node.height
        } else {
            node.height
                .max(stacked_height(&node.children, &heights, vertical_gap))
        };
    }
    heights
}

fn stacked_height(children: &[NodeId], heights: &[f64], gap: f64) -> f64 {
    let mut total = children.iter().map(|c| heights[c.index()]).sum::<f64>();
    total += gap * (children.len().saturating_sub(1)) as f64;
    total
}

/// Splits the root's children into `(left, right)`.
///
/// Children are taken in document order; each goes to the side with the smaller running total
/// (ties go left). If one side ends up empty, it takes the first child of the other side.
pub fn split_top_level(children: &[NodeId], heights: &[f64]) -> (Vec<NodeId>, Vec<NodeId>) {
    let mut left: Vec<NodeId> = Vec::new();
    let mut right: Vec<NodeId> = Vec::new();
    let mut left_height = 0.0;
    let mut right_height = 0.0;

    for &child in children {
        let h = heights[child.index()];
        if left_height <= right_height {
            left.push(child);
            left_height += h;
        } else {
            right.push(child);
            right_height += h;
        }
    }

    if left.is_empty() && !right.is_empty() {
        left.push(right.remove(0));
    }
    if right.is_empty() && !left.is_empty() {
        right.push(left.remove(0));
    }

    (left, right)
}

/// Writes `x`/`y` for every node of `tree`.
pub fn place_tree(tree: &mut SizedTree, config: &LayoutConfig) {
    let heights = subtree_heights(tree, config.vertical_gap);
    let len = tree.len();

    // Top-down: side and allotted band center per node. Parents precede children in the arena,
    // so one forward pass sees every band before it is split further.
    let mut side: Vec<Option<Side>> = vec![None; len];
    let mut center: Vec<f64> = vec![0.0; len];

    let (left, right) = split_top_level(&tree.root().children, &heights);
    tracing::trace!(left = left.len(), right = right.len(), "top-level split");
    for (group, group_side) in [(&left, Side::Left), (&right, Side::Right)] {
        for (child, c) in stack_band(group, &heights, config.top_level_gap, 0.0) {
            side[child.index()] = Some(group_side);
            center[child.index()] = c;
        }
    }

    for idx in 1..len {
        let node = &tree.nodes()[idx];
        if node.children.is_empty() {
            continue;
        }
        let node_side = side[idx];
        for (child, c) in stack_band(&node.children, &heights, config.vertical_gap, center[idx]) {
            side[child.index()] = node_side;
            center[child.index()] = c;
        }
    }

    // Bottom-up: leaves take their band center, internal nodes the mean of their children.
    let nodes = tree.nodes_mut();
    for idx in (1..len).rev() {
        let y = if nodes[idx].children.is_empty() {
            center[idx]
        } else {
            let children = &nodes[idx].children;
            let sum = children.iter().map(|c| nodes[c.index()].y).sum::<f64>();
            sum / children.len() as f64
        };
        let sign = side[idx].map_or(0.0, Side::sign);
        let node = &mut nodes[idx];
        node.x = sign * node.depth as f64 * config.horizontal_step;
        node.y = y;
    }

    if let Some(root) = nodes.first_mut() {
        root.x = 0.0;
        root.y = 0.0;
    }
}

/// Stacks `group` by subtree height around `center_y` and returns each member's band center.
fn stack_band(group: &[NodeId], heights: &[f64], gap: f64, center_y: f64) -> Vec<(NodeId, f64)> {
    let total = stacked_height(group, heights, gap);
    let mut start = center_y - total / 2.0;
    let mut out = Vec::with_capacity(group.len());
    for &child in group {
        let h = heights[child.index()];
        out.push((child, start + h / 2.0));
        start += h + gap;
    }
    out
}

/// Flattens the positioned tree into pre-order nodes and parent → child edges.
///
/// An edge is emitted right before its child's subtree, i.e. edges are ordered by child id.
pub fn flatten_tree(tree: &SizedTree) -> (Vec<PositionedNode>, Vec<LayoutEdge>) {
    let mut parent: Vec<Option<NodeId>> = vec![None; tree.len()];
    for node in tree.nodes() {
        for c in &node.children {
            parent[c.index()] = Some(node.id);
        }
    }

    let mut nodes = Vec::with_capacity(tree.len());
    let mut edges = Vec::with_capacity(tree.len().saturating_sub(1));
    for node in tree.nodes() {
        if let Some(from) = parent[node.id.index()] {
            edges.push(LayoutEdge { from, to: node.id });
        }
        nodes.push(PositionedNode {
            id: node.id,
            title: node.title.clone(),
            lines: node.lines.clone(),
            depth: node.depth,
            x: node.x,
            y: node.y,
            width: node.width,
            height: node.height,
        });
    }
    (nodes, edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::DeterministicTextMeasurer;
    use mindloom_core::parse_outline;

    fn placed(markdown: &str) -> SizedTree {
        let cfg = LayoutConfig::default();
        let outline = parse_outline(markdown).unwrap();
        let mut tree = decorate_tree(&outline, &cfg, &DeterministicTextMeasurer::default());
        place_tree(&mut tree, &cfg);
        tree
    }

    fn by_title<'a>(tree: &'a SizedTree, title: &str) -> &'a crate::model::SizedNode {
        tree.nodes().iter().find(|n| n.title == title).unwrap()
    }

    #[test]
    fn subtree_height_is_max_of_own_and_stacked_children() {
        let cfg = LayoutConfig::default();
        let outline = parse_outline("- R\n  - A\n    - a1\n    - a2\n    - a3\n  - B").unwrap();
        let tree = decorate_tree(&outline, &cfg, &DeterministicTextMeasurer::default());
        let h = subtree_heights(&tree, cfg.vertical_gap);
        // a1..a3 are 40 high: 3 * 40 + 2 * 26
        assert_eq!(h[1], 172.0);
        assert_eq!(h[5], 40.0);
        assert_eq!(h[0], 172.0 + 26.0 + 40.0);
    }

    #[test]
    fn greedy_split_balances_running_totals() {
        let ids = [NodeId(1), NodeId(2), NodeId(3), NodeId(4)];
        let heights = [0.0, 100.0, 40.0, 40.0, 40.0];
        let (left, right) = split_top_level(&ids, &heights);
        // 1 -> left (tie), 2 -> right, 3 -> right (40 < 100), 4 -> right (80 < 100)
        assert_eq!(left, [NodeId(1)]);
        assert_eq!(right, [NodeId(2), NodeId(3), NodeId(4)]);
    }

    #[test]
    fn split_with_single_child_keeps_one_side_empty() {
        let (left, right) = split_top_level(&[NodeId(1)], &[0.0, 40.0]);
        assert_eq!(left.len() + right.len(), 1);
    }

    #[test]
    fn split_never_leaves_a_side_empty_with_two_children() {
        let (left, right) = split_top_level(&[NodeId(1), NodeId(2)], &[0.0, 40.0, 40.0]);
        assert_eq!(left, [NodeId(1)]);
        assert_eq!(right, [NodeId(2)]);
    }

    #[test]
    fn columns_are_signed_by_side() {
        let tree = placed("# T\n- L\n  - L1\n- R\n  - R1");
        assert_eq!((tree.root().x, tree.root().y), (0.0, 0.0));
        assert_eq!(by_title(&tree, "L").x, -420.0);
        assert_eq!(by_title(&tree, "L1").x, -840.0);
        assert_eq!(by_title(&tree, "R").x, 420.0);
        assert_eq!(by_title(&tree, "R1").x, 840.0);
    }

    #[test]
    fn parent_sits_at_mean_of_children() {
        let tree = placed("- R\n  - A\n    - a1\n    - a2\n      - x\n      - y\n      - z\n  - B");
        let a = by_title(&tree, "A");
        let a1 = by_title(&tree, "a1");
        let a2 = by_title(&tree, "a2");
        assert_eq!(a.y, (a1.y + a2.y) / 2.0);

        let x = by_title(&tree, "x");
        let z = by_title(&tree, "z");
        let y = by_title(&tree, "y");
        assert_eq!(a2.y, (x.y + y.y + z.y) / 3.0);
    }

    #[test]
    fn siblings_are_stacked_with_the_vertical_gap() {
        let tree = placed("- R\n  - A\n    - a1\n    - a2\n  - B");
        let a1 = by_title(&tree, "a1");
        let a2 = by_title(&tree, "a2");
        assert_eq!(a2.y - a1.y, 40.0 + 26.0);
    }

    #[test]
    fn top_level_branches_use_the_larger_gap() {
        // Three branches: L gets 1 and 3 on the left, 2 goes right.
        let tree = placed("# T\n- one\n- two\n- three");
        let one = by_title(&tree, "one");
        let three = by_title(&tree, "three");
        assert_eq!(one.x, -420.0);
        assert_eq!(three.x, -420.0);
        assert_eq!(three.y - one.y, 40.0 + 48.0);
        assert_eq!(by_title(&tree, "two").y, 0.0);
    }

    #[test]
    fn flatten_orders_nodes_and_edges_preorder() {
        let tree = placed("- A\n  - B\n    - C\n  - D");
        let (nodes, edges) = flatten_tree(&tree);
        assert_eq!(
            nodes.iter().map(|n| n.title.as_str()).collect::<Vec<_>>(),
            ["A", "B", "C", "D"]
        );
        assert_eq!(
            edges
                .iter()
                .map(|e| (e.from.0, e.to.0))
                .collect::<Vec<_>>(),
            [(0, 1), (1, 2), (0, 3)]
        );
    }
}
