use mindloom_core::{LayoutConfig, OutlineNode};

use crate::model::{NodeId, SizedNode, SizedTree};
use crate::text::{TextMeasurer, wrap_label, wrap_width_for_depth};

/// Assigns pre-order ids, wrapped lines and box sizes to every node of `root`.
///
/// The id counter lives only for this call, so ids are deterministic per input. Traversal uses an
/// explicit stack; outline depth does not bound the native stack.
pub fn decorate_tree(
    root: &OutlineNode,
    config: &LayoutConfig,
    measurer: &dyn TextMeasurer,
) -> SizedTree {
    let mut nodes: Vec<SizedNode> = Vec::with_capacity(root.node_count());
    let mut stack: Vec<(&OutlineNode, usize, Option<NodeId>)> = vec![(root, 0, None)];

    while let Some((current, depth, parent)) = stack.pop() {
        let id = NodeId(nodes.len() as u32);
        let lines = wrap_label(
            &current.title,
            wrap_width_for_depth(depth, config),
            config.max_lines,
        );
        let (width, height) = node_box_size(&lines, config, measurer);

        nodes.push(SizedNode {
            id,
            depth,
            title: current.title.clone(),
            lines,
            width,
            height,
            x: 0.0,
            y: 0.0,
            children: Vec::with_capacity(current.children.len()),
        });
        if let Some(parent) = parent {
            nodes[parent.index()].children.push(id);
        }

        // Reversed so the first child is popped (and numbered) first.
        for child in current.children.iter().rev() {
            stack.push((child, depth + 1, Some(id)));
        }
    }

    tracing::trace!(nodes = nodes.len(), "decorated outline");
    SizedTree::from_preorder(nodes)
}

/// Box size for a wrapped label, clamped to the configured width range and minimum height.
pub fn node_box_size(
    lines: &[String],
    config: &LayoutConfig,
    measurer: &dyn TextMeasurer,
) -> (f64, f64) {
    let text_width = measurer.max_line_width(lines);
    let width = config
        .min_node_width
        .max(config.max_node_width.min(text_width + config.padding_x));
    let height = config
        .min_node_height
        .max(config.padding_y + lines.len() as f64 * config.line_height);
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::DeterministicTextMeasurer;
    use mindloom_core::parse_outline;

    fn decorate(markdown: &str) -> SizedTree {
        let outline = parse_outline(markdown).unwrap();
        decorate_tree(
            &outline,
            &LayoutConfig::default(),
            &DeterministicTextMeasurer::default(),
        )
    }

    #[test]
    fn ids_follow_preorder() {
        let tree = decorate("- A\n  - B\n    - C\n  - D\n    - E");
        let titles = tree
            .nodes()
            .iter()
            .map(|n| (n.id.0, n.title.as_str(), n.depth))
            .collect::<Vec<_>>();
        assert_eq!(
            titles,
            [(0, "A", 0), (1, "B", 1), (2, "C", 2), (3, "D", 1), (4, "E", 2)]
        );
        assert_eq!(tree.root().children, [NodeId(1), NodeId(3)]);
        let under_d: Vec<&str> = tree.children(NodeId(3)).map(|n| n.title.as_str()).collect();
        assert_eq!(under_d, ["E"]);
    }

    #[test]
    fn short_labels_get_minimum_box() {
        let tree = decorate("- A");
        let root = tree.root();
        assert_eq!(root.lines, ["A"]);
        assert_eq!((root.width, root.height), (135.0, 40.0));
    }

    #[test]
    fn box_grows_with_text_and_is_capped() {
        let cfg = LayoutConfig::default();
        let m = DeterministicTextMeasurer::default();

        // 24 chars: 24 * 6.8 + 28 = 191.2
        let (w, h) = node_box_size(&["x".repeat(24)], &cfg, &m);
        assert!((w - 191.2).abs() < 1e-9);
        assert_eq!(h, 40.0);

        // Six lines: 14 + 6 * 16
        let lines = vec!["abc".to_string(); 6];
        assert_eq!(node_box_size(&lines, &cfg, &m).1, 110.0);

        let (w, _) = node_box_size(&["x".repeat(80)], &cfg, &m);
        assert_eq!(w, 360.0);
    }

    #[test]
    fn deep_nodes_wrap_narrower() {
        let tree = decorate(
            "- Root\n  - One two three four five six\n    - One two three four five six\n      - One two three four five six",
        );
        let widths = tree
            .nodes()
            .iter()
            .skip(1)
            .map(|n| n.lines[0].chars().count())
            .collect::<Vec<_>>();
        // Wrap widths 23, 22, 21: "One two three four five" is 23 chars.
        assert_eq!(widths, [23, 18, 18]);
    }
}
