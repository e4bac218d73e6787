//! Markdown outline → rooted tree.
//!
//! Only two kinds of lines matter: the first heading (a candidate title for a synthesized root)
//! and bullet lines (`-` or `*` markers), whose indentation defines the nesting. Everything else
//! is ignored.

mod utils;


use serde::{Deserialize, Serialize};

use crate::config::OutlineConfig;

pub use utils::clean_text;
use utils::{bullet_re, heading_re, indent_width, split_lines};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(title: impl Into<String>, children: Vec<OutlineNode>) -> Self {
        Self {
            title: title.into(),
            children,
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0usize;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Depth of the deepest descendant (0 for a leaf).
    pub fn max_depth(&self) -> usize {
        let mut deepest = 0usize;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children.iter().map(|c| (c, depth + 1)));
        }
        deepest
    }
}

// Dropping nested `Vec`s recurses once per level; flatten first so deep outlines cannot exhaust
// the stack.
impl Drop for OutlineNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Parses `markdown` with the default [`OutlineConfig`].
///
/// Returns `None` when the text contains no bullet lines: that is the "nothing to render"
/// outcome, not an error.
pub fn parse_outline(markdown: &str) -> Option<OutlineNode> {
    parse_outline_with(markdown, &OutlineConfig::default())
}

pub fn parse_outline_with(markdown: &str, config: &OutlineConfig) -> Option<OutlineNode> {
    let mut heading_title: Option<String> = None;
    let mut bullets: Vec<(usize, String)> = Vec::new();

    for raw_line in split_lines(markdown) {
        if heading_title.as_deref().is_none_or(str::is_empty) {
            if let Some(caps) = heading_re().captures(raw_line.trim()) {
                heading_title = Some(clean_text(&caps[1]));
            }
        }

        let Some(caps) = bullet_re().captures(raw_line) else {
            continue;
        };
        let indent = indent_width(&caps[1], config.tab_width);
        let text = clean_text(&caps[2]);
        if !text.is_empty() {
            bullets.push((indent, text));
        }
    }

    let Some(min_indent) = bullets.iter().map(|(indent, _)| *indent).min() else {
        tracing::debug!("outline has no bullet lines");
        return None;
    };
    let per_level = config.indent_per_level.max(1);
    let bullet_count = bullets.len();

    // Indent stack of open nodes. An empty stack stands for the pseudo-root at depth -1; closed
    // nodes are attached to whatever is below them, which keeps document order.
    let mut top_level: Vec<OutlineNode> = Vec::new();
    let mut stack: Vec<(usize, OutlineNode)> = Vec::new();

    fn close_top(stack: &mut Vec<(usize, OutlineNode)>, top_level: &mut Vec<OutlineNode>) {
        let Some((_, node)) = stack.pop() else {
            return;
        };
        match stack.last_mut() {
            Some((_, parent)) => parent.children.push(node),
            None => top_level.push(node),
        }
    }

    for (indent, text) in bullets {
        let depth = (indent - min_indent) / per_level;
        while stack.last().is_some_and(|(open, _)| depth <= *open) {
            close_top(&mut stack, &mut top_level);
        }
        stack.push((depth, OutlineNode::new(text)));
    }
    while !stack.is_empty() {
        close_top(&mut stack, &mut top_level);
    }

    tracing::debug!(
        bullets = bullet_count,
        top_level = top_level.len(),
        heading = heading_title.as_deref().unwrap_or(""),
        "parsed outline"
    );

    if top_level.len() == 1 {
        return top_level.pop();
    }

    let title = heading_title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| config.fallback_title.clone());
    Some(OutlineNode::with_children(title, top_level))
}
