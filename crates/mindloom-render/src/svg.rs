//! SVG backend for [`MindmapLayout`].

pub(crate) mod util;

use mindloom_core::MindmapConfig;
use std::fmt::Write as _;

use crate::model::{MindmapLayout, PositionedNode};
use crate::palette::palette_for_depth;
use util::{escape_xml, escape_xml_into, fmt, fmt2};

/// `y` of the first text line so the whole block is vertically centered on the node.
pub(crate) fn first_line_y(node: &PositionedNode, line_height: f64) -> f64 {
    node.y - (node.lines.len().saturating_sub(1) as f64) * (line_height / 2.0)
}

/// Renders `layout` as a standalone SVG document.
///
/// The view box is the layout canvas truncated to whole units. Edges are drawn first (straight
/// center-to-center lines) so node boxes paint over them.
pub fn render_layout_svg(layout: &MindmapLayout, config: &MindmapConfig) -> String {
    let style = &config.style;
    let line_height = config.layout.line_height;
    let w = canvas_units(layout.width);
    let h = canvas_units(layout.height);

    let mut out = String::with_capacity(256 + layout.nodes.len() * 512);
    let _ = write!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}" role="img" aria-label="Mind map diagram">"#
    );
    let _ = write!(
        &mut out,
        r#"<rect x="0" y="0" width="100%" height="100%" fill="{}"/>"#,
        escape_xml(&style.background)
    );

    let edge_stroke = escape_xml(&style.edge_color);
    let edge_width = fmt(style.edge_width);
    for edge in &layout.edges {
        let (Some(from), Some(to)) = (layout.node(edge.from), layout.node(edge.to)) else {
            tracing::warn!(from = %edge.from, to = %edge.to, "edge references a missing node");
            continue;
        };
        let _ = write!(
            &mut out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{edge_stroke}" stroke-width="{edge_width}" stroke-linecap="round"/>"#,
            fmt2(from.x),
            fmt2(from.y),
            fmt2(to.x),
            fmt2(to.y),
        );
    }

    let radius = fmt(style.corner_radius);
    let node_stroke_width = fmt(style.svg_node_stroke_width);
    let font_family = escape_xml(&style.svg_font_family);
    let font_size = fmt(style.svg_font_size);
    let text_fill = escape_xml(&style.text_color);
    let dy_next = fmt(line_height);

    for node in &layout.nodes {
        let (fill, stroke) = palette_for_depth(style, node.depth);
        let _ = write!(
            &mut out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{radius}" ry="{radius}" fill="{}" stroke="{}" stroke-width="{node_stroke_width}"/>"#,
            fmt2(node.left()),
            fmt2(node.top()),
            fmt2(node.width),
            fmt2(node.height),
            escape_xml(fill),
            escape_xml(stroke),
        );

        let cx = fmt2(node.x);
        let _ = write!(
            &mut out,
            r#"<text x="{cx}" y="{}" font-family="{font_family}" font-size="{font_size}" text-anchor="middle" fill="{text_fill}">"#,
            fmt2(first_line_y(node, line_height)),
        );
        for (idx, line) in node.lines.iter().enumerate() {
            let dy = if idx == 0 { "0" } else { dy_next.as_str() };
            let _ = write!(&mut out, r#"<tspan x="{cx}" dy="{dy}">"#);
            escape_xml_into(&mut out, line);
            out.push_str("</tspan>");
        }
        out.push_str("</text>");
    }

    out.push_str("</svg>");
    out
}

fn canvas_units(v: f64) -> i64 {
    if v.is_finite() { v.trunc() as i64 } else { 0 }
}
