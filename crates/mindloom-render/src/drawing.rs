//! Page-drawing backend: a flat list of shapes in a bottom-left-origin coordinate system, ready to
//! be placed on a document page.
//!
//! Shapes keep unscaled layout units; a fitted drawing only records its uniform `scale` and
//! reports the scaled `width`/`height`. [`Drawing::to_svg`] applies both the scale and the y-flip.

use mindloom_core::{MindmapConfig, config::parse_hex_rgb};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::model::MindmapLayout;
use crate::palette::palette_for_depth;
use crate::svg::first_line_y;
use crate::svg::util::{escape_xml_into, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rgb` or `#rrggbb`.
    pub fn from_hex(text: &str) -> Option<Self> {
        parse_hex_rgb(text).map(|(r, g, b)| Self { r, g, b })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_svg(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Drawing primitives. Coordinates have their origin at the bottom-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Color,
        stroke_width: f64,
    },
    /// `(x, y)` is the bottom-left corner.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
        ry: f64,
        fill: Color,
        stroke: Color,
        stroke_width: f64,
    },
    /// `y` is the baseline.
    Text {
        x: f64,
        y: f64,
        text: String,
        anchor: TextAnchor,
        font_name: String,
        font_size: f64,
        fill: Color,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
    shapes: Vec<Shape>,
}

impl Drawing {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scale: 1.0,
            shapes: Vec::new(),
        }
    }

    pub fn add(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Downscales uniformly so the drawing fits within the given bounds. Missing, non-finite and
    /// non-positive bounds are ignored; the drawing is never enlarged. Returns the factor applied.
    pub fn fit_within(&mut self, max_width: Option<f64>, max_height: Option<f64>) -> f64 {
        let usable = |v: Option<f64>| v.filter(|v| v.is_finite() && *v > 0.0);

        let mut scale: f64 = 1.0;
        if let Some(max_w) = usable(max_width) {
            scale = scale.min(max_w / self.width);
        }
        if let Some(max_h) = usable(max_height) {
            scale = scale.min(max_h / self.height);
        }

        if scale < 1.0 && scale.is_finite() && scale > 0.0 {
            self.scale *= scale;
            self.width *= scale;
            self.height *= scale;
            scale
        } else {
            1.0
        }
    }

    /// Serializes the drawing as an SVG document of its (scaled) size.
    pub fn to_svg(&self) -> String {
        let w = fmt(self.width);
        let h = fmt(self.height);
        let mut out = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#
        );
        out.push_str(&self.to_svg_group());
        out.push_str("</svg>");
        out
    }

    /// The drawing's shapes as a single SVG `<g>` whose origin is the drawing's top-left corner.
    ///
    /// Shapes are emitted in insertion order; the group flips the y axis and applies `scale`.
    pub fn to_svg_group(&self) -> String {
        let mut out = String::with_capacity(128 + self.shapes.len() * 160);
        // Unscaled height; the flip happens before scaling.
        let flip = fmt(self.height / self.scale);
        let s = fmt(self.scale);
        let _ = write!(
            &mut out,
            r#"<g transform="scale({s}) translate(0 {flip}) scale(1 -1)">"#
        );

        for shape in &self.shapes {
            match shape {
                Shape::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    stroke,
                    stroke_width,
                } => {
                    let _ = write!(
                        &mut out,
                        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                        fmt(*x1),
                        fmt(*y1),
                        fmt(*x2),
                        fmt(*y2),
                        stroke.to_hex(),
                        fmt(*stroke_width),
                    );
                }
                Shape::Rect {
                    x,
                    y,
                    width,
                    height,
                    rx,
                    ry,
                    fill,
                    stroke,
                    stroke_width,
                } => {
                    let _ = write!(
                        &mut out,
                        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" ry="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                        fmt(*x),
                        fmt(*y),
                        fmt(*width),
                        fmt(*height),
                        fmt(*rx),
                        fmt(*ry),
                        fill.to_hex(),
                        stroke.to_hex(),
                        fmt(*stroke_width),
                    );
                }
                Shape::Text {
                    x,
                    y,
                    text,
                    anchor,
                    font_name,
                    font_size,
                    fill,
                } => {
                    // Glyphs are flipped back locally so they stay upright.
                    let _ = write!(
                        &mut out,
                        r#"<text x="{}" y="{}" transform="matrix(1 0 0 -1 0 {})" text-anchor="{}" font-family=""#,
                        fmt(*x),
                        fmt(*y),
                        fmt(2.0 * *y),
                        anchor.as_svg(),
                    );
                    escape_xml_into(&mut out, font_name);
                    let _ = write!(
                        &mut out,
                        r#"" font-size="{}" fill="{}">"#,
                        fmt(*font_size),
                        fill.to_hex()
                    );
                    escape_xml_into(&mut out, text);
                    out.push_str("</text>");
                }
            }
        }

        out.push_str("</g>");
        out
    }
}

/// Builds the page drawing for `layout`, optionally downscaled to fit `max_width`/`max_height`.
///
/// Edges come first, then each node's box followed by its text lines. Colors that fail to parse
/// fall back to black.
pub fn render_layout_drawing(
    layout: &MindmapLayout,
    config: &MindmapConfig,
    max_width: Option<f64>,
    max_height: Option<f64>,
) -> Drawing {
    let style = &config.style;
    let line_height = config.layout.line_height;
    let canvas_h = layout.height;
    let color = |hex: &str| Color::from_hex(hex).unwrap_or(Color::BLACK);

    let mut drawing = Drawing::new(layout.width, layout.height);

    let edge_color = color(&style.edge_color);
    for edge in &layout.edges {
        let (Some(from), Some(to)) = (layout.node(edge.from), layout.node(edge.to)) else {
            tracing::warn!(from = %edge.from, to = %edge.to, "edge references a missing node");
            continue;
        };
        drawing.add(Shape::Line {
            x1: from.x,
            y1: canvas_h - from.y,
            x2: to.x,
            y2: canvas_h - to.y,
            stroke: edge_color,
            stroke_width: style.edge_width,
        });
    }

    let text_fill = color(&style.text_color);
    for node in &layout.nodes {
        let (fill, stroke) = palette_for_depth(style, node.depth);
        drawing.add(Shape::Rect {
            x: node.left(),
            y: canvas_h - node.bottom(),
            width: node.width,
            height: node.height,
            rx: style.corner_radius,
            ry: style.corner_radius,
            fill: color(fill),
            stroke: color(stroke),
            stroke_width: style.drawing_node_stroke_width,
        });

        let base_y = first_line_y(node, line_height);
        for (idx, line) in node.lines.iter().enumerate() {
            let y_svg = base_y + idx as f64 * line_height;
            drawing.add(Shape::Text {
                x: node.x,
                y: canvas_h - y_svg - style.drawing_baseline_offset,
                text: line.clone(),
                anchor: TextAnchor::Middle,
                font_name: style.drawing_font_name.clone(),
                font_size: style.drawing_font_size,
                fill: text_fill,
            });
        }
    }

    let scale = drawing.fit_within(max_width, max_height);
    tracing::debug!(shapes = drawing.len(), scale, "page drawing");
    drawing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_parse_and_print() {
        assert_eq!(
            Color::from_hex("#94a3b8"),
            Some(Color::rgb(0x94, 0xa3, 0xb8))
        );
        assert_eq!(Color::from_hex("#fff"), Some(Color::rgb(255, 255, 255)));
        assert_eq!(Color::from_hex("blue"), None);
        assert_eq!(Color::rgb(0x1d, 0x4e, 0xd8).to_hex(), "#1d4ed8");
    }

    #[test]
    fn fit_within_never_upscales() {
        let mut d = Drawing::new(400.0, 200.0);
        assert_eq!(d.fit_within(Some(800.0), Some(800.0)), 1.0);
        assert_eq!((d.width, d.height, d.scale), (400.0, 200.0, 1.0));
    }

    #[test]
    fn fit_within_uses_the_tighter_bound() {
        let mut d = Drawing::new(400.0, 200.0);
        assert_eq!(d.fit_within(Some(200.0), Some(150.0)), 0.5);
        assert_eq!((d.width, d.height, d.scale), (200.0, 100.0, 0.5));
    }

    #[test]
    fn fit_within_ignores_unusable_bounds() {
        let mut d = Drawing::new(400.0, 200.0);
        assert_eq!(d.fit_within(Some(0.0), Some(-5.0)), 1.0);
        assert_eq!(d.fit_within(Some(f64::NAN), None), 1.0);
        assert_eq!(d.fit_within(None, Some(100.0)), 0.5);
        assert_eq!(d.height, 100.0);
    }

    #[test]
    fn to_svg_wraps_shapes_in_a_flipping_group() {
        let mut d = Drawing::new(100.0, 50.0);
        d.add(Shape::Text {
            x: 50.0,
            y: 20.0,
            text: "R&D".to_string(),
            anchor: TextAnchor::Middle,
            font_name: "Helvetica".to_string(),
            font_size: 10.0,
            fill: Color::BLACK,
        });
        let svg = d.to_svg();
        assert!(svg.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50" width="100" height="50">"#
        ));
        assert!(svg.contains(r#"<g transform="scale(1) translate(0 50) scale(1 -1)">"#));
        assert!(svg.contains(">R&amp;D</text>"));
        assert!(svg.contains(r#"transform="matrix(1 0 0 -1 0 40)""#));
    }
}
