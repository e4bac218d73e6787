//! Typed mind-map configuration.
//!
//! Every field has a default, and every struct deserializes with `#[serde(default)]`, so a
//! partial JSON/YAML document only overrides the keys it names.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};


#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MindmapConfig {
    pub outline: OutlineConfig,
    pub layout: LayoutConfig,
    pub style: StyleConfig,
}

/// Outline parsing knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutlineConfig {
    /// Title of the synthesized root when several top-level bullets exist and no heading was seen.
    pub fallback_title: String,
    /// Tabs in bullet indentation advance to the next multiple of this width.
    pub tab_width: usize,
    /// Indentation units per outline level.
    pub indent_per_level: usize,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            fallback_title: "Mind Map".to_string(),
            tab_width: 2,
            indent_per_level: 2,
        }
    }
}

/// Geometry of the two-sided layout. All lengths are in layout units (SVG px / PDF pt).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Horizontal distance between two depth columns.
    pub horizontal_step: f64,
    /// Gap between nested sibling subtrees.
    pub vertical_gap: f64,
    /// Gap between top-level branches on the same side.
    pub top_level_gap: f64,
    pub margin: f64,
    pub min_node_width: f64,
    pub max_node_width: f64,
    pub min_node_height: f64,
    pub line_height: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    /// Average glyph advance used by the deterministic text measurer.
    pub avg_char_width: f64,
    /// Wrap width (in characters) of the root; shrinks by one per depth level.
    pub wrap_width_root: usize,
    pub wrap_width_min: usize,
    pub max_lines: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_step: 420.0,
            vertical_gap: 26.0,
            top_level_gap: 48.0,
            margin: 130.0,
            min_node_width: 135.0,
            max_node_width: 360.0,
            min_node_height: 40.0,
            line_height: 16.0,
            padding_x: 28.0,
            padding_y: 14.0,
            avg_char_width: 6.8,
            wrap_width_root: 24,
            wrap_width_min: 14,
            max_lines: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub fill: String,
    pub stroke: String,
}

impl PaletteEntry {
    fn new(fill: &str, stroke: &str) -> Self {
        Self {
            fill: fill.to_string(),
            stroke: stroke.to_string(),
        }
    }
}

/// Colours, fonts and stroke widths shared by the SVG and page-drawing renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleConfig {
    pub background: String,
    pub edge_color: String,
    pub edge_width: f64,
    pub text_color: String,
    pub corner_radius: f64,
    pub svg_font_family: String,
    pub svg_font_size: f64,
    pub svg_node_stroke_width: f64,
    pub drawing_font_name: String,
    pub drawing_font_size: f64,
    pub drawing_node_stroke_width: f64,
    /// Distance from a line's visual center down to its baseline in the page drawing.
    pub drawing_baseline_offset: f64,
    /// Depth-keyed fill/stroke pairs; depths past the end reuse the last entry.
    pub palette: Vec<PaletteEntry>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background: "#f8fafc".to_string(),
            edge_color: "#94a3b8".to_string(),
            edge_width: 1.6,
            text_color: "#0f172a".to_string(),
            corner_radius: 11.0,
            svg_font_family: "Arial, sans-serif".to_string(),
            svg_font_size: 12.0,
            svg_node_stroke_width: 1.5,
            drawing_font_name: "Helvetica".to_string(),
            drawing_font_size: 10.0,
            drawing_node_stroke_width: 1.2,
            drawing_baseline_offset: 4.0,
            palette: vec![
                PaletteEntry::new("#dbeafe", "#1d4ed8"),
                PaletteEntry::new("#e2e8f0", "#334155"),
                PaletteEntry::new("#fef3c7", "#b45309"),
                PaletteEntry::new("#dcfce7", "#166534"),
                PaletteEntry::new("#fee2e2", "#b91c1c"),
                PaletteEntry::new("#ede9fe", "#6d28d9"),
            ],
        }
    }
}

impl MindmapConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let o = &self.outline;
        if o.tab_width == 0 {
            return Err(Error::invalid_config("outline.tabWidth must be at least 1"));
        }
        if o.indent_per_level == 0 {
            return Err(Error::invalid_config(
                "outline.indentPerLevel must be at least 1",
            ));
        }

        let l = &self.layout;
        for (name, v) in [
            ("horizontalStep", l.horizontal_step),
            ("verticalGap", l.vertical_gap),
            ("topLevelGap", l.top_level_gap),
            ("margin", l.margin),
            ("minNodeWidth", l.min_node_width),
            ("maxNodeWidth", l.max_node_width),
            ("minNodeHeight", l.min_node_height),
            ("lineHeight", l.line_height),
            ("paddingX", l.padding_x),
            ("paddingY", l.padding_y),
            ("avgCharWidth", l.avg_char_width),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(Error::invalid_config(format!(
                    "layout.{name} must be a finite, non-negative number (got {v})"
                )));
            }
        }
        if l.vertical_gap == 0.0 || l.top_level_gap == 0.0 {
            return Err(Error::invalid_config(
                "layout.verticalGap and layout.topLevelGap must be positive",
            ));
        }
        if l.max_node_width < l.min_node_width {
            return Err(Error::invalid_config(
                "layout.maxNodeWidth must not be smaller than layout.minNodeWidth",
            ));
        }
        // Adjacent depth columns are `horizontalStep` apart; boxes wider than that would collide.
        if l.horizontal_step <= l.max_node_width {
            return Err(Error::invalid_config(
                "layout.horizontalStep must exceed layout.maxNodeWidth",
            ));
        }
        if l.wrap_width_min == 0 {
            return Err(Error::invalid_config(
                "layout.wrapWidthMin must be at least 1",
            ));
        }
        if l.max_lines == 0 {
            return Err(Error::invalid_config("layout.maxLines must be at least 1"));
        }

        let s = &self.style;
        for (name, v) in [
            ("edgeWidth", s.edge_width),
            ("cornerRadius", s.corner_radius),
            ("svgFontSize", s.svg_font_size),
            ("svgNodeStrokeWidth", s.svg_node_stroke_width),
            ("drawingFontSize", s.drawing_font_size),
            ("drawingNodeStrokeWidth", s.drawing_node_stroke_width),
            ("drawingBaselineOffset", s.drawing_baseline_offset),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(Error::invalid_config(format!(
                    "style.{name} must be a finite, non-negative number (got {v})"
                )));
            }
        }
        for (name, color) in [
            ("background", &s.background),
            ("edgeColor", &s.edge_color),
            ("textColor", &s.text_color),
        ] {
            if parse_hex_rgb(color).is_none() {
                return Err(Error::invalid_config(format!(
                    "style.{name} must be a #rgb or #rrggbb color (got {color:?})"
                )));
            }
        }
        if s.palette.is_empty() {
            return Err(Error::invalid_config("style.palette must not be empty"));
        }
        for (idx, entry) in s.palette.iter().enumerate() {
            if parse_hex_rgb(&entry.fill).is_none() || parse_hex_rgb(&entry.stroke).is_none() {
                return Err(Error::invalid_config(format!(
                    "style.palette[{idx}] colors must be #rgb or #rrggbb"
                )));
            }
        }

        Ok(())
    }
}

/// Parses `#rgb` / `#rrggbb` (case-insensitive) into RGB bytes.
pub fn parse_hex_rgb(text: &str) -> Option<(u8, u8, u8)> {
    let hex = text.trim().strip_prefix('#')?;
    fn hex2(b: &[u8]) -> Option<u8> {
        let hi = (*b.first()? as char).to_digit(16)? as u8;
        let lo = (*b.get(1)? as char).to_digit(16)? as u8;
        Some((hi << 4) | lo)
    }
    fn hex1(c: u8) -> Option<u8> {
        let v = (c as char).to_digit(16)? as u8;
        Some((v << 4) | v)
    }

    let bytes = hex.as_bytes();
    match bytes.len() {
        3 => Some((hex1(bytes[0])?, hex1(bytes[1])?, hex1(bytes[2])?)),
        6 => Some((
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
        )),
        _ => None,
    }
}
