#![forbid(unsafe_code)]

//! Headless mind-map layout for markdown outlines, plus two backends: an SVG document and a
//! page drawing (bottom-left origin, optional fit-to-bounds).
//!
//! Pipeline: outline → [`decorate::decorate_tree`] (ids, wrapped lines, box sizes) →
//! [`layout::place_tree`] (two-sided placement) → [`bounds::normalize_bounds`] → renderers.

pub mod bounds;
pub mod decorate;
pub mod drawing;
pub mod layout;
pub mod model;
pub mod palette;
pub mod svg;
pub mod text;

use mindloom_core::{MindmapConfig, parse_outline_with};
use std::sync::Arc;

use crate::model::MindmapLayout;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};

pub use drawing::{Color, Drawing, Shape, TextAnchor, render_layout_drawing};
pub use layout::layout_outline;
pub use model::{LayoutEdge, NodeId, PositionedNode};
pub use svg::render_layout_svg;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] mindloom_core::Error),
    #[error("layout JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub config: MindmapConfig,
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            config: MindmapConfig::default(),
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LayoutOptions {
    /// Validates `config` and pairs it with a deterministic measurer using its average character
    /// width.
    pub fn from_config(config: MindmapConfig) -> Result<Self> {
        config.validate()?;
        let measurer = DeterministicTextMeasurer::new(config.layout.avg_char_width);
        Ok(Self {
            config,
            text_measurer: Arc::new(measurer),
        })
    }

    pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer + Send + Sync>) -> Self {
        self.text_measurer = measurer;
        self
    }
}

/// Parses `markdown` and lays it out. `None` when the text has no outline structure.
pub fn layout_markdown(markdown: &str, options: &LayoutOptions) -> Option<MindmapLayout> {
    let outline = parse_outline_with(markdown, &options.config.outline)?;
    Some(layout_outline(&outline, options))
}

/// Serializes a layout as JSON, the format the CLI prints.
pub fn layout_to_json(layout: &MindmapLayout, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(layout)?
    } else {
        serde_json::to_string(layout)?
    })
}
