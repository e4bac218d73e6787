#![forbid(unsafe_code)]

//! `mindloom` turns markdown outlines (headings + nested bullet lists) into two-sided mind maps.
//!
//! The layout engine is headless and deterministic: byte-identical input produces byte-identical
//! output. Text that has no bullet structure yields `None`, and callers are expected to fall back
//! to rendering the markdown as plain text.
//!
//! # Features
//!
//! - `render` (default): layout + SVG and page-drawing output (`mindloom::render`)
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use mindloom_core::*;

#[cfg(feature = "render")]
pub use render::{render_page_drawing, render_vector_graphic};

#[cfg(feature = "render")]
pub mod render {
    pub use mindloom_render::drawing::{Color, Drawing, Shape, TextAnchor};
    pub use mindloom_render::model::{LayoutEdge, MindmapLayout, NodeId, PositionedNode};
    pub use mindloom_render::text::{
        DeterministicTextMeasurer, TextMeasurer, UnicodeWidthTextMeasurer,
    };
    pub use mindloom_render::{
        LayoutOptions, layout_outline, layout_to_json, render_layout_drawing, render_layout_svg,
    };

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Config(#[from] mindloom_core::Error),
        #[error(transparent)]
        Render(#[from] mindloom_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Renders `markdown` as a mind-map SVG with the default configuration.
    ///
    /// Returns `None` when the text has no bullet structure.
    pub fn render_vector_graphic(markdown: &str) -> Option<String> {
        MindmapRenderer::default().render_svg_sync(markdown)
    }

    /// Renders `markdown` as a page drawing with the default configuration, downscaled to fit
    /// `max_width`/`max_height` when given.
    ///
    /// Returns `None` when the text has no bullet structure.
    pub fn render_page_drawing(
        markdown: &str,
        max_width: Option<f64>,
        max_height: Option<f64>,
    ) -> Option<Drawing> {
        MindmapRenderer::default().render_drawing_sync(markdown, max_width, max_height)
    }

    /// Synchronous layout helper (executor-free).
    pub fn layout_markdown_sync(markdown: &str, options: &LayoutOptions) -> Option<MindmapLayout> {
        mindloom_render::layout_markdown(markdown, options)
    }

    pub async fn layout_markdown(markdown: &str, options: &LayoutOptions) -> Option<MindmapLayout> {
        layout_markdown_sync(markdown, options)
    }

    pub async fn render_svg(markdown: &str, options: &LayoutOptions) -> Option<String> {
        let layout = layout_markdown_sync(markdown, options)?;
        Some(render_layout_svg(&layout, &options.config))
    }

    /// Convenience wrapper that bundles the layout options used for every render.
    ///
    /// It stays runtime-agnostic: all work is CPU-bound and does not perform I/O.
    #[derive(Debug, Clone, Default)]
    pub struct MindmapRenderer {
        pub layout: LayoutOptions,
    }

    impl MindmapRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Validates `config` and uses it for every subsequent render.
        ///
        /// This resets the text measurer to the deterministic one sized by `avgCharWidth`; call
        /// [`MindmapRenderer::with_text_measurer`] afterwards to swap it.
        pub fn with_config(mut self, config: mindloom_core::MindmapConfig) -> Result<Self> {
            self.layout = LayoutOptions::from_config(config)?;
            Ok(self)
        }

        pub fn with_text_measurer(
            mut self,
            measurer: std::sync::Arc<dyn TextMeasurer + Send + Sync>,
        ) -> Self {
            self.layout.text_measurer = measurer;
            self
        }

        pub fn config(&self) -> &mindloom_core::MindmapConfig {
            &self.layout.config
        }

        pub fn parse_outline_sync(&self, markdown: &str) -> Option<mindloom_core::OutlineNode> {
            mindloom_core::parse_outline_with(markdown, &self.layout.config.outline)
        }

        pub fn layout_sync(&self, markdown: &str) -> Option<MindmapLayout> {
            layout_markdown_sync(markdown, &self.layout)
        }

        pub fn render_svg_sync(&self, markdown: &str) -> Option<String> {
            let layout = self.layout_sync(markdown)?;
            Some(render_layout_svg(&layout, &self.layout.config))
        }

        pub fn render_drawing_sync(
            &self,
            markdown: &str,
            max_width: Option<f64>,
            max_height: Option<f64>,
        ) -> Option<Drawing> {
            let layout = self.layout_sync(markdown)?;
            Some(render_layout_drawing(
                &layout,
                &self.layout.config,
                max_width,
                max_height,
            ))
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync(
            &self,
            markdown: &str,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Option<Vec<u8>>> {
            let Some(svg) = self.render_svg_sync(markdown) else {
                return Ok(None);
            };
            Ok(Some(raster::svg_to_png(&svg, raster)?))
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg_sync(
            &self,
            markdown: &str,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Option<Vec<u8>>> {
            let Some(svg) = self.render_svg_sync(markdown) else {
                return Ok(None);
            };
            Ok(Some(raster::svg_to_jpeg(&svg, raster)?))
        }

        /// PDF of the page drawing, placed on a page of at least `page.min_width` ×
        /// `page.min_height`.
        #[cfg(feature = "raster")]
        pub fn render_pdf_sync(
            &self,
            markdown: &str,
            max_width: Option<f64>,
            max_height: Option<f64>,
            page: &raster::PdfPageOptions,
        ) -> raster::Result<Option<Vec<u8>>> {
            let Some(drawing) = self.render_drawing_sync(markdown, max_width, max_height) else {
                return Ok(None);
            };
            Ok(Some(raster::drawing_to_pdf(&drawing, page)?))
        }
    }
}
