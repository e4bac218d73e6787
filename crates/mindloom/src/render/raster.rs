#![forbid(unsafe_code)]

use crate::render::Drawing;
use mindloom_core::config::parse_hex_rgb;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("invalid background color: {0}")]
    Background(String),
    #[error("JPG rendering requires an opaque background color (e.g. white)")]
    JpegOpaqueBackgroundRequired,
    #[error("failed to encode JPG")]
    JpegEncode,
    #[error("failed to convert SVG to PDF")]
    PdfConvert,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    pub background: Option<String>,
    pub jpeg_quality: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
            jpeg_quality: 90,
        }
    }
}

/// Page geometry for [`drawing_to_pdf`], in PDF points.
///
/// The page is at least `min_width` × `min_height` and grows so the drawing plus `margin` on
/// every side always fits; mind maps are never clipped to the minimum page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfPageOptions {
    pub min_width: f64,
    pub min_height: f64,
    pub margin: f64,
}

impl PdfPageOptions {
    pub const A4: PdfPageOptions = PdfPageOptions {
        min_width: 595.28,
        min_height: 841.89,
        margin: 36.0,
    };

    /// Page size for a drawing of `width` × `height`.
    pub fn page_size(&self, width: f64, height: f64) -> (f64, f64) {
        let margin = self.margin.max(0.0);
        (
            self.min_width.max(width + margin * 2.0),
            self.min_height.max(height + margin * 2.0),
        )
    }
}

impl Default for PdfPageOptions {
    fn default() -> Self {
        Self::A4
    }
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options.scale, options.background.as_deref())?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

pub fn svg_to_jpeg(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let bg = options.background.as_deref().unwrap_or("white");
    let Some(color) = parse_tiny_skia_color(bg) else {
        return Err(RasterError::Background(bg.to_string()));
    };
    if color.alpha() != 1.0 {
        return Err(RasterError::JpegOpaqueBackgroundRequired);
    }

    let pixmap = svg_to_pixmap(svg, options.scale, Some(bg))?;
    let (w, h) = (pixmap.width(), pixmap.height());

    // The background is opaque, so every pixel has alpha 255 and the channel can be dropped.
    let rgba = pixmap.data();
    let mut rgb = vec![0u8; (w as usize) * (h as usize) * 3];
    for (src, dst) in rgba.chunks_exact(4).zip(rgb.chunks_exact_mut(3)) {
        dst.copy_from_slice(&src[..3]);
    }

    let mut out = Vec::new();
    let mut enc =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, options.jpeg_quality);
    enc.encode(&rgb, w, h, image::ExtendedColorType::Rgb8)
        .map_err(|_| RasterError::JpegEncode)?;
    Ok(out)
}

pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    // svg2pdf pins its own usvg; parse with that one.
    let mut opt = svg2pdf::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();
    let tree = svg2pdf::usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|_| RasterError::PdfConvert)
}

/// Places `drawing` in the top-left corner of a page (inside the margin) and converts it to PDF.
pub fn drawing_to_pdf(drawing: &Drawing, page: &PdfPageOptions) -> Result<Vec<u8>> {
    let svg = page_svg(drawing, page);
    tracing::debug!(bytes = svg.len(), "converting page drawing to PDF");
    svg_to_pdf(&svg)
}

fn page_svg(drawing: &Drawing, page: &PdfPageOptions) -> String {
    let (w, h) = page.page_size(drawing.width, drawing.height);
    let margin = page.margin.max(0.0);
    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}"><g transform="translate({margin} {margin})">"#
    );
    out.push_str(&drawing.to_svg_group());
    out.push_str("</g></svg>");
    out
}

fn parse_svg(svg: &str) -> Result<usvg::Tree> {
    let mut opt = usvg::Options::default();
    // Keep output stable-ish across environments while still using system fonts.
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();
    usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)
}

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let tree = parse_svg(svg)?;
    let size = tree.size();

    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;
    tracing::debug!(width_px, height_px, "rasterizing SVG");

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;

    if let Some(bg) = background {
        let color =
            parse_tiny_skia_color(bg).ok_or_else(|| RasterError::Background(bg.to_string()))?;
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

fn parse_tiny_skia_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 0)),
        "white" => return Some(tiny_skia::Color::from_rgba8(255, 255, 255, 255)),
        "black" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 255)),
        _ => {}
    }

    // `#rrggbbaa` carries alpha; everything else goes through the shared hex parser.
    if s.len() == 9 && s.is_ascii() && s.starts_with('#') {
        let (r, g, b) = parse_hex_rgb(&s[..7])?;
        let a = u8::from_str_radix(&s[7..], 16).ok()?;
        return Some(tiny_skia::Color::from_rgba8(r, g, b, a));
    }
    let (r, g, b) = parse_hex_rgb(&s)?;
    Some(tiny_skia::Color::from_rgba8(r, g, b, 255))
}
