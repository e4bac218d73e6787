use mindloom::render::{MindmapRenderer, UnicodeWidthTextMeasurer, layout_markdown};
use mindloom::{MindmapConfig, render_page_drawing, render_vector_graphic};
use std::sync::Arc;

const NOTES: &str = "# Launch plan\n\nSome intro prose.\n\n- Marketing\n  - Blog post\n  - Social\n- Engineering\n  - Feature freeze\n  - Load test\n- Support\n";

#[test]
fn vector_graphic_for_outline() {
    let svg = render_vector_graphic(NOTES).expect("outline");
    let doc = roxmltree::Document::parse(&svg).expect("svg parses");
    assert_eq!(doc.root_element().tag_name().name(), "svg");
    assert!(svg.contains(">Launch plan</tspan>"));
}

#[test]
fn plain_prose_yields_nothing() {
    let prose = "Just a paragraph.\n\nAnother one, with **bold** text.";
    assert!(render_vector_graphic(prose).is_none());
    assert!(render_page_drawing(prose, Some(500.0), None).is_none());
    assert!(render_vector_graphic("").is_none());
}

#[test]
fn page_drawing_respects_bounds() {
    let drawing = render_page_drawing(NOTES, Some(300.0), Some(300.0)).expect("outline");
    assert!(drawing.width <= 300.0 + 1e-9);
    assert!(drawing.height <= 300.0 + 1e-9);
    assert!(drawing.scale < 1.0);

    let unbounded = render_page_drawing(NOTES, None, None).expect("outline");
    assert_eq!(unbounded.scale, 1.0);
    assert_eq!(unbounded.len(), drawing.len());
}

#[test]
fn entry_points_are_deterministic() {
    assert_eq!(render_vector_graphic(NOTES), render_vector_graphic(NOTES));
    assert_eq!(
        render_page_drawing(NOTES, Some(400.0), None),
        render_page_drawing(NOTES, Some(400.0), None)
    );
}

#[test]
fn renderer_uses_its_config() {
    let config = MindmapConfig::from_yaml_str("style:\n  background: \"#101010\"\n").expect("yaml");
    let renderer = MindmapRenderer::new().with_config(config).expect("valid");
    let svg = renderer.render_svg_sync(NOTES).expect("outline");
    assert!(svg.contains(r##"fill="#101010""##));

    let outline = renderer.parse_outline_sync(NOTES).expect("outline");
    assert_eq!(outline.children.len(), 3);
}

#[test]
fn renderer_rejects_invalid_config() {
    assert!(MindmapConfig::from_json_str(r#"{ "layout": { "maxLines": 0 } }"#).is_err());

    let mut config = MindmapConfig::default();
    config.layout.max_lines = 0;
    let err = MindmapRenderer::new()
        .with_config(config)
        .expect_err("maxLines of zero");
    assert!(err.to_string().contains("maxLines"), "{err}");
}

#[test]
fn async_layout_matches_sync() {
    let renderer = MindmapRenderer::new()
        .with_text_measurer(Arc::new(UnicodeWidthTextMeasurer::default()));
    let sync = renderer.layout_sync(NOTES).expect("outline");
    let async_layout =
        futures::executor::block_on(layout_markdown(NOTES, &renderer.layout)).expect("outline");
    assert_eq!(sync, async_layout);
}

#[cfg(feature = "raster")]
#[test]
fn raster_outputs_have_signatures() {
    use mindloom::render::raster::{PdfPageOptions, RasterOptions};

    let renderer = MindmapRenderer::new();
    let png = renderer
        .render_png_sync(NOTES, &RasterOptions::default())
        .expect("png")
        .expect("outline");
    assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));

    let jpg = renderer
        .render_jpeg_sync(NOTES, &RasterOptions::default())
        .expect("jpg")
        .expect("outline");
    assert!(jpg.starts_with(&[0xff, 0xd8]));

    let pdf = renderer
        .render_pdf_sync(NOTES, None, None, &PdfPageOptions::default())
        .expect("pdf")
        .expect("outline");
    assert!(pdf.starts_with(b"%PDF-"));
}
