use mindloom_core::StyleConfig;

const FALLBACK_FILL: &str = "#e2e8f0";
const FALLBACK_STROKE: &str = "#334155";

/// `(fill, stroke)` for a node at `depth`. Depths past the end of the palette reuse its last
/// entry.
pub fn palette_for_depth(style: &StyleConfig, depth: usize) -> (&str, &str) {
    let Some(last) = style.palette.len().checked_sub(1) else {
        return (FALLBACK_FILL, FALLBACK_STROKE);
    };
    let entry = &style.palette[depth.min(last)];
    (entry.fill.as_str(), entry.stroke.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depths_map_onto_palette_and_clamp() {
        let style = StyleConfig::default();
        assert_eq!(palette_for_depth(&style, 0), ("#dbeafe", "#1d4ed8"));
        assert_eq!(palette_for_depth(&style, 1), ("#e2e8f0", "#334155"));
        assert_eq!(palette_for_depth(&style, 5), ("#ede9fe", "#6d28d9"));
        assert_eq!(palette_for_depth(&style, 42), ("#ede9fe", "#6d28d9"));
    }

    #[test]
    fn empty_palette_falls_back() {
        let style = StyleConfig {
            palette: Vec::new(),
            ..StyleConfig::default()
        };
        assert_eq!(
            palette_for_depth(&style, 3),
            (FALLBACK_FILL, FALLBACK_STROKE)
        );
    }
}
