//! Heuristic text measurement + label wrapping.
//!
//! No font metrics are involved: a line's width is an estimate derived from its characters.

mod wrap;

#[cfg(test)]
mod tests;

use unicode_width::UnicodeWidthStr;

pub use wrap::{wrap_label, wrap_width_for_depth};

pub trait TextMeasurer {
    /// Estimated rendered width of a single line, in layout units.
    fn line_width(&self, line: &str) -> f64;

    fn max_line_width(&self, lines: &[String]) -> f64 {
        lines
            .iter()
            .map(|l| self.line_width(l))
            .fold(0.0, f64::max)
    }
}

/// Every `char` advances by the same width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeterministicTextMeasurer {
    pub char_width: f64,
}

impl Default for DeterministicTextMeasurer {
    fn default() -> Self {
        Self { char_width: 6.8 }
    }
}

impl DeterministicTextMeasurer {
    pub fn new(char_width: f64) -> Self {
        Self { char_width }
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn line_width(&self, line: &str) -> f64 {
        line.chars().count() as f64 * self.char_width
    }
}

/// Counts terminal display columns instead of `char`s, so East Asian wide glyphs take two
/// advances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnicodeWidthTextMeasurer {
    pub char_width: f64,
}

impl Default for UnicodeWidthTextMeasurer {
    fn default() -> Self {
        Self { char_width: 6.8 }
    }
}

impl UnicodeWidthTextMeasurer {
    pub fn new(char_width: f64) -> Self {
        Self { char_width }
    }
}

impl TextMeasurer for UnicodeWidthTextMeasurer {
    fn line_width(&self, line: &str) -> f64 {
        UnicodeWidthStr::width(line) as f64 * self.char_width
    }
}
