use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
        }
    }
}

impl TextStyle {
    pub fn new(font_family: &str, font_size: f64) -> Self {
        Self {
            font_family: Some(font_family.to_string()),
            font_size,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

/// Measures rendered text. Backends treat the result as the exact glyph box of the text.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-independent measurer: every terminal column is `char_width_factor` em wide and every
/// line is `line_height_factor` em tall. Widths scale linearly with the font size.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    pub fn normalized_text_lines(text: &str) -> Vec<&str> {
        text.split('\n').collect()
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        if text.is_empty() {
            return TextMetrics::default();
        }

        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let lines = Self::normalized_text_lines(text);
        let font_size = style.font_size.max(0.0);
        let max_columns = lines
            .iter()
            .map(|line| UnicodeWidthStr::width(*line))
            .max()
            .unwrap_or(0);

        TextMetrics {
            width: max_columns as f64 * font_size * char_width_factor,
            height: lines.len() as f64 * font_size * line_height_factor,
            line_count: lines.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_text_has_no_extent() {
        let m = DeterministicTextMeasurer::default().measure("", &TextStyle::default());
        assert_eq!(m, TextMetrics::default());
    }

    #[test]
    fn width_scales_with_font_size() {
        let measurer = DeterministicTextMeasurer::default();
        let small = measurer.measure("3fr", &TextStyle::new("Arial", 10.0));
        let large = measurer.measure("3fr", &TextStyle::new("Arial", 40.0));

        assert_relative_eq!(small.width, 18.0);
        assert_relative_eq!(small.height, 12.0);
        assert_relative_eq!(large.width, small.width * 4.0);
    }

    #[test]
    fn wide_glyphs_count_double() {
        let measurer = DeterministicTextMeasurer::default();
        let m = measurer.measure("和弦", &TextStyle::new("Arial", 10.0));
        assert_relative_eq!(m.width, 24.0);
    }

    #[test]
    fn multi_line_text_stacks_lines() {
        let measurer = DeterministicTextMeasurer {
            char_width_factor: 0.5,
            line_height_factor: 1.0,
        };
        let m = measurer.measure("Am\nsus4", &TextStyle::new("Arial", 20.0));
        assert_eq!(m.line_count, 2);
        assert_relative_eq!(m.width, 40.0);
        assert_relative_eq!(m.height, 40.0);
    }
}
