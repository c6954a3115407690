use serde::{Deserialize, Serialize};

use crate::core::Dimension;

/// Text styling inputs relevant to measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyle {
    pub font_size: f64,
    pub font_family: String,
    pub font_weight: u16,
    /// Line height as a multiple of the font size.
    pub line_height: f64,
}

impl TextStyle {
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            font_family: "sans-serif".to_owned(),
            font_weight: 400,
            line_height: 1.2,
        }
    }
}

/// Measures single-line label text; axis layout depends on nothing else.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> Dimension;
}

/// Deterministic, backend-independent glyph-width estimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> Dimension {
        if text.is_empty() {
            return Dimension::new(0.0, 0.0);
        }
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' | ':' | ';' | '\'' | '|' | 'i' | 'l' | 'j' => 0.34,
                '-' | '+' | '%' => 0.42,
                ' ' => 0.33,
                'm' | 'w' | 'M' | 'W' => 0.86,
                'A'..='Z' => 0.68,
                _ => 0.58,
            }
        });
        let bold_factor = if style.font_weight >= 600 { 1.06 } else { 1.0 };
        Dimension::new(
            units * style.font_size * bold_factor,
            style.font_size * style.line_height,
        )
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> Dimension {
        (**self).measure(text, style)
    }
}
