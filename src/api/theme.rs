use serde::{Deserialize, Serialize};

use crate::core::TextStyle;
use crate::encoding::DEFAULT_LABEL_ANGLE;

/// Tick label styles keyed by the side the axis is drawn on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TickLabelStyles {
    pub top: TextStyle,
    pub bottom: TextStyle,
    pub left: TextStyle,
    pub right: TextStyle,
}

impl TickLabelStyles {
    #[must_use]
    pub fn uniform(style: TextStyle) -> Self {
        Self {
            top: style.clone(),
            bottom: style.clone(),
            left: style.clone(),
            right: style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickStyles {
    /// Tick mark length in pixels.
    pub length: f64,
    pub label: TickLabelStyles,
}

impl Default for TickStyles {
    fn default() -> Self {
        Self {
            length: 4.0,
            label: TickLabelStyles::default(),
        }
    }
}

/// Axis styling consumed by the layout pass.
///
/// Tick labels are measured with `y_tick_styles.label.right` for the Y axis
/// and `x_tick_styles.label.bottom` for the X axis, whatever side each axis
/// is drawn on. The other entries are for renderers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartTheme {
    pub x_tick_styles: TickStyles,
    pub y_tick_styles: TickStyles,
}

impl ChartTheme {
    #[must_use]
    pub fn with_tick_length(mut self, length: f64) -> Self {
        self.x_tick_styles.length = length;
        self.y_tick_styles.length = length;
        self
    }

    #[must_use]
    pub fn with_tick_label_style(mut self, style: TextStyle) -> Self {
        self.x_tick_styles.label = TickLabelStyles::uniform(style.clone());
        self.y_tick_styles.label = TickLabelStyles::uniform(style);
        self
    }
}

/// Layout constants that callers may tune.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutTuning {
    /// Extra margin reserved for a scrollbar when content overflows.
    pub overflow_margin: f64,
    /// Magnitude of the recommended X tick label rotation, in degrees.
    pub default_label_angle: f64,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            overflow_margin: 8.0,
            default_label_angle: DEFAULT_LABEL_ANGLE,
        }
    }
}
