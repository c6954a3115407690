use serde::Serialize;

use crate::encoding::{AxisLayout, AxisOrient, Formatter, LabelOverlapStrategy, TextAnchor};

/// How X tick labels are drawn, derived from the resolved X layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickLabelStrategy {
    pub label_overlap: LabelOverlapStrategy,
    pub label_angle: f64,
    pub text_anchor: TextAnchor,
}

impl TickLabelStrategy {
    #[must_use]
    pub fn from_layout(layout: &AxisLayout) -> Self {
        Self {
            label_overlap: layout.label_overlap,
            label_angle: layout.label_angle,
            text_anchor: layout.tick_text_anchor,
        }
    }
}

/// Everything an axis renderer needs for one axis.
#[derive(Debug, Clone)]
pub struct AxisDescriptor {
    pub label: String,
    pub label_offset: f64,
    pub tick_count: usize,
    pub orientation: AxisOrient,
    pub tick_format: Formatter,
    pub tick_strategy: Option<TickLabelStrategy>,
}

impl AxisDescriptor {
    /// Formats one tick value with the axis formatter.
    #[must_use]
    pub fn format_tick(&self, value: &serde_json::Value) -> String {
        self.tick_format.format(value)
    }
}
