use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Dimension, PartialMargin, TextMeasurer, TextStyle};

use super::{ChannelEncoder, ChannelType, Formatter};

pub const DEFAULT_TICK_COUNT: usize = 5;
pub const DEFAULT_LABEL_PADDING: f64 = 4.0;
pub const DEFAULT_LABEL_ANGLE: f64 = 40.0;

/// Side of the plot an axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrient {
    Top,
    Bottom,
    Left,
    Right,
}

impl AxisOrient {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// Requested policy when tick labels do not fit side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelOverlap {
    #[default]
    Auto,
    Flat,
    Rotate,
}

/// Strategy actually applied after measuring labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelOverlapStrategy {
    Flat,
    Rotate,
}

/// Horizontal anchor of a tick label relative to its tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Axis options as written in a channel definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orient: Option<AxisOrient>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_overlap: Option<LabelOverlap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl AxisConfig {
    #[must_use]
    pub fn with_orient(mut self, orient: AxisOrient) -> Self {
        self.orient = Some(orient);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = Some(tick_count);
        self
    }

    #[must_use]
    pub fn with_label_overlap(mut self, label_overlap: LabelOverlap) -> Self {
        self.label_overlap = Some(label_overlap);
        self
    }
}

/// Axis options with every default filled in for a given channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAxisConfig {
    pub orient: AxisOrient,
    pub title: Option<String>,
    pub tick_count: usize,
    pub label_angle: f64,
    pub label_overlap: LabelOverlap,
    pub label_padding: f64,
    pub format: Option<String>,
}

impl ResolvedAxisConfig {
    /// Completes `config` for a positional channel.
    ///
    /// An orientation on the wrong side (e.g. `left` on an X channel) falls
    /// back to the channel's default side.
    #[must_use]
    pub fn complete(channel_type: ChannelType, config: Option<&AxisConfig>) -> Self {
        let config = config.cloned().unwrap_or_default();
        let default_orient = if channel_type.is_x() {
            AxisOrient::Bottom
        } else {
            AxisOrient::Left
        };
        let orient = match config.orient {
            Some(orient) if orient.is_horizontal() == channel_type.is_x() => orient,
            _ => default_orient,
        };

        Self {
            orient,
            title: config.title,
            tick_count: config.tick_count.unwrap_or(DEFAULT_TICK_COUNT),
            label_angle: config.label_angle.unwrap_or(DEFAULT_LABEL_ANGLE),
            label_overlap: config.label_overlap.unwrap_or_default(),
            label_padding: config
                .label_padding
                .filter(|padding| padding.is_finite() && *padding >= 0.0)
                .unwrap_or(DEFAULT_LABEL_PADDING),
            format: config.format,
        }
    }
}

/// Inputs of one axis layout computation.
#[derive(Debug, Clone, Copy)]
pub struct AxisLayoutRequest<'s> {
    /// Length of the axis line in pixels.
    pub axis_width: f64,
    pub tick_length: f64,
    pub tick_text_style: &'s TextStyle,
    /// Overrides the configured label angle (used for X-axis recommendations).
    pub label_angle: Option<f64>,
}

/// Geometry an axis needs to render without clipping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLayout {
    pub orient: AxisOrient,
    pub tick_count: usize,
    pub tick_labels: Vec<String>,
    pub tick_label_dimensions: Vec<Dimension>,
    pub label_angle: f64,
    pub label_overlap: LabelOverlapStrategy,
    pub tick_text_anchor: TextAnchor,
    /// Distance from the axis line to the axis title.
    pub label_offset: f64,
    pub min_margin: PartialMargin,
}

/// Axis view over a channel encoder.
///
/// Borrowed from the encoder that owns the axis configuration; it can never
/// outlive that encoder.
#[derive(Debug, Clone, Copy)]
pub struct AxisAgent<'a> {
    encoder: &'a ChannelEncoder,
    config: &'a ResolvedAxisConfig,
}

impl<'a> AxisAgent<'a> {
    pub(crate) fn new(encoder: &'a ChannelEncoder, config: &'a ResolvedAxisConfig) -> Self {
        Self { encoder, config }
    }

    #[must_use]
    pub fn config(&self) -> &'a ResolvedAxisConfig {
        self.config
    }

    #[must_use]
    pub fn encoder(&self) -> &'a ChannelEncoder {
        self.encoder
    }

    #[must_use]
    pub fn orient(&self) -> AxisOrient {
        self.config.orient
    }

    #[must_use]
    pub fn title(&self) -> String {
        self.config
            .title
            .clone()
            .unwrap_or_else(|| self.encoder.title())
    }

    /// Tick formatter: the axis `format` if any, else the channel formatter.
    #[must_use]
    pub fn format(&self) -> Formatter {
        match (&self.config.format, self.encoder.definition().data_type()) {
            (Some(format), Some(data_type)) => Formatter::from_spec(data_type, Some(format)),
            _ => self.encoder.formatter().clone(),
        }
    }

    #[must_use]
    pub fn tick_labels(&self) -> Vec<String> {
        let Some(scale) = self.encoder.scale() else {
            return Vec::new();
        };
        let format = self.format();
        scale
            .ticks(self.config.tick_count)
            .iter()
            .map(|tick| format.format(tick))
            .collect()
    }

    #[must_use]
    pub fn compute_layout(
        &self,
        request: AxisLayoutRequest<'_>,
        measurer: &dyn TextMeasurer,
    ) -> AxisLayout {
        let tick_labels = self.tick_labels();
        let dimensions: Vec<Dimension> = tick_labels
            .iter()
            .map(|label| measurer.measure(label, request.tick_text_style))
            .collect();
        let max_width = dimensions.iter().map(|d| d.width).fold(0.0_f64, f64::max);
        let max_height = dimensions.iter().map(|d| d.height).fold(0.0_f64, f64::max);

        let orient = self.config.orient;
        let padding = self.config.label_padding;
        let tick_length = request.tick_length.max(0.0);

        let (label_angle, strategy, label_extent) = if orient.is_horizontal() {
            let angle = request.label_angle.unwrap_or(self.config.label_angle);
            let width_per_tick = if tick_labels.is_empty() {
                f64::INFINITY
            } else {
                request.axis_width / tick_labels.len() as f64
            };
            let strategy = resolve_overlap_strategy(
                self.config.label_overlap,
                max_width > width_per_tick,
                angle,
            );
            match strategy {
                LabelOverlapStrategy::Flat => (0.0, strategy, max_height),
                LabelOverlapStrategy::Rotate => {
                    let theta = angle.to_radians();
                    let extent = (max_width * theta.sin()).abs() + (max_height * theta.cos()).abs();
                    (angle, strategy, extent.ceil())
                }
            }
        } else {
            (0.0, LabelOverlapStrategy::Flat, max_width)
        };

        let title = self.title();
        let title_space = if title.is_empty() {
            0.0
        } else {
            measurer.measure(&title, request.tick_text_style).height + padding
        };
        let label_offset = label_extent + padding;
        let required = (tick_length + padding + label_extent + title_space).ceil();

        let mut min_margin = PartialMargin::default();
        match orient {
            AxisOrient::Top => min_margin.top = Some(required),
            AxisOrient::Bottom => min_margin.bottom = Some(required),
            AxisOrient::Left => min_margin.left = Some(required),
            AxisOrient::Right => min_margin.right = Some(required),
        }

        trace!(
            channel = %self.encoder.name(),
            ?orient,
            axis_width = request.axis_width,
            label_count = tick_labels.len(),
            max_width,
            ?strategy,
            required,
            "computed axis layout"
        );

        AxisLayout {
            orient,
            tick_count: self.config.tick_count,
            tick_labels,
            tick_label_dimensions: dimensions,
            label_angle,
            label_overlap: strategy,
            tick_text_anchor: resolve_tick_text_anchor(orient, strategy, label_angle),
            label_offset,
            min_margin,
        }
    }
}

fn resolve_overlap_strategy(
    requested: LabelOverlap,
    labels_overlap: bool,
    label_angle: f64,
) -> LabelOverlapStrategy {
    let wants_rotation = match requested {
        LabelOverlap::Auto => labels_overlap,
        LabelOverlap::Rotate => true,
        LabelOverlap::Flat => false,
    };
    if wants_rotation && label_angle != 0.0 {
        LabelOverlapStrategy::Rotate
    } else {
        LabelOverlapStrategy::Flat
    }
}

fn resolve_tick_text_anchor(
    orient: AxisOrient,
    strategy: LabelOverlapStrategy,
    label_angle: f64,
) -> TextAnchor {
    match (strategy, orient) {
        (LabelOverlapStrategy::Flat, AxisOrient::Top | AxisOrient::Bottom) => TextAnchor::Middle,
        (LabelOverlapStrategy::Flat, AxisOrient::Left) => TextAnchor::End,
        (LabelOverlapStrategy::Flat, AxisOrient::Right) => TextAnchor::Start,
        (LabelOverlapStrategy::Rotate, AxisOrient::Top) if label_angle > 0.0 => TextAnchor::End,
        (LabelOverlapStrategy::Rotate, AxisOrient::Top) => TextAnchor::Start,
        (LabelOverlapStrategy::Rotate, _) if label_angle > 0.0 => TextAnchor::Start,
        (LabelOverlapStrategy::Rotate, _) => TextAnchor::End,
    }
}
