mod axis_descriptor;
mod axis_label_angle_resolver;
mod memo;
mod overflow_margin_resolver;
mod scale_collection;
mod selectors;
mod theme;
mod xy_chart_layout;

use std::rc::Rc;

pub use axis_descriptor::{AxisDescriptor, TickLabelStrategy};
pub use axis_label_angle_resolver::resolve_x_label_angle;
pub use memo::{IdentityKey, IdentityMemo, MemoStats};
pub use overflow_margin_resolver::{OverflowCorrection, resolve_overflow_margin};
pub use scale_collection::{
    CollectedScale, CollectedScales, DataScaleCollector, Mark, ScaleCollectionInput,
    ScaleCollector, convert_scale_config,
};
pub use selectors::{
    DEFAULT_MARGIN, EncoderSelector, MarginSelector, XyChartLayoutInput, XyChartLayoutSelector,
};
pub use theme::{ChartTheme, LayoutTuning, TickLabelStyles, TickStyles};
pub use xy_chart_layout::{XyChartLayout, XyChartLayoutConfig};

use crate::core::{HeuristicTextMeasurer, Margin, PartialMargin, TextMeasurer};
use crate::encoding::{ChannelEncoder, ChannelTypes, Encoder, EncoderOptions, Encoding};
use crate::error::ChartResult;
use crate::render::Renderer;

/// Per-frame inputs of [`XyChart::layout`].
#[derive(Debug, Clone)]
pub struct LayoutRequest {
    pub width: f64,
    pub height: f64,
    pub margin: Option<PartialMargin>,
    pub theme: Rc<ChartTheme>,
    pub x_encoder: Rc<ChannelEncoder>,
    pub y_encoder: Rc<ChannelEncoder>,
    pub children: Rc<[Mark]>,
}

/// One XY chart instance and its construction caches.
///
/// The caches belong to this instance only; two charts never share entries.
pub struct XyChart<C: ScaleCollector = DataScaleCollector, M: TextMeasurer = HeuristicTextMeasurer>
{
    encoders: EncoderSelector,
    margins: MarginSelector,
    layouts: XyChartLayoutSelector,
    collector: C,
    measurer: M,
    tuning: LayoutTuning,
}

impl XyChart {
    #[must_use]
    pub fn new(channel_types: ChannelTypes, default_encoding: Encoding) -> Self {
        Self::with_parts(
            channel_types,
            default_encoding,
            DataScaleCollector,
            HeuristicTextMeasurer,
        )
    }
}

impl<C: ScaleCollector, M: TextMeasurer> XyChart<C, M> {
    #[must_use]
    pub fn with_parts(
        channel_types: ChannelTypes,
        default_encoding: Encoding,
        collector: C,
        measurer: M,
    ) -> Self {
        Self {
            encoders: EncoderSelector::new(channel_types, default_encoding),
            margins: MarginSelector::default(),
            layouts: XyChartLayoutSelector::default(),
            collector,
            measurer,
            tuning: LayoutTuning::default(),
        }
    }

    /// Replaces the layout tuning. Cached layouts were resolved with the
    /// previous tuning and are dropped.
    #[must_use]
    pub fn with_tuning(mut self, tuning: LayoutTuning) -> Self {
        self.tuning = tuning;
        self.layouts = XyChartLayoutSelector::default();
        self
    }

    #[must_use]
    pub fn with_default_margin(mut self, margin: Margin) -> Self {
        self.margins = MarginSelector::new(margin);
        self
    }

    #[must_use]
    pub fn tuning(&self) -> LayoutTuning {
        self.tuning
    }

    #[must_use]
    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Cached encoder for the given spec parts.
    pub fn encoder(
        &mut self,
        encoding: &Rc<Encoding>,
        common_encoding: &Rc<Encoding>,
        options: &Rc<EncoderOptions>,
    ) -> ChartResult<Rc<Encoder>> {
        self.encoders.select(encoding, common_encoding, options)
    }

    /// Cached layout for the given frame inputs.
    pub fn layout(&mut self, request: LayoutRequest) -> ChartResult<Rc<XyChartLayout>> {
        let margin = self.margins.select(request.margin);
        self.layouts.select(
            XyChartLayoutInput {
                width: request.width,
                height: request.height,
                margin,
                theme: request.theme,
                x_encoder: request.x_encoder,
                y_encoder: request.y_encoder,
                children: request.children,
            },
            self.tuning,
            &self.collector,
            &self.measurer,
        )
    }

    /// Resolves the layout and hands the resulting frame to `renderer`.
    pub fn render<R: Renderer>(
        &mut self,
        renderer: &mut R,
        request: LayoutRequest,
    ) -> ChartResult<Rc<XyChartLayout>> {
        let layout = self.layout(request)?;
        renderer.render(&layout.render_frame())?;
        Ok(layout)
    }

    #[must_use]
    pub fn encoder_stats(&self) -> MemoStats {
        self.encoders.stats()
    }

    #[must_use]
    pub fn margin_stats(&self) -> MemoStats {
        self.margins.stats()
    }

    #[must_use]
    pub fn layout_stats(&self) -> MemoStats {
        self.layouts.stats()
    }
}
