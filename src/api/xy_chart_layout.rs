use std::rc::Rc;

use tracing::{debug, warn};

use crate::core::{Dimension, Margin, TextMeasurer};
use crate::encoding::{AxisLayout, AxisLayoutRequest, AxisOrient, ChannelEncoder};
use crate::error::{ChartError, ChartResult};
use crate::render::{ChartFrame, RenderFrame};

use super::{
    AxisDescriptor, ChartTheme, LayoutTuning, Mark, ScaleCollectionInput, ScaleCollector,
    TickLabelStrategy, convert_scale_config, resolve_overflow_margin, resolve_x_label_angle,
};

/// Inputs of one adaptive layout pass.
#[derive(Debug, Clone)]
pub struct XyChartLayoutConfig {
    pub width: f64,
    pub height: f64,
    pub min_content_width: f64,
    pub min_content_height: f64,
    pub margin: Margin,
    pub x_encoder: Rc<ChannelEncoder>,
    pub y_encoder: Rc<ChannelEncoder>,
    pub children: Rc<[Mark]>,
    pub theme: Rc<ChartTheme>,
    pub tuning: LayoutTuning,
}

impl XyChartLayoutConfig {
    #[must_use]
    pub fn new(
        width: f64,
        height: f64,
        margin: Margin,
        x_encoder: Rc<ChannelEncoder>,
        y_encoder: Rc<ChannelEncoder>,
        children: Rc<[Mark]>,
        theme: Rc<ChartTheme>,
    ) -> Self {
        Self {
            width,
            height,
            min_content_width: 0.0,
            min_content_height: 0.0,
            margin,
            x_encoder,
            y_encoder,
            children,
            theme,
            tuning: LayoutTuning::default(),
        }
    }

    #[must_use]
    pub fn with_min_content_size(mut self, width: f64, height: f64) -> Self {
        self.min_content_width = width;
        self.min_content_height = height;
        self
    }

    #[must_use]
    pub fn with_tuning(mut self, tuning: LayoutTuning) -> Self {
        self.tuning = tuning;
        self
    }

    fn validate(&self) -> ChartResult<()> {
        let container = Dimension::new(self.width, self.height);
        let min_content = Dimension::new(self.min_content_width, self.min_content_height);
        if !container.is_valid() || !min_content.is_valid() {
            return Err(ChartError::InvalidContainer {
                width: self.width,
                height: self.height,
            });
        }
        self.margin.validate()?;
        Ok(())
    }
}

/// Margins, plot size and axis geometry resolved for one container box.
///
/// Built fresh for every pass and never mutated afterwards.
#[derive(Debug)]
pub struct XyChartLayout {
    chart_width: f64,
    chart_height: f64,
    container_width: f64,
    container_height: f64,
    margin: Margin,
    x_layout: Option<AxisLayout>,
    y_layout: Option<AxisLayout>,
    config: XyChartLayoutConfig,
}

impl XyChartLayout {
    /// Runs the two-pass margin resolution.
    ///
    /// The Y axis is resolved before the X axis: the X label angle depends
    /// on the Y axis side, and the X axis width depends on the Y margin.
    pub fn new(
        config: XyChartLayoutConfig,
        collector: &dyn ScaleCollector,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<Self> {
        config.validate()?;
        let width = config.width;
        let height = config.height;
        let margin = config.margin;
        let theme = Rc::clone(&config.theme);
        let x_encoder = Rc::clone(&config.x_encoder);
        let y_encoder = Rc::clone(&config.y_encoder);

        let x_scale_config = convert_scale_config(x_encoder.scale());
        let y_scale_config = convert_scale_config(y_encoder.scale());
        let scales = collector.collect(&ScaleCollectionInput {
            width,
            height,
            margin,
            x_scale: x_scale_config.as_ref(),
            y_scale: y_scale_config.as_ref(),
            theme: &theme,
            children: &config.children,
        });

        if let (Some(scale), Some(collected)) = (y_encoder.scale(), scales.y_scale.as_ref()) {
            scale.set_domain(collected.domain().to_vec());
        }
        let y_layout = y_encoder.axis().map(|axis| {
            axis.compute_layout(
                AxisLayoutRequest {
                    axis_width: height - margin.top - margin.bottom,
                    tick_length: theme.y_tick_styles.length,
                    tick_text_style: &theme.y_tick_styles.label.right,
                    label_angle: None,
                },
                measurer,
            )
        });

        let second_margin = y_layout
            .as_ref()
            .map_or(margin, |layout| margin.merge_partial(layout.min_margin));
        let inner_width = clamp_inner(
            "width",
            width - second_margin.horizontal(),
            config.min_content_width,
        );

        if let (Some(scale), Some(collected)) = (x_encoder.scale(), scales.x_scale.as_ref()) {
            scale.set_domain(collected.domain().to_vec());
        }
        let y_orient = y_layout.as_ref().map(|layout| layout.orient);
        let x_layout = x_encoder.axis().map(|axis| {
            axis.compute_layout(
                AxisLayoutRequest {
                    axis_width: inner_width,
                    tick_length: theme.x_tick_styles.length,
                    tick_text_style: &theme.x_tick_styles.label.bottom,
                    label_angle: Some(resolve_x_label_angle(
                        y_orient,
                        axis.orient(),
                        config.tuning.default_label_angle,
                    )),
                },
                measurer,
            )
        });

        let final_margin = x_layout
            .as_ref()
            .map_or(second_margin, |layout| second_margin.merge_partial(layout.min_margin));
        let inner_height = clamp_inner(
            "height",
            height - final_margin.vertical(),
            config.min_content_height,
        );

        let chart_width = (inner_width + final_margin.horizontal()).round();
        let chart_height = (inner_height + final_margin.vertical()).round();
        let corrected = resolve_overflow_margin(
            chart_width,
            chart_height,
            width,
            height,
            final_margin,
            config.tuning.overflow_margin,
        );

        debug!(
            container_width = width,
            container_height = height,
            chart_width = corrected.chart_width,
            chart_height = corrected.chart_height,
            margin_top = corrected.margin.top,
            margin_right = corrected.margin.right,
            margin_bottom = corrected.margin.bottom,
            margin_left = corrected.margin.left,
            overflow_x = corrected.overflow_x,
            overflow_y = corrected.overflow_y,
            "resolved xy chart layout"
        );

        Ok(Self {
            chart_width: corrected.chart_width,
            chart_height: corrected.chart_height,
            container_width: width,
            container_height: height,
            margin: corrected.margin,
            x_layout,
            y_layout,
            config,
        })
    }

    #[must_use]
    pub fn chart_width(&self) -> f64 {
        self.chart_width
    }

    #[must_use]
    pub fn chart_height(&self) -> f64 {
        self.chart_height
    }

    #[must_use]
    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    #[must_use]
    pub fn container_height(&self) -> f64 {
        self.container_height
    }

    #[must_use]
    pub fn margin(&self) -> Margin {
        self.margin
    }

    #[must_use]
    pub fn x_layout(&self) -> Option<&AxisLayout> {
        self.x_layout.as_ref()
    }

    #[must_use]
    pub fn y_layout(&self) -> Option<&AxisLayout> {
        self.y_layout.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &XyChartLayoutConfig {
        &self.config
    }

    /// X tick label angle for an X axis on `x_orient`, given this layout's Y axis.
    #[must_use]
    pub fn recommend_x_label_angle(&self, x_orient: AxisOrient) -> f64 {
        resolve_x_label_angle(
            self.y_layout.as_ref().map(|layout| layout.orient),
            x_orient,
            self.config.tuning.default_label_angle,
        )
    }

    #[must_use]
    pub fn frame(&self) -> ChartFrame {
        ChartFrame::new(
            Dimension::new(self.container_width, self.container_height),
            Dimension::new(self.chart_width, self.chart_height),
        )
    }

    /// Hands the content size to `render_chart` inside the container frame.
    pub fn render_chart_with_frame<R>(&self, render_chart: impl FnOnce(Dimension) -> R) -> R {
        self.frame().render_content(render_chart)
    }

    #[must_use]
    pub fn x_axis(&self) -> Option<AxisDescriptor> {
        let axis = self.config.x_encoder.axis()?;
        let layout = self.x_layout.as_ref()?;
        Some(AxisDescriptor {
            label: axis.title(),
            label_offset: layout.label_offset,
            tick_count: axis.config().tick_count,
            orientation: axis.orient(),
            tick_format: axis.format(),
            tick_strategy: Some(TickLabelStrategy::from_layout(layout)),
        })
    }

    #[must_use]
    pub fn y_axis(&self) -> Option<AxisDescriptor> {
        let axis = self.config.y_encoder.axis()?;
        let layout = self.y_layout.as_ref()?;
        Some(AxisDescriptor {
            label: axis.title(),
            label_offset: layout.label_offset,
            tick_count: axis.config().tick_count,
            orientation: axis.orient(),
            tick_format: axis.format(),
            tick_strategy: None,
        })
    }

    #[must_use]
    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame {
            frame: self.frame(),
            margin: self.margin,
            x_axis: self.x_axis(),
            y_axis: self.y_axis(),
        }
    }
}

fn clamp_inner(side: &'static str, available: f64, min_content: f64) -> f64 {
    if available < 0.0 {
        warn!(
            side,
            available, min_content, "margins exceed the container; using minimum content size"
        );
    }
    available.max(min_content)
}
