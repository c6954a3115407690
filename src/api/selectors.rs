use std::rc::Rc;

use crate::core::{Margin, PartialMargin, TextMeasurer};
use crate::encoding::{ChannelEncoder, ChannelTypes, Encoder, EncoderOptions, EncoderSpec, Encoding};
use crate::error::ChartResult;

use super::{
    ChartTheme, IdentityMemo, LayoutTuning, Mark, MemoStats, ScaleCollector, XyChartLayout,
    XyChartLayoutConfig,
};

pub const DEFAULT_MARGIN: Margin = Margin::uniform(16.0);

type EncoderKey = (Rc<Encoding>, Rc<Encoding>, Rc<EncoderOptions>);

/// Rebuilds the [`Encoder`] only when one of its three inputs changes identity.
#[derive(Debug)]
pub struct EncoderSelector {
    channel_types: ChannelTypes,
    default_encoding: Encoding,
    memo: IdentityMemo<EncoderKey, Encoder>,
}

impl EncoderSelector {
    #[must_use]
    pub fn new(channel_types: ChannelTypes, default_encoding: Encoding) -> Self {
        Self {
            channel_types,
            default_encoding,
            memo: IdentityMemo::new("encoder"),
        }
    }

    pub fn select(
        &mut self,
        encoding: &Rc<Encoding>,
        common_encoding: &Rc<Encoding>,
        options: &Rc<EncoderOptions>,
    ) -> ChartResult<Rc<Encoder>> {
        let key = (
            Rc::clone(encoding),
            Rc::clone(common_encoding),
            Rc::clone(options),
        );
        let channel_types = &self.channel_types;
        let default_encoding = &self.default_encoding;
        self.memo
            .try_get_or_compute(key, |(encoding, common_encoding, options)| {
                let spec = EncoderSpec {
                    encoding: Encoding::clone(encoding),
                    common_encoding: Encoding::clone(common_encoding),
                    options: EncoderOptions::clone(options),
                };
                Encoder::new(channel_types, default_encoding, &spec)
            })
    }

    #[must_use]
    pub fn stats(&self) -> MemoStats {
        self.memo.stats()
    }
}

/// Normalizes a caller margin, keeping one shared value per distinct margin.
///
/// Unset sides take the default margin. Two calls with equal sides return the
/// same `Rc`, so downstream identity caches see an unchanged input.
#[derive(Debug)]
pub struct MarginSelector {
    default_margin: Margin,
    memo: IdentityMemo<(f64, f64, f64, f64), Margin>,
}

impl Default for MarginSelector {
    fn default() -> Self {
        Self::new(DEFAULT_MARGIN)
    }
}

impl MarginSelector {
    #[must_use]
    pub fn new(default_margin: Margin) -> Self {
        Self {
            default_margin,
            memo: IdentityMemo::new("margin"),
        }
    }

    #[must_use]
    pub fn select(&mut self, margin: Option<PartialMargin>) -> Rc<Margin> {
        let margin = margin.unwrap_or_default();
        let defaults = self.default_margin;
        let key = (
            margin.top.unwrap_or(defaults.top),
            margin.right.unwrap_or(defaults.right),
            margin.bottom.unwrap_or(defaults.bottom),
            margin.left.unwrap_or(defaults.left),
        );
        self.memo.get_or_compute(key, |&(top, right, bottom, left)| {
            Margin::new(top, right, bottom, left)
        })
    }

    #[must_use]
    pub fn stats(&self) -> MemoStats {
        self.memo.stats()
    }
}

/// Named inputs of one layout pass.
#[derive(Debug, Clone)]
pub struct XyChartLayoutInput {
    pub width: f64,
    pub height: f64,
    pub margin: Rc<Margin>,
    pub theme: Rc<ChartTheme>,
    pub x_encoder: Rc<ChannelEncoder>,
    pub y_encoder: Rc<ChannelEncoder>,
    pub children: Rc<[Mark]>,
}

type LayoutKey = (
    f64,
    f64,
    Rc<Margin>,
    Rc<ChartTheme>,
    Rc<ChannelEncoder>,
    Rc<ChannelEncoder>,
    Rc<[Mark]>,
);

/// Recomputes the layout only when a named input changes identity.
#[derive(Debug)]
pub struct XyChartLayoutSelector {
    memo: IdentityMemo<LayoutKey, XyChartLayout>,
}

impl Default for XyChartLayoutSelector {
    fn default() -> Self {
        Self {
            memo: IdentityMemo::new("xy_chart_layout"),
        }
    }
}

impl XyChartLayoutSelector {
    pub fn select(
        &mut self,
        input: XyChartLayoutInput,
        tuning: LayoutTuning,
        collector: &dyn ScaleCollector,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<Rc<XyChartLayout>> {
        let key = (
            input.width,
            input.height,
            input.margin,
            input.theme,
            input.x_encoder,
            input.y_encoder,
            input.children,
        );
        self.memo.try_get_or_compute(
            key,
            |(width, height, margin, theme, x_encoder, y_encoder, children)| {
                let config = XyChartLayoutConfig::new(
                    *width,
                    *height,
                    **margin,
                    Rc::clone(x_encoder),
                    Rc::clone(y_encoder),
                    Rc::clone(children),
                    Rc::clone(theme),
                )
                .with_tuning(tuning);
                XyChartLayout::new(config, collector, measurer)
            },
        )
    }

    #[must_use]
    pub fn stats(&self) -> MemoStats {
        self.memo.stats()
    }
}
