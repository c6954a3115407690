use std::cell::RefCell;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::ticks::{nice_domain, nice_ticks};
use crate::core::types::{number_value, value_as_epoch_millis, value_as_f64};

/// Scale families understood by the scale agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Linear,
    Log,
    Sqrt,
    Pow,
    Time,
    Band,
    Point,
    Ordinal,
}

impl ScaleType {
    #[must_use]
    pub fn is_continuous(self) -> bool {
        matches!(
            self,
            Self::Linear | Self::Log | Self::Sqrt | Self::Pow | Self::Time
        )
    }

    #[must_use]
    pub fn is_discrete(self) -> bool {
        !self.is_continuous()
    }
}

/// Declarative scale options attached to a channel definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScaleConfig {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub scale_type: Option<ScaleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nice: Option<bool>,
    pub clamp: bool,
    pub reverse: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_inner: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_outer: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exponent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown: Option<Value>,
}

impl ScaleConfig {
    #[must_use]
    pub fn of_type(scale_type: ScaleType) -> Self {
        Self {
            scale_type: Some(scale_type),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_domain(mut self, domain: Vec<Value>) -> Self {
        self.domain = Some(domain);
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: Vec<Value>) -> Self {
        self.range = Some(range);
        self
    }

    /// Whether a continuous extent should be forced to include zero.
    ///
    /// Follows the usual default: linear-like scales include zero unless told
    /// otherwise; log and time scales never do.
    #[must_use]
    pub fn includes_zero(&self, scale_type: ScaleType) -> bool {
        match scale_type {
            ScaleType::Linear | ScaleType::Sqrt | ScaleType::Pow => self.zero.unwrap_or(true),
            _ => false,
        }
    }

    fn band_paddings(&self, scale_type: ScaleType) -> (f64, f64) {
        match scale_type {
            ScaleType::Point => (1.0, self.padding.or(self.padding_outer).unwrap_or(0.0)),
            _ => (
                self.padding_inner.or(self.padding).unwrap_or(0.0),
                self.padding_outer.or(self.padding).unwrap_or(0.0),
            ),
        }
    }
}

/// Runtime mapping from raw channel values to visual output values.
///
/// The domain and range are interior-mutable: the layout pass pushes the
/// collected domain into the agent through a shared encoder reference.
#[derive(Debug)]
pub struct ScaleAgent {
    scale_type: ScaleType,
    config: ScaleConfig,
    namespace: Option<String>,
    domain: RefCell<Vec<Value>>,
    range: RefCell<Vec<Value>>,
}

impl ScaleAgent {
    #[must_use]
    pub fn new(
        scale_type: ScaleType,
        config: ScaleConfig,
        default_range: Vec<Value>,
        namespace: Option<String>,
    ) -> Self {
        let domain = config.domain.clone().unwrap_or_else(|| {
            if scale_type.is_continuous() {
                vec![number_value(0.0), number_value(1.0)]
            } else {
                Vec::new()
            }
        });
        let range = config.range.clone().unwrap_or(default_range);
        let config = ScaleConfig {
            scale_type: Some(scale_type),
            ..config
        };

        Self {
            scale_type,
            config,
            namespace,
            domain: RefCell::new(domain),
            range: RefCell::new(range),
        }
    }

    #[must_use]
    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    #[must_use]
    pub fn config(&self) -> &ScaleConfig {
        &self.config
    }

    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    #[must_use]
    pub fn domain(&self) -> Vec<Value> {
        self.domain.borrow().clone()
    }

    pub fn set_domain(&self, domain: Vec<Value>) {
        *self.domain.borrow_mut() = domain;
    }

    #[must_use]
    pub fn range(&self) -> Vec<Value> {
        self.range.borrow().clone()
    }

    pub fn set_range(&self, range: Vec<Value>) {
        *self.range.borrow_mut() = range;
    }

    /// Maps a raw value through the scale. `None` when the value cannot be
    /// placed and no `unknown` output is configured.
    #[must_use]
    pub fn encode_value(&self, raw: &Value) -> Option<Value> {
        let mapped = match self.scale_type {
            ScaleType::Band | ScaleType::Point => self.map_band(raw).map(number_value),
            ScaleType::Ordinal => self.map_ordinal(raw),
            _ => self.map_continuous(raw),
        };
        mapped
            .filter(|value| !value.is_null())
            .or_else(|| self.config.unknown.clone())
    }

    /// Width of one band; zero for every non-band scale.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        if self.scale_type != ScaleType::Band {
            return 0.0;
        }
        self.band_layout().map_or(0.0, |layout| layout.bandwidth)
    }

    /// Tick values used by axes: nice values for continuous scales, the
    /// domain itself for discrete ones.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<Value> {
        if self.scale_type.is_discrete() {
            return self.domain();
        }
        let Some((start, stop)) = self.numeric_extent() else {
            return Vec::new();
        };
        if self.scale_type == ScaleType::Log {
            let log_ticks = log_ticks(start, stop, self.config.base.unwrap_or(10.0));
            if log_ticks.len() >= 2 {
                return log_ticks.into_iter().map(number_value).collect();
            }
        }
        nice_ticks(start, stop, count)
            .into_iter()
            .map(number_value)
            .collect()
    }

    /// Numeric `[first, last]` view of the domain.
    #[must_use]
    pub fn numeric_extent(&self) -> Option<(f64, f64)> {
        let domain = self.domain.borrow();
        let first = domain.first()?;
        let last = domain.last()?;
        Some((self.to_number(first)?, self.to_number(last)?))
    }

    /// Rounds a continuous domain outward to nice values.
    pub fn nice(&self, count: usize) {
        if self.scale_type.is_discrete() || self.scale_type == ScaleType::Log {
            return;
        }
        if let Some((start, stop)) = self.numeric_extent() {
            let (start, stop) = nice_domain(start, stop, count);
            self.set_domain(vec![number_value(start), number_value(stop)]);
        }
    }

    fn to_number(&self, value: &Value) -> Option<f64> {
        if self.scale_type == ScaleType::Time {
            value_as_epoch_millis(value)
        } else {
            value_as_f64(value)
        }
    }

    fn transform(&self, value: f64) -> Option<f64> {
        match self.scale_type {
            ScaleType::Log => (value > 0.0).then(|| value.ln()),
            ScaleType::Sqrt => Some(value.signum() * value.abs().sqrt()),
            ScaleType::Pow => {
                let exponent = self.config.exponent.unwrap_or(1.0);
                Some(value.signum() * value.abs().powf(exponent))
            }
            _ => Some(value),
        }
    }

    fn map_continuous(&self, raw: &Value) -> Option<Value> {
        let value = self.transform(self.to_number(raw)?)?;
        let (d0, d1) = self.numeric_extent()?;
        let (t0, t1) = (self.transform(d0)?, self.transform(d1)?);
        let span = t1 - t0;
        let mut normalized = if span == 0.0 {
            0.5
        } else {
            (value - t0) / span
        };
        if self.config.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }
        if self.config.reverse {
            normalized = 1.0 - normalized;
        }
        interpolate_range(&self.range.borrow(), normalized)
    }

    fn map_ordinal(&self, raw: &Value) -> Option<Value> {
        let index = self.domain.borrow().iter().position(|v| v == raw)?;
        let range = self.range.borrow();
        if range.is_empty() {
            return None;
        }
        range.get(index % range.len()).cloned()
    }

    fn map_band(&self, raw: &Value) -> Option<f64> {
        let index = self.domain.borrow().iter().position(|v| v == raw)?;
        let layout = self.band_layout()?;
        let position = if layout.reverse {
            layout.start + layout.step * (layout.count - 1 - index) as f64
        } else {
            layout.start + layout.step * index as f64
        };
        Some(position)
    }

    fn band_layout(&self) -> Option<BandLayout> {
        let count = self.domain.borrow().len();
        let range = self.range.borrow();
        let r0 = value_as_f64(range.first()?)?;
        let r1 = value_as_f64(range.last()?)?;
        let reverse = (r1 < r0) != self.config.reverse;
        let (start, stop) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        let (padding_inner, padding_outer) = self.config.band_paddings(self.scale_type);

        let n = count as f64;
        let step = (stop - start) / (n - padding_inner + padding_outer * 2.0).max(1.0);
        let align = 0.5;
        let start = start + (stop - start - step * (n - padding_inner)) * align;

        Some(BandLayout {
            start,
            step,
            bandwidth: step * (1.0 - padding_inner),
            count,
            reverse,
        })
    }
}

/// Domain a scale of `scale_type` should take for the observed `values`.
///
/// An explicit config domain wins. Continuous scales get the numeric extent,
/// widened to zero and niced when the config asks for it; discrete scales get
/// the distinct non-null values in first-seen order.
#[must_use]
pub fn infer_domain(scale_type: ScaleType, config: &ScaleConfig, values: &[Value]) -> Vec<Value> {
    if let Some(domain) = &config.domain {
        return domain.clone();
    }
    if scale_type.is_discrete() {
        let mut domain: Vec<Value> = Vec::new();
        for value in values.iter().filter(|value| !value.is_null()) {
            if !domain.contains(value) {
                domain.push(value.clone());
            }
        }
        return domain;
    }

    let numbers = values.iter().filter_map(|value| {
        if scale_type == ScaleType::Time {
            value_as_epoch_millis(value)
        } else {
            value_as_f64(value)
        }
    });
    let (min, max) = numbers.fold((None, None), |(min, max), value| {
        let value = OrderedFloat(value);
        (
            Some(min.map_or(value, |m: OrderedFloat<f64>| m.min(value))),
            Some(max.map_or(value, |m: OrderedFloat<f64>| m.max(value))),
        )
    });
    let (Some(OrderedFloat(mut start)), Some(OrderedFloat(mut stop))) = (min, max) else {
        return vec![number_value(0.0), number_value(1.0)];
    };
    if scale_type == ScaleType::Log && start <= 0.0 {
        start = stop.min(1.0).max(f64::MIN_POSITIVE);
    }
    if config.includes_zero(scale_type) {
        start = start.min(0.0);
        stop = stop.max(0.0);
    }
    if config.nice.unwrap_or(scale_type != ScaleType::Time && scale_type != ScaleType::Log) {
        (start, stop) = nice_domain(start, stop, 10);
    }
    vec![number_value(start), number_value(stop)]
}

#[derive(Debug, Clone, Copy)]
struct BandLayout {
    start: f64,
    step: f64,
    bandwidth: f64,
    count: usize,
    reverse: bool,
}

fn interpolate_range(range: &[Value], t: f64) -> Option<Value> {
    let first = range.first()?;
    let last = range.last()?;
    if let (Some(a), Some(b)) = (value_as_f64(first), value_as_f64(last)) {
        return Some(number_value(a + (b - a) * t));
    }
    let (Value::String(a), Value::String(b)) = (first, last) else {
        return None;
    };
    let (a, b) = (parse_hex_color(a)?, parse_hex_color(b)?);
    let mix = |x: u8, y: u8| -> u8 {
        let value = f64::from(x) + (f64::from(y) - f64::from(x)) * t.clamp(0.0, 1.0);
        value.round().clamp(0.0, 255.0) as u8
    };
    Some(Value::String(format!(
        "#{:02x}{:02x}{:02x}",
        mix(a[0], b[0]),
        mix(a[1], b[1]),
        mix(a[2], b[2])
    )))
}

fn parse_hex_color(text: &str) -> Option<[u8; 3]> {
    let hex = text.strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (slot, ch) in out.iter_mut().zip(hex.chars()) {
                let digit = ch.to_digit(16)? as u8;
                *slot = digit * 17;
            }
            Some(out)
        }
        6 => Some([
            channel(hex.get(0..2)?)?,
            channel(hex.get(2..4)?)?,
            channel(hex.get(4..6)?)?,
        ]),
        _ => None,
    }
}

fn log_ticks(start: f64, stop: f64, base: f64) -> Vec<f64> {
    if start <= 0.0 || stop <= 0.0 || base <= 1.0 {
        return Vec::new();
    }
    let (lo, hi) = if stop < start {
        (stop, start)
    } else {
        (start, stop)
    };
    let log = |value: f64| {
        if base == 10.0 {
            value.log10()
        } else {
            value.ln() / base.ln()
        }
    };
    // Absorb ln/ln rounding so exact powers stay inside the span.
    let first = (log(lo) - 1e-9).ceil() as i32;
    let last = (log(hi) + 1e-9).floor() as i32;
    (first..=last).map(|power| base.powi(power)).collect()
}
