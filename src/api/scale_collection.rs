use serde_json::Value;

use crate::core::{Datum, Margin, ScaleAgent, ScaleConfig, ScaleType, infer_domain, value_as_f64};
use crate::encoding::ChannelEncoder;

use super::ChartTheme;

/// Data series handed to the layout pass for domain inference.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mark {
    pub key: String,
    pub x_values: Vec<Value>,
    pub y_values: Vec<Value>,
}

impl Mark {
    #[must_use]
    pub fn new(key: impl Into<String>, x_values: Vec<Value>, y_values: Vec<Value>) -> Self {
        Self {
            key: key.into(),
            x_values,
            y_values,
        }
    }

    /// Extracts the raw X/Y values of `rows` through the positional encoders.
    #[must_use]
    pub fn from_rows(
        key: impl Into<String>,
        rows: &[Datum],
        x_encoder: &ChannelEncoder,
        y_encoder: &ChannelEncoder,
    ) -> Self {
        Self {
            key: key.into(),
            x_values: rows.iter().map(|row| x_encoder.get(row, None)).collect(),
            y_values: rows.iter().map(|row| y_encoder.get(row, None)).collect(),
        }
    }
}

/// Scale settings handed to a collector, derived from an encoder's scale.
#[must_use]
pub fn convert_scale_config(scale: Option<&ScaleAgent>) -> Option<ScaleConfig> {
    let scale = scale?;
    let mut config = scale.config().clone();
    config.scale_type = Some(scale.scale_type());
    Some(config)
}

/// Everything a collector may look at.
#[derive(Debug, Clone, Copy)]
pub struct ScaleCollectionInput<'a> {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub x_scale: Option<&'a ScaleConfig>,
    pub y_scale: Option<&'a ScaleConfig>,
    pub theme: &'a ChartTheme,
    pub children: &'a [Mark],
}

/// Provisional scale resolved from data.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedScale {
    pub scale_type: ScaleType,
    domain: Vec<Value>,
    /// Pixel range `[start, end]`.
    pub range: (f64, f64),
}

impl CollectedScale {
    #[must_use]
    pub fn new(scale_type: ScaleType, domain: Vec<Value>, range: (f64, f64)) -> Self {
        Self {
            scale_type,
            domain,
            range,
        }
    }

    #[must_use]
    pub fn domain(&self) -> &[Value] {
        &self.domain
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollectedScales {
    pub x_scale: Option<CollectedScale>,
    pub y_scale: Option<CollectedScale>,
}

/// Resolves data domains independently of axis geometry.
pub trait ScaleCollector {
    fn collect(&self, input: &ScaleCollectionInput<'_>) -> CollectedScales;
}

/// Infers domains from the marks' values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataScaleCollector;

impl ScaleCollector for DataScaleCollector {
    fn collect(&self, input: &ScaleCollectionInput<'_>) -> CollectedScales {
        let x_range = (input.margin.left, input.width - input.margin.right);
        let y_range = (input.height - input.margin.bottom, input.margin.top);

        let x_scale = input.x_scale.map(|config| {
            let values: Vec<Value> = input
                .children
                .iter()
                .flat_map(|mark| mark.x_values.iter().cloned())
                .collect();
            collect_one(config, &values, x_range)
        });
        let y_scale = input.y_scale.map(|config| {
            let values: Vec<Value> = input
                .children
                .iter()
                .flat_map(|mark| mark.y_values.iter().cloned())
                .collect();
            collect_one(config, &values, y_range)
        });

        CollectedScales { x_scale, y_scale }
    }
}

fn collect_one(config: &ScaleConfig, values: &[Value], range: (f64, f64)) -> CollectedScale {
    let scale_type = config.scale_type.unwrap_or_else(|| {
        if values.iter().all(|value| value.is_null() || value_as_f64(value).is_some()) {
            ScaleType::Linear
        } else {
            ScaleType::Band
        }
    });
    CollectedScale::new(scale_type, infer_domain(scale_type, config, values), range)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{DataScaleCollector, Mark, ScaleCollectionInput, ScaleCollector};
    use crate::api::ChartTheme;
    use crate::core::{Margin, ScaleConfig, ScaleType};

    #[test]
    fn collects_domains_and_pixel_ranges() {
        let marks = [Mark::new(
            "series",
            vec![json!("a"), json!("b")],
            vec![json!(4), json!(19)],
        )];
        let x_config = ScaleConfig::of_type(ScaleType::Point);
        let y_config = ScaleConfig::of_type(ScaleType::Linear);
        let theme = ChartTheme::default();
        let scales = DataScaleCollector.collect(&ScaleCollectionInput {
            width: 200.0,
            height: 100.0,
            margin: Margin::new(10.0, 20.0, 30.0, 40.0),
            x_scale: Some(&x_config),
            y_scale: Some(&y_config),
            theme: &theme,
            children: &marks,
        });

        let x_scale = scales.x_scale.expect("x scale");
        assert_eq!(x_scale.domain(), &[json!("a"), json!("b")]);
        assert_eq!(x_scale.range, (40.0, 180.0));
        let y_scale = scales.y_scale.expect("y scale");
        assert_eq!(y_scale.domain(), &[json!(0.0), json!(20.0)]);
        assert_eq!(y_scale.range, (70.0, 10.0));
    }
}
