use serde_json::{Value, json};

use crate::core::{ScaleAgent, ScaleConfig, ScaleType, number_value};

use super::{ChannelDef, ChannelType, DataType, Toggle};

/// d3 `schemeCategory10`.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

const CONTINUOUS_COLOR_RANGE: [&str; 2] = ["#deebf7", "#08519c"];

/// Scale type a channel gets when its definition does not name one.
///
/// `None` means the channel is never scaled (text channels).
#[must_use]
pub fn infer_scale_type(channel_type: ChannelType, data_type: DataType) -> Option<ScaleType> {
    let scale_type = match (channel_type, data_type) {
        (ChannelType::Text, _) => return None,
        (ChannelType::X | ChannelType::Y, DataType::Quantitative) => ScaleType::Linear,
        (ChannelType::X | ChannelType::Y, DataType::Temporal) => ScaleType::Time,
        (ChannelType::X | ChannelType::Y, DataType::Nominal | DataType::Ordinal) => {
            ScaleType::Point
        }
        (ChannelType::XBand | ChannelType::YBand, DataType::Nominal | DataType::Ordinal) => {
            ScaleType::Band
        }
        (ChannelType::XBand | ChannelType::YBand, DataType::Temporal) => ScaleType::Time,
        (ChannelType::XBand | ChannelType::YBand, DataType::Quantitative) => ScaleType::Linear,
        (
            ChannelType::Color | ChannelType::Size | ChannelType::Numeric,
            DataType::Quantitative,
        ) => ScaleType::Linear,
        (
            ChannelType::Color | ChannelType::Size | ChannelType::Numeric,
            DataType::Temporal,
        ) => ScaleType::Time,
        (ChannelType::Color | ChannelType::Category, DataType::Nominal | DataType::Ordinal) => {
            ScaleType::Ordinal
        }
        (ChannelType::Category, DataType::Quantitative | DataType::Temporal) => {
            ScaleType::Ordinal
        }
        (ChannelType::Size | ChannelType::Numeric, DataType::Nominal | DataType::Ordinal) => {
            ScaleType::Point
        }
    };
    Some(scale_type)
}

fn default_range(channel_type: ChannelType, scale_type: ScaleType) -> Vec<Value> {
    match (channel_type, scale_type) {
        (ChannelType::Color | ChannelType::Category, ScaleType::Ordinal) => {
            CATEGORY10.iter().map(|color| json!(color)).collect()
        }
        (ChannelType::Color, _) if scale_type.is_continuous() => {
            CONTINUOUS_COLOR_RANGE.iter().map(|color| json!(color)).collect()
        }
        _ => vec![number_value(0.0), number_value(1.0)],
    }
}

/// Builds the scale agent for one channel, if it gets one at all.
#[must_use]
pub fn extract_scale(
    channel_type: ChannelType,
    definition: &ChannelDef,
    namespace: Option<&str>,
) -> Option<ScaleAgent> {
    let def = definition.field_def()?;
    let config = match &def.scale {
        Some(Toggle::Switch(false)) => return None,
        Some(Toggle::Config(config)) => config.clone(),
        Some(Toggle::Switch(true)) | None => ScaleConfig::default(),
    };
    let scale_type = match config.scale_type {
        Some(scale_type) if channel_type != ChannelType::Text => scale_type,
        _ => infer_scale_type(channel_type, def.data_type)?,
    };
    let range = default_range(channel_type, scale_type);
    Some(ScaleAgent::new(
        scale_type,
        config,
        range,
        namespace.map(str::to_owned),
    ))
}
