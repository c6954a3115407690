use serde::Serialize;
use serde_json::Value;

use super::{ChannelEncoder, Encoder};

const CONTINUOUS_LEGEND_TICKS: usize = 5;

/// One legend entry: a domain value, its label and its encoded output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendItem {
    pub value: Value,
    pub label: String,
    pub output: Value,
}

/// Legend entries contributed by one channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendGroup {
    pub channel: String,
    pub field: String,
    pub title: String,
    pub items: Vec<LegendItem>,
}

impl Encoder {
    /// Legend groups for every channel with a legend, in channel order.
    ///
    /// Call after the domains are filled (see
    /// [`Encoder::set_domain_from_dataset`]).
    #[must_use]
    pub fn legend_info(&self) -> Vec<LegendGroup> {
        self.channels()
            .filter(|encoder| encoder.has_legend())
            .filter_map(legend_group)
            .collect()
    }
}

fn legend_group(encoder: &ChannelEncoder) -> Option<LegendGroup> {
    let scale = encoder.scale()?;
    let def = encoder.definition().field_def()?;
    let values = if scale.scale_type().is_discrete() {
        scale.domain()
    } else {
        scale.ticks(CONTINUOUS_LEGEND_TICKS)
    };
    let title = def
        .legend
        .as_ref()
        .and_then(|legend| legend.config())
        .and_then(|config| config.title.clone())
        .unwrap_or_else(|| encoder.title());

    let items = values
        .into_iter()
        .map(|value| LegendItem {
            label: encoder.format_value(&value),
            output: encoder.encode_value(&value),
            value,
        })
        .collect();

    Some(LegendGroup {
        channel: encoder.name().to_owned(),
        field: def.field.clone(),
        title,
        items,
    })
}
