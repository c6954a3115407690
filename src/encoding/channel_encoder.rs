use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::core::{Datum, ScaleAgent, is_nullish, number_value, value_as_f64};

use super::{
    Accessor, AxisAgent, ChannelDef, ChannelType, Formatter, ResolvedAxisConfig, Toggle,
    extract_scale,
};

/// Free-form per-channel options supplied next to the encoding.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelOptions {
    /// Scopes scale instances shared between charts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<bool>,
}

impl ChannelOptions {
    /// Fills every unset option from `shared`.
    #[must_use]
    pub fn merged_over(&self, shared: &ChannelOptions) -> Self {
        Self {
            namespace: self.namespace.clone().or_else(|| shared.namespace.clone()),
            legend: self.legend.or(shared.legend),
            axis: self.axis.or(shared.axis),
        }
    }
}

/// Binds one encoding channel to its accessor, formatter, scale and axis.
#[derive(Debug)]
pub struct ChannelEncoder {
    name: String,
    channel_type: ChannelType,
    definition: ChannelDef,
    options: ChannelOptions,
    accessor: Accessor,
    formatter: Formatter,
    scale: Option<ScaleAgent>,
    axis: Option<ResolvedAxisConfig>,
}

impl ChannelEncoder {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        channel_type: ChannelType,
        definition: ChannelDef,
        options: ChannelOptions,
    ) -> Self {
        let name = name.into();
        let accessor = Accessor::from_channel_def(&definition);
        // Axis geometry reads formatted ticks, so formatter, then scale, then axis.
        let formatter = Formatter::from_channel_def(&definition);
        let scale = extract_scale(channel_type, &definition, options.namespace.as_deref());
        let axis = Self::resolve_axis(channel_type, &definition, &options);

        trace!(
            channel = %name,
            ?channel_type,
            kind = ?definition.kind(),
            scale = ?scale.as_ref().map(ScaleAgent::scale_type),
            has_axis = axis.is_some(),
            "built channel encoder"
        );

        Self {
            name,
            channel_type,
            definition,
            options,
            accessor,
            formatter,
            scale,
            axis,
        }
    }

    fn resolve_axis(
        channel_type: ChannelType,
        definition: &ChannelDef,
        options: &ChannelOptions,
    ) -> Option<ResolvedAxisConfig> {
        if !channel_type.is_xy() || options.axis == Some(false) {
            return None;
        }
        let def = definition.field_def()?;
        match &def.axis {
            Some(Toggle::Switch(false)) => None,
            Some(Toggle::Config(config)) => {
                Some(ResolvedAxisConfig::complete(channel_type, Some(config)))
            }
            Some(Toggle::Switch(true)) | None => {
                Some(ResolvedAxisConfig::complete(channel_type, None))
            }
        }
    }

    /// Replaces the formatter, e.g. with a caller-supplied closure.
    #[must_use]
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn channel_type(&self) -> ChannelType {
        self.channel_type
    }

    #[must_use]
    pub fn definition(&self) -> &ChannelDef {
        &self.definition
    }

    #[must_use]
    pub fn options(&self) -> &ChannelOptions {
        &self.options
    }

    #[must_use]
    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    #[must_use]
    pub fn scale(&self) -> Option<&ScaleAgent> {
        self.scale.as_ref()
    }

    #[must_use]
    pub fn axis(&self) -> Option<AxisAgent<'_>> {
        self.axis
            .as_ref()
            .map(|config| AxisAgent::new(self, config))
    }

    /// Raw field value; `otherwise` replaces a null/missing value when given.
    #[must_use]
    pub fn get(&self, datum: &Datum, otherwise: Option<Value>) -> Value {
        let value = self.accessor.get(datum);
        match otherwise {
            Some(fallback) if is_nullish(&value) => fallback,
            _ => value,
        }
    }

    /// Raw value mapped through the scale (identity without one).
    #[must_use]
    pub fn encode(&self, datum: &Datum, otherwise: Option<Value>) -> Value {
        let raw = self.get(datum, None);
        if is_nullish(&raw) {
            return otherwise.unwrap_or(Value::Null);
        }
        let output = self.encode_value(&raw);
        match otherwise {
            Some(fallback) if is_nullish(&output) => fallback,
            _ => output,
        }
    }

    /// Maps an already extracted raw value.
    #[must_use]
    pub fn encode_value(&self, raw: &Value) -> Value {
        let Some(scale) = &self.scale else {
            return raw.clone();
        };
        let output = scale.encode_value(raw).unwrap_or(Value::Null);
        match &self.definition {
            ChannelDef::Band(def) => match value_as_f64(&output) {
                Some(start) => number_value(start + def.band * scale.bandwidth()),
                None => output,
            },
            ChannelDef::Field(_) | ChannelDef::Constant(_) => output,
        }
    }

    #[must_use]
    pub fn format(&self, datum: &Datum) -> String {
        self.formatter.format(&self.get(datum, None))
    }

    #[must_use]
    pub fn format_value(&self, value: &Value) -> String {
        self.formatter.format(value)
    }

    #[must_use]
    pub fn title(&self) -> String {
        self.definition.title()
    }

    #[must_use]
    pub fn has_legend(&self) -> bool {
        if self.options.legend == Some(false) || self.is_xy() || self.definition.is_constant() {
            return false;
        }
        match self.definition.field_def().and_then(|def| def.legend.as_ref()) {
            Some(legend) => legend.is_enabled(),
            None => self.scale.is_some(),
        }
    }

    #[must_use]
    pub fn is_group_by(&self) -> bool {
        self.definition
            .data_type()
            .is_some_and(|data_type| self.channel_type.partitions_groups(data_type))
    }

    #[must_use]
    pub fn is_x(&self) -> bool {
        self.channel_type.is_x()
    }

    #[must_use]
    pub fn is_y(&self) -> bool {
        self.channel_type.is_y()
    }

    #[must_use]
    pub fn is_xy(&self) -> bool {
        self.channel_type.is_xy()
    }
}
