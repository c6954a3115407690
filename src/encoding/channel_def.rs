use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::ScaleConfig;
use crate::error::ChartError;

use super::{AxisConfig, DataType};

/// Either a plain on/off switch or a full configuration object.
///
/// Mirrors the JSON shape `"axis": false` / `"axis": { ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Toggle<T> {
    Switch(bool),
    Config(T),
}

impl<T> Toggle<T> {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Switch(enabled) => *enabled,
            Self::Config(_) => true,
        }
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        !self.is_enabled()
    }

    #[must_use]
    pub fn config(&self) -> Option<&T> {
        match self {
            Self::Switch(_) => None,
            Self::Config(config) => Some(config),
        }
    }
}

/// Legend options carried by a field definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Field-backed channel definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub field: String,
    pub data_type: DataType,
    pub title: Option<String>,
    pub scale: Option<Toggle<ScaleConfig>>,
    pub axis: Option<Toggle<AxisConfig>>,
    pub legend: Option<Toggle<LegendConfig>>,
    pub format: Option<String>,
}

impl FieldDef {
    #[must_use]
    pub fn new(field: impl Into<String>, data_type: DataType) -> Self {
        Self {
            field: field.into(),
            data_type,
            title: None,
            scale: None,
            axis: None,
            legend: None,
            format: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: ScaleConfig) -> Self {
        self.scale = Some(Toggle::Config(scale));
        self
    }

    #[must_use]
    pub fn without_scale(mut self) -> Self {
        self.scale = Some(Toggle::Switch(false));
        self
    }

    #[must_use]
    pub fn with_axis(mut self, axis: AxisConfig) -> Self {
        self.axis = Some(Toggle::Config(axis));
        self
    }

    #[must_use]
    pub fn without_axis(mut self) -> Self {
        self.axis = Some(Toggle::Switch(false));
        self
    }

    #[must_use]
    pub fn with_legend(mut self, enabled: bool) -> Self {
        self.legend = Some(Toggle::Switch(enabled));
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

/// Constant-value channel definition: never scaled, never an axis or legend.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueDef {
    pub value: Value,
}

/// Field definition positioned at a fraction (`band`) inside its band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandDef {
    pub field: FieldDef,
    pub band: f64,
}

/// Discriminant of a [`ChannelDef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelDefKind {
    HasField,
    IsConstant,
    IsBand,
}

/// Per-channel encoding definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawChannelDef", into = "RawChannelDef")]
pub enum ChannelDef {
    Field(FieldDef),
    Constant(ValueDef),
    Band(BandDef),
}

impl ChannelDef {
    #[must_use]
    pub fn field(field: impl Into<String>, data_type: DataType) -> Self {
        Self::Field(FieldDef::new(field, data_type))
    }

    #[must_use]
    pub fn constant(value: Value) -> Self {
        Self::Constant(ValueDef { value })
    }

    #[must_use]
    pub fn band(field: FieldDef, band: f64) -> Self {
        Self::Band(BandDef { field, band })
    }

    #[must_use]
    pub fn kind(&self) -> ChannelDefKind {
        match self {
            Self::Field(_) => ChannelDefKind::HasField,
            Self::Constant(_) => ChannelDefKind::IsConstant,
            Self::Band(_) => ChannelDefKind::IsBand,
        }
    }

    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.kind() == ChannelDefKind::IsConstant
    }

    /// Field part of the definition, for field and band variants.
    #[must_use]
    pub fn field_def(&self) -> Option<&FieldDef> {
        match self {
            Self::Field(def) => Some(def),
            Self::Band(def) => Some(&def.field),
            Self::Constant(_) => None,
        }
    }

    #[must_use]
    pub fn data_type(&self) -> Option<DataType> {
        self.field_def().map(|def| def.data_type)
    }

    /// Title shown on axes and legends: explicit title, else the field name.
    #[must_use]
    pub fn title(&self) -> String {
        self.field_def()
            .map(|def| def.title.clone().unwrap_or_else(|| def.field.clone()))
            .unwrap_or_default()
    }
}

impl From<FieldDef> for ChannelDef {
    fn from(def: FieldDef) -> Self {
        Self::Field(def)
    }
}

/// Flat JSON shape of a channel definition before it is classified.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawChannelDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    data_type: Option<DataType>,
    /// `Some(Value::Null)` when the key is present with a null literal.
    #[serde(
        deserialize_with = "deserialize_present_value",
        skip_serializing_if = "Option::is_none"
    )]
    value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale: Option<Toggle<ScaleConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    axis: Option<Toggle<AxisConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legend: Option<Toggle<LegendConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    band: Option<f64>,
}

fn deserialize_present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl TryFrom<RawChannelDef> for ChannelDef {
    type Error = ChartError;

    fn try_from(raw: RawChannelDef) -> Result<Self, Self::Error> {
        let Some(field) = raw.field else {
            return match raw.value {
                Some(value) => Ok(Self::constant(value)),
                None => Err(ChartError::InvalidSpec(
                    "channel definition needs either `field` or `value`".to_owned(),
                )),
            };
        };
        let data_type = raw.data_type.ok_or_else(|| {
            ChartError::InvalidSpec(format!("field definition `{field}` requires a `type`"))
        })?;

        let def = FieldDef {
            field,
            data_type,
            title: raw.title,
            scale: raw.scale,
            axis: raw.axis,
            legend: raw.legend,
            format: raw.format,
        };
        match raw.band {
            Some(band) if band.is_finite() => Ok(Self::band(def, band.clamp(0.0, 1.0))),
            Some(band) => Err(ChartError::InvalidSpec(format!(
                "band position must be finite, got {band}"
            ))),
            None => Ok(Self::Field(def)),
        }
    }
}

impl From<ChannelDef> for RawChannelDef {
    fn from(def: ChannelDef) -> Self {
        let (field_def, band) = match def {
            ChannelDef::Constant(ValueDef { value }) => {
                return Self {
                    value: Some(value),
                    ..Self::default()
                };
            }
            ChannelDef::Field(field_def) => (field_def, None),
            ChannelDef::Band(BandDef { field, band }) => (field, Some(band)),
        };
        Self {
            field: Some(field_def.field),
            data_type: Some(field_def.data_type),
            value: None,
            title: field_def.title,
            scale: field_def.scale,
            axis: field_def.axis,
            legend: field_def.legend,
            format: field_def.format,
            band,
        }
    }
}
