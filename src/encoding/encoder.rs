use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::{Datum, infer_domain};
use crate::error::{ChartError, ChartResult};

use super::{ChannelDef, ChannelEncoder, ChannelOptions, ChannelType};

/// Channel name → definition, in declaration order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Encoding(pub IndexMap<String, ChannelDef>);

impl Encoding {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_channel(mut self, name: impl Into<String>, definition: ChannelDef) -> Self {
        self.0.insert(name.into(), definition);
        self
    }

    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        serde_json::from_str(json)
            .map_err(|err| ChartError::InvalidSpec(format!("failed to parse encoding: {err}")))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ChannelDef> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ChannelDef)> {
        self.0.iter()
    }
}

/// Channel name → channel type declared by a chart.
pub type ChannelTypes = IndexMap<String, ChannelType>;

/// Options shared by all channels plus per-channel overrides.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderOptions {
    #[serde(flatten)]
    pub shared: ChannelOptions,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub channels: IndexMap<String, ChannelOptions>,
}

impl EncoderOptions {
    #[must_use]
    pub fn for_channel(&self, name: &str) -> ChannelOptions {
        self.channels
            .get(name)
            .map_or_else(|| self.shared.clone(), |own| own.merged_over(&self.shared))
    }
}

/// Declarative input of an [`Encoder`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncoderSpec {
    pub encoding: Encoding,
    pub common_encoding: Encoding,
    pub options: EncoderOptions,
}

/// One channel encoder per declared chart channel.
#[derive(Debug)]
pub struct Encoder {
    channels: IndexMap<String, Rc<ChannelEncoder>>,
}

impl Encoder {
    /// Builds encoders for every channel in `channel_types`.
    ///
    /// A channel's definition comes from `spec.encoding`, else
    /// `spec.common_encoding`, else `default_encoding`; channels without any
    /// definition are skipped. Names in the encoder spec that the chart does not
    /// declare are rejected.
    pub fn new(
        channel_types: &ChannelTypes,
        default_encoding: &Encoding,
        spec: &EncoderSpec,
    ) -> ChartResult<Self> {
        for (name, _) in spec.encoding.iter().chain(spec.common_encoding.iter()) {
            if !channel_types.contains_key(name) {
                return Err(ChartError::InvalidSpec(format!("unknown channel `{name}`")));
            }
        }

        let mut channels = IndexMap::with_capacity(channel_types.len());
        for (name, channel_type) in channel_types {
            let Some(definition) = spec
                .encoding
                .get(name)
                .or_else(|| spec.common_encoding.get(name))
                .or_else(|| default_encoding.get(name))
            else {
                continue;
            };
            let encoder = ChannelEncoder::new(
                name.clone(),
                *channel_type,
                definition.clone(),
                spec.options.for_channel(name),
            );
            channels.insert(name.clone(), Rc::new(encoder));
        }

        debug!(
            channels = channels.len(),
            declared = channel_types.len(),
            "built encoder"
        );
        Ok(Self { channels })
    }

    #[must_use]
    pub fn channel(&self, name: &str) -> Option<&ChannelEncoder> {
        self.channels.get(name).map(Rc::as_ref)
    }

    /// Shared handle, used as an identity key by the layout cache.
    #[must_use]
    pub fn channel_rc(&self, name: &str) -> Option<Rc<ChannelEncoder>> {
        self.channels.get(name).cloned()
    }

    pub fn channels(&self) -> impl Iterator<Item = &ChannelEncoder> {
        self.channels.values().map(Rc::as_ref)
    }

    #[must_use]
    pub fn has_legend(&self) -> bool {
        self.channels().any(ChannelEncoder::has_legend)
    }

    /// Field names of the channels that partition the data into groups.
    #[must_use]
    pub fn group_bys(&self) -> Vec<String> {
        let mut fields: Vec<String> = Vec::new();
        for encoder in self.channels().filter(|encoder| encoder.is_group_by()) {
            let Some(def) = encoder.definition().field_def() else {
                continue;
            };
            if !fields.contains(&def.field) {
                fields.push(def.field.clone());
            }
        }
        fields
    }

    /// Fills the domain of non-positional scaled channels from `data`.
    ///
    /// Positional domains are owned by the layout pass and are left alone, as
    /// are scales with an explicit domain.
    pub fn set_domain_from_dataset(&self, data: &[Datum]) {
        for encoder in self.channels().filter(|encoder| !encoder.is_xy()) {
            let Some(scale) = encoder.scale() else {
                continue;
            };
            if scale.config().domain.is_some() {
                continue;
            }
            let values: Vec<Value> = data.iter().map(|datum| encoder.get(datum, None)).collect();
            scale.set_domain(infer_domain(scale.scale_type(), scale.config(), &values));
        }
    }
}
