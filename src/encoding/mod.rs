pub mod accessor;
pub mod axis;
pub mod channel_def;
pub mod channel_encoder;
pub mod channel_type;
pub mod encoder;
pub mod format;
pub mod legend;
pub mod scale_extract;

pub use accessor::Accessor;
pub use axis::{
    AxisAgent, AxisConfig, AxisLayout, AxisLayoutRequest, AxisOrient, DEFAULT_LABEL_ANGLE,
    DEFAULT_LABEL_PADDING, DEFAULT_TICK_COUNT, LabelOverlap, LabelOverlapStrategy,
    ResolvedAxisConfig, TextAnchor,
};
pub use channel_def::{
    BandDef, ChannelDef, ChannelDefKind, FieldDef, LegendConfig, Toggle, ValueDef,
};
pub use channel_encoder::{ChannelEncoder, ChannelOptions};
pub use channel_type::{ChannelType, DataType};
pub use encoder::{ChannelTypes, Encoder, EncoderOptions, EncoderSpec, Encoding};
pub use format::{CustomFormatFn, Formatter, NumberFormat, NumberKind, TimeFormat};
pub use legend::{LegendGroup, LegendItem};
pub use scale_extract::{CATEGORY10, extract_scale, infer_scale_type};
