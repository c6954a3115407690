use proptest::prelude::*;
use serde_json::{Value, json};
use xychart_rs::api::resolve_x_label_angle;
use xychart_rs::core::Datum;
use xychart_rs::encoding::{
    AxisOrient, ChannelDef, ChannelEncoder, ChannelOptions, ChannelType, DataType, FieldDef,
};

const CHANNEL_TYPES: [ChannelType; 9] = [
    ChannelType::X,
    ChannelType::XBand,
    ChannelType::Y,
    ChannelType::YBand,
    ChannelType::Color,
    ChannelType::Size,
    ChannelType::Numeric,
    ChannelType::Text,
    ChannelType::Category,
];

const ORIENTS: [AxisOrient; 4] = [
    AxisOrient::Top,
    AxisOrient::Bottom,
    AxisOrient::Left,
    AxisOrient::Right,
];

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1_000_000i64..1_000_000).prop_map(|v| json!(v)),
        "[a-z]{0,8}".prop_map(Value::String),
    ]
}

proptest! {
    #[test]
    fn encode_without_scale_is_get(
        value in value_strategy(),
        channel_index in 0usize..CHANNEL_TYPES.len()
    ) {
        let encoder = ChannelEncoder::new(
            "c",
            CHANNEL_TYPES[channel_index],
            ChannelDef::Field(FieldDef::new("f", DataType::Quantitative).without_scale()),
            ChannelOptions::default(),
        );
        prop_assert!(encoder.scale().is_none());
        let mut datum = Datum::new();
        datum.insert("f".to_owned(), value);
        prop_assert_eq!(encoder.encode(&datum, None), encoder.get(&datum, None));
    }

    #[test]
    fn constant_channels_have_no_legend_or_axis(
        value in value_strategy(),
        channel_index in 0usize..CHANNEL_TYPES.len()
    ) {
        let encoder = ChannelEncoder::new(
            "c",
            CHANNEL_TYPES[channel_index],
            ChannelDef::constant(value.clone()),
            ChannelOptions::default(),
        );
        prop_assert!(!encoder.has_legend());
        prop_assert!(encoder.axis().is_none());
        prop_assert!(encoder.scale().is_none());
        prop_assert_eq!(encoder.get(&Datum::new(), None), value);
    }

    #[test]
    fn label_angle_negates_only_for_opposite_corners(
        y_index in 0usize..ORIENTS.len(),
        x_index in 0usize..2,
        angle in 1.0f64..90.0
    ) {
        let y_orient = ORIENTS[y_index];
        let x_orient = ORIENTS[x_index];
        let negated = matches!(
            (y_orient, x_orient),
            (AxisOrient::Right, AxisOrient::Bottom) | (AxisOrient::Left, AxisOrient::Top)
        );
        let expected = if negated { -angle } else { angle };
        prop_assert_eq!(resolve_x_label_angle(Some(y_orient), x_orient, angle), expected);
        prop_assert_eq!(resolve_x_label_angle(None, x_orient, angle), angle);
    }
}
