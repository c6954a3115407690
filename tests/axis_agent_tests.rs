use serde_json::json;
use xychart_rs::core::{Dimension, TextMeasurer, TextStyle};
use xychart_rs::encoding::{
    AxisConfig, AxisLayoutRequest, AxisOrient, ChannelDef, ChannelEncoder, ChannelOptions,
    ChannelType, DataType, FieldDef, LabelOverlap, LabelOverlapStrategy, TextAnchor,
};

/// Every non-empty text measures as the same box.
struct FixedMeasurer {
    width: f64,
    height: f64,
}

impl TextMeasurer for FixedMeasurer {
    fn measure(&self, text: &str, _style: &TextStyle) -> Dimension {
        if text.is_empty() {
            Dimension::new(0.0, 0.0)
        } else {
            Dimension::new(self.width, self.height)
        }
    }
}

const MEASURER: FixedMeasurer = FixedMeasurer {
    width: 60.0,
    height: 12.0,
};

fn x_encoder(axis: AxisConfig) -> ChannelEncoder {
    let encoder = ChannelEncoder::new(
        "x",
        ChannelType::X,
        ChannelDef::Field(FieldDef::new("value", DataType::Quantitative).with_axis(axis)),
        ChannelOptions::default(),
    );
    encoder
        .scale()
        .expect("x scale")
        .set_domain(vec![json!(0), json!(100)]);
    encoder
}

fn request(axis_width: f64, style: &TextStyle) -> AxisLayoutRequest<'_> {
    AxisLayoutRequest {
        axis_width,
        tick_length: 4.0,
        tick_text_style: style,
        label_angle: None,
    }
}

#[test]
fn tick_labels_follow_scale_domain() {
    let encoder = x_encoder(AxisConfig::default());
    let axis = encoder.axis().expect("x axis");
    assert_eq!(axis.tick_labels(), vec!["0", "20", "40", "60", "80", "100"]);
}

#[test]
fn wide_axis_keeps_labels_flat() {
    let encoder = x_encoder(AxisConfig::default());
    let style = TextStyle::default();
    let layout = encoder
        .axis()
        .expect("x axis")
        .compute_layout(request(600.0, &style), &MEASURER);

    assert_eq!(layout.orient, AxisOrient::Bottom);
    assert_eq!(layout.label_overlap, LabelOverlapStrategy::Flat);
    assert_eq!(layout.label_angle, 0.0);
    assert_eq!(layout.tick_text_anchor, TextAnchor::Middle);
    assert_eq!(layout.label_offset, 16.0);
    // tick 4 + padding 4 + label 12 + title (12 + 4)
    assert_eq!(layout.min_margin.bottom, Some(36.0));
    assert_eq!(layout.min_margin.left, None);
}

#[test]
fn crowded_axis_rotates_labels() {
    let encoder = x_encoder(AxisConfig::default());
    let style = TextStyle::default();
    let layout = encoder
        .axis()
        .expect("x axis")
        .compute_layout(request(120.0, &style), &MEASURER);

    assert_eq!(layout.label_overlap, LabelOverlapStrategy::Rotate);
    assert_eq!(layout.label_angle, 40.0);
    assert_eq!(layout.tick_text_anchor, TextAnchor::Start);
    // ceil(60 sin 40° + 12 cos 40°) = 48
    assert_eq!(layout.label_offset, 52.0);
    assert_eq!(layout.min_margin.bottom, Some(72.0));
}

#[test]
fn requested_negative_angle_anchors_at_end() {
    let encoder = x_encoder(AxisConfig::default());
    let style = TextStyle::default();
    let layout = encoder.axis().expect("x axis").compute_layout(
        AxisLayoutRequest {
            label_angle: Some(-40.0),
            ..request(120.0, &style)
        },
        &MEASURER,
    );
    assert_eq!(layout.label_angle, -40.0);
    assert_eq!(layout.tick_text_anchor, TextAnchor::End);
    assert_eq!(layout.min_margin.bottom, Some(72.0));
}

#[test]
fn flat_overlap_policy_never_rotates() {
    let encoder = x_encoder(AxisConfig::default().with_label_overlap(LabelOverlap::Flat));
    let style = TextStyle::default();
    let layout = encoder
        .axis()
        .expect("x axis")
        .compute_layout(request(120.0, &style), &MEASURER);
    assert_eq!(layout.label_overlap, LabelOverlapStrategy::Flat);
    assert_eq!(layout.min_margin.bottom, Some(36.0));
}

#[test]
fn empty_title_reserves_no_title_space() {
    let encoder = x_encoder(AxisConfig::default().with_title(""));
    let style = TextStyle::default();
    let layout = encoder
        .axis()
        .expect("x axis")
        .compute_layout(request(600.0, &style), &MEASURER);
    assert_eq!(layout.min_margin.bottom, Some(20.0));
}

#[test]
fn y_axis_reserves_widest_label_on_its_side() {
    let encoder = ChannelEncoder::new(
        "y",
        ChannelType::Y,
        ChannelDef::field("category", DataType::Nominal),
        ChannelOptions::default(),
    );
    encoder.scale().expect("y scale").set_domain(vec![
        json!("a"),
        json!("b"),
        json!("c"),
        json!("d"),
        json!("e"),
    ]);
    let style = TextStyle::default();
    let axis = encoder.axis().expect("y axis");
    let layout = axis.compute_layout(request(260.0, &style), &MEASURER);

    assert_eq!(layout.orient, AxisOrient::Left);
    assert_eq!(layout.tick_labels.len(), 5);
    assert_eq!(layout.label_angle, 0.0);
    assert_eq!(layout.tick_text_anchor, TextAnchor::End);
    assert_eq!(layout.label_offset, 64.0);
    assert_eq!(layout.min_margin.left, Some(84.0));
    assert_eq!(axis.title(), "category");
}

#[test]
fn axis_config_tick_count_and_format_apply() {
    let encoder = x_encoder(
        AxisConfig {
            format: Some(".1f".to_owned()),
            ..AxisConfig::default()
        }
        .with_tick_count(2),
    );
    let axis = encoder.axis().expect("x axis");
    assert_eq!(axis.config().tick_count, 2);
    assert_eq!(axis.tick_labels(), vec!["0.0", "50.0", "100.0"]);
}
