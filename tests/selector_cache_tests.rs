use std::rc::Rc;

use indexmap::IndexMap;
use serde_json::json;
use xychart_rs::api::{
    ChartTheme, DEFAULT_MARGIN, EncoderSelector, LayoutRequest, LayoutTuning, MarginSelector,
    Mark, XyChart,
};
use xychart_rs::core::PartialMargin;
use xychart_rs::encoding::{
    AxisOrient, ChannelDef, ChannelType, ChannelTypes, DataType, EncoderOptions, Encoding,
};
use xychart_rs::render::NullRenderer;

fn channel_types() -> ChannelTypes {
    IndexMap::from([
        ("x".to_owned(), ChannelType::X),
        ("y".to_owned(), ChannelType::Y),
        ("color".to_owned(), ChannelType::Color),
    ])
}

fn default_encoding() -> Encoding {
    Encoding::new()
        .with_channel("x", ChannelDef::field("x", DataType::Quantitative))
        .with_channel("y", ChannelDef::field("y", DataType::Quantitative))
        .with_channel("color", ChannelDef::constant(json!("#222222")))
}

#[test]
fn encoder_selector_reuses_result_for_identical_inputs() {
    let mut selector = EncoderSelector::new(channel_types(), default_encoding());
    let encoding = Rc::new(Encoding::new());
    let common = Rc::new(Encoding::new());
    let options = Rc::new(EncoderOptions::default());

    let first = selector
        .select(&encoding, &common, &options)
        .expect("first build");
    let second = selector
        .select(&encoding, &common, &options)
        .expect("cached build");
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(selector.stats().hits, 1);
    assert_eq!(selector.stats().misses, 1);
}

#[test]
fn encoder_selector_rebuilds_when_any_input_changes() {
    let mut selector = EncoderSelector::new(channel_types(), default_encoding());
    let encoding = Rc::new(Encoding::new());
    let common = Rc::new(Encoding::new());
    let options = Rc::new(EncoderOptions::default());
    let first = selector
        .select(&encoding, &common, &options)
        .expect("first build");

    // Same contents, new identity.
    let encoding_copy = Rc::new(Encoding::new());
    let by_encoding = selector
        .select(&encoding_copy, &common, &options)
        .expect("rebuild");
    assert!(!Rc::ptr_eq(&first, &by_encoding));

    let common_copy = Rc::new(Encoding::new());
    let by_common = selector
        .select(&encoding_copy, &common_copy, &options)
        .expect("rebuild");
    assert!(!Rc::ptr_eq(&by_encoding, &by_common));

    let options_copy = Rc::new(EncoderOptions::default());
    let by_options = selector
        .select(&encoding_copy, &common_copy, &options_copy)
        .expect("rebuild");
    assert!(!Rc::ptr_eq(&by_common, &by_options));
    assert_eq!(selector.stats().misses, 4);
    assert_eq!(selector.stats().hits, 0);
}

#[test]
fn margin_selector_shares_equal_margins() {
    let mut selector = MarginSelector::default();
    let a = selector.select(Some(PartialMargin {
        left: Some(40.0),
        ..PartialMargin::default()
    }));
    let b = selector.select(Some(PartialMargin {
        left: Some(40.0),
        ..PartialMargin::default()
    }));
    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(a.left, 40.0);
    assert_eq!(a.top, DEFAULT_MARGIN.top);

    let defaults = selector.select(None);
    assert_eq!(*defaults, DEFAULT_MARGIN);
    assert!(!Rc::ptr_eq(&a, &defaults));
}

#[test]
fn chart_layout_is_cached_per_identity() {
    let mut chart = XyChart::new(channel_types(), default_encoding());
    let encoder = chart
        .encoder(
            &Rc::new(Encoding::new()),
            &Rc::new(Encoding::new()),
            &Rc::new(EncoderOptions::default()),
        )
        .expect("encoder");
    let x = encoder.channel_rc("x").expect("x channel");
    let y = encoder.channel_rc("y").expect("y channel");
    let children: Rc<[Mark]> = Rc::from(vec![Mark::new(
        "points",
        vec![json!(1), json!(9)],
        vec![json!(10), json!(90)],
    )]);
    let theme = Rc::new(ChartTheme::default());
    let request = LayoutRequest {
        width: 320.0,
        height: 240.0,
        margin: None,
        theme: Rc::clone(&theme),
        x_encoder: Rc::clone(&x),
        y_encoder: Rc::clone(&y),
        children: Rc::clone(&children),
    };

    let first = chart.layout(request.clone()).expect("layout");
    let second = chart.layout(request.clone()).expect("cached layout");
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(chart.layout_stats().hits, 1);

    let resized = chart
        .layout(LayoutRequest {
            width: 640.0,
            ..request.clone()
        })
        .expect("resized layout");
    assert!(!Rc::ptr_eq(&first, &resized));
    assert_eq!(resized.container_width(), 640.0);

    let mut renderer = NullRenderer::default();
    let rendered = chart
        .render(&mut renderer, LayoutRequest {
            width: 640.0,
            ..request
        })
        .expect("render");
    assert!(Rc::ptr_eq(&resized, &rendered));
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_axis_count, 2);
}

#[test]
fn charts_do_not_share_caches() {
    let mut first = XyChart::new(channel_types(), default_encoding());
    let mut second = XyChart::new(channel_types(), default_encoding());
    let encoding = Rc::new(Encoding::new());
    let options = Rc::new(EncoderOptions::default());

    let a = first.encoder(&encoding, &encoding, &options).expect("first");
    let b = second.encoder(&encoding, &encoding, &options).expect("second");
    assert!(!Rc::ptr_eq(&a, &b));
    assert_eq!(first.encoder_stats().misses, 1);
    assert_eq!(second.encoder_stats().misses, 1);
}

#[test]
fn retuning_drops_cached_layouts() {
    let mut chart = XyChart::new(channel_types(), default_encoding());
    let encoder = chart
        .encoder(
            &Rc::new(Encoding::new()),
            &Rc::new(Encoding::new()),
            &Rc::new(EncoderOptions::default()),
        )
        .expect("encoder");
    let request = LayoutRequest {
        width: 320.0,
        height: 240.0,
        margin: None,
        theme: Rc::new(ChartTheme::default()),
        x_encoder: encoder.channel_rc("x").expect("x channel"),
        y_encoder: encoder.channel_rc("y").expect("y channel"),
        children: Rc::from(vec![Mark::new(
            "points",
            vec![json!(1), json!(9)],
            vec![json!(10), json!(90)],
        )]),
    };
    let before = chart.layout(request.clone()).expect("layout");

    let mut chart = chart.with_tuning(LayoutTuning {
        default_label_angle: 30.0,
        ..LayoutTuning::default()
    });
    let after = chart.layout(request).expect("retuned layout");
    assert!(!Rc::ptr_eq(&before, &after));
    assert_eq!(chart.layout_stats().hits, 0);
    assert_eq!(chart.layout_stats().misses, 1);
    assert_eq!(after.recommend_x_label_angle(AxisOrient::Bottom), 30.0);
}
