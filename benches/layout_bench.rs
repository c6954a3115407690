use std::hint::black_box;
use std::rc::Rc;

use criterion::{Criterion, criterion_group, criterion_main};
use indexmap::IndexMap;
use serde_json::json;
use xychart_rs::api::{ChartTheme, DataScaleCollector, Mark, XyChartLayout, XyChartLayoutConfig};
use xychart_rs::core::{HeuristicTextMeasurer, Margin};
use xychart_rs::encoding::{ChannelType, Encoder, EncoderSpec, Encoding};

const SPEC: &str = r#"{
    "x": { "field": "date", "type": "temporal" },
    "y": { "field": "revenue", "type": "quantitative", "format": ",.0f" },
    "color": { "field": "region", "type": "nominal" }
}"#;

fn channel_types() -> IndexMap<String, ChannelType> {
    IndexMap::from([
        ("x".to_owned(), ChannelType::X),
        ("y".to_owned(), ChannelType::Y),
        ("color".to_owned(), ChannelType::Color),
    ])
}

fn bench_encoder_construction(c: &mut Criterion) {
    let types = channel_types();
    let spec = EncoderSpec {
        encoding: Encoding::from_json_str(SPEC).expect("valid spec"),
        ..EncoderSpec::default()
    };

    c.bench_function("encoder_construction", |b| {
        b.iter(|| {
            let encoder =
                Encoder::new(black_box(&types), &Encoding::new(), &spec).expect("encoder");
            black_box(encoder);
        })
    });
}

fn bench_layout_10k_points(c: &mut Criterion) {
    let spec = EncoderSpec {
        encoding: Encoding::from_json_str(SPEC).expect("valid spec"),
        ..EncoderSpec::default()
    };
    let encoder = Encoder::new(&channel_types(), &Encoding::new(), &spec).expect("encoder");
    let x = encoder.channel_rc("x").expect("x channel");
    let y = encoder.channel_rc("y").expect("y channel");
    let children: Rc<[Mark]> = Rc::from(vec![Mark::new(
        "revenue",
        (0..10_000).map(|i| json!(1_700_000_000_000i64 + i * 3_600_000)).collect(),
        (0..10_000).map(|i| json!((i % 977) as f64 * 13.5)).collect(),
    )]);
    let theme = Rc::new(ChartTheme::default());

    c.bench_function("xy_layout_10k_points", |b| {
        b.iter(|| {
            let config = XyChartLayoutConfig::new(
                black_box(800.0),
                black_box(480.0),
                Margin::uniform(16.0),
                Rc::clone(&x),
                Rc::clone(&y),
                Rc::clone(&children),
                Rc::clone(&theme),
            );
            let layout = XyChartLayout::new(config, &DataScaleCollector, &HeuristicTextMeasurer)
                .expect("layout");
            black_box(layout.margin());
        })
    });
}

criterion_group!(benches, bench_encoder_construction, bench_layout_10k_points);
criterion_main!(benches);
