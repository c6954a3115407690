use proptest::prelude::*;
use serde_json::json;
use xychart_rs::core::{ScaleAgent, ScaleConfig, ScaleType, nice_domain, nice_ticks, value_as_f64};

fn tolerance(start: f64, stop: f64) -> f64 {
    1e-9 * start.abs().max(stop.abs()).max(1.0)
}

proptest! {
    #[test]
    fn nice_ticks_stay_inside_domain_in_order(
        start in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        count in 1usize..20
    ) {
        let stop = start + span;
        let eps = tolerance(start, stop);
        let ticks = nice_ticks(start, stop, count);

        prop_assert!(!ticks.is_empty());
        for tick in &ticks {
            prop_assert!(*tick >= start - eps && *tick <= stop + eps);
        }
        for pair in ticks.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn nice_domain_covers_input(
        start in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        count in 1usize..20
    ) {
        let stop = start + span;
        let eps = tolerance(start, stop);
        let (lo, hi) = nice_domain(start, stop, count);
        prop_assert!(lo <= start + eps);
        prop_assert!(hi >= stop - eps);
    }

    #[test]
    fn clamped_linear_output_stays_in_range(
        start in -1_000.0f64..1_000.0,
        span in 0.01f64..1_000.0,
        value in -5_000.0f64..5_000.0
    ) {
        let config = ScaleConfig {
            clamp: true,
            ..ScaleConfig::default()
                .with_domain(vec![json!(start), json!(start + span)])
                .with_range(vec![json!(0.0), json!(500.0)])
        };
        let scale = ScaleAgent::new(ScaleType::Linear, config, vec![json!(0), json!(1)], None);
        let output = scale
            .encode_value(&json!(value))
            .as_ref()
            .and_then(value_as_f64)
            .expect("numeric output");
        prop_assert!((-1e-9..=500.0 + 1e-9).contains(&output));
    }
}
