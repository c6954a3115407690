use serde_json::json;
use xychart_rs::encoding::{DataType, Formatter, NumberFormat, NumberKind, TimeFormat};

#[test]
fn smart_number_format_scales_with_magnitude() {
    let format = Formatter::from_spec(DataType::Quantitative, None);
    assert_eq!(format.format(&json!(0)), "0");
    assert_eq!(format.format(&json!(12.346)), "12.35");
    assert_eq!(format.format(&json!(3)), "3");
    assert_eq!(format.format(&json!(0.012345)), "0.0123");
    assert_eq!(format.format(&json!(1500)), "1.5k");
    assert_eq!(format.format(&json!(2_000_000)), "2M");
}

#[test]
fn d3_like_specifiers() {
    let cases = [
        (".0%", 0.256, "26%"),
        (".1%", 0.256, "25.6%"),
        ("d", 41.7, "42"),
        (",", 1234567.0, "1,234,567"),
        (".2s", 1234.0, "1.2k"),
        (".3~s", 1000.0, "1k"),
        (".2e", 12345.0, "1.23e+4"),
        (".1f", -3.26, "-3.3"),
    ];
    for (spec, value, expected) in cases {
        let format = NumberFormat::parse(spec).expect(spec);
        assert_eq!(format.format(value), expected, "{spec}");
    }
}

#[test]
fn bare_specs_choose_smart_or_integer() {
    assert_eq!(NumberFormat::parse(""), Some(NumberFormat::SMART));
    assert_eq!(
        NumberFormat::parse(",").map(|format| format.kind),
        Some(NumberKind::Integer)
    );
}

#[test]
fn unsupported_format_falls_back_to_smart() {
    let format = Formatter::from_spec(DataType::Quantitative, Some("%%bogus"));
    assert_eq!(format.format(&json!(12.5)), "12.5");
}

#[test]
fn temporal_values_use_time_formats() {
    let smart = Formatter::from_spec(DataType::Temporal, None);
    assert_eq!(smart.format(&json!("2024-03-05")), "2024-03-05");
    assert_eq!(smart.format(&json!("2024-03-05T14:30:00Z")), "2024-03-05 14:30");

    let pattern = Formatter::from_spec(DataType::Temporal, Some("%b %Y"));
    assert_eq!(pattern.format(&json!("2024-03-05")), "Mar 2024");

    let millis = TimeFormat::Smart.format_millis(0.0);
    assert_eq!(millis.as_deref(), Some("1970-01-01"));
}

#[test]
fn malformed_time_pattern_does_not_panic() {
    let format = TimeFormat::Pattern("%Q".to_owned());
    assert_eq!(format.format_millis(0.0), None);
    let formatter = Formatter::from_spec(DataType::Temporal, Some("%Q"));
    assert_eq!(formatter.format(&json!("2024-03-05")), "2024-03-05");
}

#[test]
fn identity_formats_passthrough_values() {
    let format = Formatter::from_spec(DataType::Nominal, None);
    assert_eq!(format.format(&json!("east")), "east");
    assert_eq!(format.format(&json!(true)), "true");
    assert_eq!(format.format(&json!(7)), "7");
    assert_eq!(format.format(&json!(null)), "");
}

#[test]
fn non_numeric_values_skip_number_formats() {
    let format = Formatter::from_spec(DataType::Quantitative, Some(".2f"));
    assert_eq!(format.format(&json!("n/a")), "n/a");
    assert_eq!(format.format(&json!(null)), "");
}
