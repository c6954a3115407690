use std::fmt::{self, Write as _};
use std::sync::Arc;

use chrono::{DateTime, Timelike, Utc};
use serde_json::Value;
use tracing::warn;

use crate::core::{value_as_epoch_millis, value_as_f64};

use super::{ChannelDef, DataType};

/// Caller-supplied formatter for channel values.
pub type CustomFormatFn = Arc<dyn Fn(&Value) -> String + Send + Sync + 'static>;

/// Number presentation kinds (d3-format subset).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Fixed,
    Integer,
    Percent,
    Si,
    Exponent,
    Smart,
}

/// Parsed number format such as `",.2f"`, `".0%"`, `".3~s"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub grouping: bool,
    pub precision: Option<usize>,
    pub trim: bool,
    pub kind: NumberKind,
}

impl NumberFormat {
    pub const SMART: Self = Self {
        grouping: false,
        precision: None,
        trim: true,
        kind: NumberKind::Smart,
    };

    /// Parses `[,][.precision][~][f|d|%|s|e]`. Returns `None` on anything else.
    #[must_use]
    pub fn parse(spec: &str) -> Option<Self> {
        let mut rest = spec.trim();
        if rest.is_empty() || rest.eq_ignore_ascii_case("smart_number") {
            return Some(Self::SMART);
        }

        let grouping = rest.starts_with(',');
        if grouping {
            rest = &rest[1..];
        }

        let mut precision = None;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let digits = after_dot.chars().take_while(char::is_ascii_digit).count();
            if digits == 0 {
                return None;
            }
            precision = after_dot[..digits].parse::<usize>().ok();
            rest = &after_dot[digits..];
        }

        let trim = rest.starts_with('~');
        if trim {
            rest = &rest[1..];
        }

        let kind = match rest {
            "" | "f" => NumberKind::Fixed,
            "d" => NumberKind::Integer,
            "%" => NumberKind::Percent,
            "s" => NumberKind::Si,
            "e" => NumberKind::Exponent,
            _ => return None,
        };
        // No precision and no type: "," alone groups integers, "" and "~" are smart.
        let kind = if kind == NumberKind::Fixed && precision.is_none() && rest.is_empty() {
            if grouping {
                NumberKind::Integer
            } else {
                NumberKind::Smart
            }
        } else {
            kind
        };

        Some(Self {
            grouping,
            precision,
            trim,
            kind,
        })
    }

    #[must_use]
    pub fn format(self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let text = match self.kind {
            NumberKind::Fixed => {
                let text = format!("{:.*}", self.precision.unwrap_or(6), value);
                if self.trim { trim_zeros(&text) } else { text }
            }
            NumberKind::Integer => format!("{:.0}", value.round()),
            NumberKind::Percent => {
                let text = format!("{:.*}", self.precision.unwrap_or(6), value * 100.0);
                let text = if self.trim { trim_zeros(&text) } else { text };
                return format!("{}%", self.group(&text));
            }
            NumberKind::Si => format_si(value, self.precision.unwrap_or(6).max(1), self.trim),
            NumberKind::Exponent => format_exponent(value, self.precision.unwrap_or(6), self.trim),
            NumberKind::Smart => format_smart(value),
        };
        self.group(&text)
    }

    fn group(self, text: &str) -> String {
        if self.grouping {
            group_thousands(text)
        } else {
            text.to_owned()
        }
    }
}

/// Parsed time format: a strftime pattern or the smart date heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeFormat {
    Pattern(String),
    Smart,
}

impl TimeFormat {
    #[must_use]
    pub fn format_millis(&self, millis: f64) -> Option<String> {
        let time = DateTime::<Utc>::from_timestamp_millis(millis.round() as i64)?;
        let text = match self {
            Self::Pattern(pattern) => {
                // Malformed strftime items surface as a fmt error rather than a panic.
                let mut text = String::new();
                write!(text, "{}", time.format(pattern)).ok()?;
                text
            }
            Self::Smart => {
                if time.hour() == 0 && time.minute() == 0 && time.second() == 0 {
                    time.format("%Y-%m-%d").to_string()
                } else {
                    time.format("%Y-%m-%d %H:%M").to_string()
                }
            }
        };
        Some(text)
    }
}

/// Turns raw channel values into display strings.
#[derive(Clone, Default)]
pub enum Formatter {
    #[default]
    Identity,
    Number(NumberFormat),
    Time(TimeFormat),
    Custom(CustomFormatFn),
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Number(format) => f.debug_tuple("Number").field(format).finish(),
            Self::Time(format) => f.debug_tuple("Time").field(format).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Formatter {
    /// Formatter implied by a channel definition's type and `format`.
    #[must_use]
    pub fn from_channel_def(definition: &ChannelDef) -> Self {
        let Some(def) = definition.field_def() else {
            return Self::Identity;
        };
        Self::from_spec(def.data_type, def.format.as_deref())
    }

    /// Formatter for an explicit format string on a field of `data_type`.
    #[must_use]
    pub fn from_spec(data_type: DataType, format: Option<&str>) -> Self {
        match (data_type, format) {
            (DataType::Temporal, Some(pattern)) => {
                Self::Time(TimeFormat::Pattern(pattern.to_owned()))
            }
            (DataType::Temporal, None) => Self::Time(TimeFormat::Smart),
            (DataType::Quantitative, None) => Self::Number(NumberFormat::SMART),
            (DataType::Nominal | DataType::Ordinal, None) => Self::Identity,
            (_, Some(spec)) => match NumberFormat::parse(spec) {
                Some(format) => Self::Number(format),
                None => {
                    warn!(format = spec, "unsupported number format; using smart format");
                    Self::Number(NumberFormat::SMART)
                }
            },
        }
    }

    #[must_use]
    pub fn custom(format: impl Fn(&Value) -> String + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(format))
    }

    /// Always yields a string; null renders as an empty string.
    #[must_use]
    pub fn format(&self, value: &Value) -> String {
        if let Self::Custom(format) = self {
            return format(value);
        }
        if value.is_null() {
            return String::new();
        }
        match self {
            Self::Number(format) => match value {
                Value::Number(_) => value_as_f64(value)
                    .map(|number| format.format(number))
                    .unwrap_or_else(|| plain_text(value)),
                _ => plain_text(value),
            },
            Self::Time(format) => value_as_epoch_millis(value)
                .and_then(|millis| format.format_millis(millis))
                .unwrap_or_else(|| plain_text(value)),
            Self::Identity | Self::Custom(_) => plain_text(value),
        }
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn trim_zeros(text: &str) -> String {
    if !text.contains('.') {
        return text.to_owned();
    }
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let split = unsigned
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let (integer, tail) = unsigned.split_at(split);

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}{tail}")
}

const SI_PREFIXES: [(i32, &str); 9] = [
    (-12, "p"),
    (-9, "n"),
    (-6, "µ"),
    (-3, "m"),
    (0, ""),
    (3, "k"),
    (6, "M"),
    (9, "G"),
    (12, "T"),
];

fn format_si(value: f64, significant: usize, trim: bool) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    let exponent = value.abs().log10().floor() as i32;
    let group = (exponent.div_euclid(3) * 3).clamp(-12, 12);
    let prefix = SI_PREFIXES
        .iter()
        .find(|(power, _)| *power == group)
        .map_or("", |(_, prefix)| prefix);
    let scaled = value / 10f64.powi(group);
    let decimals = (significant as i32 - 1 - (exponent - group)).max(0) as usize;
    let text = format!("{scaled:.decimals$}");
    let text = if trim { trim_zeros(&text) } else { text };
    format!("{text}{prefix}")
}

fn format_exponent(value: f64, precision: usize, trim: bool) -> String {
    let text = format!("{value:.precision$e}");
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
    let mantissa = if trim {
        trim_zeros(mantissa)
    } else {
        mantissa.to_owned()
    };
    if exponent.starts_with('-') {
        format!("{mantissa}e{exponent}")
    } else {
        format!("{mantissa}e+{exponent}")
    }
}

fn format_smart(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 {
        "0".to_owned()
    } else if magnitude >= 1000.0 {
        format_si(value, 3, true)
    } else if magnitude >= 1.0 {
        trim_zeros(&format!("{value:.2}"))
    } else {
        let exponent = magnitude.log10().floor() as i32;
        let decimals = (2 - exponent).max(0) as usize;
        trim_zeros(&format!("{value:.decimals$}"))
    }
}
