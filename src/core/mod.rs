pub mod margin;
pub mod scale;
pub mod text;
pub mod ticks;
pub mod types;

pub use margin::{Margin, PartialMargin};
pub use scale::{ScaleAgent, ScaleConfig, ScaleType, infer_domain};
pub use text::{HeuristicTextMeasurer, TextMeasurer, TextStyle};
pub use ticks::{TickValues, nice_domain, nice_ticks, tick_increment};
pub use types::{
    Datum, Dimension, is_nullish, number_value, value_as_epoch_millis, value_as_f64,
};
