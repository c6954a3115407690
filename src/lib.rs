//! xychart-rs: declarative channel encoders and adaptive XY chart layout.
//!
//! A per-channel encoding spec becomes a set of channel encoders that extract,
//! scale and format values from data rows. The layout pass then sizes the
//! margins around the plot from the axes' measured tick labels so labels are
//! never clipped, reserving scrollbar space when content overflows.

pub mod api;
pub mod core;
pub mod encoding;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartTheme, LayoutRequest, LayoutTuning, Mark, XyChart, XyChartLayout};
pub use encoding::{ChannelDef, ChannelEncoder, ChannelType, DataType, Encoder, Encoding};
pub use error::{ChartError, ChartResult};
