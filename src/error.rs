use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid container size: width={width}, height={height}")]
    InvalidContainer { width: f64, height: f64 },

    #[error("invalid margin: {0}")]
    InvalidMargin(String),

    #[error("invalid encoding spec: {0}")]
    InvalidSpec(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
