use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Space reserved around the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Margin contribution where unset sides impose no constraint.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialMargin {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

impl Margin {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Element-wise maximum of two margins.
    ///
    /// Each side is a lower bound on reserved space, so merging never sums.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            top: self.top.max(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
            left: self.left.max(other.left),
        }
    }

    /// Merges a partial contribution; unset sides keep `self`.
    #[must_use]
    pub fn merge_partial(self, other: PartialMargin) -> Self {
        Self {
            top: other.top.map_or(self.top, |v| self.top.max(v)),
            right: other.right.map_or(self.right, |v| self.right.max(v)),
            bottom: other.bottom.map_or(self.bottom, |v| self.bottom.max(v)),
            left: other.left.map_or(self.left, |v| self.left.max(v)),
        }
    }

    #[must_use]
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    #[must_use]
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidMargin(format!(
                    "margin `{side}` must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(self)
    }
}

impl From<Margin> for PartialMargin {
    fn from(margin: Margin) -> Self {
        Self {
            top: Some(margin.top),
            right: Some(margin.right),
            bottom: Some(margin.bottom),
            left: Some(margin.left),
        }
    }
}
