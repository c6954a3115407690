use serde::Serialize;

use crate::api::AxisDescriptor;
use crate::core::{Dimension, Margin};
use crate::error::{ChartError, ChartResult};

/// Container box around a possibly larger, scrollable content box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartFrame {
    pub container: Dimension,
    pub content: Dimension,
}

impl ChartFrame {
    #[must_use]
    pub fn new(container: Dimension, content: Dimension) -> Self {
        Self { container, content }
    }

    /// Defers drawing to `render_content` with the content size.
    pub fn render_content<R>(&self, render_content: impl FnOnce(Dimension) -> R) -> R {
        render_content(self.content)
    }

    #[must_use]
    pub fn scrolls_horizontally(&self) -> bool {
        self.content.width > self.container.width
    }

    #[must_use]
    pub fn scrolls_vertically(&self) -> bool {
        self.content.height > self.container.height
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.container.is_valid() {
            return Err(ChartError::InvalidContainer {
                width: self.container.width,
                height: self.container.height,
            });
        }
        if !self.content.is_valid() {
            return Err(ChartError::InvalidData(format!(
                "content size must be finite and >= 0, got {}x{}",
                self.content.width, self.content.height
            )));
        }
        Ok(())
    }
}

/// Backend-agnostic description of one chart draw pass.
#[derive(Debug, Clone)]
pub struct RenderFrame {
    pub frame: ChartFrame,
    pub margin: Margin,
    pub x_axis: Option<AxisDescriptor>,
    pub y_axis: Option<AxisDescriptor>,
}

impl RenderFrame {
    /// Inner plot size: content box minus margins.
    #[must_use]
    pub fn plot_size(&self) -> Dimension {
        Dimension::new(
            (self.frame.content.width - self.margin.horizontal()).max(0.0),
            (self.frame.content.height - self.margin.vertical()).max(0.0),
        )
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.frame.validate()?;
        self.margin.validate()?;
        for axis in self.x_axis.iter().chain(self.y_axis.iter()) {
            if !axis.label_offset.is_finite() || axis.label_offset < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "axis label offset must be finite and >= 0, got {}",
                    axis.label_offset
                )));
            }
        }
        Ok(())
    }
}
