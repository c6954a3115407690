mod frame;
mod null_renderer;

pub use frame::{ChartFrame, RenderFrame};
pub use null_renderer::NullRenderer;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive the resolved frame, margin and axis descriptors; drawing
/// marks and axes is entirely theirs.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
