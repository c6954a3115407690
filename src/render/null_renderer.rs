use crate::error::ChartResult;
use crate::render::{ChartFrame, RenderFrame, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates the frame so tests catch invalid geometry.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_frame: Option<ChartFrame>,
    pub last_axis_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_frame = Some(frame.frame);
        self.last_axis_count =
            usize::from(frame.x_axis.is_some()) + usize::from(frame.y_axis.is_some());
        Ok(())
    }
}
