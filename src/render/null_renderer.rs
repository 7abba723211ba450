use crate::core::Surface;
use crate::error::VizResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless sessions.
///
/// It still validates frame content so tests catch invalid geometry before
/// a real backend sees it.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_line_count: usize,
    pub last_polygon_count: usize,
    pub last_text_count: usize,
    pub last_tooltip_text: Option<String>,
    pub surface: Option<Surface>,
    pub disposed: bool,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> VizResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_line_count = frame.lines.len();
        self.last_polygon_count = frame.polygons.len();
        self.last_text_count = frame.texts.len();
        self.last_tooltip_text = frame.tooltip.as_ref().map(|tooltip| tooltip.text.text.clone());
        Ok(())
    }

    fn resize(&mut self, surface: Surface) -> VizResult<()> {
        self.surface = Some(surface);
        self.disposed = false;
        Ok(())
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }
}
