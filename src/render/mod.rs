mod frame;
mod null_renderer;
mod primitives;
mod projector;

pub use frame::{RenderFrame, TooltipPrimitive};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, PolygonPrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};
pub use projector::{FrameProjector, FrameStyle};

use crate::core::Surface;
use crate::error::VizResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully projected `RenderFrame`, so drawing code stays
/// isolated from scene construction, camera math and hover logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> VizResult<()>;

    /// Called on mount and whenever the drawing surface changes size.
    fn resize(&mut self, surface: Surface) -> VizResult<()> {
        let _ = surface;
        Ok(())
    }

    /// Releases backend resources. Must tolerate repeated calls.
    fn dispose(&mut self) {}
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
