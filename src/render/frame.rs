use crate::core::Surface;
use crate::error::{VizError, VizResult};
use crate::render::{Color, LinePrimitive, PolygonPrimitive, RectPrimitive, TextPrimitive};

/// Tooltip overlay, drawn after everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipPrimitive {
    pub background: RectPrimitive,
    pub text: TextPrimitive,
}

/// Backend-agnostic draw list for one frame, in surface pixels.
///
/// Polygons are already in back-to-front order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub surface: Surface,
    pub background: Color,
    pub lines: Vec<LinePrimitive>,
    pub polygons: Vec<PolygonPrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub tooltip: Option<TooltipPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(surface: Surface, background: Color) -> Self {
        Self {
            surface,
            background,
            lines: Vec::new(),
            polygons: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
            tooltip: None,
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_polygon(mut self, polygon: PolygonPrimitive) -> Self {
        self.polygons.push(polygon);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    pub fn validate(&self) -> VizResult<()> {
        if !self.surface.is_valid() {
            return Err(VizError::SurfaceUnavailable {
                width: self.surface.width,
                height: self.surface.height,
            });
        }
        self.background.validate()?;

        for line in &self.lines {
            line.validate()?;
        }
        for polygon in &self.polygons {
            polygon.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        if let Some(tooltip) = &self.tooltip {
            tooltip.background.validate()?;
            tooltip.text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.polygons.is_empty()
            && self.rects.is_empty()
            && self.texts.is_empty()
            && self.tooltip.is_none()
    }
}
