use glam::DVec3;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{PerspectiveCamera, Surface};
use crate::error::{VizError, VizResult};
use crate::interaction::TooltipState;
use crate::render::{
    Color, LinePrimitive, PolygonPrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
    TooltipPrimitive,
};
use crate::scene::{RenderBar, Scene};

/// Box faces as corner indices (see `Aabb::corner`) plus outward normal.
const BOX_FACES: [([usize; 4], DVec3); 6] = [
    ([0, 2, 6, 4], DVec3::NEG_X),
    ([1, 5, 7, 3], DVec3::X),
    ([0, 4, 5, 1], DVec3::NEG_Y),
    ([2, 3, 7, 6], DVec3::Y),
    ([0, 1, 3, 2], DVec3::NEG_Z),
    ([4, 6, 7, 5], DVec3::Z),
];

/// Approximate advance of one glyph relative to the font size.
const GLYPH_WIDTH_RATIO: f64 = 0.6;

/// Pixel styling of overlays and sprite text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameStyle {
    /// World-space height of label sprite text.
    pub label_world_height: f64,
    pub label_min_font_px: f64,
    pub label_color: Color,
    pub grid_stroke_width: f64,
    pub axes_stroke_width: f64,
    pub tooltip_font_px: f64,
    pub tooltip_padding_px: f64,
    pub tooltip_corner_radius_px: f64,
    pub tooltip_background: Color,
    pub tooltip_text_color: Color,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            label_world_height: 0.375,
            label_min_font_px: 6.0,
            label_color: Color::BLACK,
            grid_stroke_width: 1.0,
            axes_stroke_width: 2.0,
            tooltip_font_px: 13.0,
            tooltip_padding_px: 8.0,
            tooltip_corner_radius_px: 4.0,
            tooltip_background: Color::rgba(0.0, 0.0, 0.0, 0.7),
            tooltip_text_color: Color::WHITE,
        }
    }
}

impl FrameStyle {
    pub fn validate(&self) -> VizResult<()> {
        for (name, value) in [
            ("label_world_height", self.label_world_height),
            ("label_min_font_px", self.label_min_font_px),
            ("grid_stroke_width", self.grid_stroke_width),
            ("axes_stroke_width", self.axes_stroke_width),
            ("tooltip_font_px", self.tooltip_font_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(VizError::InvalidData(format!(
                    "frame style `{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("tooltip_padding_px", self.tooltip_padding_px),
            ("tooltip_corner_radius_px", self.tooltip_corner_radius_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(VizError::InvalidData(format!(
                    "frame style `{name}` must be finite and >= 0"
                )));
            }
        }
        self.label_color.validate()?;
        self.tooltip_background.validate()?;
        self.tooltip_text_color.validate()
    }
}

/// Projects the 3D scene through the camera into a `RenderFrame`.
///
/// Bars are flat-shaded with the scene's ambient and directional lights,
/// back faces are culled and the remaining faces are painter-sorted.
/// Geometry crossing the camera plane is dropped rather than clipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameProjector {
    style: FrameStyle,
}

impl FrameProjector {
    pub fn new(style: FrameStyle) -> VizResult<Self> {
        style.validate()?;
        Ok(Self { style })
    }

    #[must_use]
    pub fn style(&self) -> FrameStyle {
        self.style
    }

    pub fn project(
        &self,
        scene: &Scene,
        camera: &PerspectiveCamera,
        surface: Surface,
        tooltip: &TooltipState,
    ) -> VizResult<RenderFrame> {
        if !surface.is_valid() {
            return Err(VizError::SurfaceUnavailable {
                width: surface.width,
                height: surface.height,
            });
        }

        let fixtures = scene.fixtures();
        let mut frame = RenderFrame::new(surface, fixtures.background);

        for (start, end) in fixtures.grid.segments() {
            if let Some(line) = self.project_line(
                camera,
                surface,
                start,
                end,
                self.style.grid_stroke_width,
                fixtures.grid.color,
            ) {
                frame.lines.push(line);
            }
        }
        for (start, end, color) in fixtures.axes.segments() {
            if let Some(line) =
                self.project_line(camera, surface, start, end, self.style.axes_stroke_width, color)
            {
                frame.lines.push(line);
            }
        }

        let mut faces: Vec<(f64, PolygonPrimitive)> = scene
            .bars()
            .iter()
            .flat_map(|bar| self.project_bar_faces(scene, camera, surface, bar))
            .collect();
        faces.sort_by_key(|(depth, _)| std::cmp::Reverse(OrderedFloat(*depth)));
        frame.polygons = faces.into_iter().map(|(_, polygon)| polygon).collect();

        for label in scene.labels() {
            if label.text.is_empty() {
                continue;
            }
            let Some(ndc) = camera.project(label.position) else {
                continue;
            };
            if ndc.z > 1.0 {
                continue;
            }
            let screen = PerspectiveCamera::ndc_to_screen(ndc, surface);
            let font_px = self.label_font_px(camera, surface, label.position);
            frame.texts.push(TextPrimitive::new(
                label.text.clone(),
                screen.x,
                screen.y,
                font_px,
                self.style.label_color,
                TextHAlign::Center,
            ));
        }

        if tooltip.is_visible() && !tooltip.text().is_empty() {
            frame.tooltip = Some(self.tooltip_primitive(tooltip));
        }

        Ok(frame)
    }

    fn project_line(
        &self,
        camera: &PerspectiveCamera,
        surface: Surface,
        start: DVec3,
        end: DVec3,
        stroke_width: f64,
        color: Color,
    ) -> Option<LinePrimitive> {
        let a = camera.world_to_screen(start, surface)?;
        let b = camera.world_to_screen(end, surface)?;
        Some(LinePrimitive::new(a.x, a.y, b.x, b.y, stroke_width, color))
    }

    fn project_bar_faces(
        &self,
        scene: &Scene,
        camera: &PerspectiveCamera,
        surface: Surface,
        bar: &RenderBar,
    ) -> Vec<(f64, PolygonPrimitive)> {
        let bounds = bar.bounds();
        let half = bounds.size() * 0.5;
        let lights = scene.fixtures();
        let to_light = lights.directional.direction_to_light();
        let flat = bar.height <= 0.0;

        BOX_FACES
            .iter()
            .filter_map(|(corners, normal)| {
                // Flat bars only show their top or bottom square.
                if flat && normal.y == 0.0 {
                    return None;
                }
                let centroid = bounds.center() + *normal * half;
                if normal.dot(camera.position - centroid) <= 0.0 {
                    return None;
                }
                let points = corners
                    .iter()
                    .map(|&corner| {
                        camera
                            .world_to_screen(bounds.corner(corner), surface)
                            .map(|screen| (screen.x, screen.y))
                    })
                    .collect::<Option<Vec<_>>>()?;

                let diffuse = normal.dot(to_light).max(0.0) * lights.directional.intensity;
                let fill = bar
                    .color
                    .scaled(lights.ambient.intensity + diffuse)
                    .added(bar.emissive())
                    .clamped();
                Some((camera.view_depth(centroid), PolygonPrimitive::new(points, fill)))
            })
            .collect()
    }

    fn label_font_px(&self, camera: &PerspectiveCamera, surface: Surface, anchor: DVec3) -> f64 {
        let depth = camera.view_depth(anchor).max(camera.near);
        let half_fov = (camera.fov_y_degrees.to_radians() / 2.0).tan();
        let px = self.style.label_world_height * f64::from(surface.height) / (2.0 * depth * half_fov);
        px.max(self.style.label_min_font_px)
    }

    fn tooltip_primitive(&self, tooltip: &TooltipState) -> TooltipPrimitive {
        let style = self.style;
        let anchor = tooltip.position();
        let glyphs = tooltip.text().chars().count() as f64;
        let width = glyphs * style.tooltip_font_px * GLYPH_WIDTH_RATIO + 2.0 * style.tooltip_padding_px;
        let height = style.tooltip_font_px + 2.0 * style.tooltip_padding_px;

        TooltipPrimitive {
            background: RectPrimitive::new(anchor.x, anchor.y, width, height, style.tooltip_background)
                .with_corner_radius(style.tooltip_corner_radius_px),
            text: TextPrimitive::new(
                tooltip.text(),
                anchor.x + style.tooltip_padding_px,
                anchor.y + style.tooltip_padding_px,
                style.tooltip_font_px,
                style.tooltip_text_color,
                TextHAlign::Left,
            ),
        }
    }
}
