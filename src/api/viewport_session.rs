use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{ChartMode, OrbitControls, PerspectiveCamera, SalesRecord, Surface};
use crate::error::{VizError, VizResult};
use crate::interaction::{HoverState, HoverTransition, PointerState, TooltipState, pick_bar};
use crate::render::{Color, FrameProjector, RenderFrame};
use crate::scene::{BarId, Scene, SceneBuilder};

use super::VisualizationConfig;

/// What one call of the frame callback did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameStats {
    pub frame_index: u64,
    pub transition: HoverTransition,
    pub hovered: Option<BarId>,
    pub camera_moved: bool,
    pub polygons: usize,
    pub texts: usize,
}

/// State of one mounted visualization.
///
/// Owns the camera rig, the scene graph and the hover/tooltip state. Only the
/// rebuild path and the frame callback mutate the scene.
#[derive(Debug, Clone)]
pub struct ViewportSession {
    surface: Surface,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    scene: Scene,
    builder: SceneBuilder,
    projector: FrameProjector,
    highlight: Color,
    pointer: PointerState,
    hover: HoverState,
    tooltip: TooltipState,
    records: Vec<SalesRecord>,
    mode: ChartMode,
    built: bool,
    frame_count: u64,
}

impl ViewportSession {
    pub(super) fn mount(config: &VisualizationConfig, surface: Surface) -> VizResult<Self> {
        if !surface.is_valid() {
            return Err(VizError::SurfaceUnavailable {
                width: surface.width,
                height: surface.height,
            });
        }
        let (camera, controls) = config.camera.build(surface.aspect())?;
        let session = Self {
            surface,
            camera,
            controls,
            scene: Scene::new(config.fixtures()),
            builder: SceneBuilder::new(config.layout)?,
            projector: FrameProjector::new(config.style)?,
            highlight: config.highlight_emissive,
            pointer: PointerState::default(),
            hover: HoverState::Idle,
            tooltip: TooltipState::default(),
            records: Vec::new(),
            mode: ChartMode::default(),
            built: false,
            frame_count: 0,
        };
        debug!(
            width = surface.width,
            height = surface.height,
            "viewport session mounted"
        );
        Ok(session)
    }

    /// Rebuilds the scene unless records and mode match the last build.
    ///
    /// Returns whether a rebuild happened. A rebuild drops any hover.
    ///
    /// Inputs are only recorded once the build succeeds, so a failed build
    /// is retried (and fails again) on the next call with the same inputs.
    pub(super) fn rebuild(&mut self, records: &[SalesRecord], mode: ChartMode) -> VizResult<bool> {
        if self.built && self.mode == mode && self.records.as_slice() == records {
            trace!(mode = %mode, "inputs unchanged, keeping scene");
            return Ok(false);
        }

        self.hover = HoverState::Idle;
        self.tooltip.hide();
        self.built = false;
        self.builder.build(&mut self.scene, records, mode)?;
        self.records = records.to_vec();
        self.mode = mode;
        self.built = true;
        Ok(true)
    }

    pub(super) fn resize(&mut self, surface: Surface) -> VizResult<()> {
        if !surface.is_valid() {
            return Err(VizError::SurfaceUnavailable {
                width: surface.width,
                height: surface.height,
            });
        }
        self.camera.set_aspect(surface.aspect())?;
        self.surface = surface;
        debug!(
            width = surface.width,
            height = surface.height,
            aspect = self.camera.aspect,
            "viewport resized"
        );
        Ok(())
    }

    pub(super) fn pointer_move(&mut self, x: f64, y: f64) {
        self.pointer.on_pointer_move(x, y, self.surface);
    }

    pub(super) fn pointer_leave(&mut self) {
        self.pointer.on_pointer_leave();
    }

    pub(super) fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    /// Hit-test, highlight, camera damping and projection for one frame.
    pub(super) fn advance_frame(&mut self) -> VizResult<(RenderFrame, FrameStats)> {
        let transition = self.update_hover();
        let camera_moved = self.controls.update(&mut self.camera);

        if let HoverState::Hovering(id) = self.hover {
            if let Some(position) = self.bar_screen_position(id) {
                self.tooltip.move_to(position);
            }
        }

        let frame = self.build_frame()?;
        self.frame_count += 1;
        let stats = FrameStats {
            frame_index: self.frame_count,
            transition,
            hovered: self.hover.hovered(),
            camera_moved,
            polygons: frame.polygons.len(),
            texts: frame.texts.len(),
        };
        Ok((frame, stats))
    }

    /// Projects the current state without touching hover or camera.
    pub(super) fn build_frame(&self) -> VizResult<RenderFrame> {
        self.projector
            .project(&self.scene, &self.camera, self.surface, &self.tooltip)
    }

    /// Stops reacting to input and removes the tooltip overlay.
    pub(super) fn detach(&mut self) {
        if let Some(id) = self.hover.hovered() {
            self.scene.set_emissive(id, Color::BLACK);
        }
        self.hover = HoverState::Idle;
        self.pointer.on_pointer_leave();
        self.tooltip.detach();
        debug!(frames = self.frame_count, "viewport session detached");
    }

    fn update_hover(&mut self) -> HoverTransition {
        let hit = self
            .pointer
            .ndc()
            .and_then(|ndc| self.camera.ray_through_ndc(ndc))
            .and_then(|ray| pick_bar(&self.scene, ray))
            .map(|hit| hit.id);

        let (next, transition) = self.hover.advance(hit);
        if let Some(id) = transition.cleared() {
            self.scene.set_emissive(id, Color::BLACK);
        }
        match transition.highlighted() {
            Some(id) => {
                self.scene.set_emissive(id, self.highlight);
                let position = self.bar_screen_position(id);
                if let Some(bar) = self.scene.bar(id) {
                    self.tooltip.show(&bar.label, position);
                }
            }
            None if transition != HoverTransition::Unchanged => self.tooltip.hide(),
            None => {}
        }
        if transition != HoverTransition::Unchanged {
            trace!(?transition, "hover transition");
        }
        self.hover = next;
        transition
    }

    fn bar_screen_position(&self, id: BarId) -> Option<DVec2> {
        let bar = self.scene.bar(id)?;
        self.camera.world_to_screen(bar.position, self.surface)
    }

    #[must_use]
    pub fn surface(&self) -> Surface {
        self.surface
    }

    #[must_use]
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn hover(&self) -> HoverState {
        self.hover
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    #[must_use]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    #[must_use]
    pub fn mode(&self) -> ChartMode {
        self.mode
    }

    #[must_use]
    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
