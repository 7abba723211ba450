use tracing::trace;

use crate::error::VizResult;
use crate::interaction::{HoverState, TooltipState};
use crate::render::{RenderFrame, Renderer};
use crate::scene::Scene;

use super::{FrameStats, ViewportSession, VisualizationConfig};

/// Main facade consumed by the dashboard.
///
/// `VisualizationEngine` owns at most one mounted `ViewportSession` and the
/// renderer it draws through. The host calls `render_visualization` whenever
/// records or chart mode change, forwards pointer/resize events, and drives
/// `render_frame` once per display frame until `teardown`.
pub struct VisualizationEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: VisualizationConfig,
    pub(super) session: Option<ViewportSession>,
}

impl<R: Renderer> VisualizationEngine<R> {
    pub fn new(renderer: R, config: VisualizationConfig) -> VizResult<Self> {
        config.validate()?;
        Ok(Self {
            renderer,
            config,
            session: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &VisualizationConfig {
        &self.config
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn session(&self) -> Option<&ViewportSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn scene(&self) -> Option<&Scene> {
        self.session.as_ref().map(ViewportSession::scene)
    }

    #[must_use]
    pub fn hover_state(&self) -> HoverState {
        self.session
            .as_ref()
            .map_or(HoverState::Idle, ViewportSession::hover)
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipState> {
        self.session.as_ref().map(ViewportSession::tooltip)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Per-frame callback: hit-test, highlight, camera damping, draw.
    ///
    /// Returns `None` once the loop is stopped (nothing mounted).
    pub fn render_frame(&mut self) -> VizResult<Option<FrameStats>> {
        let Some(session) = self.session.as_mut() else {
            trace!("frame requested without mounted session");
            return Ok(None);
        };
        let (frame, stats) = session.advance_frame()?;
        self.renderer.render(&frame)?;
        Ok(Some(stats))
    }

    /// Projects the current session state without advancing it.
    pub fn build_render_frame(&self) -> VizResult<Option<RenderFrame>> {
        self.session
            .as_ref()
            .map(ViewportSession::build_frame)
            .transpose()
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let Some(session) = self.session.as_mut() {
            session.pointer_move(x, y);
        }
    }

    pub fn pointer_leave(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.pointer_leave();
        }
    }

    /// Queues an orbit rotation in radians; applied with damping over frames.
    pub fn orbit(&mut self, delta_theta: f64, delta_phi: f64) {
        if let Some(session) = self.session.as_mut() {
            session.controls_mut().rotate(delta_theta, delta_phi);
        }
    }

    /// Queues a dolly; `factor > 1` zooms out.
    pub fn zoom(&mut self, factor: f64) {
        if let Some(session) = self.session.as_mut() {
            session.controls_mut().dolly(factor);
        }
    }

    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        if let Some(session) = self.session.as_mut() {
            session.controls_mut().pan(delta_x, delta_y);
        }
    }
}
