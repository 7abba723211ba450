use tracing::{debug, warn};

use crate::core::{ChartMode, SalesRecord, Surface};
use crate::error::{VizError, VizResult};
use crate::render::Renderer;

use super::{ViewportSession, VisualizationEngine};

impl<R: Renderer> VisualizationEngine<R> {
    /// Mounts on first call, updates afterwards.
    ///
    /// A changed surface is resized; changed records or mode trigger a full
    /// scene rebuild. The frame loop itself is never restarted here.
    pub fn render_visualization(
        &mut self,
        records: &[SalesRecord],
        mode: ChartMode,
        surface: Surface,
    ) -> VizResult<()> {
        if !surface.is_valid() {
            return Err(VizError::SurfaceUnavailable {
                width: surface.width,
                height: surface.height,
            });
        }

        if self.session.is_none() {
            self.mount(surface)?;
        } else if self.session.as_ref().map(ViewportSession::surface) != Some(surface) {
            self.resize(surface)?;
        }

        let Some(session) = self.session.as_mut() else {
            return Err(VizError::InvalidData(
                "viewport session missing after mount".to_owned(),
            ));
        };
        if records.is_empty() {
            debug!(mode = %mode, "rendering empty visualization");
        }
        session.rebuild(records, mode)?;
        Ok(())
    }

    /// Recomputes the camera aspect and resizes the backend surface.
    ///
    /// Ignored when nothing is mounted. The backend is resized first; if it
    /// rejects the surface the session keeps its previous size and aspect.
    pub fn resize(&mut self, surface: Surface) -> VizResult<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        if !surface.is_valid() {
            return Err(VizError::SurfaceUnavailable {
                width: surface.width,
                height: surface.height,
            });
        }
        if let Err(err) = self.renderer.resize(surface) {
            warn!(
                error = %err,
                width = surface.width,
                height = surface.height,
                "renderer rejected resize, keeping previous surface"
            );
            return Err(err);
        }
        session.resize(surface)
    }

    /// Detaches input handling, removes the tooltip and releases the backend.
    ///
    /// Safe to call repeatedly and without a prior successful mount.
    pub fn teardown(&mut self) {
        match self.session.take() {
            Some(mut session) => {
                session.detach();
                debug!(frames = session.frame_count(), "visualization torn down");
            }
            None => debug!("teardown without mounted session"),
        }
        self.renderer.dispose();
    }

    fn mount(&mut self, surface: Surface) -> VizResult<()> {
        let session = ViewportSession::mount(&self.config, surface)?;
        if let Err(err) = self.renderer.resize(surface) {
            warn!(error = %err, "renderer rejected surface, releasing backend");
            self.renderer.dispose();
            return Err(err);
        }
        self.session = Some(session);
        Ok(())
    }
}
