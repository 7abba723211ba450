use tracing::debug;

use crate::core::{ChartMode, Surface};
use crate::data::SalesDataService;
use crate::error::VizResult;
use crate::render::Renderer;

use super::VisualizationEngine;

impl<R: Renderer> VisualizationEngine<R> {
    /// Fetches every record from `service` and renders them.
    ///
    /// Service failures are returned untouched so the dashboard can report
    /// them; the current scene stays as it was.
    pub fn sync_from_service<S>(
        &mut self,
        service: &S,
        mode: ChartMode,
        surface: Surface,
    ) -> VizResult<usize>
    where
        S: SalesDataService + ?Sized,
    {
        let records = service.list()?;
        debug!(count = records.len(), mode = %mode, "records fetched for visualization");
        self.render_visualization(&records, mode, surface)?;
        Ok(records.len())
    }
}
