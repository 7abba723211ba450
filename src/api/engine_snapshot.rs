use serde::{Deserialize, Serialize};

use crate::core::{ChartMode, RecordId, Surface};
use crate::interaction::HoverState;
use crate::render::Renderer;
use crate::scene::{BarId, BarMetric};

use super::{ViewportSession, VisualizationEngine};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSnapshot {
    pub id: BarId,
    pub record_id: RecordId,
    pub metric: BarMetric,
    pub value: f64,
    pub height: f64,
    pub center: [f64; 3],
    pub label: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipSnapshot {
    pub visible: bool,
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Serializable view of a mounted session, for diagnostics and fixtures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSnapshot {
    pub surface: Surface,
    pub mode: Option<ChartMode>,
    pub record_count: usize,
    pub max_value: Option<f64>,
    pub scale_factor: Option<f64>,
    pub camera_position: [f64; 3],
    pub camera_target: [f64; 3],
    pub bars: Vec<BarSnapshot>,
    pub label_count: usize,
    pub hover: HoverState,
    pub tooltip: TooltipSnapshot,
    pub frame_count: u64,
}

impl ViewportSnapshot {
    #[must_use]
    pub fn capture(session: &ViewportSession) -> Self {
        let scene = session.scene();
        let scale = scene.scale();
        let tooltip = session.tooltip();
        Self {
            surface: session.surface(),
            mode: scene.mode(),
            record_count: session.records().len(),
            max_value: scale.map(|scale| scale.max_value()),
            scale_factor: scale.map(|scale| scale.scale_factor()),
            camera_position: session.camera().position.to_array(),
            camera_target: session.camera().target.to_array(),
            bars: scene
                .bars()
                .iter()
                .map(|bar| BarSnapshot {
                    id: bar.id,
                    record_id: bar.record_id,
                    metric: bar.metric,
                    value: bar.value,
                    height: bar.height,
                    center: bar.position.to_array(),
                    label: bar.label.clone(),
                    highlighted: bar.is_highlighted(),
                })
                .collect(),
            label_count: scene.labels().len(),
            hover: session.hover(),
            tooltip: TooltipSnapshot {
                visible: tooltip.is_visible(),
                text: tooltip.text().to_owned(),
                x: tooltip.position().x,
                y: tooltip.position().y,
            },
            frame_count: session.frame_count(),
        }
    }
}

impl<R: Renderer> VisualizationEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> Option<ViewportSnapshot> {
        self.session.as_ref().map(ViewportSnapshot::capture)
    }
}
