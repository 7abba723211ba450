//! Scene graph shared by the builder, the hit-tester and the frame projector.
//!
//! Bars and labels are rebuilt wholesale on every data or mode change. The
//! fixtures (lights, grid, axes) live for the whole viewport session.

mod builder;
mod fixtures;

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::core::{Aabb, BarScale, ChartMode, RecordId};
use crate::render::Color;

pub use builder::{SceneBuildSummary, SceneBuilder, SceneLayout};
pub use fixtures::{AmbientLight, AxesHelper, DirectionalLight, GridHelper, SceneFixtures};

/// Index of a bar inside the current scene build.
///
/// Ids are only meaningful until the next rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BarId(pub usize);

impl fmt::Display for BarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bar#{}", self.0)
    }
}

/// Metric a bar stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMetric {
    /// Zero-based fiscal quarter.
    Quarter(u8),
    AverageSales,
    Target,
    TotalSales,
}

impl BarMetric {
    #[must_use]
    pub fn name(self) -> String {
        match self {
            Self::Quarter(index) => format!("Q{}", u16::from(index) + 1),
            Self::AverageSales => "Avg Sales".to_owned(),
            Self::Target => "Target".to_owned(),
            Self::TotalSales => "Total Sales".to_owned(),
        }
    }

    /// Derived metrics are computed from several fields and shown rounded.
    #[must_use]
    pub fn is_derived(self) -> bool {
        matches!(self, Self::AverageSales)
    }

    /// Formats the raw (unscaled) metric value for labels and tooltips.
    #[must_use]
    pub fn format_value(self, value: f64) -> String {
        if self.is_derived() {
            format!("{value:.2}")
        } else {
            format!("{value}")
        }
    }
}

/// One box in the scene, standing on the ground plane.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBar {
    pub id: BarId,
    pub record_id: RecordId,
    pub record_index: usize,
    pub metric: BarMetric,
    pub value: f64,
    pub height: f64,
    pub footprint: f64,
    pub color: Color,
    /// Box center; `position.y == height / 2`.
    pub position: DVec3,
    pub label: String,
    emissive: Color,
}

impl RenderBar {
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(
            self.position,
            DVec3::new(self.footprint, self.height, self.footprint),
        )
    }

    #[must_use]
    pub fn emissive(&self) -> Color {
        self.emissive
    }

    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.emissive != Color::BLACK
    }
}

/// Bar fields as produced by the builder, before an id is assigned.
#[derive(Debug, Clone)]
pub(crate) struct BarDraft {
    pub(crate) record_id: RecordId,
    pub(crate) record_index: usize,
    pub(crate) metric: BarMetric,
    pub(crate) value: f64,
    pub(crate) height: f64,
    pub(crate) footprint: f64,
    pub(crate) color: Color,
    pub(crate) position: DVec3,
    pub(crate) label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    Product,
    Metric,
    AxisReference,
}

/// Billboard text anchored at a world position.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSprite {
    pub text: String,
    pub position: DVec3,
    pub kind: LabelKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    fixtures: SceneFixtures,
    bars: Vec<RenderBar>,
    labels: Vec<LabelSprite>,
    scale: Option<BarScale>,
    mode: Option<ChartMode>,
}

impl Scene {
    #[must_use]
    pub fn new(fixtures: SceneFixtures) -> Self {
        Self {
            fixtures,
            bars: Vec::new(),
            labels: Vec::new(),
            scale: None,
            mode: None,
        }
    }

    #[must_use]
    pub fn fixtures(&self) -> &SceneFixtures {
        &self.fixtures
    }

    #[must_use]
    pub fn bars(&self) -> &[RenderBar] {
        &self.bars
    }

    #[must_use]
    pub fn bar(&self, id: BarId) -> Option<&RenderBar> {
        self.bars.get(id.0)
    }

    #[must_use]
    pub fn labels(&self) -> &[LabelSprite] {
        &self.labels
    }

    /// Scale of the last non-empty build.
    #[must_use]
    pub fn scale(&self) -> Option<BarScale> {
        self.scale
    }

    #[must_use]
    pub fn mode(&self) -> Option<ChartMode> {
        self.mode
    }

    /// Nothing but fixtures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty() && self.labels.is_empty()
    }

    pub fn highlighted_bars(&self) -> impl Iterator<Item = &RenderBar> {
        self.bars.iter().filter(|bar| bar.is_highlighted())
    }

    /// Sets a bar's emissive color. Returns `false` for unknown ids.
    pub fn set_emissive(&mut self, id: BarId, emissive: Color) -> bool {
        match self.bars.get_mut(id.0) {
            Some(bar) => {
                bar.emissive = emissive;
                true
            }
            None => false,
        }
    }

    /// Drops every bar, label and the scale, keeping the fixtures.
    pub fn clear_content(&mut self) {
        self.bars.clear();
        self.labels.clear();
        self.scale = None;
        self.mode = None;
    }

    pub(crate) fn push_bar(&mut self, draft: BarDraft) -> BarId {
        let id = BarId(self.bars.len());
        self.bars.push(RenderBar {
            id,
            record_id: draft.record_id,
            record_index: draft.record_index,
            metric: draft.metric,
            value: draft.value,
            height: draft.height,
            footprint: draft.footprint,
            color: draft.color,
            position: draft.position,
            label: draft.label,
            emissive: Color::BLACK,
        });
        id
    }

    pub(crate) fn push_label(&mut self, text: String, position: DVec3, kind: LabelKind) {
        self.labels.push(LabelSprite {
            text,
            position,
            kind,
        });
    }

    pub(crate) fn set_build_state(&mut self, scale: Option<BarScale>, mode: ChartMode) {
        self.scale = scale;
        self.mode = Some(mode);
    }
}
