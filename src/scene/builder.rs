use glam::DVec3;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{BarScale, ChartMode, SalesRecord};
use crate::error::{VizError, VizResult};
use crate::render::Color;

use super::{BarDraft, BarMetric, LabelKind, Scene};

const QUARTER_COLORS: [u32; 4] = [0x4caf50, 0x2196f3, 0xff9800, 0xf44336];
const AVERAGE_COLOR: u32 = 0x2196f3;
const TARGET_COLOR: u32 = 0xff9800;

/// Portion of the color wheel swept by product hues.
const PRODUCT_HUE_SWEEP: f64 = 0.8;
const PRODUCT_SATURATION: f64 = 0.8;
const PRODUCT_LIGHTNESS: f64 = 0.5;

/// Grid geometry shared by every chart mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    /// Height of the bar holding the largest metric.
    pub target_bar_span: f64,
    pub bar_width: f64,
    /// Distance between record slots and between bars inside a slot.
    pub spacing: f64,
    /// Scene-unit interval between axis reference labels.
    pub axis_tick_step: f64,
    pub quarterly_group_offset: f64,
    pub performance_group_offset: f64,
    pub product_label_height: f64,
    pub product_label_depth: f64,
    pub metric_label_height: f64,
    pub axis_label_offset: f64,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            target_bar_span: 10.0,
            bar_width: 0.8,
            spacing: 1.2,
            axis_tick_step: 2.0,
            quarterly_group_offset: -1.5,
            performance_group_offset: -0.5,
            product_label_height: -0.5,
            product_label_depth: -5.0,
            metric_label_height: -1.0,
            axis_label_offset: -5.0,
        }
    }
}

impl SceneLayout {
    pub fn validate(&self) -> VizResult<()> {
        for (name, value) in [
            ("target_bar_span", self.target_bar_span),
            ("bar_width", self.bar_width),
            ("spacing", self.spacing),
            ("axis_tick_step", self.axis_tick_step),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(VizError::InvalidData(format!(
                    "scene layout `{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("quarterly_group_offset", self.quarterly_group_offset),
            ("performance_group_offset", self.performance_group_offset),
            ("product_label_height", self.product_label_height),
            ("product_label_depth", self.product_label_depth),
            ("metric_label_height", self.metric_label_height),
            ("axis_label_offset", self.axis_label_offset),
        ] {
            if !value.is_finite() {
                return Err(VizError::InvalidData(format!(
                    "scene layout `{name}` must be finite"
                )));
            }
        }
        Ok(())
    }
}

/// Counts reported by one scene build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBuildSummary {
    pub record_count: usize,
    pub bar_count: usize,
    pub label_count: usize,
    pub scale: Option<BarScale>,
}

/// Bar of one record before scaling.
#[derive(Debug, Clone, Copy)]
struct MetricSpec {
    metric: BarMetric,
    value: f64,
    color: Color,
    depth: f64,
    labelled: bool,
}

/// Turns records plus a chart mode into bars and label sprites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBuilder {
    layout: SceneLayout,
}

impl SceneBuilder {
    pub fn new(layout: SceneLayout) -> VizResult<Self> {
        layout.validate()?;
        Ok(Self { layout })
    }

    #[must_use]
    pub fn layout(&self) -> SceneLayout {
        self.layout
    }

    /// Replaces the scene content with a fresh build.
    ///
    /// Previous bars and labels are always discarded first. An empty record
    /// list leaves only the fixtures.
    pub fn build(
        &self,
        scene: &mut Scene,
        records: &[SalesRecord],
        mode: ChartMode,
    ) -> VizResult<SceneBuildSummary> {
        scene.clear_content();

        if records.is_empty() {
            debug!(mode = %mode, "empty record list, skipping bar construction");
            scene.set_build_state(None, mode);
            return Ok(SceneBuildSummary {
                record_count: 0,
                bar_count: 0,
                label_count: 0,
                scale: None,
            });
        }

        let layout = self.layout;
        let scale = BarScale::from_records(records, layout.target_bar_span)?;

        for (record_index, record) in records.iter().enumerate() {
            let x = record_index as f64 * layout.spacing;
            scene.push_label(
                record.product_name.clone(),
                DVec3::new(x, layout.product_label_height, layout.product_label_depth),
                LabelKind::Product,
            );

            for spec in self.metric_specs(record, record_index, records.len(), mode) {
                let height = scale.height_for(spec.value);
                if !spec.value.is_finite() || !height.is_finite() {
                    scene.clear_content();
                    return Err(VizError::InvalidData(format!(
                        "{} {} is not a finite value",
                        record.product_name,
                        spec.metric.name()
                    )));
                }
                scene.push_bar(BarDraft {
                    record_id: record.id,
                    record_index,
                    metric: spec.metric,
                    value: spec.value,
                    height,
                    footprint: layout.bar_width,
                    color: spec.color,
                    position: DVec3::new(x, height / 2.0, spec.depth),
                    label: format!(
                        "{} {}: {}",
                        record.product_name,
                        spec.metric.name(),
                        spec.metric.format_value(spec.value)
                    ),
                });
                if spec.labelled {
                    scene.push_label(
                        spec.metric.name(),
                        DVec3::new(x, layout.metric_label_height, spec.depth),
                        LabelKind::Metric,
                    );
                }
            }
        }

        for tick in scale.reference_ticks(layout.axis_tick_step)? {
            scene.push_label(
                tick.label,
                DVec3::new(layout.axis_label_offset, tick.height, 0.0),
                LabelKind::AxisReference,
            );
        }

        scene.set_build_state(Some(scale), mode);
        let summary = SceneBuildSummary {
            record_count: records.len(),
            bar_count: scene.bars().len(),
            label_count: scene.labels().len(),
            scale: Some(scale),
        };
        debug!(
            mode = %mode,
            records = summary.record_count,
            bars = summary.bar_count,
            labels = summary.label_count,
            max_value = scale.max_value(),
            scale_factor = scale.scale_factor(),
            "scene rebuilt"
        );
        Ok(summary)
    }

    fn metric_specs(
        &self,
        record: &SalesRecord,
        record_index: usize,
        record_count: usize,
        mode: ChartMode,
    ) -> SmallVec<[MetricSpec; 4]> {
        let spacing = self.layout.spacing;
        match mode {
            ChartMode::QuarterlyComparison => record
                .quarters()
                .into_iter()
                .zip(QUARTER_COLORS)
                .enumerate()
                .map(|(quarter, (value, color))| MetricSpec {
                    metric: BarMetric::Quarter(quarter as u8),
                    value,
                    color: Color::from_hex(color),
                    depth: quarter as f64 * spacing + self.layout.quarterly_group_offset,
                    labelled: true,
                })
                .collect(),
            ChartMode::PerformanceVsTarget => [
                (BarMetric::AverageSales, record.average_sales(), AVERAGE_COLOR),
                (BarMetric::Target, record.target, TARGET_COLOR),
            ]
            .into_iter()
            .enumerate()
            .map(|(slot, (metric, value, color))| MetricSpec {
                metric,
                value,
                color: Color::from_hex(color),
                depth: slot as f64 * spacing + self.layout.performance_group_offset,
                labelled: true,
            })
            .collect(),
            ChartMode::ProductComparison => {
                let hue = record_index as f64 / record_count as f64 * PRODUCT_HUE_SWEEP;
                let mut specs = SmallVec::new();
                specs.push(MetricSpec {
                    metric: BarMetric::TotalSales,
                    value: record.total_sales(),
                    color: Color::from_hsl(hue, PRODUCT_SATURATION, PRODUCT_LIGHTNESS),
                    depth: 0.0,
                    labelled: false,
                });
                specs
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{SceneBuilder, SceneLayout};
    use crate::core::{ChartMode, SalesRecord};
    use crate::scene::{BarMetric, LabelKind, Scene, SceneFixtures};

    fn widget() -> SalesRecord {
        SalesRecord::new(1, "Widget", [10.0, 20.0, 30.0, 40.0], 35.0)
    }

    #[test]
    fn quarterly_bars_sit_on_ground_plane() {
        let builder = SceneBuilder::new(SceneLayout::default()).expect("builder");
        let mut scene = Scene::new(SceneFixtures::default());
        builder
            .build(&mut scene, &[widget()], ChartMode::QuarterlyComparison)
            .expect("build");

        for bar in scene.bars() {
            assert_relative_eq!(bar.position.y, bar.height / 2.0);
            assert_relative_eq!(bar.bounds().min.y, 0.0, epsilon = 1e-12);
        }
        let depths: Vec<f64> = scene.bars().iter().map(|bar| bar.position.z).collect();
        assert_relative_eq!(depths[0], -1.5);
        assert_relative_eq!(depths[3], 3.0 * 1.2 - 1.5);
    }

    #[test]
    fn performance_labels_use_two_decimals_for_average() {
        let builder = SceneBuilder::new(SceneLayout::default()).expect("builder");
        let mut scene = Scene::new(SceneFixtures::default());
        builder
            .build(&mut scene, &[widget()], ChartMode::PerformanceVsTarget)
            .expect("build");

        let labels: Vec<&str> = scene.bars().iter().map(|bar| bar.label.as_str()).collect();
        assert_eq!(labels, ["Widget Avg Sales: 25.00", "Widget Target: 35"]);
        assert_eq!(scene.bars()[0].metric, BarMetric::AverageSales);
    }

    #[test]
    fn product_mode_has_no_metric_labels() {
        let builder = SceneBuilder::new(SceneLayout::default()).expect("builder");
        let mut scene = Scene::new(SceneFixtures::default());
        builder
            .build(&mut scene, &[widget()], ChartMode::ProductComparison)
            .expect("build");

        assert_eq!(scene.bars()[0].label, "Widget Total Sales: 100");
        assert!(
            scene
                .labels()
                .iter()
                .all(|label| label.kind != LabelKind::Metric)
        );
    }

    #[test]
    fn rejects_non_positive_layout() {
        let layout = SceneLayout {
            spacing: 0.0,
            ..SceneLayout::default()
        };
        assert!(SceneBuilder::new(layout).is_err());
    }
}
