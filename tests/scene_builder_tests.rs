use approx::assert_relative_eq;
use sales_viz3d::VizError;
use sales_viz3d::core::{ChartMode, SalesRecord};
use sales_viz3d::scene::{BarMetric, LabelKind, Scene, SceneBuilder, SceneFixtures, SceneLayout};

fn build(records: &[SalesRecord], mode: ChartMode) -> Scene {
    let mut scene = Scene::new(SceneFixtures::default());
    SceneBuilder::new(SceneLayout::default())
        .expect("builder")
        .build(&mut scene, records, mode)
        .expect("build");
    scene
}

fn sample_records() -> Vec<SalesRecord> {
    vec![
        SalesRecord::new(1, "Widget", [10.0, 20.0, 30.0, 40.0], 35.0),
        SalesRecord::new(2, "Gadget", [12.5, 7.5, 3.0, 9.0], 50.0),
        SalesRecord::new(3, "Doohickey", [0.0, 1.0, 2.0, 3.0], 4.0),
    ]
}

#[test]
fn widget_quarterly_scenario() {
    let records = vec![SalesRecord::new(1, "Widget", [10.0, 20.0, 30.0, 40.0], 35.0)];
    let scene = build(&records, ChartMode::QuarterlyComparison);

    let values: Vec<f64> = scene.bars().iter().map(|bar| bar.value).collect();
    assert_eq!(values, [10.0, 20.0, 30.0, 40.0]);

    let scale = scene.scale().expect("scale");
    assert_eq!(scale.max_value(), 40.0);
    assert_relative_eq!(scale.scale_factor(), 10.0 / 40.0);

    let tallest = scene
        .bars()
        .iter()
        .max_by(|a, b| a.height.total_cmp(&b.height))
        .expect("bars");
    assert_eq!(tallest.metric, BarMetric::Quarter(3));
    assert_eq!(tallest.height, 10.0);
    assert_eq!(tallest.label, "Widget Q4: 40");
}

#[test]
fn bar_counts_follow_mode() {
    let records = sample_records();
    let n = records.len();
    assert_eq!(build(&records, ChartMode::QuarterlyComparison).bars().len(), 4 * n);
    assert_eq!(build(&records, ChartMode::PerformanceVsTarget).bars().len(), 2 * n);
    assert_eq!(build(&records, ChartMode::ProductComparison).bars().len(), n);
}

#[test]
fn records_occupy_slots_in_input_order() {
    let records = sample_records();
    let scene = build(&records, ChartMode::PerformanceVsTarget);
    for bar in scene.bars() {
        assert_relative_eq!(bar.position.x, bar.record_index as f64 * 1.2);
        assert_eq!(bar.record_id, records[bar.record_index].id);
    }
}

#[test]
fn empty_input_builds_nothing() {
    let scene = build(&[], ChartMode::QuarterlyComparison);
    assert!(scene.is_empty());
    assert!(scene.scale().is_none());
    assert_eq!(scene.fixtures().grid.segments().len(), 42);
}

#[test]
fn all_zero_input_yields_flat_bars() {
    let records = vec![
        SalesRecord::new(1, "Idle", [0.0; 4], 0.0),
        SalesRecord::new(2, "Dormant", [0.0; 4], 0.0),
    ];
    for mode in ChartMode::ALL {
        let scene = build(&records, mode);
        let scale = scene.scale().expect("scale");
        assert_eq!(scale.scale_factor(), 0.0);
        assert!(scene.bars().iter().all(|bar| bar.height == 0.0));
    }
}

#[test]
fn equal_totals_get_distinct_hues() {
    let records = vec![
        SalesRecord::new(1, "Left", [10.0, 10.0, 10.0, 10.0], 0.0),
        SalesRecord::new(2, "Right", [25.0, 5.0, 5.0, 5.0], 0.0),
    ];
    let scene = build(&records, ChartMode::ProductComparison);
    let [left, right] = scene.bars() else {
        panic!("expected two bars");
    };
    assert_eq!(left.height, right.height);
    assert_ne!(left.color, right.color);
}

#[test]
fn rebuild_replaces_previous_content() {
    let builder = SceneBuilder::new(SceneLayout::default()).expect("builder");
    let mut scene = Scene::new(SceneFixtures::default());
    builder
        .build(&mut scene, &sample_records(), ChartMode::QuarterlyComparison)
        .expect("first build");
    let summary = builder
        .build(&mut scene, &sample_records()[..1], ChartMode::ProductComparison)
        .expect("second build");

    assert_eq!(summary.bar_count, 1);
    assert_eq!(scene.bars().len(), 1);
    assert_eq!(scene.mode(), Some(ChartMode::ProductComparison));
    assert_eq!(
        scene
            .labels()
            .iter()
            .filter(|label| label.kind == LabelKind::Product)
            .count(),
        1
    );
}

#[test]
fn axis_labels_map_heights_back_to_values() {
    let records = vec![SalesRecord::new(1, "Widget", [10.0, 20.0, 30.0, 40.0], 35.0)];
    let scene = build(&records, ChartMode::QuarterlyComparison);
    let axis: Vec<(&str, f64)> = scene
        .labels()
        .iter()
        .filter(|label| label.kind == LabelKind::AxisReference)
        .map(|label| (label.text.as_str(), label.position.y))
        .collect();
    assert_eq!(
        axis,
        [
            ("0", 0.0),
            ("8", 2.0),
            ("16", 4.0),
            ("24", 6.0),
            ("32", 8.0),
            ("40", 10.0)
        ]
    );
}

#[test]
fn grouped_modes_label_every_bar() {
    let records = sample_records();
    let quarterly = build(&records, ChartMode::QuarterlyComparison);
    let metric_labels = quarterly
        .labels()
        .iter()
        .filter(|label| label.kind == LabelKind::Metric)
        .count();
    assert_eq!(metric_labels, quarterly.bars().len());
}

#[test]
fn overflowing_totals_are_rejected_and_leave_no_bars() {
    let mut scene = build(&sample_records(), ChartMode::ProductComparison);
    let huge = vec![
        SalesRecord::new(1, "Widget", [10.0, 20.0, 30.0, 40.0], 35.0),
        SalesRecord::new(2, "Colossus", [f64::MAX; 4], 1.0),
    ];
    let result = SceneBuilder::new(SceneLayout::default())
        .expect("builder")
        .build(&mut scene, &huge, ChartMode::ProductComparison);

    assert!(matches!(result, Err(VizError::InvalidData(message)) if message.contains("Colossus")));
    assert!(scene.is_empty());
    assert_eq!(scene.scale(), None);
}
