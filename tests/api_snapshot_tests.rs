use sales_viz3d::api::{
    CameraConfig, VIEWPORT_SNAPSHOT_JSON_SCHEMA_V1, ViewportSnapshot,
    ViewportSnapshotJsonContractV1,
};
use sales_viz3d::core::{ChartMode, SalesRecord, Surface};
use sales_viz3d::interaction::HoverState;
use sales_viz3d::render::{Color, NullRenderer};
use sales_viz3d::scene::{BarId, SceneLayout};
use sales_viz3d::{VisualizationConfig, VisualizationEngine, VizError};

fn engine_with_hover() -> VisualizationEngine<NullRenderer> {
    let mut engine =
        VisualizationEngine::new(NullRenderer::default(), VisualizationConfig::default())
            .expect("engine");
    engine
        .render_visualization(
            &[SalesRecord::new(1, "Widget", [10.0, 20.0, 30.0, 40.0], 35.0)],
            ChartMode::QuarterlyComparison,
            Surface::new(800, 600),
        )
        .expect("render visualization");

    let session = engine.session().expect("session");
    let bar = session.scene().bar(BarId(3)).expect("bar");
    let point = session
        .camera()
        .world_to_screen(bar.position, session.surface())
        .expect("on screen");
    engine.pointer_move(point.x, point.y);
    engine.render_frame().expect("frame");
    engine
}

#[test]
fn snapshot_reflects_scene_and_hover() {
    let engine = engine_with_hover();
    let snapshot = engine.snapshot().expect("snapshot");

    assert_eq!(snapshot.mode, Some(ChartMode::QuarterlyComparison));
    assert_eq!(snapshot.record_count, 1);
    assert_eq!(snapshot.max_value, Some(40.0));
    assert_eq!(snapshot.bars.len(), 4);
    assert_eq!(snapshot.hover, HoverState::Hovering(BarId(3)));
    assert!(snapshot.tooltip.visible);
    assert_eq!(snapshot.tooltip.text, "Widget Q4: 40");
    assert_eq!(
        snapshot
            .bars
            .iter()
            .filter(|bar| bar.highlighted)
            .map(|bar| bar.id)
            .collect::<Vec<_>>(),
        [BarId(3)]
    );
    assert_eq!(snapshot.frame_count, 1);
}

#[test]
fn snapshot_json_contract_v1_round_trips() {
    let snapshot = engine_with_hover().snapshot().expect("snapshot");
    let json = snapshot.to_json_contract_v1_pretty().expect("json");

    let payload: ViewportSnapshotJsonContractV1 = serde_json::from_str(&json).expect("payload");
    assert_eq!(payload.schema_version, VIEWPORT_SNAPSHOT_JSON_SCHEMA_V1);

    let parsed = ViewportSnapshot::from_json_compat_str(&json).expect("parse v1");
    assert_eq!(parsed, snapshot);

    let bare = serde_json::to_string(&snapshot).expect("bare json");
    let parsed_bare = ViewportSnapshot::from_json_compat_str(&bare).expect("parse bare");
    assert_eq!(parsed_bare, snapshot);
}

#[test]
fn snapshot_json_uses_tagged_hover_state() {
    let snapshot = engine_with_hover().snapshot().expect("snapshot");
    let value = serde_json::to_value(&snapshot).expect("json");
    assert_eq!(value["hover"]["state"], "hovering");
    assert_eq!(value["hover"]["bar"], 3);
    assert_eq!(value["mode"], "quarterly-comparison");
}

#[test]
fn snapshot_rejects_unknown_schema_version() {
    let snapshot = engine_with_hover().snapshot().expect("snapshot");
    let payload = ViewportSnapshotJsonContractV1 {
        schema_version: 99,
        snapshot,
    };
    let json = serde_json::to_string(&payload).expect("json");
    let err = ViewportSnapshot::from_json_compat_str(&json).expect_err("unsupported version");
    assert!(matches!(err, VizError::InvalidData(_)));
}

#[test]
fn snapshot_is_none_before_mount() {
    let engine =
        VisualizationEngine::new(NullRenderer::default(), VisualizationConfig::default())
            .expect("engine");
    assert!(engine.snapshot().is_none());
}

#[test]
fn config_json_round_trips_and_fills_defaults() {
    let config = VisualizationConfig::default().with_layout(SceneLayout {
        target_bar_span: 12.0,
        ..SceneLayout::default()
    });
    let json = config.to_json_pretty().expect("json");
    let parsed = VisualizationConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);

    let minimal = VisualizationConfig::from_json_str("{}").expect("defaults");
    assert_eq!(minimal, VisualizationConfig::default());
    assert_eq!(minimal.background, Color::from_hex(0xf0f0f0));
    assert_eq!(minimal.highlight_emissive, Color::from_hex(0x333333));
}

#[test]
fn config_validation_rejects_bad_values() {
    let black_highlight = VisualizationConfig {
        highlight_emissive: Color::BLACK,
        ..VisualizationConfig::default()
    };
    assert!(matches!(
        black_highlight.validate(),
        Err(VizError::InvalidData(_))
    ));

    let degenerate_camera = VisualizationConfig::default().with_camera(CameraConfig {
        position: [0.0, 0.0, 0.0],
        ..CameraConfig::default()
    });
    assert!(
        VisualizationEngine::new(NullRenderer::default(), degenerate_camera).is_err()
    );

    assert!(VisualizationConfig::from_json_str(r#"{"layout": {"spacing": 0.0}}"#).is_err());
}
