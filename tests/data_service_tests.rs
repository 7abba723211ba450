use sales_viz3d::core::{ChartMode, RecordId, Surface};
use sales_viz3d::data::{
    InMemorySalesStore, MessageEnvelope, NewSalesRecord, RecordEnvelope, SalesDataService,
    SalesRecordPatch,
};
use sales_viz3d::render::NullRenderer;
use sales_viz3d::{SalesRecord, VisualizationConfig, VisualizationEngine, VizError, VizResult};

fn seeded_store() -> InMemorySalesStore {
    InMemorySalesStore::with_records([
        NewSalesRecord::new("Widget", [10.0, 20.0, 30.0, 40.0], 35.0),
        NewSalesRecord::new("Gadget", [12.0, 8.0, 4.0, 16.0], 50.0),
    ])
    .expect("seeded store")
}

#[test]
fn create_assigns_sequential_ids_and_timestamps() {
    let mut store = seeded_store();
    let created = store
        .create(NewSalesRecord::new("Doohickey", [1.0, 2.0, 3.0, 4.0], 5.0))
        .expect("create");
    assert_eq!(created.id, RecordId(3));
    assert!(created.created_at.is_some());
    assert_eq!(created.created_at, created.updated_at);

    let names: Vec<String> = store
        .list()
        .expect("list")
        .into_iter()
        .map(|record| record.product_name)
        .collect();
    assert_eq!(names, ["Widget", "Gadget", "Doohickey"]);
}

#[test]
fn create_rejects_invalid_rows() {
    let mut store = InMemorySalesStore::new();
    let cases = [
        NewSalesRecord::new("", [1.0, 1.0, 1.0, 1.0], 1.0),
        NewSalesRecord::new("x".repeat(256), [1.0, 1.0, 1.0, 1.0], 1.0),
        NewSalesRecord::new("Negative", [1.0, -1.0, 1.0, 1.0], 1.0),
        NewSalesRecord::new("NaN", [1.0, 1.0, 1.0, 1.0], f64::NAN),
    ];
    for row in cases {
        let err = store.create(row).expect_err("invalid row");
        assert!(matches!(err, VizError::InvalidData(_)));
    }
    assert!(store.is_empty());

    store
        .create(NewSalesRecord::new("x".repeat(255), [0.0; 4], 0.0))
        .expect("255 chars is allowed");
}

#[test]
fn update_applies_only_present_fields() {
    let mut store = seeded_store();
    let patch = SalesRecordPatch {
        q2_sales: Some(99.0),
        target: Some(10.0),
        ..SalesRecordPatch::default()
    };
    let updated = store.update(RecordId(1), patch).expect("update");
    assert_eq!(updated.product_name, "Widget");
    assert_eq!(updated.quarters(), [10.0, 99.0, 30.0, 40.0]);
    assert_eq!(updated.target, 10.0);
    assert_eq!(store.get(RecordId(1)), Some(&updated));
}

#[test]
fn update_and_delete_report_missing_records() {
    let mut store = seeded_store();
    let err = store
        .update(RecordId(42), SalesRecordPatch::default())
        .expect_err("missing");
    assert!(matches!(err, VizError::RecordNotFound { id: 42 }));

    store.delete(RecordId(1)).expect("delete");
    let err = store.delete(RecordId(1)).expect_err("already deleted");
    assert!(matches!(err, VizError::RecordNotFound { id: 1 }));
    assert_eq!(store.len(), 1);
}

#[test]
fn invalid_patch_leaves_record_untouched() {
    let mut store = seeded_store();
    let before = store.get(RecordId(2)).cloned().expect("record");
    let patch = SalesRecordPatch {
        product_name: Some("   ".to_owned()),
        ..SalesRecordPatch::default()
    };
    assert!(store.update(RecordId(2), patch).is_err());
    assert_eq!(store.get(RecordId(2)), Some(&before));
}

#[test]
fn ids_are_not_reused_after_delete() {
    let mut store = seeded_store();
    store.delete(RecordId(2)).expect("delete");
    let created = store
        .create(NewSalesRecord::new("Sprocket", [1.0; 4], 1.0))
        .expect("create");
    assert_eq!(created.id, RecordId(3));
}

#[test]
fn patch_json_omits_absent_fields() {
    let patch = SalesRecordPatch {
        product_name: Some("Renamed".to_owned()),
        ..SalesRecordPatch::default()
    };
    let json = serde_json::to_value(&patch).expect("json");
    assert_eq!(json, serde_json::json!({ "product_name": "Renamed" }));
    assert!(SalesRecordPatch::default().is_empty());
    assert!(!patch.is_empty());
}

#[test]
fn envelopes_carry_service_messages() {
    let record = SalesRecord::new(7, "Widget", [1.0, 2.0, 3.0, 4.0], 5.0);
    let created = serde_json::to_value(RecordEnvelope::created(record.clone())).expect("json");
    assert_eq!(created["message"], "Record Created");
    assert_eq!(created["data"]["id"], 7);
    assert_eq!(
        RecordEnvelope::updated(record).message,
        "Record updated successfully"
    );
    assert_eq!(
        MessageEnvelope::deleted().message,
        "Record deleted successfully"
    );
}

#[test]
fn records_decode_from_service_json() {
    let body = r#"[
        {"id": 1, "product_name": "Widget", "q1_sales": 10, "q2_sales": 20.5,
         "q3_sales": 30, "q4_sales": 40, "target": 35,
         "created_at": "2024-03-01T10:00:00Z", "updated_at": "2024-03-02T11:30:00Z"},
        {"id": 2, "product_name": "Gadget", "q1_sales": 0, "q2_sales": 0,
         "q3_sales": 0, "q4_sales": 0, "target": 0}
    ]"#;
    let records: Vec<SalesRecord> = serde_json::from_str(body).expect("records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].q2_sales, 20.5);
    assert!(records[0].updated_at.is_some());
    assert!(records[1].created_at.is_none());
}

#[test]
fn sync_from_service_renders_listed_records() {
    let store = seeded_store();
    let mut engine =
        VisualizationEngine::new(NullRenderer::default(), VisualizationConfig::default())
            .expect("engine");
    let count = engine
        .sync_from_service(&store, ChartMode::PerformanceVsTarget, Surface::new(800, 600))
        .expect("sync");
    assert_eq!(count, 2);
    assert_eq!(engine.scene().expect("scene").bars().len(), 4);
}

struct UnreachableService;

impl SalesDataService for UnreachableService {
    fn list(&self) -> VizResult<Vec<SalesRecord>> {
        Err(VizError::Transport("connection refused".to_owned()))
    }

    fn create(&mut self, _record: NewSalesRecord) -> VizResult<SalesRecord> {
        Err(VizError::Transport("connection refused".to_owned()))
    }

    fn update(&mut self, _id: RecordId, _patch: SalesRecordPatch) -> VizResult<SalesRecord> {
        Err(VizError::Transport("connection refused".to_owned()))
    }

    fn delete(&mut self, _id: RecordId) -> VizResult<()> {
        Err(VizError::Transport("connection refused".to_owned()))
    }
}

#[test]
fn service_failure_keeps_current_scene() {
    let mut engine =
        VisualizationEngine::new(NullRenderer::default(), VisualizationConfig::default())
            .expect("engine");
    engine
        .sync_from_service(&seeded_store(), ChartMode::QuarterlyComparison, Surface::new(800, 600))
        .expect("first sync");

    let err = engine
        .sync_from_service(
            &UnreachableService,
            ChartMode::ProductComparison,
            Surface::new(800, 600),
        )
        .expect_err("transport failure");
    assert!(matches!(err, VizError::Transport(_)));
    assert_eq!(engine.scene().expect("scene").bars().len(), 8);
    assert_eq!(
        engine.session().expect("session").mode(),
        ChartMode::QuarterlyComparison
    );
}
