use criterion::{Criterion, criterion_group, criterion_main};
use sales_viz3d::core::{ChartMode, SalesRecord, Surface};
use sales_viz3d::render::NullRenderer;
use sales_viz3d::scene::{Scene, SceneBuilder, SceneFixtures, SceneLayout};
use sales_viz3d::{VisualizationConfig, VisualizationEngine};
use std::hint::black_box;

fn generated_records(count: usize) -> Vec<SalesRecord> {
    (0..count)
        .map(|i| {
            let base = 100.0 + i as f64 * 3.5;
            SalesRecord::new(
                i as u64 + 1,
                format!("Product {i}"),
                [base, base * 1.1, base * 0.9, base * 1.25],
                base * 1.2,
            )
        })
        .collect()
}

fn bench_scene_build_quarterly_200(c: &mut Criterion) {
    let records = generated_records(200);
    let builder = SceneBuilder::new(SceneLayout::default()).expect("valid layout");
    let mut scene = Scene::new(SceneFixtures::default());

    c.bench_function("scene_build_quarterly_200", |b| {
        b.iter(|| {
            let summary = builder
                .build(&mut scene, black_box(&records), ChartMode::QuarterlyComparison)
                .expect("build");
            black_box(summary);
        })
    });
}

fn bench_render_frame_with_hover_50(c: &mut Criterion) {
    let records = generated_records(50);
    let mut engine =
        VisualizationEngine::new(NullRenderer::default(), VisualizationConfig::default())
            .expect("engine init");
    engine
        .render_visualization(&records, ChartMode::QuarterlyComparison, Surface::new(1920, 1080))
        .expect("render visualization");
    engine.pointer_move(960.0, 540.0);

    c.bench_function("render_frame_with_hover_50", |b| {
        b.iter(|| {
            let stats = engine.render_frame().expect("frame");
            black_box(stats);
        })
    });
}

criterion_group!(
    benches,
    bench_scene_build_quarterly_200,
    bench_render_frame_with_hover_50
);
criterion_main!(benches);
