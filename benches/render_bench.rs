//! Benchmarks for resolution and projection
//!
//! Run with: cargo bench

use community_dashboard::model::{self, defaults};
use community_dashboard::project::{project_chart, project_map, project_text, MapSettings, WidgetId};
use community_dashboard::render::{render_static, DashboardState};
use community_dashboard::source::{DataOrigin, SourceDocument};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use serde_json::json;
use std::sync::Arc;

fn full_document() -> serde_json::Value {
    serde_json::to_value(SourceDocument::from(&defaults::view_model())).unwrap()
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    group.bench_function("none", |b| b.iter(|| model::resolve(black_box(None))));

    let partial = json!({ "heroStats": { "population": 12500 }, "peerAreas": [] });
    group.bench_function("partial_json", |b| {
        b.iter(|| model::resolve_json(black_box(Some(&partial))))
    });

    let full = full_document();
    group.bench_function("full_json", |b| {
        b.iter(|| model::resolve_json(black_box(Some(&full))))
    });

    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("project");
    let vm = defaults::view_model();
    let settings = MapSettings::default();

    group.throughput(Throughput::Elements(WidgetId::all().len() as u64));
    group.bench_function("charts", |b| {
        b.iter(|| {
            for id in WidgetId::all() {
                black_box(project_chart(*id, &vm));
            }
        })
    });

    group.bench_function("map", |b| b.iter(|| project_map(black_box(&vm), &settings)));
    group.bench_function("text", |b| b.iter(|| project_text(black_box(&vm))));

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let state = Arc::new(DashboardState::build(
        defaults::view_model(),
        DataOrigin::Defaults {
            reason: "bench".to_string(),
        },
        &MapSettings::default(),
    ));

    c.bench_function("render_static", |b| {
        b.iter(|| render_static(Arc::clone(black_box(&state))))
    });
}

criterion_group!(benches, bench_resolve, bench_projection, bench_render);
criterion_main!(benches);
