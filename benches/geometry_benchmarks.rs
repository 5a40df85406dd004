//! Geometry and rendering benchmarks.
//!
//! Covers the hot paths of diagram assembly: the per-longitude chord
//! solve, coverage band construction, the calendar's Newton solve and
//! the assemble-plus-render pipeline.
//!
//! Statistical rigor:
//! - Sample size: 100 iterations per benchmark (50 for the pipeline)
//! - Confidence intervals: 95% bootstrap CI
//!
//! Run with: cargo bench

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use orrery::config::DiagramConfig;
use orrery::geometry::{OrbitEllipse, SunAnchor};
use orrery::render;
use orrery::seasons::SeasonCalendar;

fn titan_sun() -> SunAnchor {
    SunAnchor::new(OrbitEllipse::new(200.0, 199.7, -10.1), 0.0558)
}

/// Orbit position solve across full sweeps of solar longitude.
///
/// The sweep is the inner loop of tick generation and verification,
/// so per-call cost dominates assembly time.
fn bench_position_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("position_at");
    group.sample_size(100);
    group.confidence_level(0.95);

    let sun = titan_sun();
    for samples in [360_usize, 720, 1440] {
        group.bench_with_input(BenchmarkId::new("sweep", samples), &samples, |b, &n| {
            b.iter(|| {
                let mut checksum = 0.0;
                for i in 0..n {
                    let ls = 360.0 * i as f64 / n as f64;
                    let position = sun.position_at(ls);
                    checksum += position.x + position.y;
                }
                black_box(checksum)
            });
        });
    }

    group.finish();
}

/// Coverage band outlines at widening arc extents, including the
/// large-arc branch past half the orbit.
fn bench_coverage_band(c: &mut Criterion) {
    let mut group = c.benchmark_group("coverage_band");
    group.sample_size(100);
    group.confidence_level(0.95);

    let sun = titan_sun();
    let spans = [(1_u32, 300.0, 301.0), (120, 300.0, 60.0), (300, 300.0, 240.0)];
    for (extent, start, end) in spans {
        group.bench_with_input(
            BenchmarkId::new("extent_deg", extent),
            &(start, end),
            |b, &(start, end)| {
                b.iter(|| black_box(sun.coverage_band(start, end, 30.0, Some("Cassini"))));
            },
        );
    }

    group.finish();
}

/// Date-to-longitude and longitude-to-date conversions through the
/// fitted calendar.
fn bench_calendar(c: &mut Criterion) {
    let mut group = c.benchmark_group("calendar");
    group.sample_size(100);
    group.confidence_level(0.95);

    let calendar = SeasonCalendar::titan();
    let cassini_arrival = NaiveDate::from_ymd_opt(2004, 7, 1).expect("valid date");
    group.bench_function("ls_of_date", |b| {
        b.iter(|| black_box(calendar.ls_of_date(black_box(cassini_arrival))));
    });
    group.bench_function("date_of_ls", |b| {
        b.iter(|| black_box(calendar.date_of_ls(black_box(293.13), 0)));
    });
    group.bench_function("season_spans", |b| {
        b.iter(|| black_box(calendar.season_spans(black_box(0))));
    });

    group.finish();
}

/// The assembled pipeline end to end: record resolution, scene
/// assembly and SVG string rendering for the Titan preset.
fn bench_assemble_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(50);
    group.confidence_level(0.95);

    let config = DiagramConfig::titan();
    let diagram = config.to_diagram().expect("preset resolves");
    let scene = diagram.assemble();
    group.bench_function("assemble", |b| {
        b.iter(|| black_box(diagram.assemble()));
    });
    group.bench_function("render_svg", |b| {
        b.iter(|| black_box(render::to_svg_string(&scene)));
    });
    group.bench_function("resolve_and_assemble", |b| {
        b.iter(|| {
            let diagram = config.to_diagram().expect("preset resolves");
            black_box(diagram.assemble())
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_position_sweep,
    bench_coverage_band,
    bench_calendar,
    bench_assemble_and_render
);
criterion_main!(benches);
