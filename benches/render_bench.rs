use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lidarmap::points::Point;
use lidarmap::scan::simulated_scan;
use lidarmap::{MapRenderer, Raster};

// Run with:
//    cargo bench

fn bench_render_sweep(c: &mut Criterion) {
    let renderer = MapRenderer::default();
    let sweep = simulated_scan(1.0);
    let mut raster = Raster::new(400, 400);

    c.bench_function("render_single_sweep", |b| {
        b.iter(|| {
            renderer.render(&mut raster, Some(black_box(&sweep)));
        })
    });
}

fn bench_render_live_tail(c: &mut Criterion) {
    // the live view keeps the newest 1200 points of a growing cloud
    let renderer = MapRenderer::default();
    let cloud: Vec<Point> = (0..20).flat_map(|i| simulated_scan(i as f64 * 0.3)).collect();
    let tail = lidarmap::points::tail(&cloud, 1200);
    let mut raster = Raster::new(800, 600);

    c.bench_function("render_live_tail_1200", |b| {
        b.iter(|| {
            renderer.render(&mut raster, Some(black_box(tail)));
        })
    });
}

#[cfg(feature = "png")]
fn bench_encode_png(c: &mut Criterion) {
    let mut raster = Raster::new(400, 400);
    MapRenderer::default()
        .render(&mut raster, Some(&simulated_scan(0.0)));

    c.bench_function("encode_png_400", |b| {
        b.iter(|| {
            black_box(raster.to_png().unwrap());
        })
    });
}

#[cfg(not(feature = "png"))]
fn bench_encode_png(_c: &mut Criterion) {}

criterion_group!(
    benches,
    bench_render_sweep,
    bench_render_live_tail,
    bench_encode_png
);
criterion_main!(benches);
