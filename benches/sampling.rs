//! Benchmarks for colormap sampling and export

use colormap_core::{Colormap, Rgb, SourceExportOptions};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn create_colormap(stops: usize) -> Colormap {
    let mut colormap = Colormap::with_endpoints(Rgb::new(10, 20, 120), Rgb::new(250, 240, 30));
    for i in 1..stops {
        let position = i as f64 / stops as f64;
        let shade = ((i * 37) % 256) as u8;
        colormap
            .add_stop(position, Rgb::new(shade, 255 - shade, shade / 2))
            .unwrap();
    }
    colormap
}

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");

    for stops in [2, 8, 64].iter() {
        let colormap = create_colormap(*stops);

        group.bench_with_input(BenchmarkId::from_parameter(stops), stops, |b, _| {
            b.iter(|| black_box(&colormap).sample(black_box(4096)))
        });
    }

    group.finish();
}

fn bench_source_export(c: &mut Criterion) {
    let colormap = create_colormap(8);
    let options = SourceExportOptions::named("bench");

    c.bench_function("source_export_512", |b| {
        b.iter(|| black_box(&colormap).to_source_export_with(black_box(&options)).unwrap())
    });
}

criterion_group!(benches, bench_sample, bench_source_export);
criterion_main!(benches);
