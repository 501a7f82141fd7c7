//! Benchmarks for collecting and rendering large manifests.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lsdeps::config::InclusionMask;
use lsdeps::parser::{collect, parse_str};
use lsdeps::render::render;

/// Build a manifest with `per_category` entries in every dependency field.
fn create_manifest(per_category: usize) -> String {
    let fields = [
        "dependencies",
        "devDependencies",
        "peerDependencies",
        "optionalDependencies",
        "bundleDependencies",
    ];

    let body: Vec<String> = fields
        .iter()
        .map(|field| {
            let entries: Vec<String> = (0..per_category)
                .rev()
                .map(|i| format!("\"{}-dep-{}\": \"^{}.0.0\"", field, i, i))
                .collect();
            format!("\"{}\": {{{}}}", field, entries.join(","))
        })
        .collect();

    format!("{{{}}}", body.join(","))
}

fn bench_collect_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect_render");

    for size in [10, 100, 1000] {
        let pkg = parse_str(&create_manifest(size)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &pkg, |b, pkg| {
            b.iter(|| {
                let mut records = collect(black_box(pkg), InclusionMask::all());
                let mut sink = Vec::with_capacity(records.len() * 24);
                render(&mut records, &mut sink).unwrap();
                black_box(sink)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_collect_render);
criterion_main!(benches);
