use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use showcase_core::{Catalog, Product};

fn large_catalog(size: u32) -> Catalog {
    let names = ["Laptop", "Smartphone", "Tablet", "Smartwatch", "Headphones"];
    let suffixes = ["", " Pro", " Mini", " Air", " Lite", " Wireless"];
    let products = (0..size)
        .map(|i| {
            let name = format!(
                "{}{} {}",
                names[i as usize % names.len()],
                suffixes[i as usize % suffixes.len()],
                i
            );
            Product::new(i + 1, name, 100 + i)
        })
        .collect();
    Catalog::new(products).expect("generated ids are unique")
}

fn bench_default_catalog(c: &mut Criterion) {
    let catalog = Catalog::default();

    c.bench_function("Catalog::filter_default_laptop", |b| {
        b.iter(|| black_box(catalog.filter(black_box("laptop"))));
    });
}

fn bench_catalog_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Catalog::filter_scaling");
    for size in [100u32, 1_000, 10_000] {
        let catalog = large_catalog(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &catalog, |b, catalog| {
            b.iter(|| black_box(catalog.filter(black_box("pro"))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_default_catalog, bench_catalog_sizes);
criterion_main!(benches);
