use std::collections::BTreeMap;

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use miso_cascade::EnrichmentCascade;
use miso_types::process::Process;
use miso_types::record::{CascadeSpec, FeedComposition};

fn natural_uranium_spec(process: Process) -> CascadeSpec {
    let mut feed = BTreeMap::new();
    feed.insert("922350000".to_string(), 0.00711);
    feed.insert("922380000".to_string(), 0.99289);
    CascadeSpec {
        feed_composition: FeedComposition::Nuclides(feed),
        product_assay: 0.05,
        tails_assay: 0.003,
        process,
        alpha_235: 1.4,
        feed_qty: 1000.0,
        product_qty: f64::INFINITY,
        max_swu: f64::INFINITY,
    }
}

fn bench_concentrations(c: &mut Criterion) {
    let spec = natural_uranium_spec(Process::Centrifuge);
    let mut cascade = EnrichmentCascade::from_spec(&spec).unwrap();

    c.bench_function("calculate_concentrations", |b| {
        b.iter(|| black_box(cascade.calculate_concentrations(11.86, 4.15)))
    });
}

fn bench_staging_centrifuge(c: &mut Criterion) {
    let spec = natural_uranium_spec(Process::Centrifuge);

    c.bench_function("solve_staging_centrifuge_nu_5pct", |b| {
        b.iter(|| {
            let mut cascade = EnrichmentCascade::from_spec(&spec).unwrap();
            cascade.solve().unwrap();
            black_box(cascade.n_enriching());
        })
    });
}

fn bench_staging_diffusion(c: &mut Criterion) {
    let spec = natural_uranium_spec(Process::Diffusion);

    let mut group = c.benchmark_group("solve_staging_diffusion");
    group.sample_size(10);
    group.bench_function("nu_5pct", |b| {
        b.iter(|| {
            let mut cascade = EnrichmentCascade::from_spec(&spec).unwrap();
            cascade.solve().unwrap();
            black_box(cascade.n_enriching());
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_concentrations,
    bench_staging_centrifuge,
    bench_staging_diffusion
);
criterion_main!(benches);
