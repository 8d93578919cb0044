//! Benchmarks for dumping and rendering a word graph.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use dawg_dot::builder::{Dawg, Dump};
use dawg_dot::render;

fn random_dawg(words: usize) -> Dawg {
    let rng = fastrand::Rng::with_seed(0xda36);

    let mut list = (0..words)
        .map(|_| {
            let len = rng.usize(1..12);
            (0..len).map(|_| rng.alphabetic()).collect::<String>()
        })
        .map(|word| word.to_ascii_lowercase())
        .collect::<Vec<_>>();
    list.sort_unstable();
    list.dedup();

    let mut dawg = Dawg::new();
    for word in &list {
        dawg.add(word).ok();
    }
    dawg.close();
    dawg
}

fn render_dawg(c: &mut Criterion) {
    let dawg = random_dawg(20_000);
    let (nodes, edges) = dawg.dump();

    c.bench_function("dawg_dot::render", |b| {
        b.iter(|| {
            let mut out = String::with_capacity(64 * (nodes.len() + edges.len()));
            render(black_box(&nodes), black_box(&edges), &mut out).ok();
            black_box(out)
        })
    });

    c.bench_function("dawg_dot::builder::Dawg::dump", |b| {
        b.iter(|| black_box(black_box(&dawg).dump()))
    });
}

criterion_group! {
    render_methods,
    render_dawg,
}

criterion_main!(render_methods);
