#[macro_use]
extern crate criterion;

use criterion::Criterion;
use seamcarve::{CostGraph, SeamSelector, TwoDimensionalMap};

fn energy(width: usize, height: usize) -> TwoDimensionalMap<f64> {
    let values = (0..width * height)
        .map(|i| ((i * 7919) % 251) as f64)
        .collect();
    TwoDimensionalMap::from_vec(width, height, values).unwrap()
}

fn carve_twenty(c: &mut Criterion) {
    let graph = CostGraph::build(&energy(200, 150)).unwrap();

    c.bench_function("twenty seams, incremental repair", |b| {
        b.iter(|| {
            let mut graph = graph.clone();
            let selector = SeamSelector::new(&graph);
            for i in 0..20 {
                let seam = selector.extract(&graph, i).unwrap();
                graph.remove_seam(&seam).unwrap();
                graph.repair(&seam).unwrap();
            }
            graph
        })
    });

    c.bench_function("twenty seams, full rebuild", |b| {
        b.iter(|| {
            let mut graph = graph.clone();
            let selector = SeamSelector::new(&graph);
            for i in 0..20 {
                let seam = selector.extract(&graph, i).unwrap();
                graph.remove_seam(&seam).unwrap();
                // Repair still has to renumber the columns.
                graph.repair(&seam).unwrap();
                graph.recompute_all().unwrap();
            }
            graph
        })
    });
}

criterion_group!(benches, carve_twenty);
criterion_main!(benches);
