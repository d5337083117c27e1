//! Benchmarks for path resolution and writes over a record with many repeated elements.
//!
//! Run with: cargo bench -p dpath

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dpath::{PathExpr, Value, resolve, walk, write};

// =============================================================================
// Test Data
// =============================================================================

fn record(ingredients: usize) -> Value {
    let mut doc = Value::empty_map();
    for i in 0..ingredients {
        let prefix = format!("medication.ingredients.{i}.extension");
        write(&mut doc, format!("{prefix}.url"), i.to_string()).unwrap();
        write(&mut doc, format!("{prefix}.value"), format!("value-{i}")).unwrap();
    }
    doc
}

fn last_match(ingredients: usize) -> Vec<PathExpr> {
    vec![
        PathExpr::from("medication.ingredients"),
        PathExpr::filter("extension.url", (ingredients - 1).to_string()),
        PathExpr::from("extension.value"),
    ]
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for size in [10, 100, 1000] {
        let doc = record(size);
        group.bench_with_input(BenchmarkId::new("index", size), &doc, |b, doc| {
            b.iter(|| resolve(black_box(doc), "medication.ingredients.0.extension.value"))
        });
        let path = last_match(size);
        group.bench_with_input(BenchmarkId::new("filter", size), &doc, |b, doc| {
            b.iter(|| resolve(black_box(doc), path.as_slice()))
        });
        group.bench_with_input(BenchmarkId::new("walk", size), &doc, |b, doc| {
            b.iter(|| {
                walk(black_box(doc), "medication.ingredients.extension.url")
                    .map(|steps| steps.count())
            })
        });
    }
    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");
    for size in [10, 100, 1000] {
        let doc = record(size);
        let path = last_match(size);
        group.bench_with_input(BenchmarkId::new("filter", size), &doc, |b, doc| {
            b.iter_batched(
                || doc.clone(),
                |mut doc| write(&mut doc, path.as_slice(), "updated").map(|_| ()),
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.bench_function("materialize", |b| {
        b.iter(|| {
            let mut doc = Value::empty_map();
            write(&mut doc, black_box("medication.label.0.ingredient.form"), "comprimé")
                .map(|_| ())
        })
    });
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_write);
criterion_main!(benches);
