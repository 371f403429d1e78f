#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use xmlgrove::filter::{ContentFilter, FilteredView};
use xmlgrove::sax::{emit_events, TreeBuilder};
use xmlgrove::serial::serialize;
use xmlgrove::{Document, NodeId};

// ---------------------------------------------------------------------------
// Document generators
// ---------------------------------------------------------------------------

/// Builds `<root>` with `count` children alternating element and text.
fn make_mixed(count: usize) -> (Document, NodeId) {
    let mut doc = Document::new();
    let root = doc.create_element("root");
    doc.add_content(doc.root(), root).unwrap();
    let children: Vec<NodeId> = (0..count)
        .map(|i| {
            if i % 2 == 0 {
                let item = doc.create_element("item");
                doc.set_attribute_value(item, "id", &i.to_string()).unwrap();
                item
            } else {
                doc.create_text("text")
            }
        })
        .collect();
    doc.add_all(root, &children).unwrap();
    (doc, root)
}

/// Builds a chain of `depth` nested elements and returns the innermost.
fn make_nested(depth: usize) -> (Document, NodeId) {
    let mut doc = Document::new();
    let mut parent = doc.root();
    for _ in 0..depth {
        let e = doc.create_element("e");
        doc.add_content(parent, e).unwrap();
        parent = e;
    }
    (doc, parent)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_content_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("content_list");
    for size in [100, 1_000] {
        group.bench_with_input(BenchmarkId::new("append", size), &size, |b, &size| {
            b.iter(|| black_box(make_mixed(size)));
        });
        group.bench_with_input(BenchmarkId::new("insert_front", size), &size, |b, &size| {
            b.iter(|| {
                let mut doc = Document::new();
                let list = doc.create_element("list");
                for _ in 0..size {
                    let e = doc.create_element("e");
                    doc.insert_content(list, 0, e).unwrap();
                }
                black_box(doc)
            });
        });
    }
    group.finish();
}

fn bench_cycle_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("cycle_check");
    for depth in [16, 128] {
        let (doc, innermost) = make_nested(depth);
        group.bench_with_input(BenchmarkId::new("insert_at_depth", depth), &depth, |b, _| {
            b.iter_batched(
                || doc.clone(),
                |mut doc| {
                    let e = doc.create_element("leaf");
                    doc.add_content(innermost, e).unwrap();
                    black_box(doc)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_filtered_view(c: &mut Criterion) {
    let (doc, root) = make_mixed(1_000);
    let view = FilteredView::new(root, ContentFilter::elements());
    let mut group = c.benchmark_group("filtered_view");
    group.bench_function("size", |b| b.iter(|| black_box(view.size(&doc))));
    group.bench_function("get_last", |b| b.iter(|| black_box(view.get(&doc, 499))));
    group.bench_function("insert_middle", |b| {
        b.iter_batched(
            || doc.clone(),
            |mut doc| {
                let e = doc.create_element("new");
                view.insert(&mut doc, 250, e).unwrap();
                black_box(doc)
            },
            criterion::BatchSize::SmallInput,
        );
    });
    group.bench_function("clear", |b| {
        b.iter_batched(
            || doc.clone(),
            |mut doc| black_box(view.clear(&mut doc)),
            criterion::BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_replay_and_serialize(c: &mut Criterion) {
    let (doc, _) = make_mixed(1_000);
    let mut group = c.benchmark_group("collaborators");
    group.bench_function("replay_build", |b| {
        b.iter(|| {
            let mut builder = TreeBuilder::new();
            emit_events(&doc, &mut builder);
            black_box(builder.finish().unwrap())
        });
    });
    group.bench_function("serialize", |b| b.iter(|| black_box(serialize(&doc))));
    group.finish();
}

criterion_group!(
    benches,
    bench_content_list,
    bench_cycle_check,
    bench_filtered_view,
    bench_replay_and_serialize
);
criterion_main!(benches);
