// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_document::{Document, DocumentStore, ManualClock, Node, PatchOp, Value};

/// A flat container with `n` leaves.
fn gen_flat(n: usize) -> Document {
    let ids: Vec<String> = (0..n).map(|i| format!("n{i}")).collect();
    Document::builder()
        .node(Node::container("root").with_children(ids.iter().map(String::as_str)))
        .nodes(ids.iter().map(|id| Node::leaf(id.as_str())))
        .build()
        .unwrap()
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("patch");
    for &n in &[100usize, 1_000, 10_000] {
        let doc = gen_flat(n);
        let last = format!("n{}", n - 1);
        let reorder = [
            PatchOp::detach("root", last.as_str()),
            PatchOp::attach("root", last.as_str(), 0),
        ];
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("reorder_batch_n{n}"), |b| {
            b.iter(|| black_box(doc.apply_batch(&reorder).unwrap()));
        });
        let prop = [PatchOp::set_node_property("n0", "opacity", Some(Value::Number(0.5)))];
        group.bench_function(format!("set_property_n{n}"), |b| {
            b.iter(|| black_box(doc.apply_batch(&prop).unwrap()));
        });
    }
    group.finish();
}

fn bench_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("history");
    let doc = gen_flat(1_000);
    let steps: Vec<[PatchOp; 1]> = (0..200)
        .map(|i| {
            [PatchOp::set_node_property(
                "n0",
                "x",
                Some(Value::Number(f64::from(i))),
            )]
        })
        .collect();
    group.throughput(Throughput::Elements(steps.len() as u64));
    group.bench_function("coalesced_drag_undo_redo", |b| {
        b.iter_batched(
            || DocumentStore::new(doc.clone(), ManualClock::new()),
            |mut store| {
                let gesture = store.new_group();
                for ops in &steps {
                    store.clock().advance(Duration::from_millis(16));
                    store.apply_patches(ops, Some(gesture), Some("Drag")).unwrap();
                }
                store.undo().unwrap();
                store.redo().unwrap();
                black_box(store.undo_len());
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("separate_entries_bounded", |b| {
        b.iter_batched(
            || DocumentStore::new(doc.clone(), ManualClock::new()),
            |mut store| {
                for ops in &steps {
                    store.apply_patches(ops, None, None).unwrap();
                }
                while store.undo().unwrap() {}
                black_box(store.redo_len());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_apply, bench_history);
criterion_main!(benches);
