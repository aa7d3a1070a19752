// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Insets, Point, Rect, Size};
use understory_document::{AutoLayout, Axis, Component, DocId, Document, Frame, FrameId, Node};
use understory_drop::{DropPreview, DropQuery, DropResolver, OriginalParents};
use understory_scene::{ExpandedId, ExpandedScene, IdentityLookups, SceneHitTester};

const CELL: f64 = 40.0;
const GAP: f64 = 8.0;

/// A horizontal row of `n` leaves, laid out edge to edge with `GAP` between them.
fn gen_row(n: usize) -> (Document, ExpandedScene) {
    let ids: Vec<String> = (0..n).map(|i| format!("c{i}")).collect();
    let doc = Document::builder()
        .node(
            Node::container("row")
                .with_layout(
                    AutoLayout::new(Axis::Horizontal)
                        .with_gap(GAP)
                        .with_padding(Insets::uniform(GAP)),
                )
                .with_children(ids.iter().map(String::as_str)),
        )
        .nodes(ids.iter().map(|id| Node::leaf(id.as_str())))
        .frame(Frame::new("f", "row", Point::ZERO, Size::new(1.0, 1.0)))
        .build()
        .unwrap();
    let mut scene = ExpandedScene::compile(&doc);
    let width = GAP + n as f64 * (CELL + GAP);
    scene.set_bounds(&"row".into(), Rect::new(0.0, 0.0, width, CELL + 2.0 * GAP));
    for (i, id) in ids.iter().enumerate() {
        let x = GAP + i as f64 * (CELL + GAP);
        scene.set_bounds(
            &id.as_str().into(),
            Rect::new(x, GAP, x + CELL, GAP + CELL),
        );
    }
    (doc, scene)
}

/// `n` instances of one card component, each expanding a three-deep interior.
fn gen_instances(n: usize) -> ExpandedScene {
    let ids: Vec<String> = (0..n).map(|i| format!("i{i}")).collect();
    let doc = Document::builder()
        .node(
            Node::container("page")
                .with_layout(AutoLayout::new(Axis::Vertical))
                .with_children(ids.iter().map(String::as_str)),
        )
        .nodes(ids.iter().map(|id| Node::instance(id.as_str(), "card")))
        .node(
            Node::container("card_root")
                .with_layout(AutoLayout::new(Axis::Horizontal))
                .with_children(["body"]),
        )
        .node(
            Node::container("body")
                .with_layout(AutoLayout::new(Axis::Vertical))
                .with_children(["title", "detail"]),
        )
        .nodes([Node::leaf("title"), Node::leaf("detail")])
        .component(Component::new("card", "card_root"))
        .frame(Frame::new("f", "page", Point::ZERO, Size::new(1.0, 1.0)))
        .build()
        .unwrap();
    ExpandedScene::compile(&doc)
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolver");
    for &n in &[16usize, 128, 1024] {
        let (_, scene) = gen_row(n);
        let lookups = IdentityLookups::build(&scene);
        let resolver = DropResolver::new(&lookups, SceneHitTester::new(&scene), &scene);
        let frame = FrameId::from("f");
        let dragged = [ExpandedId::from("c0")];
        let dragged_doc = [DocId::from("c0")];
        let parents: OriginalParents = [(DocId::from("c0"), DocId::from("row"))]
            .into_iter()
            .collect();
        let width = scene.world_bounds(&"row".into()).unwrap().width();
        let cursors: Vec<Point> = (0..64)
            .map(|i| Point::new(width * f64::from(i) / 64.0, CELL * 0.5))
            .collect();

        group.throughput(Throughput::Elements(cursors.len() as u64));
        group.bench_function(format!("compute_sweep_n{n}"), |b| {
            b.iter(|| {
                let mut last: Option<DropPreview> = None;
                for &cursor in &cursors {
                    let mut query =
                        DropQuery::new(&frame, cursor, &dragged, &dragged_doc, &parents);
                    if let Some(previous) = &last {
                        query = query.with_previous(previous);
                    }
                    let preview = resolver.compute(&query);
                    black_box(&preview);
                    last = Some(preview);
                }
            });
        });
    }
    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene");
    for &n in &[64usize, 512] {
        let (doc, _) = gen_row(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("compile_lookups_row_n{n}"), |b| {
            b.iter(|| {
                let scene = ExpandedScene::compile(&doc);
                black_box(IdentityLookups::build(&scene));
            });
        });
        let scene = gen_instances(n);
        group.bench_function(format!("lookups_instances_n{n}"), |b| {
            b.iter(|| black_box(IdentityLookups::build(&scene)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute, bench_compile);
criterion_main!(benches);
