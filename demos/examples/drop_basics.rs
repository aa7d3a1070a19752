// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop basics.
//!
//! A vertical list of five cards. The first card is dragged down the list; each
//! pointer move prints the resolved insertion slot, and the final position is
//! committed through a document store and then undone.
//!
//! Run:
//! - `cargo run -p understory_demos --example drop_basics`

use kurbo::{Insets, Point, Rect, Size};
use understory_document::{
    AutoLayout, Axis, DocId, Document, DocumentStore, Frame, FrameId, ManualClock, Node,
};
use understory_drop::{DropCommitPlan, DropPreview, DropQuery, DropResolver, OriginalParents};
use understory_scene::{ExpandedId, ExpandedScene, IdentityLookups, SceneHitTester};

const CARDS: [&str; 5] = ["a", "b", "c", "d", "e"];

fn order(doc: &Document) -> Vec<&str> {
    doc.children(&"list".into()).iter().map(DocId::as_str).collect()
}

fn main() {
    let doc = Document::builder()
        .node(
            Node::container("list")
                .with_layout(
                    AutoLayout::new(Axis::Vertical)
                        .with_gap(10.0)
                        .with_padding(Insets::uniform(10.0)),
                )
                .with_children(CARDS),
        )
        .nodes(CARDS.map(Node::leaf))
        .frame(Frame::new("f", "list", Point::new(50.0, 50.0), Size::new(200.0, 260.0)))
        .build()
        .unwrap();

    let mut scene = ExpandedScene::compile(&doc);
    scene.set_bounds(&"list".into(), Rect::new(0.0, 0.0, 200.0, 260.0));
    for (i, id) in CARDS.into_iter().enumerate() {
        let y = 10.0 + 50.0 * i as f64;
        scene.set_bounds(&id.into(), Rect::new(10.0, y, 190.0, y + 40.0));
    }
    let lookups = IdentityLookups::build(&scene);
    let resolver = DropResolver::new(&lookups, SceneHitTester::new(&scene), &scene);

    let frame = FrameId::from("f");
    let dragged = [ExpandedId::from("a")];
    let dragged_doc = [DocId::from("a")];
    let parents: OriginalParents = [(DocId::from("a"), DocId::from("list"))]
        .into_iter()
        .collect();

    println!("== Dragging `a` down the list ==");
    let mut last: Option<DropPreview> = None;
    for step in 0..=10 {
        let cursor = Point::new(150.0, 70.0 + 20.0 * f64::from(step));
        let mut query = DropQuery::new(&frame, cursor, &dragged, &dragged_doc, &parents);
        if let Some(previous) = &last {
            query = query.with_previous(previous);
        }
        let preview = resolver.compute(&query);
        println!(
            "  y={:>5.1} -> {:?} slot {:?} ({} siblings reflow)",
            cursor.y,
            preview.intent,
            preview.insertion_index,
            preview.reflow_offsets.len(),
        );
        last = Some(preview);
    }

    let Some(preview) = last else {
        return;
    };
    let plan = DropCommitPlan::from_preview_in(&preview, &parents, &doc);
    println!("\n== Commit ==");
    println!("  can_commit={} patches={}", plan.can_commit, plan.patches().len());

    let mut store = DocumentStore::new(doc, ManualClock::new());
    store
        .apply_patches(&plan.patches(), None, Some("Move card"))
        .unwrap();
    println!("  after:  {:?}", order(store.document()));
    store.undo().unwrap();
    println!("  undone: {:?}", order(store.document()));
}
