// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared definitions.
//!
//! Two instances of one component expand to distinct occurrences. Hovering
//! each resolves a different target even though both share a definition, and
//! committing into an instance interior is refused.
//!
//! Run:
//! - `cargo run -p understory_demos --example shared_definition`

use kurbo::{Point, Rect, Size};
use understory_document::{AutoLayout, Axis, Component, DocId, Document, Frame, FrameId, Node};
use understory_drop::{DropCommitPlan, DropQuery, DropResolver, OriginalParents};
use understory_scene::{ExpandedId, ExpandedScene, IdentityLookups, SceneHitTester};

fn main() {
    let doc = Document::builder()
        .node(
            Node::container("page")
                .with_layout(AutoLayout::new(Axis::Horizontal))
                .with_children(["left", "right", "loose"]),
        )
        .node(Node::instance("left", "card"))
        .node(Node::instance("right", "card"))
        .node(Node::leaf("loose"))
        .node(
            Node::container("card_root")
                .with_layout(AutoLayout::new(Axis::Vertical))
                .with_children(["title"]),
        )
        .node(Node::leaf("title"))
        .component(Component::new("card", "card_root"))
        .frame(Frame::new("f", "page", Point::ZERO, Size::new(300.0, 100.0)))
        .build()
        .unwrap();

    let mut scene = ExpandedScene::compile(&doc);
    println!("== Occurrences (paint order) ==");
    for id in scene.paint_order(&FrameId::from("f")) {
        let node = scene.node(id).unwrap();
        println!(
            "  {:<20} doc={:<10} read_only={}",
            id.as_str(),
            node.doc_id.as_ref().map_or("-", DocId::as_str),
            !node.is_patchable(),
        );
    }

    for (id, x) in [("left", 0.0), ("right", 100.0)] {
        let interior = ExpandedId::nested(&ExpandedId::from(id), &DocId::from("card_root"));
        let title = ExpandedId::nested(&ExpandedId::from(id), &DocId::from("title"));
        scene.set_bounds(&id.into(), Rect::new(x, 0.0, x + 100.0, 100.0));
        scene.set_bounds(&interior, Rect::new(x, 0.0, x + 100.0, 100.0));
        scene.set_bounds(&title, Rect::new(x + 10.0, 10.0, x + 90.0, 30.0));
    }
    scene.set_bounds(&"page".into(), Rect::new(0.0, 0.0, 300.0, 100.0));
    scene.set_bounds(&"loose".into(), Rect::new(200.0, 0.0, 300.0, 100.0));

    let lookups = IdentityLookups::build(&scene);
    let resolver = DropResolver::new(&lookups, SceneHitTester::new(&scene), &scene);
    let frame = FrameId::from("f");
    let dragged = [ExpandedId::from("loose")];
    let dragged_doc = [DocId::from("loose")];
    let parents: OriginalParents = [(DocId::from("loose"), DocId::from("page"))]
        .into_iter()
        .collect();

    println!("\n== Hovering each instance ==");
    for x in [50.0, 150.0] {
        let query = DropQuery::new(&frame, Point::new(x, 60.0), &dragged, &dragged_doc, &parents);
        let preview = resolver.compute(&query);
        let plan = DropCommitPlan::from_preview(&preview, &parents);
        println!(
            "  x={x:>5.1} -> target={:?} can_commit={} reason={:?}",
            preview.target_parent_expanded.as_ref().map(ExpandedId::as_str),
            plan.can_commit,
            plan.reason.map(|r| r.as_str()),
        );
    }
}
