// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared board fixture for drop tests.
//!
//! Frame `f` sits at world (100, 100). Frame-local layout:
//!
//! ```text
//! board (horizontal, gap 20, padding 20)     0..900 x 0..300
//! ├─ list     (vertical, gap 10, padding 10)  20..220, children A..E, 40 tall, 50 apart from y 30
//! ├─ parent_a (vertical, gap 10, padding 10) 240..440, children a1 (y 30..70), a2 (y 80..120)
//! ├─ parent_b (vertical, gap 10, padding 10) 460..660, empty
//! └─ abs      (absolute)                     680..880
//! ```

#![allow(dead_code, reason = "not every test file uses every helper")]

use kurbo::{Insets, Point, Rect, Size};
use understory_document::{Axis, AutoLayout, DocId, Document, Frame, FrameId, Node};
use understory_drop::{DropResolver, OriginalParents};
use understory_scene::{ExpandedId, ExpandedScene, IdentityLookups, SceneHitTester};

pub const ORIGIN: Point = Point::new(100.0, 100.0);
pub const LIST: [&str; 5] = ["A", "B", "C", "D", "E"];

pub struct Board {
    pub doc: Document,
    pub scene: ExpandedScene,
    pub lookups: IdentityLookups,
    pub frame: FrameId,
}

pub type Resolver<'a> = DropResolver<'a, SceneHitTester<'a>, &'a ExpandedScene>;

impl Board {
    pub fn resolver(&self) -> Resolver<'_> {
        DropResolver::new(&self.lookups, SceneHitTester::new(&self.scene), &self.scene)
    }

    /// Parent map for `dragged`, read from the fixture document.
    pub fn parents(&self, dragged: &[&str]) -> OriginalParents {
        dragged
            .iter()
            .map(|d| {
                let id = DocId::from(*d);
                let parent = self.doc.parent(&id).cloned().unwrap();
                (id, parent)
            })
            .collect()
    }

    /// World-space bounds of an occurrence.
    pub fn world(&self, id: &str) -> Rect {
        self.scene.world_bounds(&ExpandedId::from(id)).unwrap()
    }
}

pub fn stack(direction: Axis) -> AutoLayout {
    AutoLayout::new(direction)
        .with_gap(10.0)
        .with_padding(Insets::uniform(10.0))
}

pub fn board_doc() -> Document {
    Document::builder()
        .node(
            Node::container("board")
                .with_layout(
                    AutoLayout::new(Axis::Horizontal)
                        .with_gap(20.0)
                        .with_padding(Insets::uniform(20.0)),
                )
                .with_children(["list", "parent_a", "parent_b", "abs"]),
        )
        .node(
            Node::container("list")
                .with_layout(stack(Axis::Vertical))
                .with_children(LIST),
        )
        .nodes(LIST.map(Node::leaf))
        .node(
            Node::container("parent_a")
                .with_layout(stack(Axis::Vertical))
                .with_children(["a1", "a2"]),
        )
        .node(Node::leaf("a1"))
        .node(Node::leaf("a2"))
        .node(Node::container("parent_b").with_layout(stack(Axis::Vertical)))
        .node(Node::container("abs"))
        .frame(Frame::new("f", "board", ORIGIN, Size::new(900.0, 300.0)))
        .build()
        .unwrap()
}

/// Frame-local bounds of every fixture occurrence.
pub fn board_bounds() -> Vec<(&'static str, Rect)> {
    let mut out = vec![
        ("board", Rect::new(0.0, 0.0, 900.0, 300.0)),
        ("list", Rect::new(20.0, 20.0, 220.0, 280.0)),
        ("parent_a", Rect::new(240.0, 20.0, 440.0, 280.0)),
        ("a1", Rect::new(250.0, 30.0, 430.0, 70.0)),
        ("a2", Rect::new(250.0, 80.0, 430.0, 120.0)),
        ("parent_b", Rect::new(460.0, 20.0, 660.0, 280.0)),
        ("abs", Rect::new(680.0, 20.0, 880.0, 280.0)),
    ];
    for (i, id) in LIST.into_iter().enumerate() {
        let y = 30.0 + 50.0 * i as f64;
        out.push((id, Rect::new(30.0, y, 210.0, y + 40.0)));
    }
    out
}

/// The board with every occurrence laid out except those in `skip`.
pub fn board_without(skip: &[&str]) -> Board {
    let doc = board_doc();
    let mut scene = ExpandedScene::compile(&doc);
    for (id, rect) in board_bounds() {
        if !skip.contains(&id) {
            scene.set_bounds(&ExpandedId::from(id), rect);
        }
    }
    let lookups = IdentityLookups::build(&scene);
    Board {
        doc,
        scene,
        lookups,
        frame: FrameId::from("f"),
    }
}

pub fn board() -> Board {
    board_without(&[])
}

pub fn expanded(ids: &[&str]) -> Vec<ExpandedId> {
    ids.iter().map(|s| ExpandedId::from(*s)).collect()
}

pub fn docs(ids: &[&str]) -> Vec<DocId> {
    ids.iter().map(|s| DocId::from(*s)).collect()
}

pub fn children<'a>(doc: &'a Document, id: &str) -> Vec<&'a str> {
    doc.children(&DocId::from(id))
        .iter()
        .map(DocId::as_str)
        .collect()
}

/// World point from frame-local coordinates.
pub fn at(x: f64, y: f64) -> Point {
    Point::new(ORIGIN.x + x, ORIGIN.y + y)
}
