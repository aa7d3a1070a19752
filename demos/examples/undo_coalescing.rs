// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Undo coalescing.
//!
//! A simulated drag nudges a frame's origin every 16ms under one group, which
//! folds into a single undo entry. A pause longer than the coalescing window
//! starts a new entry, and an explicit seal ends the gesture.
//!
//! Run:
//! - `cargo run -p understory_demos --example undo_coalescing`

use std::time::Duration;

use kurbo::{Point, Size};
use understory_document::{
    Document, DocumentStore, Frame, FrameId, GroupId, ManualClock, Node, ORIGIN_PATH, PatchOp,
    Value,
};

fn origin(store: &DocumentStore<ManualClock>) -> Point {
    store
        .document()
        .frame(&FrameId::from("f"))
        .map_or(Point::ZERO, |f| f.origin)
}

fn nudge(store: &mut DocumentStore<ManualClock>, to: Point, group: GroupId) {
    let op = PatchOp::set_frame_property("f", ORIGIN_PATH, Some(Value::Point(to)));
    store.apply_patches(&[op], Some(group), Some("Move frame")).unwrap();
}

fn main() {
    let doc = Document::builder()
        .node(Node::container("root"))
        .frame(Frame::new("f", "root", Point::ZERO, Size::new(100.0, 100.0)))
        .build()
        .unwrap();
    let mut store = DocumentStore::new(doc, ManualClock::new());

    let gesture = store.new_group();
    for i in 1..=10 {
        store.clock().advance(Duration::from_millis(16));
        nudge(&mut store, Point::new(f64::from(i) * 5.0, 0.0), gesture);
    }
    println!("== After a 10-step drag ==");
    println!("  origin={:?} undo entries={}", origin(&store), store.undo_len());

    // Same group, but past the window.
    store.clock().advance(Duration::from_secs(1));
    nudge(&mut store, Point::new(80.0, 20.0), gesture);
    println!("== After a pause ==");
    println!("  origin={:?} undo entries={}", origin(&store), store.undo_len());

    store.seal();
    nudge(&mut store, Point::new(90.0, 20.0), gesture);
    println!("== After sealing ==");
    println!("  origin={:?} undo entries={}", origin(&store), store.undo_len());

    println!("== Unwinding ==");
    while store.undo().unwrap() {
        println!(
            "  undo -> origin={:?} (redo available: {})",
            origin(&store),
            store.redo_len()
        );
    }
}
