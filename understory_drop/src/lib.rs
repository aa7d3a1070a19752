// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Drop: drop-target resolution and move planning for nested auto-layout editors.
//!
//! While a selection is dragged, [`DropResolver::compute`] runs on every pointer move
//! and answers three questions: which container receives the drop, where in its
//! child order the selection lands, and whether that is a reorder or a reparent.
//! On release, [`DropCommitPlan`] finalizes the answer and [`generate`] turns it
//! into [`PatchOp`](understory_document::PatchOp)s for a
//! [`DocumentStore`](understory_document::DocumentStore).
//!
//! ## Guarantees
//!
//! - Decisions are made on occurrences ([`ExpandedId`](understory_scene::ExpandedId)),
//!   so two on-screen instances of one component definition resolve independently.
//! - A hit on a container without auto-layout climbs to the nearest ancestor with it.
//! - A selection whose nodes come from different parents is rejected.
//! - The insertion index addresses the target's children with every dragged
//!   occurrence removed, so the dragged items never reason about their old slots.
//! - Small cursor jitter never changes the index: the previous index is held while
//!   the cursor stays within [`ResolverConfig::hysteresis_px`] (divided by zoom).
//! - Reflow offsets are reported for reorders only.
//!
//! The resolver is a pure function of its inputs. State carried between pointer
//! moves (the previous index and its anchor cursor) is passed back in by the caller
//! through [`DropQuery`].
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_document::{
//!     Axis, AutoLayout, DocId, Document, DocumentStore, Frame, FrameId, ManualClock, Node,
//! };
//! use understory_drop::{DropCommitPlan, DropIntent, DropQuery, DropResolver, OriginalParents};
//! use understory_scene::{ExpandedId, ExpandedScene, IdentityLookups, SceneHitTester};
//!
//! let doc = Document::builder()
//!     .node(
//!         Node::container("row")
//!             .with_layout(AutoLayout::new(Axis::Horizontal))
//!             .with_children(["a", "b", "c"]),
//!     )
//!     .nodes(["a", "b", "c"].map(Node::leaf))
//!     .frame(Frame::new("f", "row", Point::ZERO, Size::new(300.0, 100.0)))
//!     .build()
//!     .unwrap();
//!
//! // Bounds come from the application's layout pass.
//! let mut scene = ExpandedScene::compile(&doc);
//! scene.set_bounds(&"row".into(), Rect::new(0.0, 0.0, 300.0, 100.0));
//! for (i, id) in ["a", "b", "c"].into_iter().enumerate() {
//!     let x = i as f64 * 100.0;
//!     scene.set_bounds(&id.into(), Rect::new(x, 0.0, x + 100.0, 100.0));
//! }
//! let lookups = IdentityLookups::build(&scene);
//! let resolver = DropResolver::new(&lookups, SceneHitTester::new(&scene), &scene);
//!
//! // Drag `a` past the end of the row.
//! let frame = FrameId::from("f");
//! let dragged = [ExpandedId::from("a")];
//! let dragged_doc = [DocId::from("a")];
//! let parents: OriginalParents = [(DocId::from("a"), DocId::from("row"))].into_iter().collect();
//! let query = DropQuery::new(&frame, Point::new(290.0, 50.0), &dragged, &dragged_doc, &parents);
//! let preview = resolver.compute(&query);
//! assert!(preview.is_valid);
//! assert_eq!(preview.intent, DropIntent::Reorder);
//! assert_eq!(preview.insertion_index, Some(2));
//!
//! let plan = DropCommitPlan::from_preview_in(&preview, &parents, &doc);
//! let mut store = DocumentStore::new(doc, ManualClock::new());
//! store.apply_patches(&plan.patches(), None, Some("Move")).unwrap();
//! let order: Vec<_> = store.document().children(&"row".into()).iter().map(|c| c.as_str()).collect();
//! assert_eq!(order, ["b", "c", "a"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod commit;
mod resolver;
mod types;

pub use commit::{CommitRejection, DropCommitPlan, generate};
pub use resolver::DropResolver;
pub use types::{
    DragTarget, DropIntent, DropPreview, DropQuery, InvalidReason, OriginalParents,
    ResolverConfig,
};
