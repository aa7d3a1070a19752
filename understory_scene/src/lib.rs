// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Scene: per-occurrence expansion of a document, identity lookups, and container hit testing.
//!
//! A component definition is stored once in the document but may be rendered many
//! times. Editors have to tell those occurrences apart: hovering one instance must
//! never resolve to another. This crate compiles a [`Document`](understory_document::Document)
//! into an [`ExpandedScene`] with one [`ExpandedNode`] per on-screen occurrence.
//!
//! - A node outside any instance keeps its document id as its [`ExpandedId`].
//! - A node inside an instance interior is named `"<instance>::<definition node>"`,
//!   carries no patchable document id, and is flagged [`SceneFlags::READ_ONLY`].
//!   The instance node itself stays patchable.
//!
//! ## Not a layout engine
//!
//! Bounds are supplied by the caller through [`ExpandedScene::set_bounds`] after
//! whatever layout pass the application runs. Bounds are frame-local; frames are
//! placed in world space by their origin.
//!
//! ## API overview
//!
//! - [`ExpandedScene`]: compiled occurrences, paint order, bounds.
//! - [`IdentityLookups`]: occurrence to document id, document id to occurrences,
//!   parent links, and lazy ancestor search.
//! - [`ContainerHitTest`]: the hit-test contract consumed by drop resolution;
//!   [`SceneHitTester`] implements it over the scene's bounds.
//! - [`SceneGeometry`]: bounds and frame placement, implemented by [`ExpandedScene`].
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_document::{Component, Document, Frame, Node};
//! use understory_scene::{ContainerHitTest, ExpandedScene, HashSet, IdentityLookups, SceneHitTester};
//!
//! let doc = Document::builder()
//!     .node(Node::container("page").with_children(["instA", "instB"]))
//!     .node(Node::instance("instA", "card"))
//!     .node(Node::instance("instB", "card"))
//!     .node(Node::container("occurrence"))
//!     .component(Component::new("card", "occurrence"))
//!     .frame(Frame::new("f", "page", Point::ZERO, Size::new(200.0, 100.0)))
//!     .build()
//!     .unwrap();
//!
//! let mut scene = ExpandedScene::compile(&doc);
//! scene.set_bounds(&"page".into(), Rect::new(0.0, 0.0, 200.0, 100.0));
//! scene.set_bounds(&"instA::occurrence".into(), Rect::new(0.0, 0.0, 100.0, 100.0));
//! scene.set_bounds(&"instB::occurrence".into(), Rect::new(100.0, 0.0, 200.0, 100.0));
//!
//! let hit = SceneHitTester::new(&scene)
//!     .hit_test_container(&"f".into(), Point::new(50.0, 50.0), &HashSet::new())
//!     .unwrap();
//! assert_eq!(hit.expanded_id.as_str(), "instA::occurrence");
//! assert_eq!(hit.doc_id, None);
//!
//! let lookups = IdentityLookups::build(&scene);
//! assert_eq!(lookups.parent(&hit.expanded_id).map(|p| p.as_str()), Some("instA"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod geometry;
mod hit;
mod lookups;
mod scene;
mod types;

pub use geometry::SceneGeometry;
pub use hit::{ContainerHit, ContainerHitTest, SceneHitTester};
pub use lookups::IdentityLookups;
pub use scene::ExpandedScene;
pub use types::{ExpandedId, ExpandedNode, SceneFlags};

/// Re-exported so callers can build exclusion sets without naming the crate.
pub use hashbrown::HashSet;
