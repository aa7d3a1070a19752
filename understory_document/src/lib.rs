// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Document: an immutable design document with invertible patches and undo.
//!
//! The document is a forest of nodes placed on a canvas by top-level frames, plus
//! reusable component definitions whose subtrees are shared by every instance.
//!
//! - Snapshots are immutable. [`Document::apply`] and [`Document::apply_batch`] return a
//!   new snapshot and leave the receiver untouched; unchanged records are shared between
//!   snapshots, so cloning is cheap and old snapshots stay valid.
//! - Every [`PatchOp`] has an inverse derived from the pre-patch snapshot
//!   ([`Document::inverse_of`]). Batches are atomic: a failing patch publishes nothing.
//! - [`DocumentStore`] owns the current snapshot, records undo entries, and coalesces
//!   batches that share a [`GroupId`] within a short time window.
//!
//! ## API overview
//!
//! - [`DocId`], [`FrameId`], [`ComponentId`]: cheap, cloneable string identifiers.
//! - [`Node`], [`Frame`], [`Component`]: document records; [`AutoLayout`] describes how a
//!   container packs its children.
//! - [`DocumentBuilder`]: validated construction of an initial snapshot.
//! - [`PatchOp`]: the atomic edits; [`PatchError`]: why one was rejected.
//! - [`DocumentStore`], [`HistoryConfig`], [`Clock`]: history and coalescing.
//!
//! ## Minimal usage
//!
//! ```
//! use understory_document::{Document, Node, PatchOp};
//!
//! let doc = Document::builder()
//!     .node(Node::container("row").with_children(["a", "b", "c"]))
//!     .node(Node::leaf("a"))
//!     .node(Node::leaf("b"))
//!     .node(Node::leaf("c"))
//!     .build()
//!     .unwrap();
//!
//! let applied = doc.apply_batch(&[PatchOp::move_node("a", "row", 2)]).unwrap();
//! let ids: Vec<_> = applied.document.children(&"row".into()).iter().map(|c| c.as_str()).collect();
//! assert_eq!(ids, ["b", "c", "a"]);
//!
//! // The original snapshot is untouched, and the inverse restores it.
//! assert_eq!(doc.children(&"row".into())[0].as_str(), "a");
//! let undone = applied.document.apply_all(&applied.inverse).unwrap();
//! assert_eq!(undone, doc);
//! ```
//!
//! This crate is `no_std` and uses `alloc`. The `std` feature adds [`StdClock`].
//! The `tracing` feature emits debug events for history changes.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod document;
mod error;
mod history;
mod patch;
mod types;

pub use document::{Document, DocumentBuilder};
pub use error::PatchError;
#[cfg(feature = "std")]
pub use history::StdClock;
pub use history::{Clock, DocumentStore, GroupId, HistoryConfig, ManualClock, UndoEntry};
pub use patch::{AppliedBatch, LAYOUT_PATH, NAME_PATH, ORIGIN_PATH, PatchOp, SIZE_PATH};
pub use types::{
    Axis, AutoLayout, Component, ComponentId, DocId, Frame, FrameId, Node, NodeKind, PropertyMap,
    Value,
};
