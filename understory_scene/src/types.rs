// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: occurrence identifiers, flags, and expanded nodes.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;
use understory_document::{AutoLayout, DocId, FrameId, NodeKind};

/// Identifier of one rendered occurrence of a node.
///
/// A node outside any instance uses its document id verbatim. A node expanded
/// from a component definition inside an instance is named
/// `"<instance expanded id>::<definition doc id>"`, so two instances of one
/// definition never share an occurrence id.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpandedId(Arc<str>);

impl ExpandedId {
    /// Separator between an instance prefix and a definition node id.
    pub const SEPARATOR: &'static str = "::";

    /// Create an identifier from a string.
    pub fn new(id: &str) -> Self {
        Self(Arc::from(id))
    }

    /// The identifier of `doc` expanded inside the instance occurrence `instance`.
    pub fn nested(instance: &Self, doc: &DocId) -> Self {
        let mut s = alloc::string::String::with_capacity(
            instance.0.len() + Self::SEPARATOR.len() + doc.as_str().len(),
        );
        s.push_str(&instance.0);
        s.push_str(Self::SEPARATOR);
        s.push_str(doc.as_str());
        Self(Arc::from(s))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ExpandedId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<&DocId> for ExpandedId {
    fn from(id: &DocId) -> Self {
        Self::new(id.as_str())
    }
}

impl fmt::Debug for ExpandedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExpandedId({:?})", &*self.0)
    }
}

impl fmt::Display for ExpandedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

bitflags::bitflags! {
    /// Per-occurrence flags controlling visibility, picking, and editability.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SceneFlags: u8 {
        /// Occurrence is visible.
        const VISIBLE   = 0b0000_0001;
        /// Occurrence participates in hit testing.
        const PICKABLE  = 0b0000_0010;
        /// Occurrence lies inside an instance interior and has no patchable document id.
        const READ_ONLY = 0b0000_0100;
    }
}

impl Default for SceneFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// One rendered occurrence in an [`ExpandedScene`](crate::ExpandedScene).
#[derive(Clone, Debug, PartialEq)]
pub struct ExpandedNode {
    /// Identity of this occurrence.
    pub id: ExpandedId,
    /// Frame whose tree this occurrence belongs to.
    pub frame: FrameId,
    /// Document node this occurrence was expanded from (shared by all occurrences
    /// of a component definition node).
    pub source: DocId,
    /// Patchable document id; `None` inside an instance interior.
    pub doc_id: Option<DocId>,
    /// Parent occurrence; `None` for a frame root.
    pub parent: Option<ExpandedId>,
    /// Child occurrences in document order.
    pub children: Vec<ExpandedId>,
    /// Kind of the source node.
    pub kind: NodeKind,
    /// Auto-layout descriptor of the source node.
    pub layout: Option<AutoLayout>,
    /// Visibility, picking, and editability.
    pub flags: SceneFlags,
    /// Frame-local bounds from the layout pass, if known.
    pub bounds: Option<Rect>,
}

impl ExpandedNode {
    /// Returns true if this occurrence can hold children (anything but a leaf).
    pub fn is_container(&self) -> bool {
        self.kind != NodeKind::Leaf
    }

    /// Returns true if edits may target this occurrence.
    pub fn is_patchable(&self) -> bool {
        self.doc_id.is_some()
    }
}
