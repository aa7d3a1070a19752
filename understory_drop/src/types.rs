// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for drop resolution: targets, intents, queries, and previews.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect, Vec2};
use understory_document::{Axis, DocId, FrameId};
use understory_scene::ExpandedId;

/// Map from each dragged document node to its parent before the drag started.
pub type OriginalParents = BTreeMap<DocId, DocId>;

/// What a drag is currently over.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragTarget {
    /// The frame itself, with no container resolved.
    Frame(FrameId),
    /// A container occurrence.
    Node {
        /// Frame the occurrence belongs to.
        frame: FrameId,
        /// The container occurrence.
        expanded: ExpandedId,
        /// Document id edits would target; `None` for read-only occurrences.
        patch_target: Option<DocId>,
    },
}

impl DragTarget {
    /// Returns true if a drop here can be turned into patches.
    pub fn can_patch(&self) -> bool {
        matches!(
            self,
            Self::Node {
                patch_target: Some(_),
                ..
            }
        )
    }

    /// Frame of the target.
    pub fn frame(&self) -> &FrameId {
        match self {
            Self::Frame(frame) | Self::Node { frame, .. } => frame,
        }
    }
}

/// How a drop changes the tree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DropIntent {
    /// Nothing resolved.
    #[default]
    None,
    /// Same parent (by document id), new position.
    Reorder,
    /// Different parent.
    Reparent,
}

/// Why a preview is invalid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InvalidReason {
    /// The dragged nodes do not share one original parent.
    MultipleOriginParents,
    /// No container under the cursor.
    NoContainerHit,
    /// Neither the hit container nor any ancestor has auto-layout.
    NoAutoLayoutAncestor,
    /// The locked frame is unknown to the geometry provider.
    TargetFrameNotFound,
    /// The resolved container has not been laid out.
    ContainerHasNoBounds,
}

impl InvalidReason {
    /// Human-readable description.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MultipleOriginParents => "multiple origin parents",
            Self::NoContainerHit => "no container hit",
            Self::NoAutoLayoutAncestor => "no auto-layout ancestor",
            Self::TargetFrameNotFound => "target frame not found",
            Self::ContainerHasNoBounds => "container has no bounds",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolver tuning. Both values are screen pixels and are divided by zoom.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResolverConfig {
    /// Minimum main-axis cursor travel before a new insertion index is accepted.
    pub hysteresis_px: f64,
    /// Thickness of the insertion indicator.
    pub indicator_thickness_px: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            hysteresis_px: 8.0,
            indicator_thickness_px: 2.0,
        }
    }
}

/// Inputs of one resolver call.
///
/// Everything remembered across pointer moves (the prior index, its anchor
/// cursor and the container it addressed) is threaded through here by the
/// caller, most simply with [`DropQuery::with_previous`].
#[derive(Clone, Copy, Debug)]
pub struct DropQuery<'a> {
    /// Frame locked for the whole gesture.
    pub frame: &'a FrameId,
    /// Cursor in world space.
    pub cursor: Point,
    /// Dragged occurrences.
    pub dragged_expanded: &'a [ExpandedId],
    /// Dragged document nodes.
    pub dragged_doc: &'a [DocId],
    /// Parent of each dragged document node when the drag started.
    pub original_parents: &'a OriginalParents,
    /// Insertion index of the previous preview, if any.
    pub prior_index: Option<usize>,
    /// Cursor position `prior_index` was accepted at (see [`DropPreview::anchor`]).
    pub prior_cursor: Option<Point>,
    /// Container `prior_index` addresses. The index is only held while the
    /// resolved container is the same one.
    pub prior_target: Option<&'a ExpandedId>,
    /// Current zoom factor (screen pixels per world unit).
    pub zoom: f64,
    /// Occurrence of the dragged nodes' original parent.
    pub origin_parent: Option<&'a ExpandedId>,
    /// World-space rectangle of the original parent, used for stickiness.
    pub origin_content_rect: Option<Rect>,
}

impl<'a> DropQuery<'a> {
    /// A query with no prior state, zoom 1, and no origin hints.
    pub fn new(
        frame: &'a FrameId,
        cursor: Point,
        dragged_expanded: &'a [ExpandedId],
        dragged_doc: &'a [DocId],
        original_parents: &'a OriginalParents,
    ) -> Self {
        Self {
            frame,
            cursor,
            dragged_expanded,
            dragged_doc,
            original_parents,
            prior_index: None,
            prior_cursor: None,
            prior_target: None,
            zoom: 1.0,
            origin_parent: None,
            origin_content_rect: None,
        }
    }

    /// Set the previous index, the cursor it was accepted at, and the
    /// container it addresses.
    #[must_use]
    pub fn with_prior(mut self, index: usize, cursor: Point, target: &'a ExpandedId) -> Self {
        self.prior_index = Some(index);
        self.prior_cursor = Some(cursor);
        self.prior_target = Some(target);
        self
    }

    /// Carry the prior state over from the previous preview of this gesture.
    /// An invalid preview carries nothing.
    #[must_use]
    pub fn with_previous(self, preview: &'a DropPreview) -> Self {
        match (
            preview.insertion_index,
            preview.anchor,
            preview.target_parent_expanded.as_ref(),
        ) {
            (Some(index), Some(anchor), Some(target)) => self.with_prior(index, anchor, target),
            _ => self,
        }
    }

    /// Set the zoom factor.
    #[must_use]
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set the original parent occurrence and its world-space rectangle.
    #[must_use]
    pub fn with_origin(mut self, parent: &'a ExpandedId, rect: Rect) -> Self {
        self.origin_parent = Some(parent);
        self.origin_content_rect = Some(rect);
        self
    }
}

/// Result of one resolver call. Recomputed on every pointer move.
#[derive(Clone, Debug, PartialEq)]
pub struct DropPreview {
    /// Whether a drop here would be accepted.
    pub is_valid: bool,
    /// The locked frame.
    pub frame: FrameId,
    /// Resolved container occurrence.
    pub target_parent_expanded: Option<ExpandedId>,
    /// Document id of the resolved container; `None` when read-only.
    pub target_parent_doc: Option<DocId>,
    /// Index into the filtered child list (children minus dragged occurrences).
    pub insertion_index: Option<usize>,
    /// Reorder or reparent.
    pub intent: DropIntent,
    /// World-space insertion indicator.
    pub indicator_rect: Option<Rect>,
    /// Long axis of the indicator, perpendicular to the container's main axis.
    pub indicator_axis: Option<Axis>,
    /// Dragged occurrences, in their original sibling order.
    pub dragged_expanded: Vec<ExpandedId>,
    /// Dragged document ids, in their original sibling order.
    pub dragged_doc: Vec<DocId>,
    /// The container's current (unfiltered) child occurrences.
    pub target_children_expanded: Vec<ExpandedId>,
    /// Document ids of `target_children_expanded`, position for position.
    pub target_children_doc: Vec<Option<DocId>>,
    /// Main-axis animation offsets; populated only for reorders.
    pub reflow_offsets: BTreeMap<ExpandedId, Vec2>,
    /// Cursor to pass as the next call's `prior_cursor`: the prior cursor when
    /// the index was held by hysteresis, otherwise this call's cursor.
    pub anchor: Option<Point>,
    /// Why the preview is invalid.
    pub invalid_reason: Option<InvalidReason>,
}

impl DropPreview {
    /// An invalid preview with every optional field empty.
    pub fn invalid(frame: FrameId, reason: InvalidReason) -> Self {
        Self {
            is_valid: false,
            frame,
            target_parent_expanded: None,
            target_parent_doc: None,
            insertion_index: None,
            intent: DropIntent::None,
            indicator_rect: None,
            indicator_axis: None,
            dragged_expanded: Vec::new(),
            dragged_doc: Vec::new(),
            target_children_expanded: Vec::new(),
            target_children_doc: Vec::new(),
            reflow_offsets: BTreeMap::new(),
            anchor: None,
            invalid_reason: Some(reason),
        }
    }

    /// What the drag is over.
    pub fn target(&self) -> DragTarget {
        match &self.target_parent_expanded {
            Some(expanded) => DragTarget::Node {
                frame: self.frame.clone(),
                expanded: expanded.clone(),
                patch_target: self.target_parent_doc.clone(),
            },
            None => DragTarget::Frame(self.frame.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_read_naturally() {
        assert_eq!(
            alloc::format!("{}", InvalidReason::MultipleOriginParents),
            "multiple origin parents"
        );
        assert!(InvalidReason::MultipleOriginParents.as_str().contains("parent"));
    }

    #[test]
    fn invalid_preview_targets_frame() {
        let p = DropPreview::invalid("f".into(), InvalidReason::NoContainerHit);
        let target = p.target();
        assert_eq!(target, DragTarget::Frame("f".into()));
        assert!(!target.can_patch());
        assert!(p.reflow_offsets.is_empty());
    }

    #[test]
    fn node_target_patchability() {
        let read_only = DragTarget::Node {
            frame: "f".into(),
            expanded: "instA::occurrence".into(),
            patch_target: None,
        };
        assert!(!read_only.can_patch());
        let editable = DragTarget::Node {
            frame: "f".into(),
            expanded: "row".into(),
            patch_target: Some("row".into()),
        };
        assert!(editable.can_patch());
        assert_eq!(editable.frame().as_str(), "f");
    }
}
