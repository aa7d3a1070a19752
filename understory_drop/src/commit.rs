// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning a preview into a committed move, and the move into patches.

use alloc::vec::Vec;
use core::fmt;

use understory_document::{DocId, Document, NodeKind, PatchOp};

use crate::types::{DropIntent, DropPreview, OriginalParents};

/// Why a plan cannot be committed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommitRejection {
    /// The preview was invalid or carried no insertion index.
    InvalidPreview,
    /// The target container has no patchable document id.
    ReadOnlyTarget,
    /// Nothing is being dragged.
    EmptySelection,
    /// A dragged node has no recorded original parent.
    MissingOrigin,
    /// The dragged nodes do not share one original parent.
    MultipleOriginParents,
    /// Origin and target parents disagree with the preview's intent.
    InconsistentIntent,
    /// The origin or target parent no longer exists.
    MissingParent,
    /// The target cannot hold document children.
    NotAContainer,
    /// A dragged node is no longer a child of the origin parent.
    StaleSelection,
    /// The target lies inside the dragged selection.
    TargetInsideSelection,
}

impl CommitRejection {
    /// Human-readable description.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidPreview => "invalid preview",
            Self::ReadOnlyTarget => "target is read-only",
            Self::EmptySelection => "nothing dragged",
            Self::MissingOrigin => "dragged node has no original parent",
            Self::MultipleOriginParents => "multiple origin parents",
            Self::InconsistentIntent => "origin and target parents disagree with the intent",
            Self::MissingParent => "parent no longer exists",
            Self::NotAContainer => "target cannot hold children",
            Self::StaleSelection => "dragged node moved since the drag started",
            Self::TargetInsideSelection => "target is inside the dragged selection",
        }
    }
}

impl fmt::Display for CommitRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finalized move, ready for [`generate`].
///
/// Plans fail closed: anything inconsistent yields `can_commit == false` and an
/// empty patch list, which callers should report as a rejected drop rather
/// than as a successful no-op.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropCommitPlan {
    /// Whether the move may be applied.
    pub can_commit: bool,
    /// Parent the dragged nodes come from.
    pub origin_parent: Option<DocId>,
    /// Parent they are moved into.
    pub target_parent: Option<DocId>,
    /// Index into the target's child list with the dragged nodes removed.
    pub insertion_index: usize,
    /// Dragged nodes in their original relative order.
    pub dragged: Vec<DocId>,
    /// True when origin and target differ.
    pub is_reparent: bool,
    /// Why the plan was rejected.
    pub reason: Option<CommitRejection>,
}

impl DropCommitPlan {
    /// A rejected plan.
    pub fn rejected(reason: CommitRejection) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(%reason, "drop commit rejected");
        Self {
            can_commit: false,
            origin_parent: None,
            target_parent: None,
            insertion_index: 0,
            dragged: Vec::new(),
            is_reparent: false,
            reason: Some(reason),
        }
    }

    /// Finalize `preview` using the parents recorded when the drag started.
    pub fn from_preview(preview: &DropPreview, original_parents: &OriginalParents) -> Self {
        let (true, Some(index)) = (preview.is_valid, preview.insertion_index) else {
            return Self::rejected(CommitRejection::InvalidPreview);
        };
        let Some(target) = preview.target_parent_doc.clone() else {
            return Self::rejected(CommitRejection::ReadOnlyTarget);
        };
        if preview.dragged_doc.is_empty() {
            return Self::rejected(CommitRejection::EmptySelection);
        }

        let mut origin: Option<&DocId> = None;
        for d in &preview.dragged_doc {
            let Some(parent) = original_parents.get(d) else {
                return Self::rejected(CommitRejection::MissingOrigin);
            };
            match origin {
                None => origin = Some(parent),
                Some(o) if o != parent => {
                    return Self::rejected(CommitRejection::MultipleOriginParents);
                }
                Some(_) => {}
            }
        }
        let Some(origin) = origin.cloned() else {
            return Self::rejected(CommitRejection::MissingOrigin);
        };

        let is_reparent = origin != target;
        let consistent = match preview.intent {
            DropIntent::Reorder => !is_reparent,
            DropIntent::Reparent => is_reparent,
            DropIntent::None => false,
        };
        if !consistent {
            return Self::rejected(CommitRejection::InconsistentIntent);
        }

        Self {
            can_commit: true,
            origin_parent: Some(origin),
            target_parent: Some(target),
            insertion_index: index,
            dragged: preview.dragged_doc.clone(),
            is_reparent,
            reason: None,
        }
    }

    /// Finalize `preview` and revalidate it against the current document.
    ///
    /// The document may have changed since the preview was computed. Both
    /// parents must still exist, every dragged node must still be a child of
    /// the origin, and the target must not lie inside the selection. The
    /// dragged nodes are re-sorted by their current order and the insertion
    /// index is clamped to the current filtered length.
    pub fn from_preview_in(
        preview: &DropPreview,
        original_parents: &OriginalParents,
        document: &Document,
    ) -> Self {
        let mut plan = Self::from_preview(preview, original_parents);
        if !plan.can_commit {
            return plan;
        }
        let (Some(origin), Some(target)) = (&plan.origin_parent, &plan.target_parent) else {
            return Self::rejected(CommitRejection::MissingOrigin);
        };
        let (Some(_), Some(target_node)) = (document.node(origin), document.node(target)) else {
            return Self::rejected(CommitRejection::MissingParent);
        };
        if target_node.kind != NodeKind::Container {
            return Self::rejected(CommitRejection::NotAContainer);
        }
        if plan.dragged.iter().any(|d| document.parent(d) != Some(origin)) {
            return Self::rejected(CommitRejection::StaleSelection);
        }
        if plan
            .dragged
            .iter()
            .any(|d| document.is_ancestor_or_self(d, target))
        {
            return Self::rejected(CommitRejection::TargetInsideSelection);
        }

        let moved_out = if plan.is_reparent { 0 } else { plan.dragged.len() };
        let filtered_len = target_node.children.len().saturating_sub(moved_out);
        plan.insertion_index = plan.insertion_index.min(filtered_len);
        plan.dragged
            .sort_by_key(|d| document.index_in_parent(d).unwrap_or(usize::MAX));
        plan
    }

    /// The patches that perform this move. Empty when the plan cannot commit.
    pub fn patches(&self) -> Vec<PatchOp> {
        generate(self)
    }
}

/// Turn a plan into patches.
///
/// Every dragged node is first detached from the origin, then attached to the
/// target at consecutive positions starting at the insertion index, in the
/// plan's order. Detaching first means the index addresses the filtered list
/// directly, and the dragged nodes keep their relative order however they
/// were interleaved with their siblings.
pub fn generate(plan: &DropCommitPlan) -> Vec<PatchOp> {
    let (true, Some(origin), Some(target)) =
        (plan.can_commit, &plan.origin_parent, &plan.target_parent)
    else {
        return Vec::new();
    };
    let detaches = plan.dragged.iter().map(|d| PatchOp::DetachChild {
        parent: origin.clone(),
        child: d.clone(),
    });
    let attaches = plan
        .dragged
        .iter()
        .enumerate()
        .map(|(i, d)| PatchOp::AttachChild {
            parent: target.clone(),
            child: d.clone(),
            index: plan.insertion_index + i,
        });
    detaches.chain(attaches).collect()
}
