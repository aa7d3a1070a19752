// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors produced while building a document or applying patches.

use crate::types::{DocId, FrameId};

/// Errors produced while applying a patch (or assembling a document).
///
/// A failed patch never alters the snapshot it was applied to.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    /// Referenced a node that does not exist.
    #[error("missing node: {0}")]
    MissingNode(DocId),
    /// Referenced a frame that does not exist.
    #[error("missing frame: {0}")]
    MissingFrame(FrameId),
    /// Inserted a node whose id is already taken.
    #[error("duplicate node: {0}")]
    DuplicateNode(DocId),
    /// Inserted a frame whose id is already taken.
    #[error("duplicate frame: {0}")]
    DuplicateFrame(FrameId),
    /// Detached a child from a node that is not its parent.
    #[error("{child} is not a child of {parent}")]
    NotAChild {
        /// The supposed parent.
        parent: DocId,
        /// The node that was expected under `parent`.
        child: DocId,
    },
    /// Attached a node that already has a parent.
    #[error("{child} is already attached to {parent}")]
    AlreadyAttached {
        /// The node's current parent.
        parent: DocId,
        /// The node being attached.
        child: DocId,
    },
    /// Attached a node that is the root of a frame.
    #[error("{0} is a frame root and cannot be attached")]
    FrameRoot(DocId),
    /// Attach index past the end of the child list.
    #[error("index {index} out of range for {parent} with {len} children")]
    IndexOutOfRange {
        /// The parent being attached into.
        parent: DocId,
        /// The requested index.
        index: usize,
        /// The current child count.
        len: usize,
    },
    /// Attaching would make a node its own ancestor.
    #[error("attaching {child} under {parent} would create a cycle")]
    WouldCreateCycle {
        /// The prospective parent.
        parent: DocId,
        /// The node being attached.
        child: DocId,
    },
    /// Deleted a node that is still attached to a parent.
    #[error("{0} is still attached; detach it before deleting")]
    StillAttached(DocId),
    /// The parent cannot hold document children (leaf or instance).
    #[error("{0} cannot hold children")]
    NotAContainer(DocId),
    /// A property path was given a value of the wrong type, or a required field was cleared.
    #[error("invalid value for `{path}`")]
    InvalidValue {
        /// The property path.
        path: alloc::string::String,
    },
}
