// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document store with undo/redo and time-windowed coalescing.
//!
//! ## Usage
//!
//! 1) Create a [`DocumentStore`] with an initial [`Document`] and a [`Clock`].
//! 2) Apply batches with [`DocumentStore::apply_patches`]. Pass the same [`GroupId`]
//!    for edits that belong to one gesture (for example every frame of a drag).
//! 3) Call [`DocumentStore::undo`] / [`DocumentStore::redo`].
//!
//! ## Coalescing
//!
//! A batch is merged into the newest undo entry when it carries the same group,
//! arrives within [`HistoryConfig::coalesce_window`] of that entry, the redo stack
//! is empty, and the store has not been sealed since. Merging appends the forward
//! patches and prepends the new inverses, so one undo reverts the whole chain.
//!
//! ```
//! use core::time::Duration;
//! use understory_document::{Document, DocumentStore, ManualClock, Node, PatchOp};
//!
//! let doc = Document::builder()
//!     .node(Node::container("p").with_children(["a", "b"]))
//!     .node(Node::leaf("a"))
//!     .node(Node::leaf("b"))
//!     .build()
//!     .unwrap();
//! let clock = ManualClock::new();
//! let mut store = DocumentStore::new(doc, clock.clone());
//! let drag = store.new_group();
//!
//! store.apply_patches(&[PatchOp::move_node("a", "p", 1)], Some(drag), Some("Move")).unwrap();
//! clock.advance(Duration::from_millis(16));
//! store.apply_patches(&[PatchOp::move_node("a", "p", 0)], Some(drag), None).unwrap();
//! assert_eq!(store.undo_len(), 1);
//!
//! assert!(store.undo().unwrap());
//! assert_eq!(store.document().children(&"p".into())[0].as_str(), "a");
//! ```

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::time::Duration;

use crate::document::Document;
use crate::error::PatchError;
use crate::patch::PatchOp;

/// Identifier of a coalescing group.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub u64);

/// Source of timestamps for coalescing decisions.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin. Must not go backwards.
    fn now(&self) -> Duration;
}

/// Monotonic wall clock.
#[cfg(feature = "std")]
#[derive(Copy, Clone, Debug)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// A clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock advanced by hand. Clones share the same time.
///
/// Useful for tests and for replaying recorded input.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// A clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current time.
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    /// Move the current time forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// History tuning.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum gap between two batches of one group for them to share an entry.
    pub coalesce_window: Duration,
    /// Maximum number of undo entries kept; the oldest are dropped first.
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            coalesce_window: Duration::from_millis(500),
            max_entries: 100,
        }
    }
}

/// One undoable step.
#[derive(Clone, Debug, PartialEq)]
pub struct UndoEntry {
    /// Coalescing group.
    pub group: GroupId,
    /// Forward patches, in application order.
    pub forward: Vec<PatchOp>,
    /// Inverse patches, in replay order (reverse of `forward`).
    pub inverse: Vec<PatchOp>,
    /// Time of the most recent batch merged into this entry.
    pub timestamp: Duration,
    /// Optional human-readable label ("Move", "Reorder", ...).
    pub label: Option<Arc<str>>,
}

/// Owns the current [`Document`] snapshot and its undo/redo stacks.
///
/// Single-threaded by construction: the stacks are only ever mutated through
/// `&mut self`.
pub struct DocumentStore<C: Clock> {
    document: Document,
    undo: VecDeque<UndoEntry>,
    redo: Vec<UndoEntry>,
    config: HistoryConfig,
    clock: C,
    next_group: u64,
    sealed: bool,
}

impl<C: Clock> core::fmt::Debug for DocumentStore<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("document", &self.document)
            .field("undo", &self.undo.len())
            .field("redo", &self.redo.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<C: Clock> DocumentStore<C> {
    /// Create a store with the default [`HistoryConfig`].
    pub fn new(document: Document, clock: C) -> Self {
        Self::with_config(document, clock, HistoryConfig::default())
    }

    /// Create a store with explicit history tuning.
    pub fn with_config(document: Document, clock: C, config: HistoryConfig) -> Self {
        Self {
            document,
            undo: VecDeque::new(),
            redo: Vec::new(),
            config,
            clock,
            next_group: 0,
            sealed: false,
        }
    }

    /// The current snapshot.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// History tuning in effect.
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// The clock used for coalescing.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Allocate a fresh coalescing group.
    pub fn new_group(&mut self) -> GroupId {
        self.next_group += 1;
        GroupId(self.next_group)
    }

    /// Apply a batch and record it for undo.
    ///
    /// Without a `group`, the batch gets a fresh group and therefore never
    /// coalesces. An empty batch is a no-op and records nothing. On error the
    /// store is unchanged.
    pub fn apply_patches(
        &mut self,
        ops: &[PatchOp],
        group: Option<GroupId>,
        label: Option<&str>,
    ) -> Result<(), PatchError> {
        if ops.is_empty() {
            return Ok(());
        }
        let applied = self.document.apply_batch(ops)?;
        let now = self.clock.now();
        let group = match group {
            Some(g) => g,
            None => self.new_group(),
        };
        self.document = applied.document;

        let window = self.config.coalesce_window;
        let mergeable = !self.sealed && self.redo.is_empty();
        self.sealed = false;

        if mergeable
            && let Some(entry) = self.undo.back_mut()
            && entry.group == group
            && now.saturating_sub(entry.timestamp) <= window
        {
            entry.forward.extend_from_slice(ops);
            let mut inverse = applied.inverse;
            inverse.append(&mut entry.inverse);
            entry.inverse = inverse;
            entry.timestamp = now;
            if entry.label.is_none() {
                entry.label = label.map(Arc::from);
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(group = group.0, ops = entry.forward.len(), "coalesced undo entry");
            return Ok(());
        }

        self.redo.clear();
        self.undo.push_back(UndoEntry {
            group,
            forward: ops.to_vec(),
            inverse: applied.inverse,
            timestamp: now,
            label: label.map(Arc::from),
        });
        self.truncate();
        #[cfg(feature = "tracing")]
        tracing::debug!(group = group.0, ops = ops.len(), "new undo entry");
        Ok(())
    }

    /// Revert the newest entry. Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool, PatchError> {
        let Some(entry) = self.undo.pop_back() else {
            return Ok(false);
        };
        match self.document.apply_all(&entry.inverse) {
            Ok(document) => {
                self.document = document;
                #[cfg(feature = "tracing")]
                tracing::debug!(group = entry.group.0, "undo");
                self.redo.push(entry);
                self.sealed = true;
                Ok(true)
            }
            Err(err) => {
                self.undo.push_back(entry);
                Err(err)
            }
        }
    }

    /// Re-apply the most recently undone entry. Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> Result<bool, PatchError> {
        let Some(entry) = self.redo.pop() else {
            return Ok(false);
        };
        match self.document.apply_all(&entry.forward) {
            Ok(document) => {
                self.document = document;
                #[cfg(feature = "tracing")]
                tracing::debug!(group = entry.group.0, "redo");
                self.undo.push_back(entry);
                self.truncate();
                self.sealed = true;
                Ok(true)
            }
            Err(err) => {
                self.redo.push(entry);
                Err(err)
            }
        }
    }

    /// Stop the next batch from merging into the newest entry, whatever its group.
    ///
    /// Call this when a gesture ends so that a quick follow-up gesture reusing
    /// the same group still gets its own entry.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Install a new baseline document, discarding both stacks.
    pub fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.undo.clear();
        self.redo.clear();
        self.sealed = true;
        #[cfg(feature = "tracing")]
        tracing::debug!("document replaced; history cleared");
    }

    /// Returns true if [`undo`](Self::undo) has something to revert.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Returns true if [`redo`](Self::redo) has something to re-apply.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of undo entries.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of redo entries.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Label of the entry [`undo`](Self::undo) would revert.
    pub fn undo_label(&self) -> Option<&str> {
        self.undo.back().and_then(|e| e.label.as_deref())
    }

    /// Label of the entry [`redo`](Self::redo) would re-apply.
    pub fn redo_label(&self) -> Option<&str> {
        self.redo.last().and_then(|e| e.label.as_deref())
    }

    /// Undo entries, oldest first.
    pub fn undo_entries(&self) -> impl Iterator<Item = &UndoEntry> + '_ {
        self.undo.iter()
    }

    fn truncate(&mut self) {
        while self.undo.len() > self.config.max_entries {
            self.undo.pop_front();
            #[cfg(feature = "tracing")]
            tracing::trace!(max = self.config.max_entries, "dropped oldest undo entry");
        }
    }
}
