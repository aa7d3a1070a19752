// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identity lookups between occurrences and document nodes.
//!
//! Geometric decisions are made on [`ExpandedId`]s; [`DocId`]s are looked up
//! only where an edit has to be named. One document id may map to several
//! occurrences (every instance of a definition), so the reverse direction is
//! one-to-many and never collapses to an arbitrary pick.

use alloc::vec::Vec;

use hashbrown::HashMap;
use understory_document::{AutoLayout, DocId, FrameId, NodeKind};

use crate::scene::ExpandedScene;
use crate::types::ExpandedId;

#[derive(Clone, Debug)]
struct Entry {
    frame: FrameId,
    source: DocId,
    doc_id: Option<DocId>,
    parent: Option<ExpandedId>,
    children: Vec<ExpandedId>,
    kind: NodeKind,
    layout: Option<AutoLayout>,
}

/// Read-only identity maps built once per compiled scene.
#[derive(Clone, Debug, Default)]
pub struct IdentityLookups {
    entries: HashMap<ExpandedId, Entry>,
    by_doc: HashMap<DocId, Vec<ExpandedId>>,
}

impl IdentityLookups {
    /// Build the maps from `scene`. Rebuild whenever the scene recompiles.
    pub fn build(scene: &ExpandedScene) -> Self {
        let mut entries = HashMap::with_capacity(scene.len());
        let mut by_doc: HashMap<DocId, Vec<ExpandedId>> = HashMap::new();
        for node in scene.nodes() {
            by_doc
                .entry(node.source.clone())
                .or_default()
                .push(node.id.clone());
            entries.insert(
                node.id.clone(),
                Entry {
                    frame: node.frame.clone(),
                    source: node.source.clone(),
                    doc_id: node.doc_id.clone(),
                    parent: node.parent.clone(),
                    children: node.children.clone(),
                    kind: node.kind.clone(),
                    layout: node.layout,
                },
            );
        }
        Self { entries, by_doc }
    }

    /// Returns true if `id` is known.
    pub fn contains(&self, id: &ExpandedId) -> bool {
        self.entries.contains_key(id)
    }

    /// Patchable document id of an occurrence; `None` if unknown or read-only.
    pub fn doc_id(&self, id: &ExpandedId) -> Option<&DocId> {
        self.entries.get(id)?.doc_id.as_ref()
    }

    /// Every occurrence expanded from `doc`, in paint order.
    ///
    /// A definition node yields one occurrence per instance. Whether an
    /// occurrence can be edited is a separate question, see [`Self::doc_id`].
    pub fn expanded_ids(&self, doc: &DocId) -> &[ExpandedId] {
        self.by_doc.get(doc).map_or(&[], Vec::as_slice)
    }

    /// The occurrence that edits to `doc` address, if `doc` is rendered
    /// outside any instance interior.
    pub fn patchable_id(&self, doc: &DocId) -> Option<&ExpandedId> {
        self.expanded_ids(doc)
            .iter()
            .find(|id| self.doc_id(id) == Some(doc))
    }

    /// Parent occurrence.
    pub fn parent(&self, id: &ExpandedId) -> Option<&ExpandedId> {
        self.entries.get(id)?.parent.as_ref()
    }

    /// Child occurrences in document order.
    pub fn children(&self, id: &ExpandedId) -> &[ExpandedId] {
        self.entries.get(id).map_or(&[], |e| e.children.as_slice())
    }

    /// Document node the occurrence was expanded from.
    pub fn source(&self, id: &ExpandedId) -> Option<&DocId> {
        self.entries.get(id).map(|e| &e.source)
    }

    /// Frame the occurrence belongs to.
    pub fn frame(&self, id: &ExpandedId) -> Option<&FrameId> {
        self.entries.get(id).map(|e| &e.frame)
    }

    /// Kind of the occurrence's source node.
    pub fn kind(&self, id: &ExpandedId) -> Option<&NodeKind> {
        self.entries.get(id).map(|e| &e.kind)
    }

    /// Returns true if `id` can receive dropped children: a container with
    /// an auto-layout descriptor. Instances never qualify, since their
    /// rendered children belong to the definition.
    pub fn is_layout_container(&self, id: &ExpandedId) -> bool {
        self.entries
            .get(id)
            .is_some_and(|e| e.kind == NodeKind::Container && e.layout.is_some())
    }

    /// Auto-layout descriptor of the occurrence's source node.
    pub fn layout(&self, id: &ExpandedId) -> Option<&AutoLayout> {
        self.entries.get(id)?.layout.as_ref()
    }

    /// Strict ancestors of `id`, nearest first.
    pub fn ancestors<'a>(&'a self, id: &ExpandedId) -> impl Iterator<Item = &'a ExpandedId> + 'a {
        let mut cur = self.parent(id);
        core::iter::from_fn(move || {
            let next = cur?;
            cur = self.parent(next);
            Some(next)
        })
    }

    /// Nearest of `id` and its ancestors satisfying `pred`.
    ///
    /// The walk is lazy and stops at the first match or at the frame root.
    pub fn find_ancestor<'a>(
        &'a self,
        id: &ExpandedId,
        mut pred: impl FnMut(&ExpandedId) -> bool,
    ) -> Option<&'a ExpandedId> {
        let (own, _) = self.entries.get_key_value(id)?;
        if pred(own) {
            return Some(own);
        }
        self.ancestors(id).find(|a| pred(a))
    }

    /// Returns true if `ancestor` is a strict ancestor of `id`.
    pub fn is_descendant_of(&self, id: &ExpandedId, ancestor: &ExpandedId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// `root` and every occurrence below it, in pre-order.
    pub fn subtree(&self, root: &ExpandedId) -> Vec<ExpandedId> {
        let mut out = Vec::new();
        if !self.contains(root) {
            return out;
        }
        let mut stack = alloc::vec![root.clone()];
        while let Some(id) = stack.pop() {
            stack.extend(self.children(&id).iter().rev().cloned());
            out.push(id);
        }
        out
    }
}
