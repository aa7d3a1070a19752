// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene compilation: expanding frame trees and component instances into occurrences.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use understory_document::{ComponentId, DocId, Document, FrameId, NodeKind};

use crate::types::{ExpandedId, ExpandedNode, SceneFlags};

/// Per-document materialization with one node per on-screen occurrence.
///
/// Compiled from a [`Document`] with [`ExpandedScene::compile`]. Structure is
/// fixed after compilation; only bounds and flags may be updated, since those
/// come from the layout pass rather than the document.
#[derive(Clone, Default)]
pub struct ExpandedScene {
    nodes: HashMap<ExpandedId, ExpandedNode>,
    paint_order: BTreeMap<FrameId, Vec<ExpandedId>>,
    roots: BTreeMap<FrameId, ExpandedId>,
    origins: BTreeMap<FrameId, Point>,
}

impl core::fmt::Debug for ExpandedScene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let with_bounds = self.nodes.values().filter(|n| n.bounds.is_some()).count();
        f.debug_struct("ExpandedScene")
            .field("nodes", &self.nodes.len())
            .field("with_bounds", &with_bounds)
            .field("frames", &self.roots.len())
            .finish_non_exhaustive()
    }
}

impl ExpandedScene {
    /// Expand every frame tree of `document`, inlining component definitions
    /// under each instance node.
    ///
    /// Missing components expand to an empty instance; a component that
    /// (directly or indirectly) instantiates itself is not expanded again.
    pub fn compile(document: &Document) -> Self {
        let mut scene = Self::default();
        for frame in document.frames() {
            let root = ExpandedId::from(&frame.root);
            let mut order = Vec::new();
            let mut cx = Expansion {
                document,
                frame: &frame.id,
                nodes: &mut scene.nodes,
                order: &mut order,
                active: Vec::new(),
            };
            if cx.expand(&frame.root, root.clone(), None, None) {
                scene.roots.insert(frame.id.clone(), root);
            }
            scene.paint_order.insert(frame.id.clone(), order);
            scene.origins.insert(frame.id.clone(), frame.origin);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            nodes = scene.nodes.len(),
            frames = scene.roots.len(),
            "compiled expanded scene"
        );
        scene
    }

    /// Number of occurrences.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the scene has no occurrences.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up an occurrence.
    pub fn node(&self, id: &ExpandedId) -> Option<&ExpandedNode> {
        self.nodes.get(id)
    }

    /// Returns true if `id` is an occurrence in this scene.
    pub fn contains(&self, id: &ExpandedId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Frames in id order.
    pub fn frames(&self) -> impl Iterator<Item = &FrameId> + '_ {
        self.paint_order.keys()
    }

    /// Root occurrence of `frame`.
    pub fn root(&self, frame: &FrameId) -> Option<&ExpandedId> {
        self.roots.get(frame)
    }

    /// Occurrences of `frame` in paint order (back to front): parents before
    /// children, earlier siblings before later ones.
    pub fn paint_order(&self, frame: &FrameId) -> &[ExpandedId] {
        self.paint_order.get(frame).map_or(&[], Vec::as_slice)
    }

    /// All occurrences, frame by frame in paint order.
    pub fn nodes(&self) -> impl Iterator<Item = &ExpandedNode> + '_ {
        self.paint_order
            .values()
            .flatten()
            .filter_map(|id| self.nodes.get(id))
    }

    /// World-space position of `frame`.
    pub fn frame_origin(&self, frame: &FrameId) -> Option<Point> {
        self.origins.get(frame).copied()
    }

    /// Set the frame-local bounds of an occurrence. Returns false if `id` is unknown.
    pub fn set_bounds(&mut self, id: &ExpandedId, bounds: Rect) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.bounds = Some(bounds);
                true
            }
            None => false,
        }
    }

    /// Set the flags of an occurrence. Returns false if `id` is unknown.
    ///
    /// [`SceneFlags::READ_ONLY`] is derived from the document and is preserved.
    pub fn set_flags(&mut self, id: &ExpandedId, flags: SceneFlags) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                let read_only = node.flags & SceneFlags::READ_ONLY;
                node.flags = (flags - SceneFlags::READ_ONLY) | read_only;
                true
            }
            None => false,
        }
    }

    /// Bounds of an occurrence in world space.
    pub fn world_bounds(&self, id: &ExpandedId) -> Option<Rect> {
        let node = self.nodes.get(id)?;
        let origin = self.frame_origin(&node.frame)?;
        Some(node.bounds? + origin.to_vec2())
    }
}

struct Expansion<'a> {
    document: &'a Document,
    frame: &'a FrameId,
    nodes: &'a mut HashMap<ExpandedId, ExpandedNode>,
    order: &'a mut Vec<ExpandedId>,
    // Components currently being expanded, outermost first.
    active: Vec<ComponentId>,
}

impl Expansion<'_> {
    /// Expand `source` as occurrence `id`. `prefix` is the enclosing instance
    /// occurrence when inside an instance interior.
    fn expand(
        &mut self,
        source: &DocId,
        id: ExpandedId,
        parent: Option<ExpandedId>,
        prefix: Option<&ExpandedId>,
    ) -> bool {
        let document = self.document;
        let Some(node) = document.node(source) else {
            return false;
        };
        self.order.push(id.clone());

        let mut children = Vec::new();
        match &node.kind {
            NodeKind::Instance(component) => {
                if self.active.contains(component) {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(%component, instance = %id, "recursive component not expanded");
                } else if let Some(def) = document.component(component) {
                    self.active.push(component.clone());
                    let child = ExpandedId::nested(&id, &def.root);
                    if self.expand(&def.root, child.clone(), Some(id.clone()), Some(&id)) {
                        children.push(child);
                    }
                    self.active.pop();
                }
            }
            NodeKind::Container | NodeKind::Leaf => {
                for c in &node.children {
                    let child = match prefix {
                        Some(p) => ExpandedId::nested(p, c),
                        None => ExpandedId::from(c),
                    };
                    if self.expand(c, child.clone(), Some(id.clone()), prefix) {
                        children.push(child);
                    }
                }
            }
        }

        let interior = prefix.is_some();
        let flags = if interior {
            SceneFlags::default() | SceneFlags::READ_ONLY
        } else {
            SceneFlags::default()
        };
        self.nodes.insert(
            id.clone(),
            ExpandedNode {
                id,
                frame: self.frame.clone(),
                source: source.clone(),
                doc_id: (!interior).then(|| source.clone()),
                parent,
                children,
                kind: node.kind.clone(),
                layout: node.layout,
                flags,
                bounds: None,
            },
        );
        true
    }
}
