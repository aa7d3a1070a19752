// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The immutable document snapshot and its builder.

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::error::PatchError;
use crate::types::{Component, ComponentId, DocId, Frame, FrameId, Node, NodeKind};

/// An immutable snapshot of the document.
///
/// Cloning is cheap: node, frame, and component maps are shared behind [`Arc`]s.
/// Every edit goes through [`Document::apply`] with a [`PatchOp`](crate::PatchOp) and produces a new
/// snapshot; maps are copied only when they change and node records only when
/// they are touched, so unchanged records stay shared between snapshots.
///
/// The snapshot also carries a parent index (`child → parent`) so that inverse
/// patches can be derived without scanning the tree.
#[derive(Clone, Default, PartialEq)]
pub struct Document {
    pub(crate) nodes: Arc<HashMap<DocId, Arc<Node>>>,
    pub(crate) parents: Arc<HashMap<DocId, DocId>>,
    pub(crate) frames: Arc<BTreeMap<FrameId, Arc<Frame>>>,
    pub(crate) components: Arc<BTreeMap<ComponentId, Component>>,
}

impl core::fmt::Debug for Document {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("frames", &self.frames.len())
            .field("components", &self.components.len())
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start assembling a document.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    /// Number of nodes (attached or not).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the document has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node.
    pub fn node(&self, id: &DocId) -> Option<&Node> {
        self.nodes.get(id).map(|n| &**n)
    }

    /// Returns true if `id` names a node.
    pub fn contains(&self, id: &DocId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterate all nodes in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values().map(|n| &**n)
    }

    /// Ordered children of `id`; empty for unknown ids.
    pub fn children(&self, id: &DocId) -> &[DocId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Parent of `id`, if attached.
    pub fn parent(&self, id: &DocId) -> Option<&DocId> {
        self.parents.get(id)
    }

    /// Position of `id` within its parent's child list.
    pub fn index_in_parent(&self, id: &DocId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|c| c == id)
    }

    /// Returns true if `ancestor` is `id` itself or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: &DocId, id: &DocId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.parent(c);
        }
        false
    }

    /// Look up a frame.
    pub fn frame(&self, id: &FrameId) -> Option<&Frame> {
        self.frames.get(id).map(|f| &**f)
    }

    /// Iterate frames ordered by id.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> + '_ {
        self.frames.values().map(|f| &**f)
    }

    /// The frame whose root is `id`, if any.
    pub fn frame_with_root(&self, id: &DocId) -> Option<&Frame> {
        self.frames().find(|f| &f.root == id)
    }

    /// Look up a component definition.
    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.components.get(id)
    }

    /// Iterate component definitions ordered by id.
    pub fn components(&self) -> impl Iterator<Item = &Component> + '_ {
        self.components.values()
    }

    // --- copy-on-write internals used by the patch engine ---

    pub(crate) fn node_mut(&mut self, id: &DocId) -> Result<&mut Node, PatchError> {
        let nodes = Arc::make_mut(&mut self.nodes);
        nodes
            .get_mut(id)
            .map(Arc::make_mut)
            .ok_or_else(|| PatchError::MissingNode(id.clone()))
    }

    pub(crate) fn require_node(&self, id: &DocId) -> Result<&Node, PatchError> {
        self.node(id)
            .ok_or_else(|| PatchError::MissingNode(id.clone()))
    }

    pub(crate) fn require_frame(&self, id: &FrameId) -> Result<&Frame, PatchError> {
        self.frame(id)
            .ok_or_else(|| PatchError::MissingFrame(id.clone()))
    }

    pub(crate) fn frame_mut(&mut self, id: &FrameId) -> Result<&mut Frame, PatchError> {
        Arc::make_mut(&mut self.frames)
            .get_mut(id)
            .map(Arc::make_mut)
            .ok_or_else(|| PatchError::MissingFrame(id.clone()))
    }

    pub(crate) fn link(&mut self, parent: &DocId, child: &DocId) {
        Arc::make_mut(&mut self.parents).insert(child.clone(), parent.clone());
    }

    pub(crate) fn unlink(&mut self, child: &DocId) {
        Arc::make_mut(&mut self.parents).remove(child);
    }

    pub(crate) fn put_node(&mut self, node: Node) {
        Arc::make_mut(&mut self.nodes).insert(node.id.clone(), Arc::new(node));
    }

    pub(crate) fn take_node(&mut self, id: &DocId) -> Option<Arc<Node>> {
        Arc::make_mut(&mut self.nodes).remove(id)
    }

    pub(crate) fn put_frame(&mut self, frame: Frame) {
        Arc::make_mut(&mut self.frames).insert(frame.id.clone(), Arc::new(frame));
    }

    pub(crate) fn take_frame(&mut self, id: &FrameId) -> Option<Arc<Frame>> {
        Arc::make_mut(&mut self.frames).remove(id)
    }
}

/// Assembles and validates a [`Document`].
///
/// ```
/// use understory_document::{Axis, AutoLayout, Document, Frame, Node};
/// use kurbo::{Point, Size};
///
/// let doc = Document::builder()
///     .node(Node::container("root").with_layout(AutoLayout::new(Axis::Vertical)).with_children(["a"]))
///     .node(Node::leaf("a"))
///     .frame(Frame::new("f", "root", Point::ZERO, Size::new(100.0, 100.0)))
///     .build()
///     .unwrap();
/// assert_eq!(doc.parent(&"a".into()), Some(&"root".into()));
/// ```
#[derive(Clone, Debug, Default)]
pub struct DocumentBuilder {
    nodes: Vec<Node>,
    frames: Vec<Frame>,
    components: Vec<Component>,
}

impl DocumentBuilder {
    /// Add a node.
    #[must_use]
    pub fn node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Add several nodes.
    #[must_use]
    pub fn nodes(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    /// Add a frame.
    #[must_use]
    pub fn frame(mut self, frame: Frame) -> Self {
        self.frames.push(frame);
        self
    }

    /// Add a component definition.
    #[must_use]
    pub fn component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Validate and freeze the document.
    ///
    /// Fails on duplicate ids, dangling child/root references, nodes with two
    /// parents, children under leaves or instances, attached frame roots, and cycles.
    pub fn build(self) -> Result<Document, PatchError> {
        let mut nodes: HashMap<DocId, Arc<Node>> = HashMap::with_capacity(self.nodes.len());
        for node in self.nodes {
            if nodes.contains_key(&node.id) {
                return Err(PatchError::DuplicateNode(node.id));
            }
            nodes.insert(node.id.clone(), Arc::new(node));
        }

        let mut parents: HashMap<DocId, DocId> = HashMap::new();
        for node in nodes.values() {
            if !node.children.is_empty() && node.kind != NodeKind::Container {
                return Err(PatchError::NotAContainer(node.id.clone()));
            }
            for child in &node.children {
                if !nodes.contains_key(child) {
                    return Err(PatchError::MissingNode(child.clone()));
                }
                if let Some(prev) = parents.insert(child.clone(), node.id.clone()) {
                    return Err(PatchError::AlreadyAttached {
                        parent: prev,
                        child: child.clone(),
                    });
                }
            }
        }

        // With single parents, a cycle shows up as a parent walk longer than the node count.
        for id in nodes.keys() {
            let mut cur = parents.get(id);
            let mut steps = 0;
            while let Some(p) = cur {
                steps += 1;
                if steps > nodes.len() {
                    return Err(PatchError::WouldCreateCycle {
                        parent: p.clone(),
                        child: id.clone(),
                    });
                }
                cur = parents.get(p);
            }
        }

        let mut frames = BTreeMap::new();
        for frame in self.frames {
            if !nodes.contains_key(&frame.root) {
                return Err(PatchError::MissingNode(frame.root));
            }
            if parents.contains_key(&frame.root) {
                return Err(PatchError::FrameRoot(frame.root));
            }
            if frames.contains_key(&frame.id) {
                return Err(PatchError::DuplicateFrame(frame.id));
            }
            frames.insert(frame.id.clone(), Arc::new(frame));
        }

        let mut components = BTreeMap::new();
        for component in self.components {
            if !nodes.contains_key(&component.root) {
                return Err(PatchError::MissingNode(component.root));
            }
            components.insert(component.id.clone(), component);
        }

        Ok(Document {
            nodes: Arc::new(nodes),
            parents: Arc::new(parents),
            frames: Arc::new(frames),
            components: Arc::new(components),
        })
    }
}
