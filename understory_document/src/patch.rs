// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Atomic structural patches: application and inversion.
//!
//! ## Inversion needs the pre-patch state
//!
//! The inverse of a patch can only be derived from the snapshot it is about to
//! be applied to: restoring a property needs the old value, re-attaching a
//! detached child needs its old index, undoing a move needs the old parent.
//! [`Document::inverse_of`] therefore reads the receiver as the pre-patch state,
//! and [`Document::apply_batch`] walks a batch on a scratch snapshot, deriving
//! each inverse immediately before its forward patch is applied.
//!
//! | Forward | Inverse |
//! |---|---|
//! | `SetNodeProperty` / `SetFrameProperty` | same path, old value |
//! | `InsertNode` | `DeleteNode` |
//! | `DeleteNode` | `InsertNode` with the full prior record |
//! | `AttachChild` | `DetachChild` |
//! | `DetachChild` | `AttachChild` at the pre-detach index |
//! | `MoveNode` | `MoveNode` back to the prior parent and index |
//! | `ReplaceNode` | `ReplaceNode` with the prior record |
//! | `InsertFrame` / `RemoveFrame` | each other, with the full prior frame |

use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::document::Document;
use crate::error::PatchError;
use crate::types::{DocId, Frame, FrameId, Node, NodeKind, Value};

/// Node property path addressing [`Node::layout`].
pub const LAYOUT_PATH: &str = "layout";
/// Frame property path addressing [`Frame::name`] (a [`Value::Text`]).
pub const NAME_PATH: &str = "name";
/// Frame property path addressing [`Frame::origin`] (a [`Value::Point`]).
pub const ORIGIN_PATH: &str = "origin";
/// Frame property path addressing [`Frame::size`] (a [`Value::Size`]).
pub const SIZE_PATH: &str = "size";

/// One atomic structural edit.
#[derive(Clone, Debug, PartialEq)]
pub enum PatchOp {
    /// Set (or, with `None`, clear) a node property.
    SetNodeProperty {
        /// Target node.
        node: DocId,
        /// Property path; [`LAYOUT_PATH`] addresses the auto-layout descriptor.
        path: Arc<str>,
        /// New value.
        value: Option<Value>,
    },
    /// Set (or, with `None`, clear) a frame property.
    SetFrameProperty {
        /// Target frame.
        frame: FrameId,
        /// Property path; [`NAME_PATH`], [`ORIGIN_PATH`] and [`SIZE_PATH`] address typed fields.
        path: Arc<str>,
        /// New value.
        value: Option<Value>,
    },
    /// Insert a detached node. Listed children must exist and be detached.
    InsertNode {
        /// The full node record.
        node: Node,
    },
    /// Delete a detached node. Its children become detached.
    DeleteNode {
        /// Node to delete.
        node: DocId,
    },
    /// Attach a detached node under `parent` at `index`.
    AttachChild {
        /// New parent.
        parent: DocId,
        /// Node to attach.
        child: DocId,
        /// Position in the parent's child list.
        index: usize,
    },
    /// Detach `child` from `parent`.
    DetachChild {
        /// Current parent.
        parent: DocId,
        /// Node to detach.
        child: DocId,
    },
    /// Detach `node` from its current parent (if any) and attach it under
    /// `parent` at `index`, counted in the list without `node`.
    MoveNode {
        /// Node to move.
        node: DocId,
        /// New parent.
        parent: DocId,
        /// Position in the new parent's child list.
        index: usize,
    },
    /// Replace a node record wholesale.
    ReplaceNode {
        /// The new record; its id names the node being replaced.
        node: Node,
    },
    /// Insert a frame.
    InsertFrame {
        /// The full frame record.
        frame: Frame,
    },
    /// Remove a frame. Its root node stays in the document.
    RemoveFrame {
        /// Frame to remove.
        frame: FrameId,
    },
}

impl PatchOp {
    /// Shorthand for [`PatchOp::SetNodeProperty`].
    pub fn set_node_property(node: impl Into<DocId>, path: &str, value: Option<Value>) -> Self {
        Self::SetNodeProperty {
            node: node.into(),
            path: Arc::from(path),
            value,
        }
    }

    /// Shorthand for [`PatchOp::SetFrameProperty`].
    pub fn set_frame_property(frame: impl Into<FrameId>, path: &str, value: Option<Value>) -> Self {
        Self::SetFrameProperty {
            frame: frame.into(),
            path: Arc::from(path),
            value,
        }
    }

    /// Shorthand for [`PatchOp::AttachChild`].
    pub fn attach(parent: impl Into<DocId>, child: impl Into<DocId>, index: usize) -> Self {
        Self::AttachChild {
            parent: parent.into(),
            child: child.into(),
            index,
        }
    }

    /// Shorthand for [`PatchOp::DetachChild`].
    pub fn detach(parent: impl Into<DocId>, child: impl Into<DocId>) -> Self {
        Self::DetachChild {
            parent: parent.into(),
            child: child.into(),
        }
    }

    /// Shorthand for [`PatchOp::MoveNode`].
    pub fn move_node(node: impl Into<DocId>, parent: impl Into<DocId>, index: usize) -> Self {
        Self::MoveNode {
            node: node.into(),
            parent: parent.into(),
            index,
        }
    }
}

/// Result of [`Document::apply_batch`].
#[derive(Clone, Debug)]
pub struct AppliedBatch {
    /// The snapshot after every patch in the batch.
    pub document: Document,
    /// Patches that undo the batch, in replay order (inverse of the last patch first).
    pub inverse: Vec<PatchOp>,
}

impl Document {
    /// Apply one patch, returning the new snapshot. `self` is left untouched.
    pub fn apply(&self, op: &PatchOp) -> Result<Self, PatchError> {
        let mut next = self.clone();
        next.apply_in_place(op)?;
        Ok(next)
    }

    /// Apply a batch atomically and collect its inverse.
    ///
    /// Either every patch applies and the resulting snapshot is returned, or
    /// the first failure is returned and nothing is published.
    pub fn apply_batch(&self, ops: &[PatchOp]) -> Result<AppliedBatch, PatchError> {
        let mut next = self.clone();
        let mut inverse = Vec::with_capacity(ops.len());
        for op in ops {
            inverse.push(next.inverse_of(op)?);
            next.apply_in_place(op)?;
        }
        inverse.reverse();
        Ok(AppliedBatch {
            document: next,
            inverse,
        })
    }

    /// Apply a batch atomically without deriving inverses.
    pub fn apply_all(&self, ops: &[PatchOp]) -> Result<Self, PatchError> {
        let mut next = self.clone();
        for op in ops {
            next.apply_in_place(op)?;
        }
        Ok(next)
    }

    /// Derive the patch that undoes `op`, treating `self` as the pre-patch state.
    ///
    /// # Panics
    ///
    /// Panics if `op` moves a node that has no parent (a frame root or a detached
    /// node): such a move has no prior position to return to, and only attached
    /// nodes may be moved.
    pub fn inverse_of(&self, op: &PatchOp) -> Result<PatchOp, PatchError> {
        Ok(match op {
            PatchOp::SetNodeProperty { node, path, .. } => {
                let n = self.require_node(node)?;
                let old = if &**path == LAYOUT_PATH {
                    n.layout.map(Value::Layout)
                } else {
                    n.properties.get(path).cloned()
                };
                PatchOp::SetNodeProperty {
                    node: node.clone(),
                    path: path.clone(),
                    value: old,
                }
            }
            PatchOp::SetFrameProperty { frame, path, .. } => {
                let f = self.require_frame(frame)?;
                let old = match &**path {
                    NAME_PATH => Some(Value::Text(f.name.clone())),
                    ORIGIN_PATH => Some(Value::Point(f.origin)),
                    SIZE_PATH => Some(Value::Size(f.size)),
                    _ => f.properties.get(path).cloned(),
                };
                PatchOp::SetFrameProperty {
                    frame: frame.clone(),
                    path: path.clone(),
                    value: old,
                }
            }
            PatchOp::InsertNode { node } => PatchOp::DeleteNode {
                node: node.id.clone(),
            },
            PatchOp::DeleteNode { node } => PatchOp::InsertNode {
                node: self.require_node(node)?.clone(),
            },
            PatchOp::AttachChild { parent, child, .. } => PatchOp::DetachChild {
                parent: parent.clone(),
                child: child.clone(),
            },
            PatchOp::DetachChild { parent, child } => {
                let index = self
                    .require_node(parent)?
                    .children
                    .iter()
                    .position(|c| c == child)
                    .ok_or_else(|| PatchError::NotAChild {
                        parent: parent.clone(),
                        child: child.clone(),
                    })?;
                PatchOp::AttachChild {
                    parent: parent.clone(),
                    child: child.clone(),
                    index,
                }
            }
            PatchOp::MoveNode { node, .. } => {
                self.require_node(node)?;
                let Some(parent) = self.parent(node) else {
                    panic!("cannot invert a move of {node}: it has no prior parent");
                };
                let index = self
                    .index_in_parent(node)
                    .expect("parent index and child list disagree");
                PatchOp::MoveNode {
                    node: node.clone(),
                    parent: parent.clone(),
                    index,
                }
            }
            PatchOp::ReplaceNode { node } => PatchOp::ReplaceNode {
                node: self.require_node(&node.id)?.clone(),
            },
            PatchOp::InsertFrame { frame } => PatchOp::RemoveFrame {
                frame: frame.id.clone(),
            },
            PatchOp::RemoveFrame { frame } => PatchOp::InsertFrame {
                frame: self.require_frame(frame)?.clone(),
            },
        })
    }

    /// Apply `op` to this (already cloned) snapshot. Validation happens before
    /// any mutation, so a failed patch leaves `self` unchanged.
    pub(crate) fn apply_in_place(&mut self, op: &PatchOp) -> Result<(), PatchError> {
        match op {
            PatchOp::SetNodeProperty { node, path, value } => {
                self.require_node(node)?;
                if &**path == LAYOUT_PATH {
                    let layout = match value {
                        None => None,
                        Some(Value::Layout(l)) => Some(*l),
                        Some(_) => return Err(invalid(path)),
                    };
                    self.node_mut(node)?.layout = layout;
                } else {
                    let n = self.node_mut(node)?;
                    match value {
                        Some(v) => {
                            n.properties.insert(path.clone(), v.clone());
                        }
                        None => {
                            n.properties.remove(path);
                        }
                    }
                }
            }
            PatchOp::SetFrameProperty { frame, path, value } => {
                self.require_frame(frame)?;
                match (&**path, value) {
                    (NAME_PATH, Some(Value::Text(t))) => self.frame_mut(frame)?.name = t.clone(),
                    (ORIGIN_PATH, Some(Value::Point(p))) => self.frame_mut(frame)?.origin = *p,
                    (SIZE_PATH, Some(Value::Size(s))) => self.frame_mut(frame)?.size = *s,
                    (NAME_PATH | ORIGIN_PATH | SIZE_PATH, _) => return Err(invalid(path)),
                    (_, Some(v)) => {
                        self.frame_mut(frame)?
                            .properties
                            .insert(path.clone(), v.clone());
                    }
                    (_, None) => {
                        self.frame_mut(frame)?.properties.remove(path);
                    }
                }
            }
            PatchOp::InsertNode { node } => {
                if self.contains(&node.id) {
                    return Err(PatchError::DuplicateNode(node.id.clone()));
                }
                if !node.children.is_empty() && node.kind != NodeKind::Container {
                    return Err(PatchError::NotAContainer(node.id.clone()));
                }
                distinct_children(node)?;
                for child in &node.children {
                    self.check_attachable(child)?;
                }
                for child in &node.children {
                    self.link(&node.id, child);
                }
                self.put_node(node.clone());
            }
            PatchOp::DeleteNode { node } => {
                let children = self.require_node(node)?.children.clone();
                if self.parent(node).is_some() {
                    return Err(PatchError::StillAttached(node.clone()));
                }
                if self.frame_with_root(node).is_some() {
                    return Err(PatchError::FrameRoot(node.clone()));
                }
                for child in &children {
                    self.unlink(child);
                }
                self.take_node(node);
            }
            PatchOp::AttachChild {
                parent,
                child,
                index,
            } => {
                let len = self.check_container(parent)?;
                self.check_attachable(child)?;
                if *index > len {
                    return Err(PatchError::IndexOutOfRange {
                        parent: parent.clone(),
                        index: *index,
                        len,
                    });
                }
                if self.is_ancestor_or_self(child, parent) {
                    return Err(PatchError::WouldCreateCycle {
                        parent: parent.clone(),
                        child: child.clone(),
                    });
                }
                self.node_mut(parent)?.children.insert(*index, child.clone());
                self.link(parent, child);
            }
            PatchOp::DetachChild { parent, child } => {
                let index = self
                    .require_node(parent)?
                    .children
                    .iter()
                    .position(|c| c == child)
                    .ok_or_else(|| PatchError::NotAChild {
                        parent: parent.clone(),
                        child: child.clone(),
                    })?;
                self.node_mut(parent)?.children.remove(index);
                self.unlink(child);
            }
            PatchOp::MoveNode {
                node,
                parent,
                index,
            } => {
                self.require_node(node)?;
                let mut len = self.check_container(parent)?;
                if self.frame_with_root(node).is_some() {
                    return Err(PatchError::FrameRoot(node.clone()));
                }
                if self.is_ancestor_or_self(node, parent) {
                    return Err(PatchError::WouldCreateCycle {
                        parent: parent.clone(),
                        child: node.clone(),
                    });
                }
                let old_parent = self.parent(node).cloned();
                if old_parent.as_ref() == Some(parent) {
                    len -= 1;
                }
                if *index > len {
                    return Err(PatchError::IndexOutOfRange {
                        parent: parent.clone(),
                        index: *index,
                        len,
                    });
                }
                if let Some(old) = old_parent {
                    self.node_mut(&old)?.children.retain(|c| c != node);
                }
                self.node_mut(parent)?.children.insert(*index, node.clone());
                self.link(parent, node);
            }
            PatchOp::ReplaceNode { node } => {
                let old_children = self.require_node(&node.id)?.children.clone();
                if !node.children.is_empty() && node.kind != NodeKind::Container {
                    return Err(PatchError::NotAContainer(node.id.clone()));
                }
                distinct_children(node)?;
                for child in &node.children {
                    if old_children.contains(child) {
                        continue;
                    }
                    self.check_attachable(child)?;
                    if self.is_ancestor_or_self(child, &node.id) {
                        return Err(PatchError::WouldCreateCycle {
                            parent: node.id.clone(),
                            child: child.clone(),
                        });
                    }
                }
                for child in &old_children {
                    self.unlink(child);
                }
                for child in &node.children {
                    self.link(&node.id, child);
                }
                self.put_node(node.clone());
            }
            PatchOp::InsertFrame { frame } => {
                if self.frame(&frame.id).is_some() {
                    return Err(PatchError::DuplicateFrame(frame.id.clone()));
                }
                self.require_node(&frame.root)?;
                if let Some(parent) = self.parent(&frame.root) {
                    return Err(PatchError::AlreadyAttached {
                        parent: parent.clone(),
                        child: frame.root.clone(),
                    });
                }
                self.put_frame(frame.clone());
            }
            PatchOp::RemoveFrame { frame } => {
                self.require_frame(frame)?;
                self.take_frame(frame);
            }
        }
        Ok(())
    }

    /// The child count of `parent`, if it can hold document children.
    fn check_container(&self, parent: &DocId) -> Result<usize, PatchError> {
        let p = self.require_node(parent)?;
        if p.kind != NodeKind::Container {
            return Err(PatchError::NotAContainer(parent.clone()));
        }
        Ok(p.children.len())
    }

    /// `child` exists, is detached, and is not a frame root.
    fn check_attachable(&self, child: &DocId) -> Result<(), PatchError> {
        self.require_node(child)?;
        if let Some(parent) = self.parent(child) {
            return Err(PatchError::AlreadyAttached {
                parent: parent.clone(),
                child: child.clone(),
            });
        }
        if self.frame_with_root(child).is_some() {
            return Err(PatchError::FrameRoot(child.clone()));
        }
        Ok(())
    }
}

/// A child listed twice in one record counts as attached twice.
fn distinct_children(node: &Node) -> Result<(), PatchError> {
    for (i, child) in node.children.iter().enumerate() {
        if node.children[..i].contains(child) {
            return Err(PatchError::AlreadyAttached {
                parent: node.id.clone(),
                child: child.clone(),
            });
        }
    }
    Ok(())
}

fn invalid(path: &str) -> PatchError {
    PatchError::InvalidValue {
        path: path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AutoLayout, Axis};
    use alloc::vec;
    use kurbo::{Point, Size};

    fn ids(list: &[&str]) -> Vec<DocId> {
        list.iter().map(|s| DocId::from(*s)).collect()
    }

    fn doc() -> Document {
        Document::builder()
            .node(Node::container("root").with_children(["p", "q"]))
            .node(
                Node::container("p")
                    .with_layout(AutoLayout::new(Axis::Horizontal))
                    .with_children(["a", "b", "c"]),
            )
            .node(Node::container("q"))
            .node(Node::leaf("a"))
            .node(Node::leaf("b"))
            .node(Node::leaf("c"))
            .frame(Frame::new("f", "root", Point::ZERO, Size::new(10.0, 10.0)))
            .build()
            .unwrap()
    }

    fn undo(doc: &Document, ops: &[PatchOp]) -> Document {
        let applied = doc.apply_batch(ops).unwrap();
        applied.document.apply_batch(&applied.inverse).unwrap().document
    }

    #[test]
    fn apply_leaves_receiver_untouched() {
        let before = doc();
        let after = before.apply(&PatchOp::detach("p", "b")).unwrap();
        assert_eq!(before.children(&"p".into()), ids(&["a", "b", "c"]).as_slice());
        assert_eq!(after.children(&"p".into()), ids(&["a", "c"]).as_slice());
        assert_eq!(after.parent(&"b".into()), None);
    }

    #[test]
    fn untouched_records_stay_shared() {
        let before = doc();
        let after = before.apply(&PatchOp::detach("p", "b")).unwrap();
        let key = DocId::from("q");
        assert!(Arc::ptr_eq(&before.nodes[&key], &after.nodes[&key]));
    }

    #[test]
    fn detach_inverse_restores_index() {
        let d = doc();
        let inv = d.inverse_of(&PatchOp::detach("p", "b")).unwrap();
        assert_eq!(inv, PatchOp::attach("p", "b", 1));
    }

    #[test]
    fn batch_inverse_is_reversed_and_sequential() {
        let d = doc();
        let ops = vec![
            PatchOp::detach("p", "a"),
            PatchOp::detach("p", "c"),
            PatchOp::attach("p", "a", 1),
            PatchOp::attach("p", "c", 2),
        ];
        let applied = d.apply_batch(&ops).unwrap();
        assert_eq!(
            applied.document.children(&"p".into()),
            ids(&["b", "a", "c"]).as_slice()
        );
        // `c` was at index 1 once `a` had been detached.
        assert_eq!(applied.inverse.last(), Some(&PatchOp::attach("p", "a", 0)));
        assert_eq!(applied.inverse[1], PatchOp::attach("p", "c", 1));
        assert_eq!(undo(&d, &ops), d);
    }

    #[test]
    fn failed_batch_publishes_nothing() {
        let d = doc();
        let err = d
            .apply_batch(&[PatchOp::detach("p", "a"), PatchOp::detach("p", "a")])
            .unwrap_err();
        assert!(matches!(err, PatchError::NotAChild { .. }));
        assert_eq!(d.children(&"p".into()).len(), 3);
    }

    #[test]
    fn move_and_inverse() {
        let d = doc();
        let op = PatchOp::move_node("a", "q", 0);
        let inv = d.inverse_of(&op).unwrap();
        assert_eq!(inv, PatchOp::move_node("a", "p", 0));
        let moved = d.apply(&op).unwrap();
        assert_eq!(moved.parent(&"a".into()), Some(&"q".into()));
        assert_eq!(moved.apply(&inv).unwrap(), d);
    }

    #[test]
    fn move_within_parent_counts_without_self() {
        let d = doc();
        let moved = d.apply(&PatchOp::move_node("a", "p", 2)).unwrap();
        assert_eq!(moved.children(&"p".into()), ids(&["b", "c", "a"]).as_slice());
        let err = d.apply(&PatchOp::move_node("a", "p", 3)).unwrap_err();
        assert!(matches!(err, PatchError::IndexOutOfRange { len: 2, .. }));
    }

    #[test]
    #[should_panic(expected = "no prior parent")]
    fn inverting_root_move_panics() {
        let d = doc();
        let _ = d.inverse_of(&PatchOp::move_node("root", "q", 0));
    }

    #[test]
    fn attach_rejects_cycles_and_attached_nodes() {
        let d = doc().apply(&PatchOp::detach("root", "p")).unwrap();
        let err = d.apply(&PatchOp::attach("a", "p", 0)).unwrap_err();
        assert_eq!(err, PatchError::NotAContainer("a".into()));
        let err = d.apply(&PatchOp::attach("p", "a", 0)).unwrap_err();
        assert!(matches!(err, PatchError::AlreadyAttached { .. }));
        let err = d.apply(&PatchOp::move_node("p", "p", 0)).unwrap_err();
        assert!(matches!(err, PatchError::WouldCreateCycle { .. }));
    }

    #[test]
    fn property_set_and_clear_round_trip() {
        let d = doc();
        let ops = vec![
            PatchOp::set_node_property("a", "opacity", Some(Value::Number(0.5))),
            PatchOp::set_node_property("p", LAYOUT_PATH, None),
            PatchOp::set_frame_property("f", ORIGIN_PATH, Some(Value::Point(Point::new(5.0, 5.0)))),
            PatchOp::set_frame_property("f", "locked", Some(Value::Bool(true))),
        ];
        let applied = d.apply_batch(&ops).unwrap();
        let a = applied.document.node(&"a".into()).unwrap();
        assert_eq!(a.properties.get("opacity"), Some(&Value::Number(0.5)));
        assert!(!applied.document.node(&"p".into()).unwrap().is_auto_layout());
        assert_eq!(
            applied.document.frame(&"f".into()).unwrap().origin,
            Point::new(5.0, 5.0)
        );
        assert_eq!(undo(&d, &ops), d);
    }

    #[test]
    fn typed_frame_fields_reject_wrong_values() {
        let d = doc();
        let err = d
            .apply(&PatchOp::set_frame_property("f", SIZE_PATH, None))
            .unwrap_err();
        assert_eq!(
            err,
            PatchError::InvalidValue {
                path: "size".into()
            }
        );
    }

    #[test]
    fn insert_delete_round_trip() {
        let d = doc();
        let ops = vec![
            PatchOp::detach("p", "c"),
            PatchOp::detach("root", "q"),
            PatchOp::DeleteNode { node: "q".into() },
            PatchOp::InsertNode {
                node: Node::container("z").with_children(["c"]),
            },
            PatchOp::attach("root", "z", 0),
        ];
        let applied = d.apply_batch(&ops).unwrap();
        let after = &applied.document;
        assert!(!after.contains(&"q".into()));
        assert_eq!(after.parent(&"c".into()), Some(&"z".into()));
        assert_eq!(after.children(&"root".into()), ids(&["z", "p"]).as_slice());
        assert_eq!(undo(&d, &ops), d);
    }

    #[test]
    fn delete_requires_detached() {
        let err = doc()
            .apply(&PatchOp::DeleteNode { node: "a".into() })
            .unwrap_err();
        assert_eq!(err, PatchError::StillAttached("a".into()));
    }

    #[test]
    fn replace_relinks_children() {
        let d = doc().apply(&PatchOp::detach("p", "c")).unwrap();
        let replacement = Node::container("q").with_children(["c"]);
        let ops = vec![PatchOp::ReplaceNode { node: replacement }];
        let applied = d.apply_batch(&ops).unwrap();
        assert_eq!(applied.document.parent(&"c".into()), Some(&"q".into()));
        assert_eq!(undo(&d, &ops), d);
    }

    #[test]
    fn child_listed_twice_is_rejected() {
        let d = doc().apply(&PatchOp::detach("p", "c")).unwrap();
        let twice = Node::container("z").with_children(["c", "c"]);
        let err = d
            .apply(&PatchOp::InsertNode { node: twice })
            .unwrap_err();
        assert_eq!(
            err,
            PatchError::AlreadyAttached {
                parent: "z".into(),
                child: "c".into(),
            }
        );
        assert!(!d.contains(&"z".into()));

        let twice = Node::container("q").with_children(["c", "c"]);
        let err = d
            .apply(&PatchOp::ReplaceNode { node: twice })
            .unwrap_err();
        assert!(matches!(err, PatchError::AlreadyAttached { .. }));
        assert_eq!(d.parent(&"c".into()), None);
    }

    #[test]
    fn frame_insert_remove_round_trip() {
        let d = doc().apply(&PatchOp::detach("root", "q")).unwrap();
        let ops = vec![
            PatchOp::RemoveFrame { frame: "f".into() },
            PatchOp::InsertFrame {
                frame: Frame::new("g", "q", Point::new(100.0, 0.0), Size::new(5.0, 5.0)),
            },
        ];
        let applied = d.apply_batch(&ops).unwrap();
        assert!(applied.document.frame(&"f".into()).is_none());
        assert_eq!(
            applied.document.frame_with_root(&"q".into()).map(|f| f.id.as_str()),
            Some("g")
        );
        assert_eq!(undo(&d, &ops), d);
    }
}
