// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container hit testing.

use hashbrown::HashSet;
use kurbo::Point;
use understory_document::{DocId, FrameId};

use crate::scene::ExpandedScene;
use crate::types::{ExpandedId, SceneFlags};

/// Result of a container hit test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerHit {
    /// The topmost matching occurrence.
    pub expanded_id: ExpandedId,
    /// Its patchable document id, if any.
    pub doc_id: Option<DocId>,
}

/// Finds the topmost container under a world-space point.
///
/// Implementations test in back-to-front paint order, skip every identity in
/// `exclude`, and return the topmost container of `frame` whose bounds contain
/// `world`.
pub trait ContainerHitTest {
    /// Hit test `frame` at `world`, ignoring `exclude`.
    fn hit_test_container(
        &self,
        frame: &FrameId,
        world: Point,
        exclude: &HashSet<ExpandedId>,
    ) -> Option<ContainerHit>;
}

impl<T: ContainerHitTest + ?Sized> ContainerHitTest for &T {
    fn hit_test_container(
        &self,
        frame: &FrameId,
        world: Point,
        exclude: &HashSet<ExpandedId>,
    ) -> Option<ContainerHit> {
        (**self).hit_test_container(frame, world, exclude)
    }
}

/// [`ContainerHitTest`] over the bounds stored in an [`ExpandedScene`].
///
/// Leaves, occurrences without bounds, and occurrences not marked both
/// [`SceneFlags::VISIBLE`] and [`SceneFlags::PICKABLE`] are never hit.
#[derive(Clone, Copy, Debug)]
pub struct SceneHitTester<'a> {
    scene: &'a ExpandedScene,
}

impl<'a> SceneHitTester<'a> {
    /// Hit test against `scene`.
    pub fn new(scene: &'a ExpandedScene) -> Self {
        Self { scene }
    }
}

impl ContainerHitTest for SceneHitTester<'_> {
    fn hit_test_container(
        &self,
        frame: &FrameId,
        world: Point,
        exclude: &HashSet<ExpandedId>,
    ) -> Option<ContainerHit> {
        let origin = self.scene.frame_origin(frame)?;
        let local = world - origin.to_vec2();
        let filter = SceneFlags::VISIBLE | SceneFlags::PICKABLE;
        self.scene
            .paint_order(frame)
            .iter()
            .rev()
            .filter(|id| !exclude.contains(*id))
            .filter_map(|id| self.scene.node(id))
            .find(|n| {
                n.is_container()
                    && n.flags.contains(filter)
                    && n.bounds.is_some_and(|b| b.contains(local))
            })
            .map(|n| ContainerHit {
                expanded_id: n.id.clone(),
                doc_id: n.doc_id.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Size};
    use understory_document::{Document, Frame, Node};

    fn scene() -> ExpandedScene {
        let doc = Document::builder()
            .node(Node::container("root").with_children(["a", "b"]))
            .node(Node::container("a").with_children(["a1"]))
            .node(Node::leaf("a1"))
            .node(Node::container("b"))
            .frame(Frame::new(
                "f",
                "root",
                Point::new(1000.0, 0.0),
                Size::new(200.0, 200.0),
            ))
            .build()
            .unwrap();
        let mut scene = ExpandedScene::compile(&doc);
        scene.set_bounds(&"root".into(), Rect::new(0.0, 0.0, 200.0, 200.0));
        scene.set_bounds(&"a".into(), Rect::new(0.0, 0.0, 120.0, 120.0));
        scene.set_bounds(&"a1".into(), Rect::new(10.0, 10.0, 50.0, 50.0));
        scene.set_bounds(&"b".into(), Rect::new(80.0, 80.0, 200.0, 200.0));
        scene
    }

    fn hit(scene: &ExpandedScene, x: f64, y: f64, exclude: &[&str]) -> Option<&'static str> {
        let exclude: HashSet<ExpandedId> = exclude.iter().map(|s| ExpandedId::from(*s)).collect();
        SceneHitTester::new(scene)
            .hit_test_container(&"f".into(), Point::new(x, y), &exclude)
            .map(|h| match h.expanded_id.as_str() {
                "root" => "root",
                "a" => "a",
                "b" => "b",
                other => panic!("unexpected hit {other}"),
            })
    }

    #[test]
    fn later_sibling_wins_where_overlapping() {
        let s = scene();
        assert_eq!(hit(&s, 1100.0, 100.0, &[]), Some("b"));
        assert_eq!(hit(&s, 1050.0, 50.0, &[]), Some("a"));
    }

    #[test]
    fn leaves_are_skipped() {
        let s = scene();
        assert_eq!(hit(&s, 1020.0, 20.0, &[]), Some("a"));
    }

    #[test]
    fn excluded_and_unpickable_are_skipped() {
        let mut s = scene();
        assert_eq!(hit(&s, 1100.0, 100.0, &["b"]), Some("a"));
        s.set_flags(&"b".into(), SceneFlags::VISIBLE);
        assert_eq!(hit(&s, 1100.0, 100.0, &[]), Some("a"));
    }

    #[test]
    fn point_is_converted_to_frame_space() {
        let s = scene();
        assert_eq!(hit(&s, 100.0, 100.0, &[]), None);
        assert_eq!(hit(&s, -5.0, -5.0, &[]), None);
        assert_eq!(hit(&s, 1190.0, 10.0, &[]), Some("root"));
        let none = HashSet::new();
        assert!(SceneHitTester::new(&s)
            .hit_test_container(&"missing".into(), Point::ZERO, &none)
            .is_none());
    }
}
