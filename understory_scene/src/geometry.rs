// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry provider: frame-local bounds and frame placement.

use kurbo::{Point, Rect};
use understory_document::FrameId;

use crate::scene::ExpandedScene;
use crate::types::ExpandedId;

/// Supplies the layout pass's results to the drop resolver.
pub trait SceneGeometry {
    /// Frame-local bounds of occurrence `id` in `frame`, if laid out.
    fn bounds(&self, frame: &FrameId, id: &ExpandedId) -> Option<Rect>;

    /// World-space position of the top-left corner of `frame`.
    fn frame_origin(&self, frame: &FrameId) -> Option<Point>;
}

impl SceneGeometry for ExpandedScene {
    fn bounds(&self, frame: &FrameId, id: &ExpandedId) -> Option<Rect> {
        self.node(id).filter(|n| &n.frame == frame)?.bounds
    }

    fn frame_origin(&self, frame: &FrameId) -> Option<Point> {
        Self::frame_origin(self, frame)
    }
}

impl<T: SceneGeometry + ?Sized> SceneGeometry for &T {
    fn bounds(&self, frame: &FrameId, id: &ExpandedId) -> Option<Rect> {
        (**self).bounds(frame, id)
    }

    fn frame_origin(&self, frame: &FrameId) -> Option<Point> {
        (**self).frame_origin(frame)
    }
}
