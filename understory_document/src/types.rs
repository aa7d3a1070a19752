// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the document: identifiers, layout descriptors, property values, and records.

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Insets, Point, Size};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(Arc<str>);

        impl $name {
            /// Create an identifier from a string.
            pub fn new(id: &str) -> Self {
                Self(Arc::from(id))
            }

            /// The identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), &*self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id! {
    /// Stable, patchable identifier of a node in the document.
    ///
    /// Cloning is cheap (a reference count bump). Every structural patch names
    /// nodes by `DocId`; rendered occurrences are named separately by the scene.
    DocId
}

string_id! {
    /// Identifier of a top-level frame.
    FrameId
}

string_id! {
    /// Identifier of a reusable component definition.
    ComponentId
}

/// A layout axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Component of `p` along this axis.
    pub const fn of_point(self, p: Point) -> f64 {
        match self {
            Self::Horizontal => p.x,
            Self::Vertical => p.y,
        }
    }
}

/// Auto-layout descriptor: children are packed along `direction` separated by `gap`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AutoLayout {
    /// Main axis along which children are placed.
    pub direction: Axis,
    /// Space between consecutive children, along the main axis.
    pub gap: f64,
    /// Inner padding between the container edges and its children.
    pub padding: Insets,
}

impl AutoLayout {
    /// A layout along `direction` with no gap and no padding.
    pub const fn new(direction: Axis) -> Self {
        Self {
            direction,
            gap: 0.0,
            padding: Insets::ZERO,
        }
    }

    /// Set the gap.
    #[must_use]
    pub const fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Set the padding.
    #[must_use]
    pub const fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }
}

/// A property value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Boolean flag.
    Bool(bool),
    /// Scalar number.
    Number(f64),
    /// Text.
    Text(Arc<str>),
    /// A position.
    Point(Point),
    /// A size.
    Size(Size),
    /// An auto-layout descriptor (the well-known node `"layout"` path).
    Layout(AutoLayout),
}

/// Free-form properties keyed by path.
pub type PropertyMap = BTreeMap<Arc<str>, Value>;

/// What a node is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// A node that can hold children.
    Container,
    /// Content without children (text, shapes, images).
    Leaf,
    /// An occurrence of a component definition. Owns no document children;
    /// its rendered children come from the definition.
    Instance(ComponentId),
}

/// A node record.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Identity of this node.
    pub id: DocId,
    /// What the node is.
    pub kind: NodeKind,
    /// Ordered child ids.
    pub children: Vec<DocId>,
    /// Auto-layout descriptor; `None` means children are absolutely positioned.
    pub layout: Option<AutoLayout>,
    /// Free-form properties.
    pub properties: PropertyMap,
}

impl Node {
    /// A childless container with absolute positioning.
    pub fn container(id: impl Into<DocId>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Container,
            children: Vec::new(),
            layout: None,
            properties: PropertyMap::new(),
        }
    }

    /// A leaf node.
    pub fn leaf(id: impl Into<DocId>) -> Self {
        Self {
            kind: NodeKind::Leaf,
            ..Self::container(id)
        }
    }

    /// An instance of `component`.
    pub fn instance(id: impl Into<DocId>, component: impl Into<ComponentId>) -> Self {
        Self {
            kind: NodeKind::Instance(component.into()),
            ..Self::container(id)
        }
    }

    /// Set the auto-layout descriptor.
    #[must_use]
    pub fn with_layout(mut self, layout: AutoLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Set the ordered child list.
    #[must_use]
    pub fn with_children<I, T>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<DocId>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    /// Set a free-form property.
    #[must_use]
    pub fn with_property(mut self, path: &str, value: Value) -> Self {
        self.properties.insert(Arc::from(path), value);
        self
    }

    /// Returns true if this node has an auto-layout descriptor.
    pub fn is_auto_layout(&self) -> bool {
        self.layout.is_some()
    }
}

/// Top-level placement of a node tree on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Identity of this frame.
    pub id: FrameId,
    /// Display name.
    pub name: Arc<str>,
    /// World-space position of the frame's top-left corner.
    pub origin: Point,
    /// Size of the frame.
    pub size: Size,
    /// Root node of the frame's tree.
    pub root: DocId,
    /// Free-form properties.
    pub properties: PropertyMap,
}

impl Frame {
    /// A frame named after its id.
    pub fn new(id: impl Into<FrameId>, root: impl Into<DocId>, origin: Point, size: Size) -> Self {
        let id = id.into();
        Self {
            name: Arc::from(id.as_str()),
            id,
            origin,
            size,
            root: root.into(),
            properties: PropertyMap::new(),
        }
    }
}

/// A reusable subtree definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    /// Identity of this component.
    pub id: ComponentId,
    /// Root node of the definition subtree.
    pub root: DocId,
}

impl Component {
    /// A component rooted at `root`.
    pub fn new(id: impl Into<ComponentId>, root: impl Into<DocId>) -> Self {
        Self {
            id: id.into(),
            root: root.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_compare_by_content() {
        assert_eq!(DocId::from("a"), DocId::new("a"));
        assert!(DocId::from("a") < DocId::from("b"));
        assert_eq!(alloc::format!("{}", FrameId::from("f1")), "f1");
    }

    #[test]
    fn cross_axis_is_perpendicular() {
        assert_eq!(Axis::Horizontal.cross(), Axis::Vertical);
        assert_eq!(Axis::Vertical.cross(), Axis::Horizontal);
        assert_eq!(Axis::Vertical.of_point(Point::new(1.0, 2.0)), 2.0);
    }

    #[test]
    fn node_builders() {
        let n = Node::container("row")
            .with_layout(AutoLayout::new(Axis::Horizontal).with_gap(4.0))
            .with_children(["a", "b"]);
        assert!(n.is_auto_layout());
        assert_eq!(n.children, [DocId::from("a"), DocId::from("b")]);
        assert_eq!(
            Node::instance("i", "card").kind,
            NodeKind::Instance(ComponentId::from("card"))
        );
    }
}
