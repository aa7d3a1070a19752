// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drop resolver: cursor and selection in, [`DropPreview`] out.
//!
//! ## Pipeline
//!
//! 1. Reject selections whose nodes come from more than one parent.
//! 2. Hit test the locked frame with the dragged subtrees excluded, then apply
//!    origin stickiness.
//! 3. Climb from the hit to the nearest auto-layout container. Instance
//!    occurrences are climbed past: their children belong to the definition.
//! 4. Classify the move by comparing document ids of origin and target parents.
//! 5. Compute the insertion index against the filtered child list, then hold the
//!    previous index while the container is unchanged and the cursor stays
//!    inside the hysteresis band.
//! 6. Derive the indicator rectangle and, for reorders, reflow offsets.
//!
//! ## Slots
//!
//! With `n` filtered children there are `n + 1` slots. Slot `i` sits on a
//! boundary along the main axis: slot 0 on the leading edge of the first child,
//! slot `n` on the trailing edge of the last, and every slot in between on the
//! midpoint of the gap separating its neighbors. The slot whose boundary is
//! nearest to the cursor wins; ties go to the lower index.
//!
//! The indicator for slot 0 and slot `n` is drawn on the padding-adjusted
//! container edges instead, so "before first" and "after last" read as the
//! ends of the container.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use hashbrown::HashSet;
use kurbo::{Rect, Vec2};
use understory_document::{Axis, DocId};
use understory_scene::{ContainerHitTest, ExpandedId, IdentityLookups, SceneGeometry};

use crate::types::{
    DropIntent, DropPreview, DropQuery, InvalidReason, OriginalParents, ResolverConfig,
};

/// Resolves drop previews against one compiled scene.
///
/// Holds no state between calls: everything carried across pointer moves is
/// passed in through [`DropQuery`].
#[derive(Clone, Debug)]
pub struct DropResolver<'a, H, G> {
    lookups: &'a IdentityLookups,
    hit: H,
    geometry: G,
    config: ResolverConfig,
}

impl<'a, H: ContainerHitTest, G: SceneGeometry> DropResolver<'a, H, G> {
    /// A resolver with the default [`ResolverConfig`].
    pub fn new(lookups: &'a IdentityLookups, hit: H, geometry: G) -> Self {
        Self {
            lookups,
            hit,
            geometry,
            config: ResolverConfig::default(),
        }
    }

    /// Replace the tuning.
    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Tuning in effect.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Compute the preview for one pointer position.
    ///
    /// Never fails: resolution problems come back as an invalid preview with
    /// an [`InvalidReason`].
    pub fn compute(&self, query: &DropQuery<'_>) -> DropPreview {
        let dragged_expanded = self.order_expanded(query.dragged_expanded);
        let dragged_doc = self.order_doc(query);
        match self.resolve(query, &dragged_expanded) {
            Ok(mut preview) => {
                preview.dragged_expanded = dragged_expanded;
                preview.dragged_doc = dragged_doc;
                preview
            }
            Err(reason) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(frame = %query.frame, %reason, "drop preview invalid");
                DropPreview {
                    dragged_expanded,
                    dragged_doc,
                    ..DropPreview::invalid(query.frame.clone(), reason)
                }
            }
        }
    }

    fn resolve(
        &self,
        query: &DropQuery<'_>,
        dragged: &[ExpandedId],
    ) -> Result<DropPreview, InvalidReason> {
        let origin_doc = single_origin(query.original_parents)?;
        let frame_origin = self
            .geometry
            .frame_origin(query.frame)
            .ok_or(InvalidReason::TargetFrameNotFound)?;
        let zoom = effective_zoom(query.zoom);

        let exclude = self.exclusion(query.dragged_expanded);
        let raw = self
            .hit
            .hit_test_container(query.frame, query.cursor, &exclude)
            .map(|h| h.expanded_id);
        let hit = self
            .sticky(query, raw)
            .ok_or(InvalidReason::NoContainerHit)?;

        let target = self
            .lookups
            .find_ancestor(&hit, |id| self.lookups.is_layout_container(id))
            .ok_or(InvalidReason::NoAutoLayoutAncestor)?;
        let layout = *self
            .lookups
            .layout(target)
            .ok_or(InvalidReason::NoAutoLayoutAncestor)?;
        let container = self
            .geometry
            .bounds(query.frame, target)
            .ok_or(InvalidReason::ContainerHasNoBounds)?;

        let target_doc = self.lookups.doc_id(target).cloned();
        let intent = match (&target_doc, origin_doc) {
            (Some(t), Some(o)) if t == o => DropIntent::Reorder,
            _ => DropIntent::Reparent,
        };

        let children = self.lookups.children(target);
        let filtered: Vec<&ExpandedId> = children.iter().filter(|c| !exclude.contains(*c)).collect();

        let axis = layout.direction;
        let content = container - layout.padding;
        let (content_start, content_end) = span(content, axis);
        let extents = self.extents(query, &filtered, axis, content_start);
        let boundaries = boundaries(&extents, content_start);

        let local = query.cursor - frame_origin.to_vec2();
        let raw_index = nearest(&boundaries, axis.of_point(local));
        let (index, anchor) = match (query.prior_index, query.prior_cursor, query.prior_target) {
            (Some(prior), Some(prior_cursor), Some(prior_target))
                if prior_target == target
                    && (axis.of_point(query.cursor) - axis.of_point(prior_cursor)).abs()
                        < self.config.hysteresis_px / zoom =>
            {
                #[cfg(feature = "tracing")]
                tracing::trace!(prior, raw_index, "hysteresis holds insertion index");
                (prior.min(filtered.len()), prior_cursor)
            }
            _ => (raw_index, query.cursor),
        };

        let thickness = self.config.indicator_thickness_px / zoom;
        // The first and last slots sit on the padding-adjusted edges.
        let at = if index == 0 {
            content_start
        } else if index == filtered.len() {
            content_end
        } else {
            boundaries[index]
        };
        let (cross_start, cross_end) = span(content, axis.cross());
        let indicator = along(axis, at - thickness * 0.5, at + thickness * 0.5, cross_start, cross_end)
            + frame_origin.to_vec2();

        let reflow_offsets = if intent == DropIntent::Reorder {
            self.reflow(query, dragged, &filtered, &extents, index, axis, content_start, layout.gap)
        } else {
            BTreeMap::new()
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            container = %target,
            index,
            reorder = intent == DropIntent::Reorder,
            "drop preview resolved"
        );

        Ok(DropPreview {
            is_valid: true,
            frame: query.frame.clone(),
            target_parent_expanded: Some(target.clone()),
            target_parent_doc: target_doc,
            insertion_index: Some(index),
            intent,
            indicator_rect: Some(indicator),
            indicator_axis: Some(axis.cross()),
            dragged_expanded: Vec::new(),
            dragged_doc: Vec::new(),
            target_children_expanded: children.to_vec(),
            target_children_doc: children
                .iter()
                .map(|c| self.lookups.doc_id(c).cloned())
                .collect(),
            reflow_offsets,
            anchor: Some(anchor),
            invalid_reason: None,
        })
    }

    /// Dragged occurrences plus everything below them.
    fn exclusion(&self, dragged: &[ExpandedId]) -> HashSet<ExpandedId> {
        let mut out = HashSet::new();
        for id in dragged {
            out.extend(self.lookups.subtree(id));
            out.insert(id.clone());
        }
        out
    }

    /// Prefer the origin parent over a miss or over one of its own ancestors
    /// while the cursor is inside the origin's rectangle.
    fn sticky(&self, query: &DropQuery<'_>, raw: Option<ExpandedId>) -> Option<ExpandedId> {
        let (Some(origin), Some(rect)) = (query.origin_parent, query.origin_content_rect) else {
            return raw;
        };
        if !rect.contains(query.cursor) || !self.lookups.contains(origin) {
            return raw;
        }
        let overridden = match &raw {
            None => true,
            Some(hit) => self.lookups.is_descendant_of(origin, hit),
        };
        if overridden {
            #[cfg(feature = "tracing")]
            tracing::trace!(origin = %origin, "origin parent sticks");
            Some(origin.clone())
        } else {
            raw
        }
    }

    /// Main-axis extents of the filtered children. A child without bounds
    /// collapses onto the end of the previous one.
    fn extents(
        &self,
        query: &DropQuery<'_>,
        filtered: &[&ExpandedId],
        axis: Axis,
        content_start: f64,
    ) -> Vec<(f64, f64)> {
        let mut prev_end = content_start;
        filtered
            .iter()
            .map(|c| match self.geometry.bounds(query.frame, c) {
                Some(b) => {
                    let extent = span(b, axis);
                    prev_end = extent.1;
                    extent
                }
                None => (prev_end, prev_end),
            })
            .collect()
    }

    /// Displacement of every filtered sibling and dragged occurrence between
    /// where it is now and where it lands when the list, with the dragged
    /// occurrences inserted at `index`, is packed from the content start.
    fn reflow(
        &self,
        query: &DropQuery<'_>,
        dragged: &[ExpandedId],
        filtered: &[&ExpandedId],
        extents: &[(f64, f64)],
        index: usize,
        axis: Axis,
        content_start: f64,
        gap: f64,
    ) -> BTreeMap<ExpandedId, Vec2> {
        let mut offsets = BTreeMap::new();
        let mut pos = content_start;
        for slot in 0..=filtered.len() {
            if slot == index {
                for d in dragged {
                    match self.geometry.bounds(query.frame, d) {
                        Some(b) => {
                            let (start, end) = span(b, axis);
                            offsets.insert(d.clone(), shift(axis, pos - start));
                            pos += end - start + gap;
                        }
                        None => {
                            offsets.insert(d.clone(), Vec2::ZERO);
                        }
                    }
                }
            }
            if let (Some(child), Some(&(start, end))) = (filtered.get(slot), extents.get(slot)) {
                offsets.insert((*child).clone(), shift(axis, pos - start));
                pos += end - start + gap;
            }
        }
        offsets
    }

    fn order_expanded(&self, dragged: &[ExpandedId]) -> Vec<ExpandedId> {
        let mut out = dragged.to_vec();
        out.sort_by_key(|id| {
            self.lookups
                .parent(id)
                .and_then(|p| self.lookups.children(p).iter().position(|c| c == id))
                .unwrap_or(usize::MAX)
        });
        out
    }

    /// Dragged document ids in the origin parent's child order; ids not found
    /// there keep the caller's order, after the others.
    fn order_doc(&self, query: &DropQuery<'_>) -> Vec<DocId> {
        let mut out = query.dragged_doc.to_vec();
        let origin = query.origin_parent.or_else(|| {
            let doc = query.original_parents.values().next()?;
            self.lookups.patchable_id(doc)
        });
        let Some(origin) = origin else {
            return out;
        };
        let siblings: Vec<Option<&DocId>> = self
            .lookups
            .children(origin)
            .iter()
            .map(|c| self.lookups.doc_id(c))
            .collect();
        out.sort_by_key(|d| {
            siblings
                .iter()
                .position(|s| *s == Some(d))
                .unwrap_or(usize::MAX)
        });
        out
    }
}

/// The single original parent of the selection, if any.
fn single_origin(parents: &OriginalParents) -> Result<Option<&DocId>, InvalidReason> {
    let mut values = parents.values();
    let first = values.next();
    if values.any(|p| Some(p) != first) {
        return Err(InvalidReason::MultipleOriginParents);
    }
    Ok(first)
}

fn effective_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() && zoom > 0.0 {
        zoom
    } else {
        1.0
    }
}

/// Start and end of `rect` along `axis`.
fn span(rect: Rect, axis: Axis) -> (f64, f64) {
    match axis {
        Axis::Horizontal => (rect.x0, rect.x1),
        Axis::Vertical => (rect.y0, rect.y1),
    }
}

/// A rectangle from a main-axis and a cross-axis span.
fn along(axis: Axis, main0: f64, main1: f64, cross0: f64, cross1: f64) -> Rect {
    match axis {
        Axis::Horizontal => Rect::new(main0, cross0, main1, cross1),
        Axis::Vertical => Rect::new(cross0, main0, cross1, main1),
    }
}

fn shift(axis: Axis, d: f64) -> Vec2 {
    match axis {
        Axis::Horizontal => Vec2::new(d, 0.0),
        Axis::Vertical => Vec2::new(0.0, d),
    }
}

/// Slot boundaries for `n` children: `n + 1` positions along the main axis.
fn boundaries(extents: &[(f64, f64)], content_start: f64) -> Vec<f64> {
    let Some((&(first, _), &(_, last))) = extents.first().zip(extents.last()) else {
        return alloc::vec![content_start];
    };
    let mut out = Vec::with_capacity(extents.len() + 1);
    out.push(first);
    out.extend(extents.windows(2).map(|w| (w[0].1 + w[1].0) * 0.5));
    out.push(last);
    out
}

/// Index of the boundary nearest to `main`; ties go to the lower index.
fn nearest(boundaries: &[f64], main: f64) -> usize {
    let mut best = 0;
    let mut best_d = f64::INFINITY;
    for (i, b) in boundaries.iter().enumerate() {
        let d = (main - b).abs();
        if d < best_d {
            best = i;
            best_d = d;
        }
    }
    best
}
