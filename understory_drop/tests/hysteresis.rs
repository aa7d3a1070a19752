// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for index stability and reflow reporting.

mod common;

use common::{Board, at, board, docs, expanded};
use proptest::prelude::*;
use understory_drop::{DropIntent, DropPreview, DropQuery};
use understory_scene::ExpandedId;

/// Midpoints between consecutive slot boundaries of `list` with `C` dragged out.
/// Boundaries sit at y = 30, 75, 150, 225, 270.
const SWITCH_POINTS: [f64; 4] = [52.5, 112.5, 187.5, 247.5];

fn drag_c(b: &Board, y: f64, zoom: f64, previous: Option<&DropPreview>) -> DropPreview {
    let dragged = expanded(&["C"]);
    let dragged_doc = docs(&["C"]);
    let parents = b.parents(&["C"]);
    let mut query =
        DropQuery::new(&b.frame, at(120.0, y), &dragged, &dragged_doc, &parents).with_zoom(zoom);
    if let Some(previous) = previous {
        query = query.with_previous(previous);
    }
    b.resolver().compute(&query)
}

proptest! {
    #[test]
    fn jitter_inside_band_keeps_index(
        y in 40.0..260.0f64,
        jitter in -0.99..0.99f64,
        zoom in 0.5..4.0f64,
    ) {
        let b = board();
        let first = drag_c(&b, y, zoom, None);
        let index = first.insertion_index.unwrap();
        let anchor = first.anchor.unwrap();

        let band = 8.0 / zoom;
        let next = drag_c(&b, y + jitter * band, zoom, Some(&first));
        prop_assert_eq!(next.insertion_index, Some(index));
        prop_assert_eq!(next.anchor, Some(anchor));
    }

    #[test]
    fn crossing_a_switch_point_moves_index(
        which in 0..SWITCH_POINTS.len(),
        zoom in 1.0..4.0f64,
        downward in any::<bool>(),
    ) {
        let b = board();
        let band = 8.0 / zoom;
        let s = SWITCH_POINTS[which];
        let (from, to) = if downward {
            (s - 0.6 * band, s + 0.6 * band)
        } else {
            (s + 0.6 * band, s - 0.6 * band)
        };

        let first = drag_c(&b, from, zoom, None);
        let index = first.insertion_index.unwrap();
        let next = drag_c(&b, to, zoom, Some(&first));
        let expected = if downward { index + 1 } else { index - 1 };
        prop_assert_eq!(next.insertion_index, Some(expected));
        prop_assert_eq!(next.anchor, Some(at(120.0, to)));
    }

    #[test]
    fn reflow_reported_exactly_for_valid_reorders(
        x in -100.0..1000.0f64,
        y in -50.0..350.0f64,
        pick in prop::sample::select(vec!["C", "a1", "list", "abs"]),
    ) {
        let b = board();
        let dragged = expanded(&[pick]);
        let dragged_doc = docs(&[pick]);
        let parents = b.parents(&[pick]);
        let query = DropQuery::new(&b.frame, at(x, y), &dragged, &dragged_doc, &parents);
        let preview = b.resolver().compute(&query);

        let reorder = preview.is_valid && preview.intent == DropIntent::Reorder;
        prop_assert_eq!(!preview.reflow_offsets.is_empty(), reorder);
        prop_assert_eq!(preview.is_valid, preview.insertion_index.is_some());
        if let Some(index) = preview.insertion_index {
            let filtered = preview
                .target_children_expanded
                .iter()
                .filter(|c| !dragged.contains(c))
                .count();
            prop_assert!(index <= filtered);
        }
    }

    #[test]
    fn empty_container_always_resolves_to_zero(
        x in 461.0..659.0f64,
        y in 21.0..279.0f64,
        prior in prop::option::of(0..10_usize),
    ) {
        let b = board();
        let dragged = expanded(&["a1"]);
        let dragged_doc = docs(&["a1"]);
        let parents = b.parents(&["a1"]);
        let target = ExpandedId::from("parent_b");
        let mut query = DropQuery::new(&b.frame, at(x, y), &dragged, &dragged_doc, &parents);
        if let Some(prior) = prior {
            query = query.with_prior(prior, at(x, y), &target);
        }
        let preview = b.resolver().compute(&query);
        prop_assert_eq!(preview.insertion_index, Some(0));
        prop_assert_eq!(preview.intent, DropIntent::Reparent);
        prop_assert!(preview.reflow_offsets.is_empty());
    }
}
