// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Ordering of the active segments along the sweep line. This keeps the
//! events in the status line sorted by the y-coordinate at which their
//! segments cross the sweep line.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::edge::signed_area;
use crate::sweep_event::{compare_events, PolygonType, SweepEvent};
use crate::CoordinateType;

/// Compute the ordering of two left events along the status line.
///
/// Both events MUST be left events of segments that overlap in their
/// x-range, otherwise they could not be in the status line at the same
/// time. The result is only meaningful while both segments are active;
/// a subdivision shortens a segment but keeps it on its supporting line,
/// so the relative order of active segments never changes.
pub fn compare_events_by_segments<T: CoordinateType>(
    le1: &Rc<SweepEvent<T>>,
    le2: &Rc<SweepEvent<T>>,
) -> Ordering {
    debug_assert!(le1.is_left_event());
    debug_assert!(le2.is_left_event());

    if Rc::ptr_eq(le1, le2) {
        return Ordering::Equal;
    }

    let o1 = le1.get_other_event().unwrap().p;
    let o2 = le2.get_other_event().unwrap().p;

    let collinear = signed_area(le1.p, o1, le2.p) == T::zero()
        && signed_area(le1.p, o1, o2) == T::zero();

    if !collinear {
        // If both segments start in the same point, the right endpoints decide.
        if le1.p == le2.p {
            return if le1.below(o2) {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }

        // Left endpoints on the same vertical: the lower one comes first.
        if le1.p.x == le2.p.x {
            return if le1.p.y < le2.p.y {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }

        // The segment that entered the sweep first was positioned when the
        // other one arrived: it decides by which side of it the newcomer's
        // left endpoint lies on.
        if compare_events(le1, le2) == Ordering::Less {
            return if le1.below(le2.p) {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        return if le2.above(le1.p) {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }

    // Collinear segments cross the sweep line in the same point; only a
    // consistent tie break is needed.
    if le1.polygon_type != le2.polygon_type {
        return if le1.polygon_type == PolygonType::Subject {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }

    if le1.p == le2.p {
        if o1 == o2 {
            return le1.event_id.cmp(&le2.event_id);
        }
        return le1
            .contour_id
            .cmp(&le2.contour_id)
            .then_with(|| le1.event_id.cmp(&le2.event_id));
    }

    compare_events(le1, le2)
}
