// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Detect intersections between neighbouring segments of the status line
//! and subdivide the segments at the intersection points.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

use crate::edge::{edge_intersection, EdgeIntersection};
use crate::point::Point;
use crate::sweep_event::{compare_events, EdgeType, SweepEvent};
use crate::CoordinateType;

/// Split the segment of the left event `le` at the point `p` and push the
/// two new events into the queue.
pub fn divide_segment<T: CoordinateType>(
    le: &Rc<SweepEvent<T>>,
    p: Point<T>,
    queue: &mut BinaryHeap<Rc<SweepEvent<T>>>,
) {
    debug_assert!(le.is_left_event());

    let other = match le.get_other_event() {
        Some(other) => other,
        None => return,
    };

    debug_assert!(le.p != p && other.p != p, "split point must be interior");

    // Right event of the left piece. Subdivision products keep the
    // construction id of their segment so that the status line order of
    // overlapping segments survives the split.
    let r = SweepEvent::new_rc(
        le.event_id,
        le.contour_id,
        p,
        false,
        Rc::downgrade(le),
        le.polygon_type,
    );

    // Left event of the right piece.
    let l = SweepEvent::new_rc(
        le.event_id,
        le.contour_id,
        p,
        true,
        Rc::downgrade(&other),
        le.polygon_type,
    );

    // Rounding can place the split point behind the original right endpoint
    // in processing order. Swap the endpoint flags to keep every pair
    // ordered "left before right" in the queue.
    if compare_events(&l, &other) == Ordering::Greater {
        other.set_left_event(true);
        l.set_left_event(false);
    }

    other.set_other_event(&l);
    le.set_other_event(&r);

    queue.push(l);
    queue.push(r);
}

/// Check the two status line neighbours `le1` (lower) and `le2` (upper) for
/// an intersection and subdivide their segments accordingly.
///
/// Returns
/// - 0: no intersection, or one that requires no action (a shared endpoint,
///   or an overlap of two segments of the same operand, which is tolerated
///   silently),
/// - 1: the segments intersect in a single point,
/// - 2: the segments overlap and share their left endpoint; the caller must
///   recompute the labelling of both events,
/// - 3: the segments overlap without sharing their left endpoint.
pub fn possible_intersection<T: CoordinateType>(
    le1: &Rc<SweepEvent<T>>,
    le2: &Rc<SweepEvent<T>>,
    queue: &mut BinaryHeap<Rc<SweepEvent<T>>>,
) -> u8 {
    debug_assert!(le1.is_left_event());
    debug_assert!(le2.is_left_event());

    let edge1 = le1.get_edge().unwrap();
    let edge2 = le2.get_edge().unwrap();

    debug_assert!(!edge1.is_degenerate());
    debug_assert!(!edge2.is_degenerate());

    match edge_intersection(&edge1, &edge2) {
        EdgeIntersection::None => 0,

        EdgeIntersection::Point(p) => {
            // An intersection interior to both segments.
            divide_segment(le1, p, queue);
            divide_segment(le2, p, queue);
            1
        }

        EdgeIntersection::EndPoint(p) => {
            let on_edge1 = p == edge1.start || p == edge1.end;
            let on_edge2 = p == edge2.start || p == edge2.end;
            if on_edge1 && on_edge2 {
                // The segments only touch in a common endpoint.
                return 0;
            }
            if !on_edge1 {
                divide_segment(le1, p, queue);
            }
            if !on_edge2 {
                divide_segment(le2, p, queue);
            }
            1
        }

        EdgeIntersection::Overlap(_) => {
            if le1.polygon_type == le2.polygon_type {
                // Overlapping edges of one and the same operand. The input
                // is out of contract here; tolerate it silently.
                return 0;
            }

            let r1 = le1.get_other_event().unwrap();
            let r2 = le2.get_other_event().unwrap();

            let left_coincide = le1.p == le2.p;
            let right_coincide = r1.p == r2.p;

            if left_coincide {
                // The segments run on top of each other from their shared
                // left endpoint on. The upper one stops contributing; the
                // lower one carries the combined transition of both
                // boundaries.
                le2.set_edge_type(EdgeType::NonContributing);
                le1.set_edge_type(if le1.is_in_out() == le2.is_in_out() {
                    EdgeType::SameTransition
                } else {
                    EdgeType::DifferentTransition
                });

                if !right_coincide {
                    // Split the longer segment at the shorter one's right end.
                    if compare_events(&r1, &r2) == Ordering::Less {
                        divide_segment(le2, r1.p, queue);
                    } else {
                        divide_segment(le1, r2.p, queue);
                    }
                }
                return 2;
            }

            if right_coincide {
                // Shared right endpoint: split the earlier starting segment
                // at the later one's left endpoint.
                if compare_events(le1, le2) == Ordering::Less {
                    divide_segment(le1, le2.p, queue);
                } else {
                    divide_segment(le2, le1.p, queue);
                }
                return 3;
            }

            // No shared endpoint.
            let (first, second, second_r) = if compare_events(le1, le2) == Ordering::Less {
                (le1, le2, &r2)
            } else {
                (le2, le1, &r1)
            };
            let first_r = first.get_other_event().unwrap();

            if compare_events(second_r, &first_r) == Ordering::Less {
                // `first` contains `second` entirely: split it at both
                // endpoints of `second`. After the first split the right
                // remainder hangs off the original right event.
                divide_segment(first, second.p, queue);
                let remainder = first_r.get_other_event().unwrap();
                divide_segment(&remainder, second_r.p, queue);
            } else {
                // Partial overlap: split each segment at the other one's
                // interior endpoint.
                divide_segment(first, second.p, queue);
                divide_segment(second, first_r.p, queue);
            }
            3
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sweep_event::PolygonType;
    use std::rc::Weak;

    fn make_event_pair(
        event_id: usize,
        left: (f64, f64),
        right: (f64, f64),
        polygon_type: PolygonType,
    ) -> (Rc<SweepEvent<f64>>, Rc<SweepEvent<f64>>) {
        let other = SweepEvent::new_rc(event_id, 0, right.into(), false, Weak::new(), polygon_type);
        let event = SweepEvent::new_rc(
            event_id,
            0,
            left.into(),
            true,
            Rc::downgrade(&other),
            polygon_type,
        );
        other.set_other_event(&event);
        (event, other)
    }

    #[test]
    fn test_divide_segment() {
        let mut queue = BinaryHeap::new();
        let (le, re) = make_event_pair(1, (0.0, 0.0), (2.0, 2.0), PolygonType::Subject);

        divide_segment(&le, Point::new(1.0, 1.0), &mut queue);

        assert_eq!(queue.len(), 2);

        // The original events are rewired onto the two new ones.
        let r = le.get_other_event().unwrap();
        let l = re.get_other_event().unwrap();
        assert_eq!(r.p, Point::new(1.0, 1.0));
        assert_eq!(l.p, Point::new(1.0, 1.0));
        assert!(!r.is_left_event());
        assert!(l.is_left_event());
        assert!(Rc::ptr_eq(&r.get_other_event().unwrap(), &le));
        assert!(Rc::ptr_eq(&l.get_other_event().unwrap(), &re));
    }

    #[test]
    fn test_crossing_segments_are_split() {
        let mut queue = BinaryHeap::new();
        let (le1, _re1) = make_event_pair(1, (0.0, 0.0), (2.0, 2.0), PolygonType::Subject);
        let (le2, _re2) = make_event_pair(2, (0.0, 2.0), (2.0, 0.0), PolygonType::Clipping);

        let n = possible_intersection(&le1, &le2, &mut queue);

        assert_eq!(n, 1);
        // Both segments were split, two new events each.
        assert_eq!(queue.len(), 4);
        assert_eq!(le1.get_other_event().unwrap().p, Point::new(1.0, 1.0));
        assert_eq!(le2.get_other_event().unwrap().p, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_shared_endpoint_is_no_intersection() {
        let mut queue = BinaryHeap::new();
        let (le1, _re1) = make_event_pair(1, (0.0, 0.0), (1.0, 1.0), PolygonType::Subject);
        let (le2, _re2) = make_event_pair(2, (0.0, 0.0), (1.0, -1.0), PolygonType::Clipping);

        assert_eq!(possible_intersection(&le2, &le1, &mut queue), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_same_operand_overlap_is_tolerated() {
        let mut queue = BinaryHeap::new();
        let (le1, _re1) = make_event_pair(1, (0.0, 0.0), (2.0, 0.0), PolygonType::Subject);
        let (le2, _re2) = make_event_pair(2, (1.0, 0.0), (3.0, 0.0), PolygonType::Subject);

        assert_eq!(possible_intersection(&le1, &le2, &mut queue), 0);
        assert!(queue.is_empty());
        assert_eq!(le1.get_edge_type(), EdgeType::Normal);
        assert_eq!(le2.get_edge_type(), EdgeType::Normal);
    }

    #[test]
    fn test_full_overlap_shares_left_endpoint() {
        let mut queue = BinaryHeap::new();
        let (le1, _re1) = make_event_pair(1, (0.0, 0.0), (2.0, 0.0), PolygonType::Subject);
        let (le2, _re2) = make_event_pair(2, (0.0, 0.0), (2.0, 0.0), PolygonType::Clipping);

        let n = possible_intersection(&le1, &le2, &mut queue);

        assert_eq!(n, 2);
        // Coinciding segments are not split, only reclassified.
        assert!(queue.is_empty());
        assert_eq!(le2.get_edge_type(), EdgeType::NonContributing);
        assert_eq!(le1.get_edge_type(), EdgeType::SameTransition);
    }

    #[test]
    fn test_full_overlap_with_opposite_transitions() {
        let mut queue = BinaryHeap::new();
        let (le1, _re1) = make_event_pair(1, (0.0, 0.0), (2.0, 0.0), PolygonType::Subject);
        let (le2, _re2) = make_event_pair(2, (0.0, 0.0), (2.0, 0.0), PolygonType::Clipping);

        // The operands lie on opposite sides of the shared boundary.
        le2.set_in_out(true, false);

        let n = possible_intersection(&le1, &le2, &mut queue);

        assert_eq!(n, 2);
        assert_eq!(le2.get_edge_type(), EdgeType::NonContributing);
        assert_eq!(le1.get_edge_type(), EdgeType::DifferentTransition);
    }

    #[test]
    fn test_overlap_with_shared_left_endpoint_splits_longer() {
        let mut queue = BinaryHeap::new();
        let (le1, _re1) = make_event_pair(1, (0.0, 0.0), (1.0, 0.0), PolygonType::Subject);
        let (le2, _re2) = make_event_pair(2, (0.0, 0.0), (2.0, 0.0), PolygonType::Clipping);

        let n = possible_intersection(&le1, &le2, &mut queue);

        assert_eq!(n, 2);
        // The longer clipping segment was split at (1, 0).
        assert_eq!(queue.len(), 2);
        assert_eq!(le2.get_other_event().unwrap().p, Point::new(1.0, 0.0));
    }

    #[test]
    fn test_partial_overlap() {
        let mut queue = BinaryHeap::new();
        let (le1, re1) = make_event_pair(1, (0.0, 0.0), (2.0, 0.0), PolygonType::Subject);
        let (le2, _re2) = make_event_pair(2, (1.0, 0.0), (3.0, 0.0), PolygonType::Clipping);

        let n = possible_intersection(&le1, &le2, &mut queue);

        assert_eq!(n, 3);
        assert_eq!(queue.len(), 4);
        // le1 is split at le2's left endpoint, le2 at le1's right endpoint.
        assert_eq!(le1.get_other_event().unwrap().p, Point::new(1.0, 0.0));
        assert_eq!(le2.get_other_event().unwrap().p, Point::new(2.0, 0.0));
        assert_eq!(re1.get_other_event().unwrap().p, Point::new(1.0, 0.0));
    }

    #[test]
    fn test_containment_overlap_splits_container_twice() {
        let mut queue = BinaryHeap::new();
        let (le1, re1) = make_event_pair(1, (0.0, 0.0), (4.0, 0.0), PolygonType::Subject);
        let (le2, re2) = make_event_pair(2, (1.0, 0.0), (2.0, 0.0), PolygonType::Clipping);

        let n = possible_intersection(&le1, &le2, &mut queue);

        assert_eq!(n, 3);
        assert_eq!(queue.len(), 4);
        // The container now ends at (1, 0), and its former right event
        // begins a piece starting at (2, 0).
        assert_eq!(le1.get_other_event().unwrap().p, Point::new(1.0, 0.0));
        assert_eq!(re1.get_other_event().unwrap().p, Point::new(2.0, 0.0));
        // The contained segment is untouched.
        assert!(Rc::ptr_eq(&le2.get_other_event().unwrap(), &re2));
    }
}
