// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The sweep line engine: event queue construction, trivial cases, the
//! main loop with segment subdivision, and the in/out labelling that
//! decides which segments make it into the result.

use std::collections::BinaryHeap;
use std::ops::RangeFrom;
use std::rc::{Rc, Weak};

use libreda_splay::SplaySet;

use crate::compare_segments::compare_events_by_segments;
use crate::connect_edges::connect_edges;
use crate::polygon::{Contour, Polygon};
use crate::possible_intersection::possible_intersection;
use crate::rect::Rect;
use crate::sweep_event::{EdgeType, PolygonType, ResultTransition, SweepEvent};
use crate::{CoordinateType, Operation};

/// Compute a boolean operation of two polygons.
///
/// # Example
/// ```
/// use polygon_booleanop::{boolean_op, Operation, Polygon};
///
/// let subject = Polygon::from(vec![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
/// let clipping = Polygon::from(vec![(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
///
/// let result = boolean_op(&subject, &clipping, Operation::Union);
///
/// assert_eq!(result.len(), 1);
/// assert_eq!(result.contour(0).len(), 8);
/// assert!((result.contour(0).signed_area() - 7.0).abs() < 1e-12);
/// ```
pub fn boolean_op<T: CoordinateType>(
    subject: &Polygon<T>,
    clipping: &Polygon<T>,
    operation: Operation,
) -> Polygon<T> {
    // An operand without any vertices makes the result trivial.
    let (subject_bb, clipping_bb) = match (subject.bounding_box(), clipping.bounding_box()) {
        (Some(subject_bb), Some(clipping_bb)) => (subject_bb, clipping_bb),
        (subject_bb, _) => {
            return match operation {
                Operation::Intersection => Polygon::new(),
                Operation::Difference => subject.clone(),
                Operation::Union | Operation::Xor => {
                    if subject_bb.is_some() {
                        subject.clone()
                    } else {
                        clipping.clone()
                    }
                }
            };
        }
    };

    // Operands with disjoint bounding boxes cannot interact.
    if !subject_bb.intersects(&clipping_bb) {
        return match operation {
            Operation::Intersection => Polygon::new(),
            Operation::Difference => subject.clone(),
            Operation::Union | Operation::Xor => {
                let mut result = subject.clone();
                result.join(clipping);
                result
            }
        };
    }

    let mut event_id_generator = 1..;
    let mut event_queue = fill_queue(subject, clipping, &mut event_id_generator);

    let sorted_events = subdivide_segments(&mut event_queue, operation, &subject_bb, &clipping_bb);

    connect_edges(&sorted_events)
}

/// Intersection of two polygons.
pub fn intersection<T: CoordinateType>(subject: &Polygon<T>, clipping: &Polygon<T>) -> Polygon<T> {
    boolean_op(subject, clipping, Operation::Intersection)
}

/// Union of two polygons.
pub fn union<T: CoordinateType>(subject: &Polygon<T>, clipping: &Polygon<T>) -> Polygon<T> {
    boolean_op(subject, clipping, Operation::Union)
}

/// Difference `subject - clipping` of two polygons.
pub fn difference<T: CoordinateType>(subject: &Polygon<T>, clipping: &Polygon<T>) -> Polygon<T> {
    boolean_op(subject, clipping, Operation::Difference)
}

/// Symmetric difference of two polygons.
pub fn xor<T: CoordinateType>(subject: &Polygon<T>, clipping: &Polygon<T>) -> Polygon<T> {
    boolean_op(subject, clipping, Operation::Xor)
}

/// Create the two events of every non-degenerate edge of both operands and
/// collect them in the event queue.
fn fill_queue<T: CoordinateType>(
    subject: &Polygon<T>,
    clipping: &Polygon<T>,
    event_id_generator: &mut RangeFrom<usize>,
) -> BinaryHeap<Rc<SweepEvent<T>>> {
    let mut event_queue = BinaryHeap::new();

    fn process_contour<T: CoordinateType>(
        event_queue: &mut BinaryHeap<Rc<SweepEvent<T>>>,
        contour: &Contour<T>,
        polygon_type: PolygonType,
        contour_id: usize,
        event_id_generator: &mut RangeFrom<usize>,
    ) {
        for edge in contour.edges() {
            // Skip degenerate edges.
            if edge.is_degenerate() {
                continue;
            }

            let event_id = event_id_generator.next().unwrap();
            let event_a_is_left = edge.start < edge.end;

            let event_a = SweepEvent::new_rc(
                event_id,
                contour_id,
                edge.start,
                event_a_is_left,
                Weak::new(),
                polygon_type,
            );
            let event_b = SweepEvent::new_rc(
                event_id,
                contour_id,
                edge.end,
                !event_a_is_left,
                Rc::downgrade(&event_a),
                polygon_type,
            );
            event_a.set_other_event(&event_b);

            event_queue.push(event_a);
            event_queue.push(event_b);
        }
    }

    let mut contour_id = 0;
    for contour in subject.iter() {
        process_contour(
            &mut event_queue,
            contour,
            PolygonType::Subject,
            contour_id,
            event_id_generator,
        );
        contour_id += 1;
    }
    for contour in clipping.iter() {
        process_contour(
            &mut event_queue,
            contour,
            PolygonType::Clipping,
            contour_id,
            event_id_generator,
        );
        contour_id += 1;
    }

    event_queue
}

/// Process the event queue: maintain the status line, subdivide segments at
/// their intersections and label every left event. Returns the events in
/// processing order.
fn subdivide_segments<T: CoordinateType>(
    event_queue: &mut BinaryHeap<Rc<SweepEvent<T>>>,
    operation: Operation,
    subject_bb: &Rect<T>,
    clipping_bb: &Rect<T>,
) -> Vec<Rc<SweepEvent<T>>> {
    let mut sorted_events = Vec::with_capacity(event_queue.len());

    let mut scan_line = SplaySet::new(compare_events_by_segments);

    let min_max_x = subject_bb.upper_right.x.min(clipping_bb.upper_right.x);

    while let Some(event) = event_queue.pop() {
        debug_assert!(event.is_left_event() ^ event.get_other_event().unwrap().is_left_event());

        // Once the sweep has passed these bounds, no further event can
        // change the result.
        match operation {
            Operation::Intersection if event.p.x > min_max_x => break,
            Operation::Difference if event.p.x > subject_bb.upper_right.x => break,
            _ => (),
        }

        sorted_events.push(event.clone());

        if event.is_left_event() {
            scan_line.insert(event.clone());

            let maybe_prev = scan_line.prev(&event).cloned();
            let maybe_next = scan_line.next(&event).cloned();

            compute_fields(&event, maybe_prev.as_ref(), operation);

            if let Some(next) = &maybe_next {
                if possible_intersection(&event, next, event_queue) == 2 {
                    // The segments coincide: both labellings depend on each
                    // other's operand and must be redone.
                    compute_fields(&event, maybe_prev.as_ref(), operation);
                    compute_fields(next, Some(&event), operation);
                }
            }

            if let Some(prev) = &maybe_prev {
                if possible_intersection(prev, &event, event_queue) == 2 {
                    let maybe_prev_prev = scan_line.prev(prev).cloned();
                    compute_fields(prev, maybe_prev_prev.as_ref(), operation);
                    compute_fields(&event, maybe_prev.as_ref(), operation);
                }
            }
        } else {
            let left_event = event.get_other_event().unwrap();

            if scan_line.contains(&left_event) {
                let maybe_prev = scan_line.prev(&left_event).cloned();
                let maybe_next = scan_line.next(&left_event).cloned();

                scan_line.remove(&left_event);

                // The former neighbours become adjacent now.
                if let (Some(prev), Some(next)) = (maybe_prev, maybe_next) {
                    possible_intersection(&prev, &next, event_queue);
                }
            }
        }
    }

    sorted_events
}

/// Derive the labelling of a freshly inserted left event from its
/// predecessor in the status line.
fn compute_fields<T: CoordinateType>(
    event: &Rc<SweepEvent<T>>,
    maybe_prev: Option<&Rc<SweepEvent<T>>>,
    operation: Operation,
) {
    match maybe_prev {
        None => {
            // The lowest segment at this x: a ray from below starts outside
            // of both operands.
            event.set_in_out(false, true);
            event.set_prev_in_result(Weak::new());
        }
        Some(prev) => {
            if event.polygon_type == prev.polygon_type {
                event.set_in_out(!prev.is_in_out(), prev.is_other_in_out());
            } else {
                let other_in_out = if prev.is_vertical() {
                    !prev.is_in_out()
                } else {
                    prev.is_in_out()
                };
                event.set_in_out(!prev.is_other_in_out(), other_in_out);
            }

            // The nearest lower segment that appears in the result and is
            // not vertical.
            let prev_in_result = if !prev.is_in_result() || prev.is_vertical() {
                prev.get_prev_in_result()
            } else {
                Rc::downgrade(prev)
            };
            event.set_prev_in_result(prev_in_result);
        }
    }

    let in_result = contributes_to_result(event, operation);
    event.set_in_result(in_result);
    event.set_result_transition(if in_result {
        if is_inside_result(event, operation) {
            ResultTransition::Contributing
        } else {
            ResultTransition::NonContributing
        }
    } else {
        ResultTransition::Neutral
    });
}

/// Does the segment of this left event belong to the boundary of the result?
fn contributes_to_result<T: CoordinateType>(event: &SweepEvent<T>, operation: Operation) -> bool {
    match event.get_edge_type() {
        EdgeType::Normal => match operation {
            Operation::Intersection => !event.is_other_in_out(),
            Operation::Union => event.is_other_in_out(),
            Operation::Difference => match event.polygon_type {
                PolygonType::Subject => event.is_other_in_out(),
                PolygonType::Clipping => !event.is_other_in_out(),
            },
            Operation::Xor => true,
        },
        EdgeType::NonContributing => false,
        EdgeType::SameTransition => {
            operation == Operation::Intersection || operation == Operation::Union
        }
        EdgeType::DifferentTransition => operation == Operation::Difference,
    }
}

/// Is the region directly above the segment of this event inside the result?
fn is_inside_result<T: CoordinateType>(event: &SweepEvent<T>, operation: Operation) -> bool {
    let this_in = !event.is_in_out();
    let that_in = !event.is_other_in_out();
    match operation {
        Operation::Intersection => this_in && that_in,
        Operation::Union => this_in || that_in,
        Operation::Xor => this_in ^ that_in,
        Operation::Difference => match event.polygon_type {
            PolygonType::Subject => this_in && !that_in,
            PolygonType::Clipping => that_in && !this_in,
        },
    }
}
