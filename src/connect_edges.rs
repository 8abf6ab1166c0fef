// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Connect the labelled result segments of the sweep into the contours of
//! the result polygon, attributing holes and nesting depths.

use std::cmp::Ordering;
use std::rc::Rc;

use crate::polygon::{Contour, Polygon};
use crate::sweep_event::{compare_events, SweepEvent};
use crate::CoordinateType;

/// Assemble the result polygon from the events collected by the sweep.
///
/// Events at the same point end up next to each other in the re-sorted
/// list, which makes following a contour easy: start at some left event, go
/// to its partner, and from there find an unused event at the same point.
pub fn connect_edges<T: CoordinateType>(sorted_events: &[Rc<SweepEvent<T>>]) -> Polygon<T> {
    let result_events = order_events(filter_events(sorted_events));

    let mut contours: Vec<Contour<T>> = Vec::new();
    let mut processed = vec![false; result_events.len()];

    for i in 0..result_events.len() {
        if processed[i] {
            continue;
        }

        let contour_id = contours.len();
        let mut contour = initialize_contour(&result_events[i], &mut contours, contour_id);

        debug_assert!(result_events[i].is_left_event());

        let initial = result_events[i].p;
        contour.add(initial);

        let mut pos = i;
        loop {
            mark_processed(&result_events[pos], &mut processed, pos, contour_id);
            pos = result_events[pos].get_pos();
            mark_processed(&result_events[pos], &mut processed, pos, contour_id);

            if result_events[pos].p == initial {
                // The ring is closed.
                break;
            }

            contour.add(result_events[pos].p);
            pos = next_pos(pos, &result_events, &processed, i);
            if processed[pos] {
                // No unprocessed event continues the ring.
                break;
            }
        }

        // External contours and even depths wind counter-clockwise,
        // holes of odd depth clockwise.
        if contour.depth() % 2 == 1 {
            contour.set_clockwise();
        } else {
            contour.set_counter_clockwise();
        }

        contours.push(contour);
    }

    Polygon::from(contours)
}

/// Keep the events whose segments belong to the result.
fn filter_events<T: CoordinateType>(sorted_events: &[Rc<SweepEvent<T>>]) -> Vec<Rc<SweepEvent<T>>> {
    sorted_events
        .iter()
        .filter(|event| {
            if event.is_left_event() {
                event.is_in_result()
            } else {
                event
                    .get_other_event()
                    .map(|other| other.is_in_result())
                    .unwrap_or(false)
            }
        })
        .cloned()
        .collect()
}

/// Restore the event order and let every event know the position of its
/// partner.
fn order_events<T: CoordinateType>(mut events: Vec<Rc<SweepEvent<T>>>) -> Vec<Rc<SweepEvent<T>>> {
    // Segment subdivision can enqueue events behind the sweep position, so
    // the processing order is not quite the comparator order. The list is
    // almost sorted though: bubble to a fixed point.
    let mut sorted = false;
    while !sorted {
        sorted = true;
        for i in 1..events.len() {
            if compare_events(&events[i - 1], &events[i]) == Ordering::Greater {
                events.swap(i - 1, i);
                sorted = false;
            }
        }
    }

    for (pos, event) in events.iter().enumerate() {
        event.set_pos(pos);
    }

    // Swap the positions of every pair: afterwards each event stores the
    // index of its partner.
    for event in events.iter() {
        if !event.is_left_event() {
            if let Some(other) = event.get_other_event() {
                let tmp = event.get_pos();
                event.set_pos(other.get_pos());
                other.set_pos(tmp);
            }
        }
    }

    events
}

/// Open a new contour at `event` and derive its nesting from the closest
/// result segment below it.
fn initialize_contour<T: CoordinateType>(
    event: &Rc<SweepEvent<T>>,
    contours: &mut Vec<Contour<T>>,
    contour_id: usize,
) -> Contour<T> {
    let mut contour = Contour::new();

    if let Some(prev_in_result) = event.get_prev_in_result().upgrade() {
        // The segment below was walked earlier, so it already knows its
        // output contour.
        let lower_contour_id = prev_in_result.get_output_contour_id().unwrap();

        if prev_in_result.get_result_transition().is_contributing() {
            // The region between the lower segment and this contour is
            // inside the result: the new contour is a hole. A hole found
            // inside a hole boundary belongs to the same parent.
            match contours[lower_contour_id].hole_of() {
                Some(parent_id) => {
                    contours[parent_id].add_hole(contour_id);
                    contour.set_hole_of(Some(parent_id));
                    contour.set_depth(contours[lower_contour_id].depth());
                }
                None => {
                    contours[lower_contour_id].add_hole(contour_id);
                    contour.set_hole_of(Some(lower_contour_id));
                    contour.set_depth(contours[lower_contour_id].depth() + 1);
                }
            }
        } else {
            // The region above the lower segment is outside of the result:
            // an external contour at the same depth.
            contour.set_depth(contours[lower_contour_id].depth());
        }
    }

    contour
}

/// Mark the event at `pos` as used by contour `contour_id`. The walking
/// direction and the output contour are recorded on the left event of the
/// pair.
fn mark_processed<T: CoordinateType>(
    event: &Rc<SweepEvent<T>>,
    processed: &mut [bool],
    pos: usize,
    contour_id: usize,
) {
    processed[pos] = true;
    if event.is_left_event() {
        event.set_result_in_out(false);
        event.set_output_contour_id(contour_id);
    } else if let Some(other) = event.get_other_event() {
        other.set_result_in_out(true);
        other.set_output_contour_id(contour_id);
    }
}

/// Find the next unprocessed event at the same point as `result_events[pos]`.
/// Scans forward first, then backwards down to the contour's origin.
fn next_pos<T: CoordinateType>(
    pos: usize,
    result_events: &[Rc<SweepEvent<T>>],
    processed: &[bool],
    orig_pos: usize,
) -> usize {
    debug_assert!(pos > orig_pos);

    let point = result_events[pos].p;

    let mut new_pos = pos + 1;
    while new_pos < result_events.len() && result_events[new_pos].p == point {
        if !processed[new_pos] {
            return new_pos;
        }
        new_pos += 1;
    }

    let mut new_pos = pos - 1;
    while new_pos > orig_pos && processed[new_pos] {
        new_pos -= 1;
    }
    new_pos
}
