// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Sweep events and their processing order in the event queue.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::{Rc, Weak};

use crate::edge::{signed_area, Edge};
use crate::point::Point;
use crate::CoordinateType;

/// Which of the two operands a segment belongs to.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum PolygonType {
    Subject,
    Clipping,
}

/// Classification of a segment for the boolean labelling. Edges start out
/// `Normal`; overlapping edges of the two operands are reclassified once
/// the overlap is discovered.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum EdgeType {
    Normal,
    NonContributing,
    SameTransition,
    DifferentTransition,
}

/// Transition of a result segment, used to attribute holes and depths
/// when the contours are reconstructed.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ResultTransition {
    /// The segment does not contribute to the result.
    Neutral,
    /// Crossing the segment upwards enters the interior of the result.
    Contributing,
    /// Crossing the segment upwards leaves the interior of the result.
    NonContributing,
}

impl ResultTransition {
    pub fn is_contributing(self) -> bool {
        self == ResultTransition::Contributing
    }
}

#[derive(Debug)]
struct MutablePart<T: CoordinateType> {
    /// The event of the other endpoint of the segment.
    other_event: Weak<SweepEvent<T>>,
    /// Nearest lower segment in the status line that belongs to the result
    /// and is not vertical.
    prev_in_result: Weak<SweepEvent<T>>,
    /// Is the event point the left endpoint of the segment?
    is_left_event: bool,
    edge_type: EdgeType,
    /// Does a vertical ray from below cross into the polygon this segment
    /// belongs to at this segment?
    in_out: bool,
    /// `in_out` of the closest segment of the other polygon below this one.
    other_in_out: bool,
    /// Does this segment contribute to the result?
    in_result: bool,
    result_transition: ResultTransition,
    /// Index into the result event list during contour reconstruction.
    pos: usize,
    /// Contour of the result polygon this event was emitted into.
    output_contour_id: Option<usize>,
    /// Direction bookkeeping bit of the contour walk.
    result_in_out: bool,
}

/// An endpoint of a segment moving through the sweep. Events are shared
/// between the queue, the status line and the result list and refer to each
/// other through weak links, so they live in reference counted allocations
/// until the whole operation is finished.
#[derive(Debug)]
pub struct SweepEvent<T: CoordinateType> {
    /// Part of the event that is mutated during the sweep.
    /// Borrow checking happens at runtime.
    mutable: RefCell<MutablePart<T>>,
    /// The endpoint this event represents.
    pub p: Point<T>,
    pub polygon_type: PolygonType,
    /// Identifier of the input contour this segment came from.
    pub contour_id: usize,
    /// Monotone construction-order identifier, shared by the two events of a
    /// segment. The deterministic tie breaker of both comparators.
    pub event_id: usize,
}

impl<T: CoordinateType> SweepEvent<T> {
    pub fn new_rc(
        event_id: usize,
        contour_id: usize,
        point: Point<T>,
        is_left_event: bool,
        other_event: Weak<SweepEvent<T>>,
        polygon_type: PolygonType,
    ) -> Rc<SweepEvent<T>> {
        Rc::new(SweepEvent {
            mutable: RefCell::new(MutablePart {
                other_event,
                prev_in_result: Weak::new(),
                is_left_event,
                edge_type: EdgeType::Normal,
                in_out: false,
                other_in_out: false,
                in_result: false,
                result_transition: ResultTransition::Neutral,
                pos: 0,
                output_contour_id: None,
                result_in_out: false,
            }),
            p: point,
            polygon_type,
            contour_id,
            event_id,
        })
    }

    pub fn is_left_event(&self) -> bool {
        self.mutable.borrow().is_left_event
    }

    pub fn set_left_event(&self, left: bool) {
        self.mutable.borrow_mut().is_left_event = left
    }

    pub fn get_other_event(&self) -> Option<Rc<SweepEvent<T>>> {
        self.mutable.borrow().other_event.upgrade()
    }

    pub fn set_other_event(&self, other_event: &Rc<SweepEvent<T>>) {
        self.mutable.borrow_mut().other_event = Rc::downgrade(other_event);
    }

    /// The segment of this event, oriented from this endpoint to the other.
    pub fn get_edge(&self) -> Option<Edge<T>> {
        self.get_other_event().map(|other| {
            debug_assert!(self.is_left_event() ^ other.is_left_event());
            Edge::new(self.p, other.p)
        })
    }

    pub fn get_edge_type(&self) -> EdgeType {
        self.mutable.borrow().edge_type
    }

    pub fn set_edge_type(&self, edge_type: EdgeType) {
        self.mutable.borrow_mut().edge_type = edge_type
    }

    pub fn is_in_out(&self) -> bool {
        self.mutable.borrow().in_out
    }

    pub fn is_other_in_out(&self) -> bool {
        self.mutable.borrow().other_in_out
    }

    pub fn set_in_out(&self, in_out: bool, other_in_out: bool) {
        let mut mutable = self.mutable.borrow_mut();
        mutable.in_out = in_out;
        mutable.other_in_out = other_in_out;
    }

    pub fn is_in_result(&self) -> bool {
        self.mutable.borrow().in_result
    }

    pub fn set_in_result(&self, in_result: bool) {
        self.mutable.borrow_mut().in_result = in_result
    }

    pub fn get_result_transition(&self) -> ResultTransition {
        self.mutable.borrow().result_transition
    }

    pub fn set_result_transition(&self, result_transition: ResultTransition) {
        self.mutable.borrow_mut().result_transition = result_transition
    }

    pub fn get_prev_in_result(&self) -> Weak<SweepEvent<T>> {
        self.mutable.borrow().prev_in_result.clone()
    }

    pub fn set_prev_in_result(&self, prev_in_result: Weak<SweepEvent<T>>) {
        self.mutable.borrow_mut().prev_in_result = prev_in_result;
    }

    pub fn get_pos(&self) -> usize {
        self.mutable.borrow().pos
    }

    pub fn set_pos(&self, pos: usize) {
        self.mutable.borrow_mut().pos = pos
    }

    pub fn get_output_contour_id(&self) -> Option<usize> {
        self.mutable.borrow().output_contour_id
    }

    pub fn set_output_contour_id(&self, output_contour_id: usize) {
        self.mutable.borrow_mut().output_contour_id = Some(output_contour_id)
    }

    pub fn set_result_in_out(&self, result_in_out: bool) {
        self.mutable.borrow_mut().result_in_out = result_in_out
    }

    /// Is the segment of this event vertical?
    pub fn is_vertical(&self) -> bool {
        match self.get_other_event() {
            Some(other) => self.p.x == other.p.x,
            None => false,
        }
    }

    /// Is the segment of this event below the point `p`?
    pub fn below(&self, p: Point<T>) -> bool {
        let other = self.get_other_event().unwrap();
        if self.is_left_event() {
            signed_area(self.p, other.p, p) > T::zero()
        } else {
            signed_area(other.p, self.p, p) > T::zero()
        }
    }

    /// Is the segment of this event above the point `p`?
    pub fn above(&self, p: Point<T>) -> bool {
        !self.below(p)
    }
}

/// Total processing order of the sweep: events left of others first, lower
/// ones first on equal x, right endpoints before left endpoints on the same
/// point, then the lower segment, the subject operand, and finally the
/// construction order decide.
pub fn compare_events<T: CoordinateType>(e1: &SweepEvent<T>, e2: &SweepEvent<T>) -> Ordering {
    match e1.p.partial_cmp(&e2.p).unwrap() {
        Ordering::Equal => (),
        ord => return ord,
    }

    // Same point: process right endpoints first so that segments leave the
    // status line before new segments starting at this point enter it.
    if e1.is_left_event() != e2.is_left_event() {
        return if e1.is_left_event() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }

    // Same point, same endpoint kind: the event of the lower segment comes
    // first.
    let o1 = e1.get_other_event().unwrap();
    let o2 = e2.get_other_event().unwrap();
    if signed_area(e1.p, o1.p, o2.p) != T::zero() {
        return if e1.below(o2.p) {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }

    // Collinear segments: subject before clipping.
    if e1.polygon_type != e2.polygon_type {
        return if e1.polygon_type == PolygonType::Subject {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }

    e1.event_id.cmp(&e2.event_id)
}

impl<T: CoordinateType> PartialEq for SweepEvent<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: CoordinateType> Eq for SweepEvent<T> {}

impl<T: CoordinateType> PartialOrd for SweepEvent<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: CoordinateType> Ord for SweepEvent<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Note that the order is reversed because the queue is a max-heap.
        compare_events(other, self)
    }
}
