// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Polygons built from closed contours with hole and depth bookkeeping.

use std::cell::Cell;

use itertools::Itertools;

use crate::edge::Edge;
use crate::point::Point;
use crate::rect::Rect;
use crate::CoordinateType;

/// A closed ring of vertices. The edge from the last vertex back to the
/// first one is implicit, the closing vertex is not repeated.
///
/// A contour knows which other contours of its polygon are holes inside it,
/// whether it is itself a hole of a parent contour, and its nesting depth.
/// External contours are counter-clockwise, holes of odd depth clockwise.
#[derive(Clone, Debug)]
pub struct Contour<T> {
    points: Vec<Point<T>>,
    /// Indices of the contours inside the same polygon that are holes of this one.
    hole_indices: Vec<usize>,
    /// Index of the parent contour if this contour is a hole.
    hole_of: Option<usize>,
    /// Nesting depth. External contours have depth 0.
    depth: usize,
    /// Cached orientation.
    is_clockwise: Cell<Option<bool>>,
}

impl<T: CoordinateType> Contour<T> {
    pub fn new() -> Self {
        Contour {
            points: Vec::new(),
            hole_indices: Vec::new(),
            hole_of: None,
            depth: 0,
            is_clockwise: Cell::new(None),
        }
    }

    /// Number of vertices. Equals the number of edges of the ring.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point<T>] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point<T>> {
        self.points.iter()
    }

    /// The `i`-th edge of the ring. The last edge wraps around to the
    /// first vertex.
    pub fn edge(&self, i: usize) -> Edge<T> {
        let next = (i + 1) % self.points.len();
        Edge::new(self.points[i], self.points[next])
    }

    /// Iterate over the edges of the closed ring.
    pub fn edges(&self) -> impl Iterator<Item = Edge<T>> + '_ {
        self.points
            .iter()
            .circular_tuple_windows()
            .map(|(&start, &end)| Edge::new(start, end))
    }

    pub fn bounding_box(&self) -> Option<Rect<T>> {
        let mut points = self.points.iter();
        let first = points.next()?;
        let bbox = Rect::new(*first, *first);
        Some(points.fold(bbox, |bbox, &p| bbox.add_point(p)))
    }

    /// Twice the enclosed area is the sum of the edge cross products.
    /// Positive for counter-clockwise rings.
    pub fn signed_area(&self) -> T {
        let two = T::one() + T::one();
        self.edges()
            .fold(T::zero(), |sum, edge| sum + edge.start.cross(edge.end))
            / two
    }

    /// Is the ring oriented clockwise? The answer is cached until the
    /// contour is modified.
    pub fn clockwise(&self) -> bool {
        match self.is_clockwise.get() {
            Some(clockwise) => clockwise,
            None => {
                let clockwise = self.signed_area() < T::zero();
                self.is_clockwise.set(Some(clockwise));
                clockwise
            }
        }
    }

    pub fn counter_clockwise(&self) -> bool {
        !self.clockwise()
    }

    /// Reverse the order of the vertices.
    pub fn change_orientation(&mut self) {
        self.points.reverse();
        if let Some(clockwise) = self.is_clockwise.get() {
            self.is_clockwise.set(Some(!clockwise));
        }
    }

    pub fn set_clockwise(&mut self) {
        if self.counter_clockwise() {
            self.change_orientation()
        }
    }

    pub fn set_counter_clockwise(&mut self) {
        if self.clockwise() {
            self.change_orientation()
        }
    }

    /// Append a vertex to the ring.
    pub fn add(&mut self, p: Point<T>) {
        self.points.push(p);
        self.is_clockwise.set(None);
    }

    /// Register the contour with index `hole_index` as a hole of this contour.
    pub fn add_hole(&mut self, hole_index: usize) {
        self.hole_indices.push(hole_index);
    }

    /// Indices of the holes of this contour within its polygon.
    pub fn holes(&self) -> &[usize] {
        &self.hole_indices
    }

    /// Index of the parent contour if this contour is a hole.
    pub fn hole_of(&self) -> Option<usize> {
        self.hole_of
    }

    pub fn set_hole_of(&mut self, parent: Option<usize>) {
        self.hole_of = parent;
    }

    /// A contour is external iff it is not the hole of another contour.
    pub fn external(&self) -> bool {
        self.hole_of.is_none()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.hole_indices.clear();
        self.hole_of = None;
        self.depth = 0;
        self.is_clockwise.set(None);
    }
}

impl<T: CoordinateType> Default for Contour<T> {
    fn default() -> Self {
        Contour::new()
    }
}

impl<T: CoordinateType> From<Vec<(T, T)>> for Contour<T> {
    fn from(points: Vec<(T, T)>) -> Self {
        let mut contour = Contour::new();
        for p in points {
            contour.add(p.into());
        }
        contour
    }
}

/// An ordered list of contours.
#[derive(Clone, Debug, Default)]
pub struct Polygon<T> {
    contours: Vec<Contour<T>>,
}

impl<T: CoordinateType> Polygon<T> {
    pub fn new() -> Self {
        Polygon {
            contours: Vec::new(),
        }
    }

    /// Number of contours.
    pub fn len(&self) -> usize {
        self.contours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn contour(&self, i: usize) -> &Contour<T> {
        &self.contours[i]
    }

    pub fn contour_mut(&mut self, i: usize) -> &mut Contour<T> {
        &mut self.contours[i]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contour<T>> {
        self.contours.iter()
    }

    pub fn push(&mut self, contour: Contour<T>) {
        self.contours.push(contour);
    }

    pub fn pop(&mut self) -> Option<Contour<T>> {
        self.contours.pop()
    }

    /// Total number of vertices over all contours.
    pub fn vertex_count(&self) -> usize {
        self.contours.iter().map(|c| c.len()).sum()
    }

    pub fn bounding_box(&self) -> Option<Rect<T>> {
        self.contours
            .iter()
            .filter_map(|c| c.bounding_box())
            .fold(None, |acc, bbox| match acc {
                Some(acc) => Some(acc.union(&bbox)),
                None => Some(bbox),
            })
    }

    /// Append all contours of `other`. The hole indices and parent links of
    /// the appended contours are shifted so that they stay valid after the
    /// concatenation.
    pub fn join(&mut self, other: &Polygon<T>) {
        let offset = self.contours.len();
        for contour in &other.contours {
            let mut contour = contour.clone();
            contour.hole_indices = contour.hole_indices.iter().map(|i| i + offset).collect();
            contour.hole_of = contour.hole_of.map(|parent| parent + offset);
            self.contours.push(contour);
        }
    }

    /// Even-odd test whether `p` lies inside the polygon. Points exactly on
    /// the boundary may be reported either way.
    pub fn contains_point(&self, p: Point<T>) -> bool {
        let mut inside = false;
        for contour in &self.contours {
            for edge in contour.edges() {
                let (a, b) = (edge.start, edge.end);
                if (a.y > p.y) != (b.y > p.y) {
                    let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                    if p.x < x_cross {
                        inside = !inside;
                    }
                }
            }
        }
        inside
    }
}

impl<T: CoordinateType> From<Vec<(T, T)>> for Polygon<T> {
    fn from(points: Vec<(T, T)>) -> Self {
        Polygon {
            contours: vec![points.into()],
        }
    }
}

impl<T: CoordinateType> From<Vec<Contour<T>>> for Polygon<T> {
    fn from(contours: Vec<Contour<T>>) -> Self {
        Polygon { contours }
    }
}
