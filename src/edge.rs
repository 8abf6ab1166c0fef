// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Line segments and the segment/segment intersection routine.

use crate::point::Point;
use crate::rect::Rect;
use crate::CoordinateType;

/// Signed area of the triangle `(p0, p1, p2)`.
///
/// Positive for a counter-clockwise triangle, negative for a clockwise one,
/// zero iff the three points are collinear.
pub fn signed_area<T: CoordinateType>(p0: Point<T>, p1: Point<T>, p2: Point<T>) -> T {
    (p0.x - p2.x) * (p1.y - p2.y) - (p1.x - p2.x) * (p0.y - p2.y)
}

/// Side of an oriented edge on which a point lies.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Side {
    Left,
    Right,
    Center,
}

/// A directed line segment between two points.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Edge<T> {
    pub start: Point<T>,
    pub end: Point<T>,
}

impl<T: CoordinateType> Edge<T> {
    pub fn new(start: Point<T>, end: Point<T>) -> Self {
        Edge { start, end }
    }

    /// An edge with coinciding endpoints. Degenerate edges are dropped
    /// before they reach the event queue.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// The lexicographically smaller endpoint.
    pub fn min(&self) -> Point<T> {
        if self.start < self.end {
            self.start
        } else {
            self.end
        }
    }

    /// The lexicographically larger endpoint.
    pub fn max(&self) -> Point<T> {
        if self.start < self.end {
            self.end
        } else {
            self.start
        }
    }

    /// Direction vector from `start` to `end`.
    pub fn vector(&self) -> Point<T> {
        self.end - self.start
    }

    /// On which side of the edge does `p` lie, looking from `start` towards `end`?
    pub fn side_of(&self, p: Point<T>) -> Side {
        let area = signed_area(self.start, self.end, p);
        if area > T::zero() {
            Side::Left
        } else if area < T::zero() {
            Side::Right
        } else {
            Side::Center
        }
    }

    /// Both endpoints of `other` lie on the supporting line of `self`.
    pub fn is_collinear(&self, other: &Edge<T>) -> bool {
        self.side_of(other.start) == Side::Center && self.side_of(other.end) == Side::Center
    }

    pub fn bounding_box(&self) -> Rect<T> {
        Rect::new(self.start, self.end)
    }
}

/// Result of intersecting two edges.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum EdgeIntersection<T> {
    /// The edges do not intersect.
    None,
    /// The edges intersect in a single point interior to both.
    Point(Point<T>),
    /// The edges intersect in a single point which is an endpoint
    /// of at least one of them.
    EndPoint(Point<T>),
    /// The edges are collinear and share more than one point.
    Overlap(Edge<T>),
}

/// Compute the intersection of two edges.
///
/// The computation is carried out in a parametric formulation with the
/// 2d cross product as parallelism test. All returned points are clamped
/// into the intersection of the two edge bounding boxes to bound the
/// numerical drift of the division, and points closer than a small
/// tolerance to an input endpoint are snapped onto that endpoint.
pub fn edge_intersection<T: CoordinateType>(e1: &Edge<T>, e2: &Edge<T>) -> EdgeIntersection<T> {
    // The intersection, if any, lies in the overlap of the bounding boxes.
    let clip = match e1.bounding_box().intersection(&e2.bounding_box()) {
        Some(clip) => clip,
        None => return EdgeIntersection::None,
    };

    let d0 = e1.vector();
    let d1 = e2.vector();
    let e = e2.start - e1.start;

    let kross = d0.cross(d1);
    let sqr_len0 = d0.norm2_squared();
    let sqr_len1 = d1.norm2_squared();
    let sqr_epsilon = T::from(1e-14).unwrap();

    if kross * kross > sqr_epsilon * sqr_len0 * sqr_len1 {
        // The supporting lines cross. Solve for the parameters on both edges.
        let s = e.cross(d1) / kross;
        if s < T::zero() || s > T::one() {
            return EdgeIntersection::None;
        }
        let t = e.cross(d0) / kross;
        if t < T::zero() || t > T::one() {
            return EdgeIntersection::None;
        }

        let p = Point::new(e1.start.x + s * d0.x, e1.start.y + s * d0.y);
        let p = snap_to_endpoint(clip.clamp(p), e1, e2);

        return if p == e1.start || p == e1.end || p == e2.start || p == e2.end {
            EdgeIntersection::EndPoint(p)
        } else {
            EdgeIntersection::Point(p)
        };
    }

    // The edges are parallel. Are they collinear?
    let sqr_len_e = e.norm2_squared();
    let kross_e = e.cross(d0);
    if kross_e * kross_e > sqr_epsilon * sqr_len0 * sqr_len_e {
        return EdgeIntersection::None;
    }

    // Collinear: project `e2` onto `e1` and clamp the overlap interval to [0, 1].
    let s0 = d0.dot(e) / sqr_len0;
    let s1 = s0 + d0.dot(d1) / sqr_len0;
    let (smin, smax) = if s0 < s1 { (s0, s1) } else { (s1, s0) };

    if smax < T::zero() || smin > T::one() {
        return EdgeIntersection::None;
    }
    let begin = smin.max(T::zero());
    let end = smax.min(T::one());

    let q0 = Point::new(e1.start.x + begin * d0.x, e1.start.y + begin * d0.y);
    let q0 = snap_to_endpoint(clip.clamp(q0), e1, e2);

    if begin == end {
        // The edges only touch in one point, necessarily an endpoint of both.
        return EdgeIntersection::EndPoint(q0);
    }

    let q1 = Point::new(e1.start.x + end * d0.x, e1.start.y + end * d0.y);
    let q1 = snap_to_endpoint(clip.clamp(q1), e1, e2);

    EdgeIntersection::Overlap(Edge::new(q0, q1))
}

/// Snap `p` onto the nearest endpoint of the two edges if it is closer
/// than the tolerance.
fn snap_to_endpoint<T: CoordinateType>(p: Point<T>, e1: &Edge<T>, e2: &Edge<T>) -> Point<T> {
    let tol = T::from(1e-9).unwrap();
    let tol2 = tol * tol;
    for &endpoint in &[e1.start, e1.end, e2.start, e2.end] {
        if (p - endpoint).norm2_squared() <= tol2 {
            return endpoint;
        }
    }
    p
}

#[cfg(test)]
mod test {
    use super::*;

    fn edge(start: (f64, f64), end: (f64, f64)) -> Edge<f64> {
        Edge::new(start.into(), end.into())
    }

    #[test]
    fn test_side_of() {
        let e = edge((0.0, 0.0), (2.0, 0.0));

        assert_eq!(e.side_of(Point::new(1.0, 1.0)), Side::Left);
        assert_eq!(e.side_of(Point::new(1.0, -1.0)), Side::Right);
        assert_eq!(e.side_of(Point::new(5.0, 0.0)), Side::Center);
    }

    #[test]
    fn test_crossing_edges() {
        let e1 = edge((0.0, 0.0), (2.0, 2.0));
        let e2 = edge((0.0, 2.0), (2.0, 0.0));

        assert_eq!(
            edge_intersection(&e1, &e2),
            EdgeIntersection::Point(Point::new(1.0, 1.0))
        );
    }

    #[test]
    fn test_intersection_in_endpoint() {
        // The edges form a T: the endpoint of `e2` lies on the interior of `e1`.
        let e1 = edge((0.0, 0.0), (2.0, 0.0));
        let e2 = edge((1.0, 0.0), (1.0, 2.0));

        assert_eq!(
            edge_intersection(&e1, &e2),
            EdgeIntersection::EndPoint(Point::new(1.0, 0.0))
        );
    }

    #[test]
    fn test_shared_endpoint_of_non_collinear_edges() {
        let e1 = edge((0.0, 0.0), (1.0, 0.0));
        let e2 = edge((1.0, 0.0), (2.0, 1.0));

        assert_eq!(
            edge_intersection(&e1, &e2),
            EdgeIntersection::EndPoint(Point::new(1.0, 0.0))
        );
    }

    #[test]
    fn test_collinear_touching_in_one_point() {
        let e1 = edge((0.0, 0.0), (1.0, 0.0));
        let e2 = edge((1.0, 0.0), (2.0, 0.0));

        assert_eq!(
            edge_intersection(&e1, &e2),
            EdgeIntersection::EndPoint(Point::new(1.0, 0.0))
        );
    }

    #[test]
    fn test_collinear_overlap() {
        let e1 = edge((0.0, 0.0), (2.0, 0.0));
        let e2 = edge((1.0, 0.0), (3.0, 0.0));

        assert_eq!(
            edge_intersection(&e1, &e2),
            EdgeIntersection::Overlap(edge((1.0, 0.0), (2.0, 0.0)))
        );
    }

    #[test]
    fn test_containment_overlap() {
        let e1 = edge((0.0, 0.0), (4.0, 0.0));
        let e2 = edge((1.0, 0.0), (2.0, 0.0));

        assert_eq!(
            edge_intersection(&e1, &e2),
            EdgeIntersection::Overlap(edge((1.0, 0.0), (2.0, 0.0)))
        );
    }

    #[test]
    fn test_parallel_edges() {
        let e1 = edge((0.0, 0.0), (2.0, 0.0));
        let e2 = edge((0.0, 1.0), (2.0, 1.0));

        assert_eq!(edge_intersection(&e1, &e2), EdgeIntersection::None);
    }

    #[test]
    fn test_disjoint_bounding_boxes() {
        let e1 = edge((0.0, 0.0), (1.0, 1.0));
        let e2 = edge((5.0, 5.0), (6.0, 6.0));

        assert_eq!(edge_intersection(&e1, &e2), EdgeIntersection::None);
    }

    #[test]
    fn test_non_intersecting_crossing_lines() {
        // The supporting lines cross, but outside of the segments.
        let e1 = edge((0.0, 0.0), (1.0, 0.0));
        let e2 = edge((0.9, 1.0), (1.0, 0.1));

        assert_eq!(edge_intersection(&e1, &e2), EdgeIntersection::None);
    }
}
