// SPDX-FileCopyrightText: 2022 Thomas Kramer
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Boolean operations on polygons in the plane.
//!
//! This crate computes the intersection, union, difference and symmetric
//! difference of two polygons with a sweep line over the segment endpoints
//! and intersection points, following the algorithm of Martínez, Rueda and
//! Feito. Operands may consist of several contours and may contain holes;
//! the contours of the result carry their nesting depth and hole
//! relationships.
//!
//! Coordinates are floating point numbers. The implementation accepts the
//! robustness limits that come with that: intersection points are clamped
//! and snapped onto segment endpoints, but nearly degenerate input can
//! still produce imprecise geometry.
//!
//! # Example
//!
//! ```
//! use polygon_booleanop::{difference, Polygon};
//!
//! let subject = Polygon::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
//! let clipping = Polygon::from(vec![(3.0, 3.0), (7.0, 3.0), (7.0, 7.0), (3.0, 7.0)]);
//!
//! // Cutting a hole into the middle of the square.
//! let result = difference(&subject, &clipping);
//!
//! assert_eq!(result.len(), 2);
//! assert!(result.contour(0).external());
//! assert_eq!(result.contour(1).hole_of(), Some(0));
//! assert_eq!(result.contour(1).depth(), 1);
//! ```

use std::fmt::Debug;
use std::str::FromStr;

use num_traits::Float;

mod booleanop;
mod compare_segments;
mod connect_edges;
mod edge;
mod point;
mod polygon;
mod possible_intersection;
mod rect;
mod sweep_event;

// API exports.
pub use booleanop::{boolean_op, difference, intersection, union, xor};
pub use edge::{edge_intersection, signed_area, Edge, EdgeIntersection, Side};
pub use point::Point;
pub use polygon::{Contour, Polygon};
pub use rect::Rect;

/// Trait bound for the coordinates the sweep works on.
pub trait CoordinateType: Float + Debug {}

impl<T: Float + Debug> CoordinateType for T {}

/// Type of boolean operation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operation {
    Intersection,
    Difference,
    Union,
    Xor,
}

/// Error returned when parsing an unknown operation name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a boolean operation: {0}")]
pub struct InvalidOperation(String);

impl FromStr for Operation {
    type Err = InvalidOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "intersection" => Ok(Operation::Intersection),
            "difference" => Ok(Operation::Difference),
            "union" => Ok(Operation::Union),
            "xor" => Ok(Operation::Xor),
            other => Err(InvalidOperation(other.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_operation() {
        assert_eq!("union".parse(), Ok(Operation::Union));
        assert_eq!("difference".parse(), Ok(Operation::Difference));
        assert_eq!(
            "uniob".parse::<Operation>(),
            Err(InvalidOperation("uniob".to_string()))
        );
    }
}
