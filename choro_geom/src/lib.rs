// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region geometry and point-in-polygon predicates.
//!
//! This crate provides the narrow phase of region hit testing: given a point
//! in plane coordinates and a region's polygon geometry, decide whether the
//! point lies inside. It is built on top of [`kurbo`] points and is
//! intentionally decoupled from any spatial index or event handling.
//!
//! # Typical usage
//!
//! - Use a broad-phase index (e.g., `choro_index`) to cull candidates by
//!   bounding box.
//! - Make sure the query point is in the same plane coordinates as the
//!   geometry.
//! - Call [`Contains::contains_point`] on each candidate.
//!
//! # Key types
//!
//! - [`Polygon`] – one outer ring plus zero or more hole rings.
//! - [`Geometry`] – a polygon or a multi-polygon. [`Geometry::components`]
//!   presents both as a slice of polygons, so callers never branch on the
//!   variant.
//! - [`Feature`] – an identified geometry, the unit that gets highlighted.
//! - [`Contains`] – the containment trait all of the above implement.
//!
//! ## Boundary behavior
//!
//! Containment uses the classic even-odd ray-casting rule (see
//! [`ring_contains`]). A vertex counts as "above" the ray only when its `y`
//! is strictly greater than the point's, and a crossing counts only when the
//! point is strictly left of the edge. Points exactly on an edge or vertex
//! therefore resolve one way or the other depending on edge orientation;
//! this is left as is so hit testing matches what ray-casting renderers show.
//!
//! ```
//! use choro_geom::{Contains, Geometry, Polygon};
//! use kurbo::{Point, Rect};
//!
//! let outer = Polygon::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
//! let with_hole = Polygon::new(
//!     outer.exterior().to_vec(),
//!     vec![Polygon::from_rect(Rect::new(3.0, 3.0, 7.0, 7.0)).exterior().to_vec()],
//! );
//! let geometry = Geometry::Polygon(with_hole);
//!
//! assert!(geometry.contains_point(Point::new(1.0, 1.0)));
//! assert!(!geometry.contains_point(Point::new(5.0, 5.0)));
//! ```

#![no_std]

extern crate alloc;

use kurbo::Point;

mod geometry;
pub mod path;

pub use geometry::{Feature, Geometry, Polygon, Ring};

/// Point containment in plane coordinates.
pub trait Contains {
    /// Whether `pt` lies inside the shape.
    fn contains_point(&self, pt: Point) -> bool;
}

/// Even-odd ray-casting test of `pt` against one closed ring.
///
/// The ring is implicitly closed; a repeated closing vertex adds a
/// zero-length edge that never counts. For consecutive vertices `i` and `j`
/// (with `j` the previous vertex, wrapping from the last), the edge toggles
/// the result when `(yi > py) != (yj > py)` and `px` is strictly left of the
/// edge's x at `py`. Winding order does not matter, and rings with fewer
/// than three vertices never contain a point.
pub fn ring_contains(ring: &[Point], pt: Point) -> bool {
    let Some(&last) = ring.last() else {
        return false;
    };
    let mut inside = false;
    let mut prev = last;
    for &cur in ring {
        if (cur.y > pt.y) != (prev.y > pt.y)
            && pt.x < (prev.x - cur.x) * (pt.y - cur.y) / (prev.y - cur.y) + cur.x
        {
            inside = !inside;
        }
        prev = cur;
    }
    inside
}

impl Contains for [Point] {
    fn contains_point(&self, pt: Point) -> bool {
        ring_contains(self, pt)
    }
}
