// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polygon, multi-polygon and feature types.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::{Contains, ring_contains};

/// A closed ring of points; the closing edge back to the first point is implicit.
pub type Ring = Vec<Point>;

/// One polygon component: an outer ring followed by zero or more hole rings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    rings: Vec<Ring>,
}

impl Polygon {
    /// Create a polygon from its outer ring and hole rings.
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Self {
        let mut rings = Vec::with_capacity(holes.len() + 1);
        rings.push(exterior);
        rings.extend(holes);
        Self { rings }
    }

    /// Create a polygon from rings in GeoJSON order: outer ring first, then holes.
    ///
    /// An empty list yields an empty polygon, which contains no point.
    pub fn from_rings(rings: Vec<Ring>) -> Self {
        Self { rings }
    }

    /// Axis-aligned rectangle as a four-vertex polygon.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(
            vec![
                Point::new(rect.x0, rect.y0),
                Point::new(rect.x1, rect.y0),
                Point::new(rect.x1, rect.y1),
                Point::new(rect.x0, rect.y1),
            ],
            Vec::new(),
        )
    }

    /// The outer ring, or an empty slice for an empty polygon.
    pub fn exterior(&self) -> &[Point] {
        self.rings.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// The hole rings.
    pub fn holes(&self) -> &[Ring] {
        self.rings.get(1..).unwrap_or(&[])
    }

    /// All rings, outer ring first.
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// A copy with every vertex passed through `f`.
    pub fn map_points(&self, mut f: impl FnMut(Point) -> Point) -> Self {
        Self {
            rings: self
                .rings
                .iter()
                .map(|ring| ring.iter().map(|&p| f(p)).collect())
                .collect(),
        }
    }
}

impl Contains for Polygon {
    /// Inside the outer ring and inside none of the holes.
    fn contains_point(&self, pt: Point) -> bool {
        ring_contains(self.exterior(), pt) && !self.holes().iter().any(|h| ring_contains(h, pt))
    }
}

/// Region geometry: a single polygon or an ordered set of polygon components.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// One polygon with optional holes.
    Polygon(Polygon),
    /// Several polygon components, for example a mainland plus islands.
    MultiPolygon(Vec<Polygon>),
}

impl Default for Geometry {
    fn default() -> Self {
        Self::MultiPolygon(Vec::new())
    }
}

impl Geometry {
    /// Collapse a list of components: one component becomes a plain polygon.
    pub fn from_components(mut components: Vec<Polygon>) -> Self {
        if components.len() == 1 {
            Self::Polygon(components.remove(0))
        } else {
            Self::MultiPolygon(components)
        }
    }

    /// The polygon components; a single polygon is a one-element slice.
    pub fn components(&self) -> &[Polygon] {
        match self {
            Self::Polygon(p) => core::slice::from_ref(p),
            Self::MultiPolygon(ps) => ps,
        }
    }

    /// Move the components out, in order.
    pub fn into_components(self) -> Vec<Polygon> {
        match self {
            Self::Polygon(p) => vec![p],
            Self::MultiPolygon(ps) => ps,
        }
    }

    /// Total number of vertices over all rings.
    pub fn vertex_count(&self) -> usize {
        self.components()
            .iter()
            .flat_map(Polygon::rings)
            .map(Vec::len)
            .sum()
    }

    /// Vertex extent of all rings, or `None` when there are no vertices.
    pub fn bounding_box(&self) -> Option<Rect> {
        let mut points = self
            .components()
            .iter()
            .flat_map(Polygon::rings)
            .flatten();
        let first = *points.next()?;
        Some(points.fold(Rect::from_points(first, first), |r, &p| r.union_pt(p)))
    }

    /// A copy with every vertex passed through `f`, e.g. a forward projection.
    pub fn map_points(&self, mut f: impl FnMut(Point) -> Point) -> Self {
        match self {
            Self::Polygon(p) => Self::Polygon(p.map_points(&mut f)),
            Self::MultiPolygon(ps) => {
                Self::MultiPolygon(ps.iter().map(|p| p.map_points(&mut f)).collect())
            }
        }
    }
}

impl Contains for Geometry {
    /// Any component contains the point; stops at the first that does.
    fn contains_point(&self, pt: Point) -> bool {
        self.components().iter().any(|c| c.contains_point(pt))
    }
}

/// An identified region geometry.
///
/// The identifier joins the feature to external attribute data.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature<Id> {
    /// Stable identifier.
    pub id: Id,
    /// Geometry in plane coordinates.
    pub geometry: Geometry,
}

impl<Id> Feature<Id> {
    /// Create a feature.
    pub fn new(id: Id, geometry: Geometry) -> Self {
        Self { id, geometry }
    }
}

impl<Id> Contains for Feature<Id> {
    fn contains_point(&self, pt: Point) -> bool {
        self.geometry.contains_point(pt)
    }
}
