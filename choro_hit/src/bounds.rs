// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feature bounds for the broad phase.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Rect;

use choro_geom::Feature;
use choro_index::Aabb2D;

/// Source of a feature's rendered bounds in plane coordinates.
///
/// This is the same path generator that draws the region, so the box covers
/// exactly what the user sees. Returning `None` leaves the feature out of the
/// index.
pub trait PathBounds<Id> {
    /// Bounds of `feature`, or `None` when it has nothing to draw.
    fn bounds(&self, feature: &Feature<Id>) -> Option<Rect>;
}

/// Bounds of geometry that is already in plane coordinates: its vertex extent.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaneBounds;

impl<Id> PathBounds<Id> for PlaneBounds {
    fn bounds(&self, feature: &Feature<Id>) -> Option<Rect> {
        feature.geometry.bounding_box()
    }
}

impl<Id, F> PathBounds<Id> for F
where
    F: Fn(&Feature<Id>) -> Option<Rect>,
{
    fn bounds(&self, feature: &Feature<Id>) -> Option<Rect> {
        self(feature)
    }
}

/// Round `rect` outward to whole units: floor on the minimum, ceil on the maximum.
///
/// The result never under-covers the input, so a point inside the feature is
/// always inside its index box.
pub fn outward_bounds(rect: Rect) -> Aabb2D<f64> {
    Aabb2D::new(
        rect.min_x().floor(),
        rect.min_y().floor(),
        rect.max_x().ceil(),
        rect.max_y().ceil(),
    )
}
