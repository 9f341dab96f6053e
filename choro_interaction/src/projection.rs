// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping between device (pointer) coordinates and map-plane coordinates.

use kurbo::{Affine, Point, Rect, Vec2};

/// A map projection as seen by pointer handling.
///
/// `invert` must be the exact inverse of the mapping used to draw the map,
/// otherwise hover tests disagree with what is on screen.
pub trait Projection {
    /// Plane point to device point.
    fn project(&self, plane: Point) -> Point;

    /// Device point to plane point, or `None` outside the projection's domain.
    fn invert(&self, device: Point) -> Option<Point>;
}

impl<P: Projection + ?Sized> Projection for &P {
    fn project(&self, plane: Point) -> Point {
        (**self).project(plane)
    }

    fn invert(&self, device: Point) -> Option<Point> {
        (**self).invert(device)
    }
}

/// Planar projection given by an affine transform and its inverse.
///
/// Use this when geometry was projected once at load time and the view only
/// pans and scales.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineProjection {
    to_device: Affine,
    to_plane: Affine,
}

impl Default for AffineProjection {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineProjection {
    /// Device coordinates are plane coordinates.
    pub const fn identity() -> Self {
        Self {
            to_device: Affine::IDENTITY,
            to_plane: Affine::IDENTITY,
        }
    }

    /// Build from the plane-to-device transform.
    ///
    /// A singular transform produces a projection whose `invert` always
    /// returns `None`.
    pub fn new(to_device: Affine) -> Self {
        Self {
            to_device,
            to_plane: to_device.inverse(),
        }
    }

    /// Uniformly scale and center `plane_bounds` inside `view`.
    ///
    /// Degenerate bounds or views fall back to a translation that aligns the
    /// two origins.
    pub fn fit(plane_bounds: Rect, view: Rect) -> Self {
        let (pw, ph) = (plane_bounds.width(), plane_bounds.height());
        let (vw, vh) = (view.width(), view.height());
        if pw <= 0.0 || ph <= 0.0 || vw <= 0.0 || vh <= 0.0 {
            return Self::new(Affine::translate(view.origin() - plane_bounds.origin()));
        }
        let scale = (vw / pw).min(vh / ph);
        let offset = Vec2::new(
            view.x0 + 0.5 * (vw - pw * scale),
            view.y0 + 0.5 * (vh - ph * scale),
        );
        Self::new(
            Affine::translate(offset)
                * Affine::scale(scale)
                * Affine::translate(-plane_bounds.origin().to_vec2()),
        )
    }

    /// The plane-to-device transform.
    pub fn transform(&self) -> Affine {
        self.to_device
    }
}

impl Projection for AffineProjection {
    fn project(&self, plane: Point) -> Point {
        self.to_device * plane
    }

    fn invert(&self, device: Point) -> Option<Point> {
        let plane = self.to_plane * device;
        plane.is_finite().then_some(plane)
    }
}
