// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region index: bounding-box broad phase plus exact containment.

use alloc::vec::Vec;

use kurbo::Point;

use choro_geom::{Contains, Feature};
use choro_index::{Aabb2D, Backend, IndexGeneric};

use crate::bounds::{PathBounds, outward_bounds};
use crate::params::{IndexParams, RegionBackend};

/// Resolves a plane-space point to the feature containing it.
///
/// This is the seam interaction code depends on, so hit testing can be
/// swapped or instrumented without touching event handling.
pub trait RegionLookup<Id> {
    /// The feature containing `pt`, if any.
    fn resolve(&self, pt: Point) -> Option<&Feature<Id>>;
}

/// Immutable index over region features.
///
/// Each feature is stored once together with its outward-rounded bounding
/// box. Queries first collect candidates whose box touches the point, then
/// confirm them with the ray-casting predicate.
#[derive(Debug)]
pub struct RegionIndex<Id, B: Backend<f64> = RegionBackend> {
    index: IndexGeneric<f64, Feature<Id>, B>,
    skipped: usize,
}

impl<Id> RegionIndex<Id> {
    /// Build with [`IndexParams::default`].
    pub fn build<I, P>(features: I, bounds: &P) -> Self
    where
        I: IntoIterator<Item = Feature<Id>>,
        P: PathBounds<Id> + ?Sized,
    {
        Self::build_with_params(features, bounds, &IndexParams::default())
    }

    /// Build with an explicitly configured backend.
    pub fn build_with_params<I, P>(features: I, bounds: &P, params: &IndexParams) -> Self
    where
        I: IntoIterator<Item = Feature<Id>>,
        P: PathBounds<Id> + ?Sized,
    {
        Self::with_backend(params.backend(), features, bounds)
    }
}

impl<Id, B: Backend<f64>> RegionIndex<Id, B> {
    /// Build over `backend` in one bulk load.
    ///
    /// Features for which `bounds` returns `None` are not indexed; they
    /// could never contain a point. See [`skipped`](Self::skipped).
    pub fn with_backend<I, P>(backend: B, features: I, bounds: &P) -> Self
    where
        I: IntoIterator<Item = Feature<Id>>,
        P: PathBounds<Id> + ?Sized,
    {
        let mut skipped = 0;
        let entries: Vec<(Aabb2D<f64>, Feature<Id>)> = features
            .into_iter()
            .filter_map(|feature| match bounds.bounds(&feature) {
                Some(rect) => Some((outward_bounds(rect), feature)),
                None => {
                    skipped += 1;
                    None
                }
            })
            .collect();
        let index = IndexGeneric::build_with_backend(backend, entries);
        tracing::debug!(indexed = index.len(), skipped, "built region index");
        Self { index, skipped }
    }

    /// Number of indexed features.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no feature was indexed.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of features left out because they had no bounds.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The spatial backend.
    pub fn backend(&self) -> &B {
        self.index.backend()
    }

    /// Indexed features with their index boxes, in build order.
    pub fn entries(&self) -> impl Iterator<Item = (&Aabb2D<f64>, &Feature<Id>)> + '_ {
        self.index.iter().map(|(_, aabb, feature)| (aabb, feature))
    }

    /// Features whose index box touches `pt`, in backend order.
    ///
    /// Every feature whose box contains the point is returned; none are
    /// confirmed against their geometry yet.
    pub fn candidates(&self, pt: Point) -> impl Iterator<Item = &Feature<Id>> + '_ {
        self.index
            .query_rect(Aabb2D::from_point(pt.x, pt.y))
            .map(|(_, feature)| feature)
    }

    /// The first candidate whose geometry contains `pt`.
    ///
    /// If geometries overlap, whichever the backend reports first wins.
    pub fn resolve(&self, pt: Point) -> Option<&Feature<Id>> {
        self.candidates(pt).find(|feature| feature.contains_point(pt))
    }
}

impl<Id, B: Backend<f64>> RegionLookup<Id> for RegionIndex<Id, B> {
    fn resolve(&self, pt: Point) -> Option<&Feature<Id>> {
        Self::resolve(self, pt)
    }
}

impl<Id, R: RegionLookup<Id> + ?Sized> RegionLookup<Id> for &R {
    fn resolve(&self, pt: Point) -> Option<&Feature<Id>> {
        (**self).resolve(pt)
    }
}
