// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choro Hit: which region contains this point?
//!
//! This crate composes the broad phase from `choro_index` with the
//! ray-casting predicate from `choro_geom`:
//!
//! 1. At build time every feature's bounds come from a [`PathBounds`]
//!    source, are rounded outward to whole units with [`outward_bounds`],
//!    and are bulk-loaded into the index together with the feature.
//! 2. At query time a point-sized rectangle collects the candidates whose
//!    box touches the point ([`RegionIndex::candidates`]).
//! 3. The first candidate whose geometry contains the point is the hit
//!    ([`RegionIndex::resolve`]).
//!
//! The index is immutable once built. Backend choice and tuning come from
//! [`IndexParams`]; any [`choro_index::Backend`] can be used directly via
//! [`RegionIndex::with_backend`].
//!
//! # Example
//!
//! ```rust
//! use choro_geom::{Feature, Geometry, Polygon};
//! use choro_hit::{PlaneBounds, RegionIndex};
//! use kurbo::{Point, Rect};
//!
//! let square = |id, x0, x1| {
//!     Feature::new(id, Geometry::Polygon(Polygon::from_rect(Rect::new(x0, 0.0, x1, 5.0))))
//! };
//! let regions = RegionIndex::build([square("A", 0.0, 5.0), square("B", 5.0, 10.0)], &PlaneBounds);
//!
//! assert_eq!(regions.resolve(Point::new(2.0, 2.0)).map(|f| f.id), Some("A"));
//! assert_eq!(regions.resolve(Point::new(7.0, 2.0)).map(|f| f.id), Some("B"));
//! assert!(regions.resolve(Point::new(12.0, 2.0)).is_none());
//! ```

#![no_std]

extern crate alloc;

mod bounds;
mod params;
mod region_index;

pub use bounds::{PathBounds, PlaneBounds, outward_bounds};
pub use params::{BackendKind, IndexParams, RegionBackend};
pub use region_index::{RegionIndex, RegionLookup};
