// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choro Index: a static, bulk-loaded 2D AABB index.
//!
//! Choro Index is the broad phase of region hit testing.
//!
//! - Build once from `(aabb, payload)` pairs; the index is immutable afterwards.
//! - Query by point or intersecting rectangle; edges are inclusive, so a
//!   zero-sized query rectangle finds every box touching its point.
//! - Payloads are owned by the index and returned by reference.
//!
//! It is generic over the scalar type `T` and does not depend on any geometry crate.
//! Higher layers compute plane-space AABBs for their shapes and feed them here.
//!
//! Backends are pluggable via a simple trait so you can swap the spatial strategy without API churn.
//! The default backend is a packed R-tree loaded with Sort-Tile-Recursive ordering.
//! A uniform grid (feature `backend_grid`) and a flat vector (linear scan) are also provided.
//!
//! ## Features
//!
//! - `backend_grid` *(default)*: enables a uniform grid backend backed by `hashbrown`. Disable
//!   this feature to avoid the `hashbrown` dependency and grid types.
//!
//! # Example
//!
//! ```rust
//! use choro_index::{Index, Aabb2D};
//!
//! // Bulk-load two boxes.
//! let idx: Index<f64, &str> = Index::build([
//!     (Aabb2D::new(0.0, 0.0, 5.0, 5.0), "west"),
//!     (Aabb2D::new(5.0, 0.0, 10.0, 5.0), "east"),
//! ]);
//!
//! // Query a point inside the second box.
//! let hits: Vec<_> = idx.query_point(7.0, 2.0).collect();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(*hits[0].1, "east");
//!
//! // A point-sized rectangle on the shared edge touches both.
//! assert_eq!(idx.query_rect(Aabb2D::from_point(5.0, 2.0)).count(), 2);
//! ```
//!
//! With the `backend_grid` feature enabled (default), you can also use a uniform grid backend:
//!
//! ```rust
//! # #[cfg(feature = "backend_grid")]
//! # {
//! use choro_index::{Index, Aabb2D};
//!
//! // Use a grid backend (f32) with a 64-unit cell size.
//! let idx = Index::with_grid(64.0_f32, [(Aabb2D::new(0.0, 0.0, 10.0, 10.0), 1_u32)]);
//!
//! let hits: Vec<_> = idx.query_point(5.0, 5.0).collect();
//! assert_eq!(hits.len(), 1);
//! # }
//! ```
//!
//! ## Choosing a backend
//!
//! - `PackedRTree` (default): flat array R-tree, bulk-loaded in O(n log n). Good general
//!   choice for static collections with irregular sizes, such as administrative regions.
//! - `GridF32`/`GridF64`/`GridI64` *(feature `backend_grid`)*: uniform grid with configurable
//!   cell size. A good fit when boxes are of similar size and the cell size can be chosen
//!   near that size.
//! - `FlatVec`: linear scans. Only sensible for very small sets or as a reference.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates.

#![no_std]

extern crate alloc;

mod backend;
pub mod backends;
mod index;
mod types;
pub(crate) mod util;

pub use backend::Backend;
pub use index::{Index, IndexGeneric, Key};
pub use types::{Aabb2D, Scalar};
