// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `packed`: static R-tree bulk-loaded with Sort-Tile-Recursive ordering
//!   (aliases: `PackedRTreeF32`, `PackedRTreeF64`, `PackedRTreeI64`).
//! - `grid` (feature `backend_grid`): uniform grid with configurable cell size.
//! - `flatvec`: flat vector with linear scans (small, simple, a reference oracle).
//!
//! STR note
//! --------
//! For `n` items and node capacity `M` the packed tree needs `P = ceil(n / M)`
//! leaves. Items are sorted by center x and cut into `ceil(sqrt(P))` vertical
//! slices of `ceil(sqrt(P)) * M` items; each slice is sorted by center y and
//! consecutive runs of `M` items become one leaf. Parent levels group `M`
//! consecutive nodes of the level below, which keeps their tiles adjacent.

pub(crate) mod flatvec;
#[cfg(feature = "backend_grid")]
pub(crate) mod grid;
pub(crate) mod packed;

pub use flatvec::FlatVec;
#[cfg(feature = "backend_grid")]
pub use grid::{Grid, GridF32, GridF64, GridI64, GridScalar};
pub use packed::{
    DEFAULT_NODE_CAPACITY, PackedRTree, PackedRTreeF32, PackedRTreeF64, PackedRTreeI64,
};
