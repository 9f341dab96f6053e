// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid backend for 2D AABBs.
//!
//! This backend buckets AABBs into fixed-size grid cells and answers queries
//! by touching only the cells overlapping the query primitive. It suits
//! region sets of roughly uniform size, such as administrative units of
//! similar area, where a cell size near the typical region extent keeps
//! per-cell lists short.

use alloc::vec::Vec;
use core::fmt::Debug;

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::backend::Backend;
use crate::types::{Aabb2D, Scalar};

/// Scalar types supported by the grid backend.
///
/// This is kept separate from [`Scalar`] so that the grid implementation can
/// use type-specific logic (e.g., Euclidean division for integers).
pub trait GridScalar: Scalar {
    /// Map a scalar coordinate to a grid coordinate along one axis.
    ///
    /// The mapping is based on an origin and uniform cell size. Implementations
    /// are expected to be monotonic in `value` for fixed `origin` and
    /// `cell_size`.
    fn cell_coord(value: Self, origin: Self, cell_size: Self) -> i32;
}

impl GridScalar for f32 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Grid cell indices are intentionally i32; out-of-range values are saturated."
    )]
    #[inline]
    fn cell_coord(value: Self, origin: Self, cell_size: Self) -> i32 {
        debug_assert!(
            cell_size > 0.0,
            "grid cell_size must be strictly positive (f32)"
        );
        let t = (value - origin) / cell_size;
        let coord = t as i32;

        // Round towards -∞ (the cast above has already truncated).
        if t < 0.0 && (coord as Self) > t {
            coord.saturating_sub(1)
        } else {
            coord
        }
    }
}

impl GridScalar for f64 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Grid cell indices are intentionally i32; out-of-range values are saturated."
    )]
    #[inline]
    fn cell_coord(value: Self, origin: Self, cell_size: Self) -> i32 {
        debug_assert!(
            cell_size > 0.0,
            "grid cell_size must be strictly positive (f64)"
        );
        let t = (value - origin) / cell_size;
        let coord = t as i32;

        // Round towards -∞ (the cast above has already truncated).
        if t < 0.0 && (coord as Self) > t {
            coord.saturating_sub(1)
        } else {
            coord
        }
    }
}

impl GridScalar for i64 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Grid cell indices are intentionally i32; out-of-range values are saturated."
    )]
    #[inline]
    fn cell_coord(value: Self, origin: Self, cell_size: Self) -> i32 {
        debug_assert!(
            cell_size > 0,
            "grid cell_size must be strictly positive (i64)"
        );
        let rel = value - origin;
        // Euclidean division rounds toward -∞, which matches floor for all
        // integer values.
        let coord = rel.div_euclid(cell_size);

        // Saturate values out of `i32` range.
        if coord >= Self::from(i32::MAX) {
            i32::MAX
        } else if coord <= Self::from(i32::MIN) {
            i32::MIN
        } else {
            coord as i32
        }
    }
}

/// Uniform grid backend with fixed cell size.
///
/// Each loaded AABB is registered in every cell it covers, so large boxes
/// relative to the cell size cost memory proportional to their cell span.
pub struct Grid<T: GridScalar> {
    cell_size: T,
    origin_x: T,
    origin_y: T,
    cells: HashMap<(i32, i32), SmallVec<[usize; 8]>>,
    // (slot, aabb) pairs; cells store positions into this vector.
    entries: Vec<(usize, Aabb2D<T>)>,
}

impl<T: GridScalar> Debug for Grid<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Grid")
            .field("cell_size", &self.cell_size)
            .field("origin_x", &self.origin_x)
            .field("origin_y", &self.origin_y)
            .field("entries", &self.entries.len())
            .field("cells", &self.cells.len())
            .finish_non_exhaustive()
    }
}

impl<T: GridScalar> Grid<T> {
    /// Create a new grid backend with the given cell size and origin at (0, 0).
    pub fn new(cell_size: T) -> Self {
        Self::with_origin(cell_size, T::zero(), T::zero())
    }

    /// Create a new grid backend with the given cell size and origin.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not strictly positive (this includes NaN).
    pub fn with_origin(cell_size: T, origin_x: T, origin_y: T) -> Self {
        assert!(cell_size > T::zero(), "cell_size must be strictly positive");
        Self {
            cell_size,
            origin_x,
            origin_y,
            cells: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Number of non-empty cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn cell_range(&self, min: T, max: T, origin: T) -> (i32, i32) {
        let c0 = T::cell_coord(min, origin, self.cell_size);
        let c1 = T::cell_coord(max, origin, self.cell_size);
        if c0 <= c1 { (c0, c1) } else { (c1, c0) }
    }
}

impl<T: GridScalar> Backend<T> for Grid<T> {
    fn load(&mut self, entries: &[(usize, Aabb2D<T>)]) {
        self.cells.clear();
        self.entries.clear();
        self.entries.extend_from_slice(entries);

        for (pos, (_, aabb)) in entries.iter().enumerate() {
            let (ix0, ix1) = self.cell_range(aabb.min_x, aabb.max_x, self.origin_x);
            let (iy0, iy1) = self.cell_range(aabb.min_y, aabb.max_y, self.origin_y);
            for ix in ix0..=ix1 {
                for iy in iy0..=iy1 {
                    self.cells.entry((ix, iy)).or_default().push(pos);
                }
            }
        }
    }

    fn visit_point<F: FnMut(usize)>(&self, x: T, y: T, mut f: F) {
        let ix = T::cell_coord(x, self.origin_x, self.cell_size);
        let iy = T::cell_coord(y, self.origin_y, self.cell_size);
        if let Some(cell) = self.cells.get(&(ix, iy)) {
            for &pos in cell {
                let (slot, aabb) = self.entries[pos];
                if aabb.contains_point(x, y) {
                    f(slot);
                }
            }
        }
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<T>, mut f: F) {
        let (ix0, ix1) = self.cell_range(rect.min_x, rect.max_x, self.origin_x);
        let (iy0, iy1) = self.cell_range(rect.min_y, rect.max_y, self.origin_y);

        // A box spanning several cells is listed in each of them.
        let mut seen: HashSet<usize> = HashSet::new();

        for ix in ix0..=ix1 {
            for iy in iy0..=iy1 {
                let Some(cell) = self.cells.get(&(ix, iy)) else {
                    continue;
                };
                for &pos in cell {
                    if !seen.insert(pos) {
                        continue;
                    }
                    let (slot, aabb) = self.entries[pos];
                    if aabb.overlaps(&rect) {
                        f(slot);
                    }
                }
            }
        }
    }
}

/// Grid backend over `f32` coordinates.
pub type GridF32 = Grid<f32>;
/// Grid backend over `f64` coordinates.
pub type GridF64 = Grid<f64>;
/// Grid backend over `i64` coordinates.
pub type GridI64 = Grid<i64>;
