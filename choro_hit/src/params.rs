// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index configuration and the runtime-selected backend.

use choro_index::backends::{DEFAULT_NODE_CAPACITY, FlatVec, GridF64, PackedRTreeF64};
use choro_index::{Aabb2D, Backend};

/// Which spatial backend a [`RegionIndex`](crate::RegionIndex) uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// Packed R-tree, bulk-loaded with STR ordering.
    #[default]
    PackedRTree,
    /// Uniform grid with [`IndexParams::grid_cell_size`] cells.
    Grid,
    /// Linear scan over all boxes.
    Linear,
}

/// Parameters controlling how the region index is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexParams {
    /// Spatial backend.
    pub backend: BackendKind,
    /// Maximum children per node for [`BackendKind::PackedRTree`].
    pub node_capacity: usize,
    /// Cell size in plane units for [`BackendKind::Grid`].
    ///
    /// Choose something near the typical region extent: each region is
    /// registered in every cell its box covers. Zero, negative and
    /// non-finite sizes are replaced by the default.
    pub grid_cell_size: f64,
}

const DEFAULT_GRID_CELL_SIZE: f64 = 64.0;

impl Default for IndexParams {
    fn default() -> Self {
        Self {
            backend: BackendKind::PackedRTree,
            node_capacity: DEFAULT_NODE_CAPACITY,
            grid_cell_size: DEFAULT_GRID_CELL_SIZE,
        }
    }
}

impl IndexParams {
    /// Create an empty backend matching these parameters.
    pub fn backend(&self) -> RegionBackend {
        match self.backend {
            BackendKind::PackedRTree => {
                RegionBackend::PackedRTree(PackedRTreeF64::with_node_capacity(self.node_capacity))
            }
            BackendKind::Grid => RegionBackend::Grid(GridF64::new(self.effective_cell_size())),
            BackendKind::Linear => RegionBackend::Linear(FlatVec::default()),
        }
    }

    /// The grid cell size actually used by [`IndexParams::backend`].
    pub fn effective_cell_size(&self) -> f64 {
        let size = self.grid_cell_size;
        if size.is_finite() && size > 0.0 {
            size
        } else {
            tracing::warn!(
                grid_cell_size = size,
                fallback = DEFAULT_GRID_CELL_SIZE,
                "invalid grid cell size"
            );
            DEFAULT_GRID_CELL_SIZE
        }
    }
}

/// A backend chosen at runtime from [`IndexParams`].
#[derive(Debug)]
pub enum RegionBackend {
    /// See [`BackendKind::PackedRTree`].
    PackedRTree(PackedRTreeF64),
    /// See [`BackendKind::Grid`].
    Grid(GridF64),
    /// See [`BackendKind::Linear`].
    Linear(FlatVec<f64>),
}

impl Default for RegionBackend {
    fn default() -> Self {
        IndexParams::default().backend()
    }
}

impl RegionBackend {
    /// The kind of backend in use.
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::PackedRTree(_) => BackendKind::PackedRTree,
            Self::Grid(_) => BackendKind::Grid,
            Self::Linear(_) => BackendKind::Linear,
        }
    }
}

impl Backend<f64> for RegionBackend {
    fn load(&mut self, entries: &[(usize, Aabb2D<f64>)]) {
        match self {
            Self::PackedRTree(b) => b.load(entries),
            Self::Grid(b) => b.load(entries),
            Self::Linear(b) => b.load(entries),
        }
    }

    fn visit_point<F: FnMut(usize)>(&self, x: f64, y: f64, f: F) {
        match self {
            Self::PackedRTree(b) => b.visit_point(x, y, f),
            Self::Grid(b) => b.visit_point(x, y, f),
            Self::Linear(b) => b.visit_point(x, y, f),
        }
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<f64>, f: F) {
        match self {
            Self::PackedRTree(b) => b.visit_rect(rect, f),
            Self::Grid(b) => b.visit_rect(rect, f),
            Self::Linear(b) => b.visit_rect(rect, f),
        }
    }
}
