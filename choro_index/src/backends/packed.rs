// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed R-tree backend, bulk-loaded with Sort-Tile-Recursive (STR) ordering.
//!
//! The tree is stored as one flat array of node boxes, level by level:
//! positions `[0, n)` hold the leaf items in STR order, followed by each
//! parent level up to a single root. A parent at position `p` covers the
//! `node_capacity` consecutive children starting at `first_child[p]`.
//!
//! There is no insertion, deletion or rebalancing. [`Backend::load`]
//! rebuilds the whole structure.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::{Aabb2D, Scalar, cmp_t};
use crate::util::isqrt_ceil;

/// Default maximum number of children per node.
pub const DEFAULT_NODE_CAPACITY: usize = 16;

/// Static R-tree over `T` coordinates.
pub struct PackedRTree<T: Scalar> {
    node_capacity: usize,
    boxes: Vec<Aabb2D<T>>,
    // Leaf positions: the slot. Parent positions: position of the first child.
    first_child: Vec<usize>,
    // Exclusive end position of each level, leaves first.
    level_ends: Vec<usize>,
}

impl<T: Scalar> Default for PackedRTree<T> {
    fn default() -> Self {
        Self::with_node_capacity(DEFAULT_NODE_CAPACITY)
    }
}

impl<T: Scalar> Debug for PackedRTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PackedRTree")
            .field("node_capacity", &self.node_capacity)
            .field("items", &self.len())
            .field("levels", &self.level_ends.len())
            .finish_non_exhaustive()
    }
}

impl<T: Scalar> PackedRTree<T> {
    /// Create an empty tree whose nodes hold at most `node_capacity` children.
    ///
    /// Capacities below 2 are raised to 2.
    pub fn with_node_capacity(node_capacity: usize) -> Self {
        Self {
            node_capacity: node_capacity.max(2),
            boxes: Vec::new(),
            first_child: Vec::new(),
            level_ends: Vec::new(),
        }
    }

    /// Build a tree directly from `(slot, aabb)` pairs.
    pub fn bulk_build(node_capacity: usize, entries: &[(usize, Aabb2D<T>)]) -> Self {
        let mut tree = Self::with_node_capacity(node_capacity);
        tree.load(entries);
        tree
    }

    /// Maximum number of children per node.
    pub fn node_capacity(&self) -> usize {
        self.node_capacity
    }

    /// Number of leaf items.
    pub fn len(&self) -> usize {
        self.level_ends.first().copied().unwrap_or(0)
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of levels including the leaf level.
    pub fn depth(&self) -> usize {
        self.level_ends.len()
    }

    /// Bounds of everything in the tree.
    pub fn bounds(&self) -> Option<Aabb2D<T>> {
        self.boxes.last().copied()
    }

    /// Reorder leaves so each run of `node_capacity` items forms a compact tile.
    fn sort_tiles(&self, items: &mut [(usize, Aabb2D<T>)]) {
        let leaf_count = items.len().div_ceil(self.node_capacity);
        let slices = isqrt_ceil(leaf_count).max(1);
        let slice_len = slices * self.node_capacity;

        items.sort_by(|a, b| cmp_t(&a.1.center_x(), &b.1.center_x()));
        for slice in items.chunks_mut(slice_len) {
            slice.sort_by(|a, b| cmp_t(&a.1.center_y(), &b.1.center_y()));
        }
    }

    fn visit_overlapping<F: FnMut(usize)>(&self, query: &Aabb2D<T>, mut f: F) {
        let Some(root) = self.boxes.len().checked_sub(1) else {
            return;
        };
        let root_level = self.level_ends.len() - 1;

        let mut stack: Vec<(usize, usize)> = Vec::with_capacity(2 * self.level_ends.len());
        stack.push((root, root_level));
        while let Some((pos, level)) = stack.pop() {
            if !self.boxes[pos].overlaps(query) {
                continue;
            }
            if level == 0 {
                f(self.first_child[pos]);
                continue;
            }
            let start = self.first_child[pos];
            let end = (start + self.node_capacity).min(self.level_ends[level - 1]);
            for child in start..end {
                stack.push((child, level - 1));
            }
        }
    }
}

impl<T: Scalar> Backend<T> for PackedRTree<T> {
    fn load(&mut self, entries: &[(usize, Aabb2D<T>)]) {
        self.boxes.clear();
        self.first_child.clear();
        self.level_ends.clear();
        if entries.is_empty() {
            return;
        }

        let mut items = entries.to_vec();
        self.sort_tiles(&mut items);

        self.boxes.reserve(items.len() * 2);
        for (slot, aabb) in items {
            self.boxes.push(aabb);
            self.first_child.push(slot);
        }
        self.level_ends.push(self.boxes.len());

        // Group consecutive nodes of the level below until one root remains.
        let mut level_start = 0;
        loop {
            let level_end = self.boxes.len();
            if level_end - level_start <= 1 {
                break;
            }
            let mut child = level_start;
            while child < level_end {
                let group_end = (child + self.node_capacity).min(level_end);
                let mut bounds = self.boxes[child];
                for pos in child + 1..group_end {
                    bounds = bounds.union(self.boxes[pos]);
                }
                self.boxes.push(bounds);
                self.first_child.push(child);
                child = group_end;
            }
            level_start = level_end;
            self.level_ends.push(self.boxes.len());
        }
    }

    fn visit_point<F: FnMut(usize)>(&self, x: T, y: T, f: F) {
        self.visit_overlapping(&Aabb2D::from_point(x, y), f);
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<T>, f: F) {
        self.visit_overlapping(&rect, f);
    }
}

/// Packed R-tree over `f32` coordinates.
pub type PackedRTreeF32 = PackedRTree<f32>;
/// Packed R-tree over `f64` coordinates.
pub type PackedRTreeF64 = PackedRTree<f64>;
/// Packed R-tree over `i64` coordinates.
pub type PackedRTreeI64 = PackedRTree<i64>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::FlatVec;
    use alloc::vec;

    fn grid_entries(n: usize, cell: f64) -> Vec<(usize, Aabb2D<f64>)> {
        let mut out = Vec::with_capacity(n * n);
        for y in 0..n {
            for x in 0..n {
                let aabb = Aabb2D::from_xywh(x as f64 * cell, y as f64 * cell, cell, cell);
                out.push((y * n + x, aabb));
            }
        }
        out
    }

    fn sorted<B: Backend<f64>>(b: &B, rect: Aabb2D<f64>) -> Vec<usize> {
        let mut hits = Vec::new();
        b.visit_rect(rect, |s| hits.push(s));
        hits.sort_unstable();
        hits
    }

    #[test]
    fn empty_tree_answers_nothing() {
        let tree = PackedRTreeF64::default();
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
        assert!(tree.bounds().is_none());
        assert_eq!(tree.query_point(0.0, 0.0).count(), 0);
    }

    #[test]
    fn single_item_is_its_own_root() {
        let tree = PackedRTreeI64::bulk_build(4, &[(9, Aabb2D::new(0, 0, 4, 4))]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.query_point(4, 4).collect::<Vec<_>>(), vec![9]);
        assert_eq!(tree.query_point(5, 4).count(), 0);
    }

    #[test]
    fn levels_shrink_to_a_single_root() {
        let entries = grid_entries(10, 1.0);
        let tree = PackedRTreeF64::bulk_build(4, &entries);
        assert_eq!(tree.len(), 100);
        // 100 -> 25 -> 7 -> 2 -> 1
        assert_eq!(tree.depth(), 5);
        assert_eq!(tree.bounds(), Some(Aabb2D::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn matches_linear_scan_for_points_and_rects() {
        let entries = grid_entries(12, 3.0);
        let tree = PackedRTreeF64::bulk_build(5, &entries);
        let mut flat = FlatVec::default();
        flat.load(&entries);

        let mut probes = Vec::new();
        for i in 0..40 {
            let v = i as f64 * 0.95 - 1.0;
            probes.push(Aabb2D::from_point(v, 36.0 - v));
            probes.push(Aabb2D::from_point(v, v));
            probes.push(Aabb2D::new(v, v * 0.5, v + 4.0, v * 0.5 + 2.0));
        }
        // Exact cell corners touch four boxes.
        probes.push(Aabb2D::from_point(6.0, 6.0));

        for rect in probes {
            assert_eq!(sorted(&tree, rect), sorted(&flat, rect), "probe {rect:?}");
        }
        assert_eq!(sorted(&tree, Aabb2D::from_point(6.0, 6.0)).len(), 4);
    }

    #[test]
    fn tiny_capacity_is_clamped() {
        let tree = PackedRTreeF64::bulk_build(0, &grid_entries(3, 1.0));
        assert_eq!(tree.node_capacity(), 2);
        assert_eq!(tree.query_point(0.5, 0.5).collect::<Vec<_>>(), vec![0]);
    }
}
