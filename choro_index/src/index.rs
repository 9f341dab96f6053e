// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Index` API and generic implementation over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::backends::PackedRTree;
use crate::types::{Aabb2D, Scalar};

/// Dense handle for an entry: its position in build order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(u32);

impl Key {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Index keys are intentionally 32-bit; collections beyond u32::MAX entries are not supported."
    )]
    const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    /// Position of the entry in the order it was supplied at build time.
    pub const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Entry<T, P> {
    aabb: Aabb2D<T>,
    payload: P,
}

/// An immutable AABB index parameterized by a spatial backend.
///
/// The index owns an arena of `(aabb, payload)` entries and hands their slot
/// numbers to the backend once, in a single bulk load.
#[derive(Debug)]
pub struct IndexGeneric<T: Copy + PartialOrd + Debug, P, B: Backend<T>> {
    entries: Vec<Entry<T, P>>,
    backend: B,
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    B: Backend<T> + Default,
{
    /// Build an index from entries using the backend's default configuration.
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Aabb2D<T>, P)>,
    {
        Self::build_with_backend(B::default(), entries)
    }
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    B: Backend<T>,
{
    /// Build an index from entries into an explicitly configured backend.
    ///
    /// Any previous contents of `backend` are replaced.
    pub fn build_with_backend<I>(mut backend: B, entries: I) -> Self
    where
        I: IntoIterator<Item = (Aabb2D<T>, P)>,
    {
        let entries: Vec<Entry<T, P>> = entries
            .into_iter()
            .map(|(aabb, payload)| Entry { aabb, payload })
            .collect();
        let slots: Vec<(usize, Aabb2D<T>)> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (i, e.aabb))
            .collect();
        backend.load(&slots);
        Self { entries, backend }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The backend answering spatial queries.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The AABB and payload stored under `key`.
    pub fn get(&self, key: Key) -> Option<(&Aabb2D<T>, &P)> {
        self.entries
            .get(key.idx())
            .map(|e| (&e.aabb, &e.payload))
    }

    /// Iterate all entries in build order.
    pub fn iter(&self) -> impl Iterator<Item = (Key, &Aabb2D<T>, &P)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (Key::new(i), &e.aabb, &e.payload))
    }

    /// Query for entries whose AABB contains the point.
    pub fn query_point(&self, x: T, y: T) -> impl Iterator<Item = (Key, &P)> + '_ {
        let mut out = Vec::new();
        self.visit_point(x, y, |k, p| out.push((k, p)));
        out.into_iter()
    }

    /// Visit entries whose AABB contains the point (does not allocate result storage).
    ///
    /// Calls `f(key, payload)` for each match. The order is backend-dependent.
    pub fn visit_point<'a, F: FnMut(Key, &'a P)>(&'a self, x: T, y: T, mut f: F) {
        self.backend.visit_point(x, y, |i| {
            if let Some(e) = self.entries.get(i) {
                f(Key::new(i), &e.payload);
            }
        });
    }

    /// Query for entries whose AABB intersects the given rectangle.
    pub fn query_rect(&self, rect: Aabb2D<T>) -> impl Iterator<Item = (Key, &P)> + '_ {
        let mut out = Vec::new();
        self.visit_rect(rect, |k, p| out.push((k, p)));
        out.into_iter()
    }

    /// Visit entries whose AABB intersects the given rectangle (does not allocate result storage).
    ///
    /// Calls `f(key, payload)` for each match. The order is backend-dependent.
    pub fn visit_rect<'a, F: FnMut(Key, &'a P)>(&'a self, rect: Aabb2D<T>, mut f: F) {
        self.backend.visit_rect(rect, |i| {
            if let Some(e) = self.entries.get(i) {
                f(Key::new(i), &e.payload);
            }
        });
    }
}

/// Default index: a packed, STR bulk-loaded R-tree.
pub type Index<T, P> = IndexGeneric<T, P, PackedRTree<T>>;

impl<T: Scalar, P> Index<T, P> {
    /// Build a packed R-tree index with a custom node capacity.
    pub fn with_node_capacity<I>(node_capacity: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = (Aabb2D<T>, P)>,
    {
        Self::build_with_backend(PackedRTree::with_node_capacity(node_capacity), entries)
    }

    /// Build a linear-scan index (useful as a reference or for tiny sets).
    pub fn flat<I>(entries: I) -> IndexGeneric<T, P, crate::backends::FlatVec<T>>
    where
        I: IntoIterator<Item = (Aabb2D<T>, P)>,
    {
        IndexGeneric::build(entries)
    }
}

#[cfg(feature = "backend_grid")]
impl<T: crate::backends::GridScalar, P> Index<T, P> {
    /// Build a uniform-grid index with the given cell size.
    pub fn with_grid<I>(cell_size: T, entries: I) -> IndexGeneric<T, P, crate::backends::Grid<T>>
    where
        I: IntoIterator<Item = (Aabb2D<T>, P)>,
    {
        IndexGeneric::build_with_backend(crate::backends::Grid::new(cell_size), entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn two_boxes() -> Vec<(Aabb2D<i64>, &'static str)> {
        vec![
            (Aabb2D::new(0, 0, 10, 10), "a"),
            (Aabb2D::new(5, 5, 15, 15), "b"),
        ]
    }

    #[test]
    fn build_and_query_point() {
        let idx: Index<i64, &str> = Index::build(two_boxes());
        assert_eq!(idx.len(), 2);

        let mut hits: Vec<_> = idx.query_point(6, 6).map(|(_, p)| *p).collect();
        hits.sort_unstable();
        assert_eq!(hits, vec!["a", "b"]);

        let hits: Vec<_> = idx.query_point(12, 12).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(*hits[0].1, "b");
    }

    #[test]
    fn keys_follow_build_order() {
        let idx: Index<i64, &str> = Index::build(two_boxes());
        let keys: Vec<_> = idx.iter().map(|(k, _, p)| (k.idx(), *p)).collect();
        assert_eq!(keys, vec![(0, "a"), (1, "b")]);

        let (aabb, payload) = idx.get(Key::new(1)).expect("second entry");
        assert_eq!(*aabb, Aabb2D::new(5, 5, 15, 15));
        assert_eq!(*payload, "b");
        assert!(idx.get(Key::new(2)).is_none());
    }

    #[test]
    fn empty_index_answers_nothing() {
        let idx: Index<f64, u32> = Index::build(Vec::new());
        assert!(idx.is_empty());
        assert_eq!(idx.query_point(0.0, 0.0).count(), 0);
        assert_eq!(idx.query_rect(Aabb2D::new(-1.0, -1.0, 1.0, 1.0)).count(), 0);
    }

    #[test]
    fn payloads_need_not_be_copy() {
        let idx: Index<f64, Vec<u8>> = Index::with_node_capacity(
            2,
            [
                (Aabb2D::new(0.0, 0.0, 1.0, 1.0), vec![1]),
                (Aabb2D::new(2.0, 2.0, 3.0, 3.0), vec![2, 2]),
                (Aabb2D::new(4.0, 4.0, 5.0, 5.0), vec![3, 3, 3]),
            ],
        );
        let hit = idx.query_point(4.5, 4.5).next().expect("hit third box");
        assert_eq!(hit.1.len(), 3);
    }

    #[test]
    fn visit_point_and_rect_match_query_counts() {
        let idx: Index<i64, &str> = Index::build(two_boxes());

        let it_count = idx.query_point(6, 6).count();
        let mut visit_count = 0;
        idx.visit_point(6, 6, |_k, _p| visit_count += 1);
        assert_eq!(visit_count, it_count);

        let r = Aabb2D::new(8, 8, 12, 12);
        let it_count_r = idx.query_rect(r).count();
        let mut visit_count_r = 0;
        idx.visit_rect(r, |_k, _p| visit_count_r += 1);
        assert_eq!(visit_count_r, it_count_r);
    }

    #[test]
    fn all_backends_agree() {
        let packed: Index<i64, &str> = Index::build(two_boxes());
        let flat = Index::flat(two_boxes());
        let probe = Aabb2D::from_point(10, 10);
        let mut a: Vec<_> = packed.query_rect(probe).map(|(k, _)| k).collect();
        let mut b: Vec<_> = flat.query_rect(probe).map(|(k, _)| k).collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);

        #[cfg(feature = "backend_grid")]
        {
            let grid = Index::with_grid(4, two_boxes());
            let mut c: Vec<_> = grid.query_rect(probe).map(|(k, _)| k).collect();
            c.sort_unstable();
            assert_eq!(a, c);
        }
    }
}
