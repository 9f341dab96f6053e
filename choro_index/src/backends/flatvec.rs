// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tiny sets.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// Flat vector backend with linear scans.
///
/// Every query touches every entry, which makes it a convenient reference
/// for checking the other backends.
pub struct FlatVec<T: Copy + PartialOrd + Debug> {
    entries: Vec<(usize, Aabb2D<T>)>,
}

impl<T: Copy + PartialOrd + Debug> Default for FlatVec<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Copy + PartialOrd + Debug> Debug for FlatVec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<T: Copy + PartialOrd + Debug> Backend<T> for FlatVec<T> {
    fn load(&mut self, entries: &[(usize, Aabb2D<T>)]) {
        self.entries.clear();
        self.entries.extend_from_slice(entries);
    }

    fn visit_point<F: FnMut(usize)>(&self, x: T, y: T, mut f: F) {
        for (slot, a) in &self.entries {
            if a.contains_point(x, y) {
                f(*slot);
            }
        }
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Aabb2D<T>, mut f: F) {
        for (slot, a) in &self.entries {
            if a.overlaps(&rect) {
                f(*slot);
            }
        }
    }
}
