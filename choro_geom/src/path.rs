// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outline paths for drawing highlighted regions.
//!
//! Every ring becomes one closed subpath, holes included, so a renderer
//! filling with the even-odd rule reproduces the same inside/outside split
//! as [`Contains`](crate::Contains).

use kurbo::{BezPath, Point};

use crate::geometry::{Geometry, Polygon};

fn push_ring(path: &mut BezPath, ring: &[Point]) {
    let Some((&first, rest)) = ring.split_first() else {
        return;
    };
    path.move_to(first);
    for &p in rest {
        path.line_to(p);
    }
    path.close_path();
}

impl Polygon {
    /// Append this polygon's rings to `path` as closed subpaths.
    pub fn append_to_path(&self, path: &mut BezPath) {
        for ring in self.rings() {
            push_ring(path, ring);
        }
    }
}

impl Geometry {
    /// Build the outline of every component as one path.
    ///
    /// Empty rings are skipped. The result is in the geometry's own
    /// coordinates; apply an `Affine` to draw it elsewhere.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for component in self.components() {
            component.append_to_path(&mut path);
        }
        path
    }
}
