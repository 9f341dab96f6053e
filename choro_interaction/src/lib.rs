// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choro Interaction: hover highlighting for choropleth maps.
//!
//! An [`InteractionController`] turns raw pointer positions into highlight
//! and tooltip updates. For every pointer move it:
//!
//! 1. Inverts the device point to the map plane through a [`Projection`].
//! 2. Tests the plane point against the national outline. Points outside it
//!    (or that cannot be inverted) go straight to [`HoverState::Idle`]
//!    without touching the region index.
//! 3. Resolves the region under the point through a
//!    [`RegionLookup`](choro_hit::RegionLookup).
//! 4. Clears the [`Overlay`] and draws the new presentation: the region's
//!    outline, plus a tooltip when the [`AttributeStore`] has data for it.
//!
//! The controller keeps a single hover slot and updates are replace-style,
//! so the overlay never has to diff anything.
//!
//! The crate does not render. Applications implement [`Overlay`] on top of
//! whatever drawing layer they use; `choro_geom` can turn a feature into a
//! `kurbo::BezPath` for the outline.
//!
//! ## Example
//!
//! ```rust
//! use choro_geom::{Feature, Geometry, Polygon};
//! use choro_hit::{PlaneBounds, RegionIndex};
//! use choro_interaction::{AffineProjection, HoverState, InteractionController, Overlay};
//! use kurbo::{Point, Rect};
//! use std::collections::BTreeMap;
//!
//! let square = |x0, x1| Geometry::Polygon(Polygon::from_rect(Rect::new(x0, 0.0, x1, 5.0)));
//! let regions = RegionIndex::build(
//!     [Feature::new("A", square(0.0, 5.0)), Feature::new("B", square(5.0, 10.0))],
//!     &PlaneBounds,
//! );
//! let outline = Geometry::Polygon(Polygon::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0)));
//! let attributes = BTreeMap::from([("A", "Alpha")]);
//!
//! #[derive(Default)]
//! struct Log(Vec<String>);
//!
//! impl Overlay<&'static str, &'static str> for Log {
//!     fn clear(&mut self) {}
//!     fn draw_outline(&mut self, feature: &Feature<&'static str>) {
//!         self.0.push(format!("outline {}", feature.id));
//!     }
//!     fn show_tooltip(&mut self, _at: Point, _id: &&'static str, name: &&'static str) {
//!         self.0.push(format!("tooltip {name}"));
//!     }
//!     fn hide_tooltip(&mut self) {}
//! }
//!
//! let mut controller =
//!     InteractionController::new(outline, regions, AffineProjection::identity(), attributes);
//! let mut log = Log::default();
//!
//! controller.on_pointer_move(Point::new(2.0, 2.0), &mut log);
//! assert_eq!(log.0, ["outline A", "tooltip Alpha"]);
//!
//! let state = controller.on_pointer_move(Point::new(7.0, 2.0), &mut log);
//! assert_eq!(state, &HoverState::Highlighted { id: "B", tooltip: false });
//!
//! assert!(controller.on_pointer_move(Point::new(-1.0, 2.0), &mut log).is_idle());
//! ```

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod attributes;
mod controller;
mod overlay;
mod projection;
mod state;

pub use attributes::{AttributeStore, NoAttributes};
pub use controller::{InteractionController, PointerSample};
pub use overlay::Overlay;
pub use projection::{AffineProjection, Projection};
pub use state::HoverState;
