// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation side of hovering: highlight outline and tooltip.

use kurbo::Point;

use choro_geom::Feature;

/// Receives highlight and tooltip updates from the controller.
///
/// Updates are replace-style: every event begins with [`clear`](Self::clear)
/// and then describes the complete new presentation.
pub trait Overlay<Id, A: ?Sized> {
    /// Remove any drawn highlight outline.
    fn clear(&mut self);

    /// Draw the outline of `feature`.
    fn draw_outline(&mut self, feature: &Feature<Id>);

    /// Show a tooltip for `id` anchored at the pointer's device position.
    fn show_tooltip(&mut self, anchor: Point, id: &Id, attributes: &A);

    /// Hide the tooltip.
    fn hide_tooltip(&mut self);
}

impl<Id, A: ?Sized, O: Overlay<Id, A> + ?Sized> Overlay<Id, A> for &mut O {
    fn clear(&mut self) {
        (**self).clear();
    }

    fn draw_outline(&mut self, feature: &Feature<Id>) {
        (**self).draw_outline(feature);
    }

    fn show_tooltip(&mut self, anchor: Point, id: &Id, attributes: &A) {
        (**self).show_tooltip(anchor, id, attributes);
    }

    fn hide_tooltip(&mut self) {
        (**self).hide_tooltip();
    }
}
