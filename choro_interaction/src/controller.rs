// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-move handling: invert, outline pre-check, resolve, dispatch.

use kurbo::Point;

use choro_geom::{Contains, Feature, Geometry};
use choro_hit::RegionLookup;

use crate::attributes::AttributeStore;
use crate::overlay::Overlay;
use crate::projection::Projection;
use crate::state::HoverState;

/// Everything known about one pointer position.
#[derive(Debug)]
pub struct PointerSample<'a, Id> {
    /// Pointer position in device coordinates.
    pub device: Point,
    /// Pointer position in plane coordinates, `None` if the projection
    /// could not invert it.
    pub plane: Option<Point>,
    /// Whether `plane` lies inside the national outline.
    pub inside_outline: bool,
    /// The region under the pointer. Only looked up inside the outline.
    pub feature: Option<&'a Feature<Id>>,
}

/// Turns pointer positions into highlight and tooltip updates.
///
/// The controller owns the national outline, a region lookup, the
/// projection used to draw the map and the attribute store. Its only mutable
/// state is the current [`HoverState`].
///
/// The outline test runs before the region lookup so that pointers over the
/// sea or margins never reach the index.
#[derive(Debug)]
pub struct InteractionController<Id, R, P, S> {
    outline: Geometry,
    regions: R,
    projection: P,
    attributes: S,
    state: HoverState<Id>,
}

impl<Id, R, P, S> InteractionController<Id, R, P, S>
where
    R: RegionLookup<Id>,
    P: Projection,
    S: AttributeStore<Id>,
{
    /// Create an idle controller.
    ///
    /// `outline` must be in the same plane coordinates as the regions.
    pub fn new(outline: Geometry, regions: R, projection: P, attributes: S) -> Self {
        Self {
            outline,
            regions,
            projection,
            attributes,
            state: HoverState::Idle,
        }
    }

    /// The current hover state.
    pub fn state(&self) -> &HoverState<Id> {
        &self.state
    }

    /// The national outline.
    pub fn outline(&self) -> &Geometry {
        &self.outline
    }

    /// The region lookup.
    pub fn regions(&self) -> &R {
        &self.regions
    }

    /// The projection.
    pub fn projection(&self) -> &P {
        &self.projection
    }

    /// The attribute store.
    pub fn attributes(&self) -> &S {
        &self.attributes
    }

    /// Classify `device` without changing state or touching an overlay.
    pub fn sample(&self, device: Point) -> PointerSample<'_, Id> {
        sample(&self.outline, &self.regions, &self.projection, device)
    }

    /// Handle a pointer move to `device` and update `overlay`.
    ///
    /// The overlay is cleared first. A highlighted region's outline is drawn
    /// and its tooltip shown when the store has attributes for it; otherwise
    /// the tooltip is hidden.
    pub fn on_pointer_move<O>(&mut self, device: Point, overlay: &mut O) -> &HoverState<Id>
    where
        Id: Clone + PartialEq,
        O: Overlay<Id, S::Attributes> + ?Sized,
    {
        let hit = sample(&self.outline, &self.regions, &self.projection, device);

        overlay.clear();
        let next = match hit.feature {
            Some(feature) => {
                overlay.draw_outline(feature);
                let tooltip = match self.attributes.lookup(&feature.id) {
                    Some(attributes) => {
                        overlay.show_tooltip(device, &feature.id, attributes);
                        true
                    }
                    None => {
                        overlay.hide_tooltip();
                        false
                    }
                };
                HoverState::Highlighted {
                    id: feature.id.clone(),
                    tooltip,
                }
            }
            None => {
                overlay.hide_tooltip();
                HoverState::Idle
            }
        };

        if next.changed_from(&self.state) {
            tracing::trace!(
                x = device.x,
                y = device.y,
                inside_outline = hit.inside_outline,
                highlighted = !next.is_idle(),
                "hover changed"
            );
        }
        self.state = next;
        &self.state
    }

    /// Handle the pointer leaving the map: clear everything and go idle.
    pub fn on_pointer_leave<O>(&mut self, overlay: &mut O) -> &HoverState<Id>
    where
        O: Overlay<Id, S::Attributes> + ?Sized,
    {
        overlay.clear();
        overlay.hide_tooltip();
        if !self.state.is_idle() {
            tracing::trace!("pointer left map");
        }
        self.state = HoverState::Idle;
        &self.state
    }
}

fn sample<'a, Id, R, P>(
    outline: &Geometry,
    regions: &'a R,
    projection: &P,
    device: Point,
) -> PointerSample<'a, Id>
where
    R: RegionLookup<Id>,
    P: Projection,
{
    let plane = projection.invert(device);
    let inside_outline = plane.is_some_and(|pt| outline.contains_point(pt));
    let feature = match plane {
        Some(pt) if inside_outline => regions.resolve(pt),
        _ => None,
    };
    PointerSample {
        device,
        plane,
        inside_outline,
        feature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::NoAttributes;
    use crate::projection::AffineProjection;
    use alloc::collections::BTreeMap;
    use alloc::vec;
    use alloc::vec::Vec;
    use choro_geom::Polygon;
    use choro_hit::{PlaneBounds, RegionIndex};
    use core::cell::Cell;
    use kurbo::{Affine, Rect};

    type Id = &'static str;

    #[derive(Clone, Debug, PartialEq)]
    enum Effect {
        Clear,
        Outline(Id),
        Tooltip(Point, Id, u32),
        HideTooltip,
    }

    #[derive(Default)]
    struct Recorder {
        effects: Vec<Effect>,
    }

    impl Recorder {
        fn take(&mut self) -> Vec<Effect> {
            core::mem::take(&mut self.effects)
        }
    }

    impl Overlay<Id, u32> for Recorder {
        fn clear(&mut self) {
            self.effects.push(Effect::Clear);
        }

        fn draw_outline(&mut self, feature: &Feature<Id>) {
            self.effects.push(Effect::Outline(feature.id));
        }

        fn show_tooltip(&mut self, anchor: Point, id: &Id, attributes: &u32) {
            self.effects.push(Effect::Tooltip(anchor, *id, *attributes));
        }

        fn hide_tooltip(&mut self) {
            self.effects.push(Effect::HideTooltip);
        }
    }

    impl Overlay<Id, ()> for Recorder {
        fn clear(&mut self) {
            self.effects.push(Effect::Clear);
        }

        fn draw_outline(&mut self, feature: &Feature<Id>) {
            self.effects.push(Effect::Outline(feature.id));
        }

        fn show_tooltip(&mut self, _anchor: Point, _id: &Id, _attributes: &()) {
            unreachable!("no attributes to show");
        }

        fn hide_tooltip(&mut self) {
            self.effects.push(Effect::HideTooltip);
        }
    }

    struct CountingLookup {
        inner: RegionIndex<Id>,
        calls: Cell<usize>,
    }

    impl RegionLookup<Id> for CountingLookup {
        fn resolve(&self, pt: Point) -> Option<&Feature<Id>> {
            self.calls.set(self.calls.get() + 1);
            self.inner.resolve(pt)
        }
    }

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Geometry {
        Geometry::Polygon(Polygon::from_rect(Rect::new(x0, y0, x1, y1)))
    }

    fn two_regions() -> RegionIndex<Id> {
        RegionIndex::build(
            [
                Feature::new("A", square(0.0, 0.0, 5.0, 5.0)),
                Feature::new("B", square(5.0, 0.0, 10.0, 5.0)),
            ],
            &PlaneBounds,
        )
    }

    fn counting() -> CountingLookup {
        CountingLookup {
            inner: two_regions(),
            calls: Cell::new(0),
        }
    }

    #[test]
    fn hover_follows_pointer_across_regions() {
        let mut attributes = BTreeMap::new();
        attributes.insert("A", 1200_u32);
        attributes.insert("B", 800_u32);
        let mut controller = InteractionController::new(
            square(0.0, 0.0, 10.0, 10.0),
            two_regions(),
            AffineProjection::identity(),
            attributes,
        );
        let mut overlay = Recorder::default();

        let a = Point::new(2.0, 2.0);
        let state = controller.on_pointer_move(a, &mut overlay).clone();
        assert_eq!(state, HoverState::Highlighted { id: "A", tooltip: true });
        assert_eq!(
            overlay.take(),
            vec![Effect::Clear, Effect::Outline("A"), Effect::Tooltip(a, "A", 1200)]
        );

        let b = Point::new(7.0, 2.0);
        controller.on_pointer_move(b, &mut overlay);
        assert_eq!(controller.state().highlighted(), Some(&"B"));
        assert_eq!(
            overlay.take(),
            vec![Effect::Clear, Effect::Outline("B"), Effect::Tooltip(b, "B", 800)]
        );

        controller.on_pointer_move(Point::new(-1.0, 2.0), &mut overlay);
        assert!(controller.state().is_idle());
        assert_eq!(overlay.take(), vec![Effect::Clear, Effect::HideTooltip]);
    }

    #[test]
    fn outside_outline_skips_region_lookup() {
        let mut controller = InteractionController::new(
            square(0.0, 0.0, 10.0, 10.0),
            counting(),
            AffineProjection::identity(),
            NoAttributes,
        );
        let mut overlay = Recorder::default();

        for pt in [Point::new(-1.0, 2.0), Point::new(11.0, 11.0), Point::new(5.0, -0.5)] {
            controller.on_pointer_move(pt, &mut overlay);
            assert!(controller.state().is_idle());
        }
        assert_eq!(controller.regions().calls.get(), 0);

        // Inside the outline but below both regions: consulted, no match.
        controller.on_pointer_move(Point::new(5.0, 8.0), &mut overlay);
        assert_eq!(controller.regions().calls.get(), 1);
        assert!(controller.state().is_idle());
    }

    #[test]
    fn failed_inversion_is_idle() {
        let mut controller = InteractionController::new(
            square(0.0, 0.0, 10.0, 10.0),
            counting(),
            AffineProjection::new(Affine::scale_non_uniform(0.0, 1.0)),
            NoAttributes,
        );
        let mut overlay = Recorder::default();

        let sample = controller.sample(Point::new(2.0, 2.0));
        assert!(sample.plane.is_none());
        assert!(!sample.inside_outline);
        assert!(sample.feature.is_none());

        controller.on_pointer_move(Point::new(2.0, 2.0), &mut overlay);
        assert!(controller.state().is_idle());
        assert_eq!(controller.regions().calls.get(), 0);
    }

    #[test]
    fn missing_attributes_highlight_without_tooltip() {
        let mut attributes = BTreeMap::new();
        attributes.insert("A", 5_u32);
        let mut controller = InteractionController::new(
            square(0.0, 0.0, 10.0, 10.0),
            two_regions(),
            AffineProjection::identity(),
            attributes,
        );
        let mut overlay = Recorder::default();

        controller.on_pointer_move(Point::new(7.0, 2.0), &mut overlay);
        assert_eq!(
            controller.state(),
            &HoverState::Highlighted { id: "B", tooltip: false }
        );
        assert_eq!(
            overlay.take(),
            vec![Effect::Clear, Effect::Outline("B"), Effect::HideTooltip]
        );
    }

    #[test]
    fn projection_maps_device_to_plane() {
        // Device space is plane space scaled by 4.
        let mut controller = InteractionController::new(
            square(0.0, 0.0, 10.0, 10.0),
            two_regions(),
            AffineProjection::new(Affine::scale(4.0)),
            NoAttributes,
        );
        let mut overlay = Recorder::default();

        let sample = controller.sample(Point::new(28.0, 8.0));
        assert_eq!(sample.plane, Some(Point::new(7.0, 2.0)));
        assert!(sample.inside_outline);
        assert_eq!(sample.feature.map(|f| f.id), Some("B"));

        controller.on_pointer_move(Point::new(8.0, 8.0), &mut overlay);
        assert_eq!(controller.state().highlighted(), Some(&"A"));
        // Device (42, 8) is plane (10.5, 2): past the outline.
        controller.on_pointer_move(Point::new(42.0, 8.0), &mut overlay);
        assert!(controller.state().is_idle());
    }

    #[test]
    fn leaving_the_map_goes_idle() {
        let mut controller = InteractionController::new(
            square(0.0, 0.0, 10.0, 10.0),
            two_regions(),
            AffineProjection::identity(),
            NoAttributes,
        );
        let mut overlay = Recorder::default();

        controller.on_pointer_move(Point::new(2.0, 2.0), &mut overlay);
        assert!(!controller.state().is_idle());
        overlay.take();

        controller.on_pointer_leave(&mut overlay);
        assert!(controller.state().is_idle());
        assert_eq!(overlay.take(), vec![Effect::Clear, Effect::HideTooltip]);
    }
}
