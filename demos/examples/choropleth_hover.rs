// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end hover: load, project, index, then sweep a pointer across the map.
//!
//! This example shows how to combine:
//! - `choro_load` to fetch geometry and attributes concurrently,
//! - `choro_hit` to index the projected regions,
//! - `choro_interaction` to turn pointer moves into overlay updates.
//!
//! The overlay prints instead of drawing.
//!
//! Run:
//! - `cargo run -p choro_demos --example choropleth_hover`
//! - `RUST_LOG=debug cargo run -p choro_demos --example choropleth_hover` to see load and index logs
//! - pass two paths to use your own geometry and attribute files

use choro_geom::Feature;
use choro_hit::{IndexParams, PlaneBounds, RegionIndex};
use choro_interaction::{AffineProjection, InteractionController, Overlay};
use choro_load::{FileSource, LoadConfig, LoadError, RegionAttributes, load};
use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;

/// Prints every overlay update.
#[derive(Debug, Default)]
struct PrintOverlay {
    updates: usize,
}

impl Overlay<String, RegionAttributes> for PrintOverlay {
    fn clear(&mut self) {
        self.updates += 1;
    }

    fn draw_outline(&mut self, feature: &Feature<String>) {
        let path = feature.geometry.to_bez_path();
        println!(
            "  outline {} ({} path elements)",
            feature.id,
            path.elements().len()
        );
    }

    fn show_tooltip(&mut self, anchor: Point, _id: &String, attributes: &RegionAttributes) {
        println!(
            "  tooltip at ({:.0}, {:.0}): {} ({:+.1}%)",
            anchor.x, anchor.y, attributes.name, attributes.value
        );
    }

    fn hide_tooltip(&mut self) {}
}

fn main() -> Result<(), LoadError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let geometry = FileSource::new(
        args.next()
            .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/data/map.json").into()),
    );
    let attributes = FileSource::new(
        args.next()
            .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/data/data.json").into()),
    );

    let data = load(geometry, attributes, &LoadConfig::default())?;

    // Equirectangular around 42 degrees north, north up: plane y grows southward like screen y.
    let aspect = 42.0_f64.to_radians().cos();
    let map = data.geometry.project(|p| Point::new(p.x * aspect, -p.y));

    let view = Rect::new(0.0, 0.0, 800.0, 600.0);
    let projection = map
        .bounds()
        .map(|bounds| AffineProjection::fit(bounds, view))
        .unwrap_or_default();

    let regions = RegionIndex::build_with_params(map.regions, &PlaneBounds, &IndexParams {
        node_capacity: 4,
        ..IndexParams::default()
    });
    tracing::info!(
        regions = regions.len(),
        skipped = regions.skipped(),
        backend = ?regions.backend().kind(),
        "indexed map"
    );

    let mut controller =
        InteractionController::new(map.outline, regions, projection, data.attributes);
    let mut overlay = PrintOverlay::default();

    // Sweep from the top-left corner to the bottom-right, then leave the canvas.
    let steps = 24;
    for step in 0..=steps {
        let t = f64::from(step) / f64::from(steps);
        let device = Point::new(view.x0 + t * view.width(), view.y0 + t * view.height());
        let previous = controller.state().clone();
        let state = controller.on_pointer_move(device, &mut overlay);
        if state.changed_from(&previous) {
            match state.highlighted() {
                Some(id) => println!("({:.0}, {:.0}) enter {id}", device.x, device.y),
                None => println!("({:.0}, {:.0}) idle", device.x, device.y),
            }
        }
    }
    controller.on_pointer_leave(&mut overlay);

    println!("{} overlay updates", overlay.updates);
    Ok(())
}
