// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choro Load: startup data for a choropleth map.
//!
//! A map needs two inputs before it can be drawn or hovered: region geometry
//! and per-region attributes. [`load`] fetches both [`Source`]s concurrently
//! and decodes them once both have arrived. The first failure is returned as
//! soon as it happens, as a [`LoadError`] naming the source; there is no
//! partial result and no retry.
//!
//! Geometry is read from a JSON document whose `objects` member maps names to
//! GeoJSON objects ([`decode_map`]). Which objects hold the national outline
//! and the regions is set by [`LoadConfig`]. Region ids are normalized to
//! strings so they match the keys of the attribute table
//! ([`decode_attributes`]).
//!
//! Decoded geometry is in source coordinates; apply the map projection with
//! [`MapGeometry::project`] before building a hit-test index.
//!
//! ```rust
//! use choro_load::{LoadConfig, MemorySource, load};
//!
//! let geometry = MemorySource::new("map.json", r#"{ "objects": {
//!     "nation": { "type": "Polygon", "coordinates": [[[0, 0], [10, 0], [10, 10], [0, 10]]] },
//!     "municipalities": { "type": "FeatureCollection", "features": [
//!         { "type": "Feature", "id": 1, "geometry":
//!             { "type": "Polygon", "coordinates": [[[0, 0], [5, 0], [5, 5], [0, 5]]] } }
//!     ] }
//! } }"#);
//! let attributes = MemorySource::new("data.json", r#"{ "1": { "n": "Alpha", "p": 1.5 } }"#);
//!
//! let data = load(geometry, attributes, &LoadConfig::default()).unwrap();
//! assert_eq!(data.geometry.regions[0].id, "1");
//! assert_eq!(data.attributes["1"].name, "Alpha");
//! ```

mod attributes;
mod config;
mod error;
mod geojson;
mod map;
mod source;

pub use attributes::{AttributeTable, RegionAttributes, decode_attributes};
pub use config::LoadConfig;
pub use error::LoadError;
pub use map::{MapGeometry, decode_map};
pub use source::{FileSource, MemorySource, Source};

use std::io;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

/// Everything [`load`] produces.
#[derive(Clone, Debug, PartialEq)]
pub struct MapData {
    /// Outline and regions, in source coordinates.
    pub geometry: MapGeometry,
    /// Tooltip data keyed by region id.
    pub attributes: AttributeTable,
}

/// Which input a fetch thread was reading.
#[derive(Clone, Copy, Debug)]
enum Input {
    Geometry,
    Attributes,
}

/// Fetch both sources concurrently, then decode them.
///
/// Each source is fetched on its own thread. The first fetch to fail is
/// reported immediately, without waiting for the other one; a fetch still
/// running at that point finishes in the background and its result is
/// dropped. A panic in a fetch is propagated to the caller.
///
/// Borrowed sources can be passed as `Arc`s.
pub fn load<G, A>(geometry: G, attributes: A, config: &LoadConfig) -> Result<MapData, LoadError>
where
    G: Source + Send + 'static,
    A: Source + Send + 'static,
{
    let geometry_name = geometry.name().to_owned();
    let attribute_name = attributes.name().to_owned();

    let (tx, rx) = mpsc::channel();
    let handles = [
        spawn_fetch(Input::Geometry, &geometry_name, geometry, tx.clone())?,
        spawn_fetch(Input::Attributes, &attribute_name, attributes, tx)?,
    ];

    let mut geometry_bytes = None;
    let mut attribute_bytes = None;
    while geometry_bytes.is_none() || attribute_bytes.is_none() {
        match rx.recv() {
            Ok((Input::Geometry, fetched)) => geometry_bytes = Some(fetched?),
            Ok((Input::Attributes, fetched)) => attribute_bytes = Some(fetched?),
            // Every sender is gone without both results: a fetch panicked.
            Err(_) => {
                for handle in handles {
                    if let Err(panic) = handle.join() {
                        std::panic::resume_unwind(panic);
                    }
                }
                return Err(LoadError::Io {
                    source_name: geometry_name,
                    error: io::Error::other("fetch thread exited without a result"),
                });
            }
        }
    }
    let geometry_bytes = geometry_bytes.unwrap_or_default();
    let attribute_bytes = attribute_bytes.unwrap_or_default();

    let map = map::decode_map_named(&geometry_name, &geometry_bytes, config)?;
    let table = attributes::decode_attributes_named(&attribute_name, &attribute_bytes)?;

    let unmatched = map
        .regions
        .iter()
        .filter(|f| !table.contains_key(&f.id))
        .count();
    tracing::debug!(
        regions = map.regions.len(),
        attributes = table.len(),
        unmatched,
        "loaded map data"
    );
    Ok(MapData {
        geometry: map,
        attributes: table,
    })
}

fn spawn_fetch<S>(
    input: Input,
    name: &str,
    source: S,
    results: mpsc::Sender<(Input, Result<Vec<u8>, LoadError>)>,
) -> Result<JoinHandle<()>, LoadError>
where
    S: Source + Send + 'static,
{
    thread::Builder::new()
        .name(format!("choro-fetch-{input:?}").to_lowercase())
        .spawn(move || {
            let fetched = source.fetch();
            if let Err(error) = &fetched {
                tracing::debug!(?input, %error, "fetch failed");
            }
            // The receiver is gone once the other fetch has failed.
            let _ = results.send((input, fetched));
        })
        .map_err(|error| LoadError::Io {
            source_name: name.to_owned(),
            error,
        })
}
