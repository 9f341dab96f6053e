// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::BTreeMap;

use kurbo::{Point, Rect};
use serde::Deserialize;
use serde_json::Value;

use choro_geom::{Feature, Geometry};

use crate::geojson::{RawObject, id_string};
use crate::{LoadConfig, LoadError};

/// The decoded map: national outline plus one feature per region.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapGeometry {
    /// All nation geometries merged into one.
    pub outline: Geometry,
    /// Region features keyed by string id.
    pub regions: Vec<Feature<String>>,
}

impl MapGeometry {
    /// A copy with every vertex passed through `project`.
    ///
    /// Apply the map's forward projection here once, before indexing, so
    /// that hit testing happens in the same plane the map is drawn in.
    pub fn project(&self, project: impl Fn(Point) -> Point) -> Self {
        Self {
            outline: self.outline.map_points(&project),
            regions: self
                .regions
                .iter()
                .map(|f| Feature::new(f.id.clone(), f.geometry.map_points(&project)))
                .collect(),
        }
    }

    /// Extent of the outline.
    pub fn bounds(&self) -> Option<Rect> {
        self.outline.bounding_box()
    }
}

#[derive(Deserialize)]
struct Document {
    objects: BTreeMap<String, Value>,
}

/// Decode a geometry document.
///
/// The document is a JSON object with an `objects` member mapping names to
/// GeoJSON objects (feature collections, features or bare geometries). The
/// object named by [`LoadConfig::nation_object`] is merged into the outline
/// and [`LoadConfig::regions_object`] supplies the regions.
pub fn decode_map(bytes: &[u8], config: &LoadConfig) -> Result<MapGeometry, LoadError> {
    decode_map_named("geometry", bytes, config)
}

pub(crate) fn decode_map_named(
    source: &str,
    bytes: &[u8],
    config: &LoadConfig,
) -> Result<MapGeometry, LoadError> {
    let mut document: Document =
        serde_json::from_slice(bytes).map_err(|e| LoadError::json(source, e))?;
    let nation = take_object(&mut document, &config.nation_object, source)?;
    let regions = take_object(&mut document, &config.regions_object, source)?;

    let outline = Geometry::from_components(
        nation
            .into_features(source)?
            .into_iter()
            .flat_map(|f| f.geometry.into_components())
            .collect(),
    );
    let regions: Vec<_> = regions
        .into_features(source)?
        .into_iter()
        .enumerate()
        .map(|(position, f)| Feature::new(id_string(f.id, position), f.geometry))
        .collect();

    tracing::debug!(
        source,
        regions = regions.len(),
        outline_vertices = outline.vertex_count(),
        "decoded map"
    );
    Ok(MapGeometry { outline, regions })
}

fn take_object(document: &mut Document, name: &str, source: &str) -> Result<RawObject, LoadError> {
    let value = document
        .objects
        .remove(name)
        .ok_or_else(|| LoadError::MissingObject {
            source_name: source.to_owned(),
            object: name.to_owned(),
        })?;
    serde_json::from_value(value).map_err(|e| LoadError::json(source, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use choro_geom::Contains;

    const DOC: &str = r#"{
        "objects": {
            "nation": { "type": "FeatureCollection", "features": [
                { "type": "Feature", "geometry": { "type": "Polygon",
                  "coordinates": [[[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]] } },
                { "type": "Feature", "geometry": { "type": "Polygon",
                  "coordinates": [[[20, 0], [24, 0], [24, 4], [20, 4], [20, 0]]] } }
            ] },
            "municipalities": { "type": "FeatureCollection", "features": [
                { "type": "Feature", "id": 101, "geometry": { "type": "Polygon",
                  "coordinates": [[[0, 0], [5, 0], [5, 5], [0, 5], [0, 0]]] } },
                { "type": "Feature", "id": "B", "geometry": { "type": "Polygon",
                  "coordinates": [[[5, 0], [10, 0], [10, 5], [5, 5], [5, 0]]] } }
            ] }
        }
    }"#;

    #[test]
    fn decodes_outline_and_regions() {
        let map = decode_map(DOC.as_bytes(), &LoadConfig::default()).expect("valid document");
        assert_eq!(map.outline.components().len(), 2);
        assert!(map.outline.contains_point(Point::new(22.0, 2.0)));
        let ids: Vec<_> = map.regions.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["101", "B"]);
        assert_eq!(map.bounds(), Some(Rect::new(0.0, 0.0, 24.0, 10.0)));
    }

    #[test]
    fn object_names_come_from_config() {
        let config = LoadConfig {
            regions_object: "provinces".to_owned(),
            ..LoadConfig::default()
        };
        let err = decode_map(DOC.as_bytes(), &config).expect_err("no provinces object");
        let LoadError::MissingObject { object, .. } = err else {
            panic!("expected a missing object error, got {err}");
        };
        assert_eq!(object, "provinces");
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = decode_map(b"{ \"objects\": ", &LoadConfig::default()).expect_err("truncated");
        assert!(matches!(err, LoadError::Json { .. }), "{err}");
        assert_eq!(err.source_name(), "geometry");
    }

    #[test]
    fn projection_is_applied_everywhere() {
        let map = decode_map(DOC.as_bytes(), &LoadConfig::default()).expect("valid document");
        let projected = map.project(|p| Point::new(p.x * 2.0, -p.y));
        assert_eq!(projected.bounds(), Some(Rect::new(0.0, -10.0, 48.0, 0.0)));
        assert!(projected.regions[1].contains_point(Point::new(15.0, -2.0)));
        assert!(!projected.regions[1].contains_point(Point::new(7.0, 2.0)));
    }
}
