// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal GeoJSON reading: polygons, multi-polygons and collections of them.

use kurbo::Point;
use serde::Deserialize;
use serde_json::Value;

use choro_geom::{Geometry, Polygon, Ring};

use crate::LoadError;

/// Any GeoJSON object, with only the members this crate reads.
#[derive(Debug, Deserialize)]
pub(crate) struct RawObject {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    features: Vec<RawObject>,
    #[serde(default)]
    geometry: Option<Box<RawObject>>,
    #[serde(default)]
    geometries: Vec<RawObject>,
    #[serde(default)]
    coordinates: Value,
}

/// A feature before its id has been normalized.
#[derive(Debug)]
pub(crate) struct RawFeature {
    pub(crate) id: Option<Value>,
    pub(crate) geometry: Geometry,
}

impl RawObject {
    /// Flatten a feature collection, feature or bare geometry into features.
    ///
    /// A feature with a `null` geometry yields an empty geometry.
    pub(crate) fn into_features(self, source: &str) -> Result<Vec<RawFeature>, LoadError> {
        match self.kind.as_str() {
            "FeatureCollection" => {
                let mut out = Vec::with_capacity(self.features.len());
                for feature in self.features {
                    out.extend(feature.into_features(source)?);
                }
                Ok(out)
            }
            "Feature" => {
                let geometry = match self.geometry {
                    Some(geometry) => geometry.into_geometry(source)?,
                    None => Geometry::default(),
                };
                Ok(vec![RawFeature {
                    id: self.id,
                    geometry,
                }])
            }
            _ => {
                let id = self.id.clone();
                Ok(vec![RawFeature {
                    id,
                    geometry: self.into_geometry(source)?,
                }])
            }
        }
    }

    fn into_geometry(self, source: &str) -> Result<Geometry, LoadError> {
        match self.kind.as_str() {
            "Polygon" => {
                let rings: Vec<Vec<Vec<f64>>> = coordinates(self.coordinates, source)?;
                Ok(Geometry::Polygon(polygon(rings, source)?))
            }
            "MultiPolygon" => {
                let polygons: Vec<Vec<Vec<Vec<f64>>>> = coordinates(self.coordinates, source)?;
                let components = polygons
                    .into_iter()
                    .map(|rings| polygon(rings, source))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Geometry::MultiPolygon(components))
            }
            "GeometryCollection" => {
                let mut components = Vec::new();
                for geometry in self.geometries {
                    components.extend(geometry.into_geometry(source)?.into_components());
                }
                Ok(Geometry::MultiPolygon(components))
            }
            _ => Err(LoadError::UnsupportedGeometry {
                source_name: source.to_owned(),
                kind: self.kind,
            }),
        }
    }
}

fn coordinates<T: serde::de::DeserializeOwned>(value: Value, source: &str) -> Result<T, LoadError> {
    serde_json::from_value(value).map_err(|error| LoadError::InvalidCoordinates {
        source_name: source.to_owned(),
        reason: "expected nested arrays of numeric positions",
        error: Some(error),
    })
}

fn polygon(rings: Vec<Vec<Vec<f64>>>, source: &str) -> Result<Polygon, LoadError> {
    let rings = rings
        .into_iter()
        .map(|positions| ring(positions, source))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::from_rings(rings))
}

/// Positions to a ring without GeoJSON's repeated closing vertex.
fn ring(positions: Vec<Vec<f64>>, source: &str) -> Result<Ring, LoadError> {
    let mut ring = positions
        .into_iter()
        .map(|position| match position[..] {
            [x, y, ..] => Ok(Point::new(x, y)),
            _ => Err(LoadError::InvalidCoordinates {
                source_name: source.to_owned(),
                reason: "position has fewer than two values",
                error: None,
            }),
        })
        .collect::<Result<Ring, _>>()?;
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    Ok(ring)
}

/// Identifier as a string: strings as-is, numbers in their JSON spelling,
/// and the feature's position when absent.
///
/// Integral floats such as `28079.0` are spelled as integers so they match
/// the keys of an attribute table.
pub(crate) fn id_string(id: Option<Value>, position: usize) -> String {
    match id {
        Some(Value::String(s)) => s,
        None | Some(Value::Null) => position.to_string(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() < MAX_EXACT_INTEGER => {
                format!("{}", v as i64)
            }
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

// Largest magnitude below which every integral f64 is exact.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> RawObject {
        serde_json::from_value(value).expect("valid object")
    }

    #[test]
    fn closing_vertex_is_dropped() {
        let obj = parse(json!({
            "type": "Polygon",
            "coordinates": [[[0, 0], [4, 0], [4, 4], [0, 0]]]
        }));
        let features = obj.into_features("t").expect("decodes");
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].geometry.vertex_count(), 3);
    }

    #[test]
    fn collection_flattens_components() {
        let obj = parse(json!({
            "type": "GeometryCollection",
            "geometries": [
                { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]] },
                { "type": "MultiPolygon", "coordinates": [
                    [[[2, 2], [3, 2], [3, 3]]],
                    [[[4, 4], [5, 4], [5, 5]]]
                ] }
            ]
        }));
        let features = obj.into_features("t").expect("decodes");
        assert_eq!(features[0].geometry.components().len(), 3);
    }

    #[test]
    fn null_geometry_is_empty() {
        let obj = parse(json!({ "type": "Feature", "id": 3, "geometry": null }));
        let features = obj.into_features("t").expect("decodes");
        assert!(features[0].geometry.bounding_box().is_none());
    }

    #[test]
    fn lines_are_unsupported() {
        let obj = parse(json!({ "type": "LineString", "coordinates": [[0, 0], [1, 1]] }));
        let Err(LoadError::UnsupportedGeometry { kind, .. }) = obj.into_features("t") else {
            panic!("expected an unsupported geometry error");
        };
        assert_eq!(kind, "LineString");
    }

    #[test]
    fn short_positions_are_rejected() {
        let obj = parse(json!({ "type": "Polygon", "coordinates": [[[0, 0], [1]]] }));
        assert!(matches!(
            obj.into_features("t"),
            Err(LoadError::InvalidCoordinates { .. })
        ));
        let obj = parse(json!({ "type": "Polygon", "coordinates": [[0, 0]] }));
        assert!(matches!(
            obj.into_features("t"),
            Err(LoadError::InvalidCoordinates { error: Some(_), .. })
        ));
    }

    #[test]
    fn coordinate_decode_error_is_kept_as_source() {
        use std::error::Error as _;

        let obj = parse(json!({ "type": "Polygon", "coordinates": [[[0, 0], ["a", 1]]] }));
        let err = obj.into_features("t").expect_err("non-numeric position");
        let cause = err.source().expect("decode error is attached");
        assert!(cause.to_string().contains("invalid type"), "{cause}");

        let obj = parse(json!({ "type": "Polygon", "coordinates": [[[0, 0], [1]]] }));
        let err = obj.into_features("t").expect_err("short position");
        assert!(err.source().is_none());
    }

    #[test]
    fn ids_are_stringified() {
        assert_eq!(id_string(Some(json!(42)), 0), "42");
        assert_eq!(id_string(Some(json!("x7")), 0), "x7");
        assert_eq!(id_string(None, 5), "5");
    }

    #[test]
    fn integral_float_ids_match_integer_keys() {
        assert_eq!(id_string(Some(json!(28079.0)), 0), "28079");
        assert_eq!(id_string(Some(json!(-3.0)), 0), "-3");
        assert_eq!(id_string(Some(json!(2.5)), 0), "2.5");
        assert_eq!(id_string(Some(json!(1e300)), 0), json!(1e300).to_string());
    }
}
