// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};

/// Names of the objects read from the geometry document.
///
/// Deserializes from JSON with every field optional:
///
/// ```rust
/// let config: choro_load::LoadConfig =
///     serde_json::from_str(r#"{ "regions_object": "provinces" }"#).unwrap();
/// assert_eq!(config.nation_object, "nation");
/// assert_eq!(config.regions_object, "provinces");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Object whose geometries form the national outline.
    pub nation_object: String,
    /// Object holding one feature per region.
    pub regions_object: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            nation_object: "nation".to_owned(),
            regions_object: "municipalities".to_owned(),
        }
    }
}
