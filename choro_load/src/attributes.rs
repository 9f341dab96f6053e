// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::LoadError;

/// Tooltip data for one region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionAttributes {
    /// Display name.
    #[serde(rename = "n")]
    pub name: String,
    /// The mapped value, e.g. population change in percent.
    #[serde(rename = "p")]
    pub value: f64,
}

impl fmt::Display for RegionAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Region attributes keyed by region id.
pub type AttributeTable = BTreeMap<String, RegionAttributes>;

/// Decode an attribute table: `{ "<id>": { "n": name, "p": value }, ... }`.
///
/// Unknown members of each record are ignored.
pub fn decode_attributes(bytes: &[u8]) -> Result<AttributeTable, LoadError> {
    decode_attributes_named("attributes", bytes)
}

pub(crate) fn decode_attributes_named(
    source: &str,
    bytes: &[u8],
) -> Result<AttributeTable, LoadError> {
    let table: AttributeTable =
        serde_json::from_slice(bytes).map_err(|e| LoadError::json(source, e))?;
    tracing::debug!(source, records = table.len(), "decoded attributes");
    Ok(table)
}
