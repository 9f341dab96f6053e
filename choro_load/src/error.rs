// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Failure to fetch or decode startup data.
///
/// Every variant names the source it came from. Loading stops at the first
/// error; nothing is partially loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be read.
    #[error("failed to read {source_name}: {error}")]
    Io {
        /// Source name.
        source_name: String,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// The source is not valid JSON of the expected shape.
    #[error("malformed JSON in {source_name}: {error}")]
    Json {
        /// Source name.
        source_name: String,
        /// Underlying parse error.
        #[source]
        error: serde_json::Error,
    },

    /// A named object is absent from the geometry document.
    #[error("{source_name} has no object named {object:?}")]
    MissingObject {
        /// Source name.
        source_name: String,
        /// The object that was looked up.
        object: String,
    },

    /// A geometry type other than polygons or collections of them.
    #[error("{source_name}: unsupported geometry type {kind:?}")]
    UnsupportedGeometry {
        /// Source name.
        source_name: String,
        /// The GeoJSON `type` found.
        kind: String,
    },

    /// Coordinates of the wrong nesting, arity or with non-finite values.
    #[error("{source_name}: invalid coordinates: {reason}")]
    InvalidCoordinates {
        /// Source name.
        source_name: String,
        /// What was wrong with them.
        reason: &'static str,
        /// The decoding error, when the coordinates did not have the
        /// expected nesting.
        #[source]
        error: Option<serde_json::Error>,
    },
}

impl LoadError {
    /// Name of the source the error came from.
    pub fn source_name(&self) -> &str {
        match self {
            Self::Io { source_name, .. }
            | Self::Json { source_name, .. }
            | Self::MissingObject { source_name, .. }
            | Self::UnsupportedGeometry { source_name, .. }
            | Self::InvalidCoordinates { source_name, .. } => source_name,
        }
    }

    pub(crate) fn json(source_name: &str, error: serde_json::Error) -> Self {
        Self::Json {
            source_name: source_name.to_owned(),
            error,
        }
    }
}
