// Copyright 2025 the Choro Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where startup bytes come from.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::LoadError;

/// A named blob of bytes fetched once at startup.
pub trait Source {
    /// Human-readable name used in errors and logs.
    fn name(&self) -> &str;

    /// Read the whole source.
    fn fetch(&self) -> Result<Vec<u8>, LoadError>;
}

impl<S: Source + ?Sized> Source for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        (**self).fetch()
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        (**self).fetch()
    }
}

impl<S: Source + ?Sized> Source for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        (**self).fetch()
    }
}

/// A file on disk.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    /// A source reading `path`, named after it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    /// The file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Source for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        let bytes = std::fs::read(&self.path).map_err(|error| LoadError::Io {
            source_name: self.name.clone(),
            error,
        })?;
        tracing::debug!(source = %self.name, bytes = bytes.len(), "fetched file");
        Ok(bytes)
    }
}

/// Bytes already in memory, e.g. embedded with `include_bytes!`.
#[derive(Clone, Debug)]
pub struct MemorySource {
    name: String,
    bytes: Vec<u8>,
}

impl MemorySource {
    /// A source named `name` yielding `bytes`.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl Source for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        Ok(self.bytes.clone())
    }
}
