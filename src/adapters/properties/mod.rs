//! Message catalog adapter
//!
//! Builds a [`LevelMap`] from property-style message catalogs: `KEY=value`
//! lines, `#` comments, no nesting.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::ConfigurationError;
use crate::core::models::LevelMap;
use crate::core::models::level_map::DEFAULT_RESERVED_PREFIXES;

/// Catalog file extension
pub const CATALOG_EXTENSION: &str = "properties";

/// Builds the level table from catalog files
#[derive(Debug, Clone)]
pub struct LevelMapBuilder {
    reserved_prefixes: Vec<String>,
}

impl Default for LevelMapBuilder {
    fn default() -> Self {
        Self {
            reserved_prefixes: DEFAULT_RESERVED_PREFIXES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl LevelMapBuilder {
    /// Builder with the default reserved prefixes
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the reserved key prefixes
    #[must_use]
    pub fn reserved_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.reserved_prefixes = prefixes;
        self
    }

    /// Build from explicit catalog files, in the given order
    ///
    /// A key appearing in several files keeps its last definition.
    pub fn build(&self, data_files: &[PathBuf]) -> Result<LevelMap, ConfigurationError> {
        let mut map = LevelMap::new();
        for file in data_files {
            let content = fs::read_to_string(file).map_err(|source| ConfigurationError::Io {
                path: file.clone(),
                source,
            })?;
            map.extend_from_properties(&content, &self.reserved_prefixes);
            log::debug!("loaded message catalog {}", file.display());
        }
        log::info!("level map: {} message key(s) from {} catalog(s)", map.len(), data_files.len());
        Ok(map)
    }

    /// Build from every `*.properties` file directly inside `dir`, sorted by name
    pub fn build_from_dir(&self, dir: &Path) -> Result<LevelMap, ConfigurationError> {
        self.build(&catalog_files(dir)?)
    }
}

/// Catalog files in `dir`, sorted by name
pub fn catalog_files(dir: &Path) -> Result<Vec<PathBuf>, ConfigurationError> {
    let io_err = |source| ConfigurationError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == CATALOG_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
