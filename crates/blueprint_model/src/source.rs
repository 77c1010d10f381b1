// SPDX-License-Identifier: MIT OR Apache-2.0
//! Unit lookup.
//!
//! The engine never owns units; it asks a [`UnitSource`] for one by name or
//! path. [`UnitRegistry`] is the in-memory source, filled from snapshot files
//! (JSON) or built directly in code.

use crate::unit::ProgramUnit;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Read-only access to program units
pub trait UnitSource {
    /// Resolve a unit by name, object path or package path
    fn find_unit(&self, identifier: &str) -> Option<&ProgramUnit>;

    /// Names of every unit this source can resolve
    fn unit_names(&self) -> Vec<&str>;
}

/// In-memory unit registry
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    /// Units by name, in registration order
    units: IndexMap<String, ProgramUnit>,
}

impl UnitRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit
    pub fn register(&mut self, unit: ProgramUnit) -> Result<(), RegistryError> {
        if self.units.contains_key(&unit.name) {
            return Err(RegistryError::DuplicateUnit(unit.name));
        }
        tracing::debug!("Registered unit {} ({})", unit.name, unit.path);
        self.units.insert(unit.name.clone(), unit);
        Ok(())
    }

    /// Number of registered units
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Parse a `.json` unit snapshot
    pub fn read_snapshot(path: &Path) -> Result<ProgramUnit, RegistryError> {
        if !is_snapshot(path) {
            return Err(RegistryError::UnsupportedFormat(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| RegistryError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load and register one snapshot file
    pub fn load_file(&mut self, path: &Path) -> Result<(), RegistryError> {
        let unit = Self::read_snapshot(path)?;
        self.register(unit)
    }

    /// Load every `.json` snapshot in a directory (not recursive).
    ///
    /// Returns the number of units loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, RegistryError> {
        let entries = std::fs::read_dir(dir).map_err(|source| RegistryError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| RegistryError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if is_snapshot(&path) {
                paths.push(path);
            }
        }
        // read_dir order is platform dependent
        paths.sort();

        for path in &paths {
            self.load_file(path)?;
        }
        tracing::info!("Loaded {} unit snapshots from {}", paths.len(), dir.display());
        Ok(paths.len())
    }

    /// Load a file or a directory of snapshot files
    pub fn load_path(&mut self, path: &Path) -> Result<usize, RegistryError> {
        if path.is_dir() {
            self.load_dir(path)
        } else {
            self.load_file(path).map(|()| 1)
        }
    }
}

fn is_snapshot(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

impl UnitSource for UnitRegistry {
    fn find_unit(&self, identifier: &str) -> Option<&ProgramUnit> {
        if let Some(unit) = self.units.get(identifier) {
            return Some(unit);
        }
        let units = || self.units.values();
        units()
            .find(|u| u.path == identifier)
            .or_else(|| units().find(|u| u.package_path() == identifier))
            .or_else(|| units().find(|u| u.name.eq_ignore_ascii_case(identifier)))
    }

    fn unit_names(&self) -> Vec<&str> {
        self.units.keys().map(String::as_str).collect()
    }
}

impl FromIterator<ProgramUnit> for UnitRegistry {
    /// Later units with a duplicate name are dropped.
    fn from_iter<I: IntoIterator<Item = ProgramUnit>>(iter: I) -> Self {
        let mut registry = Self::new();
        for unit in iter {
            if let Err(e) = registry.register(unit) {
                tracing::warn!("Skipping unit: {e}");
            }
        }
        registry
    }
}

/// Error when loading or registering units
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// JSON snapshot could not be parsed
    #[error("Invalid JSON snapshot {path}: {source}")]
    Json {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },

    /// File is not a `.json` snapshot
    #[error("Unsupported snapshot format: {0}")]
    UnsupportedFormat(PathBuf),

    /// A unit with the same name is already registered
    #[error("Duplicate unit: {0}")]
    DuplicateUnit(String),
}
