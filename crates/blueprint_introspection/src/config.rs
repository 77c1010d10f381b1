// SPDX-License-Identifier: MIT OR Apache-2.0
//! Engine configuration.
//!
//! Settings are stored as RON. A missing file means defaults, which match the
//! host editor's conventions.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "introspection.ron";

/// Name the host gives the construction script graph
pub const DEFAULT_CONSTRUCTION_SCRIPT_NAME: &str = "UserConstructionScript";

/// Introspection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntrospectionConfig {
    /// Function graph exposed as the construction script
    pub construction_script_name: String,
    /// Pin category excluded from function signatures
    pub exec_pin_category: String,
    /// Consider macro graphs as function candidates
    pub include_macro_graphs: bool,
    /// Consider delegate signature graphs as function candidates
    pub include_delegate_signature_graphs: bool,
    /// Pretty-print JSON output
    pub pretty_output: bool,
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            construction_script_name: DEFAULT_CONSTRUCTION_SCRIPT_NAME.to_string(),
            exec_pin_category: blueprint_model::pin::PC_EXEC.to_string(),
            include_macro_graphs: true,
            include_delegate_signature_graphs: true,
            pretty_output: true,
        }
    }
}

impl IntrospectionConfig {
    /// Parse settings from RON text
    pub fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(contents)?)
    }

    /// Render settings as pretty RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Load settings from a file, or defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_ron(&contents)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Error when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// RON could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// RON could not be written
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),
}
