// SPDX-License-Identifier: MIT OR Apache-2.0
//! Variable declarations.

use crate::pin::PinType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Property flag bits stored on variable declarations.
pub mod property_flags {
    /// Editable in the details panel
    pub const EDIT: u64 = 0x0000_0000_0000_0001;
    /// Visible to blueprint graphs
    pub const BLUEPRINT_VISIBLE: u64 = 0x0000_0000_0000_0004;
    /// Read-only in blueprint graphs
    pub const BLUEPRINT_READ_ONLY: u64 = 0x0000_0000_0000_0010;
    /// Replicated over the network
    pub const NET: u64 = 0x0000_0000_0000_0020;
    /// Not saved
    pub const TRANSIENT: u64 = 0x0000_0000_0000_2000;
    /// Loaded from config
    pub const CONFIG: u64 = 0x0000_0000_0000_4000;
    /// Exposed as a spawn parameter
    pub const EXPOSE_ON_SPAWN: u64 = 0x0001_0000_0000_0000;
}

/// A metadata key/value pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaDataEntry {
    /// Key
    pub data_key: String,
    /// Value
    pub data_value: String,
}

/// A declared variable (member or function-local)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableDeclaration {
    /// Variable name
    pub var_name: String,
    /// Unique identifier
    #[serde(default = "Uuid::new_v4")]
    pub var_guid: Uuid,
    /// Declared type
    #[serde(default)]
    pub var_type: PinType,
    /// Display name / tooltip
    #[serde(default)]
    pub friendly_name: String,
    /// Category
    #[serde(default)]
    pub category: String,
    /// Raw property flag bits (see [`property_flags`])
    #[serde(default)]
    pub property_flags: u64,
    /// Replication notify callback
    #[serde(default)]
    pub rep_notify_func: Option<String>,
    /// Raw replication condition value
    #[serde(default)]
    pub replication_condition: u8,
    /// Metadata in declaration order
    #[serde(default)]
    pub metadata: Vec<MetaDataEntry>,
    /// Default value literal
    #[serde(default)]
    pub default_value: String,
}

impl VariableDeclaration {
    /// Create a variable with default flags
    pub fn new(name: impl Into<String>, var_type: PinType) -> Self {
        Self {
            var_name: name.into(),
            var_guid: Uuid::new_v4(),
            var_type,
            friendly_name: String::new(),
            category: String::new(),
            property_flags: property_flags::EDIT | property_flags::BLUEPRINT_VISIBLE,
            rep_notify_func: None,
            replication_condition: 0,
            metadata: Vec::new(),
            default_value: String::new(),
        }
    }

    /// Set the property flags
    pub fn with_flags(mut self, flags: u64) -> Self {
        self.property_flags = flags;
        self
    }

    /// Add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push(MetaDataEntry {
            data_key: key.into(),
            data_value: value.into(),
        });
        self
    }

    /// Whether a property flag bit is set
    pub fn has_flag(&self, flag: u64) -> bool {
        self.property_flags & flag != 0
    }

    /// The notify callback name, treating the host's "None" as absent
    pub fn rep_notify_name(&self) -> Option<&str> {
        self.rep_notify_func
            .as_deref()
            .filter(|name| !name.is_empty() && *name != crate::node::NAME_NONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_are_independent() {
        let var = VariableDeclaration::new("Health", PinType::new("float"))
            .with_flags(property_flags::EDIT | property_flags::NET | property_flags::EXPOSE_ON_SPAWN);
        assert!(var.has_flag(property_flags::EDIT));
        assert!(var.has_flag(property_flags::NET));
        assert!(var.has_flag(property_flags::EXPOSE_ON_SPAWN));
        assert!(!var.has_flag(property_flags::TRANSIENT));
    }

    #[test]
    fn test_rep_notify_name() {
        let mut var = VariableDeclaration::new("Health", PinType::new("float"));
        assert_eq!(var.rep_notify_name(), None);
        var.rep_notify_func = Some("None".to_string());
        assert_eq!(var.rep_notify_name(), None);
        var.rep_notify_func = Some("OnRep_Health".to_string());
        assert_eq!(var.rep_notify_name(), Some("OnRep_Health"));
    }
}
