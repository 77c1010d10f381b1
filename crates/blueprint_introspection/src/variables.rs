// SPDX-License-Identifier: MIT OR Apache-2.0
//! Variable extraction: type, flags, replication and metadata.

use crate::type_info::TypeInfo;
use blueprint_model::variable::property_flags;
use blueprint_model::VariableDeclaration;
use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

/// Replication mode of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReplicationMode {
    /// Not replicated
    None,
    /// Replicated
    Replicated,
    /// Replicated with a notify callback
    RepNotify,
}

/// Replication condition of a replicated variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReplicationCondition {
    /// Always replicated
    None,
    /// Only on the initial bunch
    InitialOnly,
    /// Only to the owner
    OwnerOnly,
    /// Everyone but the owner
    SkipOwner,
    /// Only to simulated proxies
    SimulatedOnly,
    /// Only to autonomous proxies
    AutonomousOnly,
    /// Simulated proxies or physics
    SimulatedOrPhysics,
    /// Initial bunch or owner
    InitialOrOwner,
    /// Custom condition
    Custom,
    /// Replays or owner
    ReplayOrOwner,
    /// Replays only
    ReplayOnly,
    /// Simulated proxies, not replays
    SimulatedOnlyNoReplay,
    /// Simulated or physics, not replays
    SimulatedOrPhysicsNoReplay,
    /// Everything but replays
    SkipReplay,
}

impl ReplicationCondition {
    /// Decode the host's raw condition; unknown values are `None`.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            1 => ReplicationCondition::InitialOnly,
            2 => ReplicationCondition::OwnerOnly,
            3 => ReplicationCondition::SkipOwner,
            4 => ReplicationCondition::SimulatedOnly,
            5 => ReplicationCondition::AutonomousOnly,
            6 => ReplicationCondition::SimulatedOrPhysics,
            7 => ReplicationCondition::InitialOrOwner,
            8 => ReplicationCondition::Custom,
            9 => ReplicationCondition::ReplayOrOwner,
            10 => ReplicationCondition::ReplayOnly,
            11 => ReplicationCondition::SimulatedOnlyNoReplay,
            12 => ReplicationCondition::SimulatedOrPhysicsNoReplay,
            13 => ReplicationCondition::SkipReplay,
            _ => ReplicationCondition::None,
        }
    }
}

/// Replication fields of a variable.
///
/// `condition` is set exactly when `mode` is not [`ReplicationMode::None`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replication {
    /// Mode
    #[serde(rename = "replication")]
    pub mode: ReplicationMode,
    /// Notify callback, for `RepNotify`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rep_notify_function: Option<String>,
    /// Condition, for replicated variables
    #[serde(rename = "replication_condition", skip_serializing_if = "Option::is_none")]
    pub condition: Option<ReplicationCondition>,
}

impl Replication {
    /// Decode replication from a declaration
    pub fn from_declaration(decl: &VariableDeclaration) -> Self {
        if !decl.has_flag(property_flags::NET) {
            return Self {
                mode: ReplicationMode::None,
                rep_notify_function: None,
                condition: None,
            };
        }

        let condition = Some(ReplicationCondition::from_raw(decl.replication_condition));
        match decl.rep_notify_name() {
            Some(callback) => Self {
                mode: ReplicationMode::RepNotify,
                rep_notify_function: Some(callback.to_string()),
                condition,
            },
            None => Self {
                mode: ReplicationMode::Replicated,
                rep_notify_function: None,
                condition,
            },
        }
    }
}

/// Boolean flags decoded from the property bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VariableFlags {
    /// Exposed on spawn
    pub is_exposed: bool,
    /// Read-only in graphs
    pub is_blueprint_read_only: bool,
    /// Editable in the details panel
    pub is_editable: bool,
    /// Visible to graphs
    pub is_blueprint_visible: bool,
    /// Not saved
    pub is_transient: bool,
    /// Loaded from config
    pub is_config: bool,
}

impl VariableFlags {
    /// Test each bit independently
    pub fn from_bits(bits: u64) -> Self {
        let has = |flag: u64| bits & flag != 0;
        Self {
            is_exposed: has(property_flags::EXPOSE_ON_SPAWN),
            is_blueprint_read_only: has(property_flags::BLUEPRINT_READ_ONLY),
            is_editable: has(property_flags::EDIT),
            is_blueprint_visible: has(property_flags::BLUEPRINT_VISIBLE),
            is_transient: has(property_flags::TRANSIENT),
            is_config: has(property_flags::CONFIG),
        }
    }
}

/// An extracted member variable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDescriptor {
    /// Variable name
    pub name: String,
    /// Type
    pub type_info: TypeInfo,
    /// Flat `category[:Object]` type string
    #[serde(rename = "type")]
    pub legacy_type: String,
    /// Category
    pub category: String,
    /// Display name / tooltip
    pub friendly_name: String,
    /// Metadata, omitted when the declaration has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<IndexMap<String, String>>,
    /// Decoded flags
    #[serde(flatten)]
    pub flags: VariableFlags,
    /// Replication
    #[serde(flatten)]
    pub replication: Replication,
    /// Default value literal
    pub default_value: String,
    /// Variable GUID
    pub guid: Uuid,
}

impl VariableDescriptor {
    /// Describe a declaration
    pub fn from_declaration(decl: &VariableDeclaration) -> Self {
        let type_info = TypeInfo::from_pin_type(&decl.var_type);
        let metadata = (!decl.metadata.is_empty()).then(|| {
            decl.metadata
                .iter()
                .map(|entry| (entry.data_key.clone(), entry.data_value.clone()))
                .collect()
        });

        Self {
            name: decl.var_name.clone(),
            legacy_type: type_info.legacy_type_string(),
            type_info,
            category: decl.category.clone(),
            friendly_name: decl.friendly_name.clone(),
            metadata,
            flags: VariableFlags::from_bits(decl.property_flags),
            replication: Replication::from_declaration(decl),
            default_value: decl.default_value.clone(),
            guid: decl.var_guid,
        }
    }
}

/// Local variable of a function: name and type only
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalVariableDescriptor {
    /// Variable name
    pub name: String,
    /// Type
    pub type_info: TypeInfo,
}

impl LocalVariableDescriptor {
    /// Describe a local declaration
    pub fn from_declaration(decl: &VariableDeclaration) -> Self {
        Self {
            name: decl.var_name.clone(),
            type_info: TypeInfo::from_pin_type(&decl.var_type),
        }
    }
}

/// Extract member variables in declaration order
pub fn extract_variables(declarations: &[VariableDeclaration]) -> Vec<VariableDescriptor> {
    tracing::debug!("Extracting {} variables", declarations.len());
    declarations.iter().map(VariableDescriptor::from_declaration).collect()
}
