// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pin definitions for node inputs/outputs.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pin category used by execution-flow pins.
pub const PC_EXEC: &str = "exec";

/// Unique identifier for a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinId(pub Uuid);

impl PinId {
    /// Create a new random pin ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PinId {
    fn default() -> Self {
        Self::new()
    }
}

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinDirection {
    /// Input pin
    Input,
    /// Output pin
    Output,
}

/// Reference to a named host object (class, struct, enum, asset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Short object name
    pub name: String,
    /// Full object path
    #[serde(default)]
    pub path: String,
}

impl ObjectRef {
    /// Create a reference from a name and path
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// A reference whose object was never resolved carries no name.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Raw type description of a pin or variable, as the host stores it.
///
/// `container_type` is the host's raw enumeration value
/// (0 none, 1 array, 2 set, 3 map); other values can appear in damaged
/// snapshots and are left for consumers to interpret.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinType {
    /// Primary category token ("bool", "object", "struct", "exec", ...)
    pub pin_category: String,
    /// Sub-category token; the host writes "None" when inapplicable
    pub pin_sub_category: String,
    /// Referenced object for object/class/struct/enum types
    pub pin_sub_category_object: Option<ObjectRef>,
    /// Raw container enumeration value
    pub container_type: u8,
    /// Passed by reference
    pub is_reference: bool,
    /// Const qualified
    pub is_const: bool,
    /// Weak object reference
    pub is_weak_pointer: bool,
}

impl PinType {
    /// Create a type with only a category set
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            pin_category: category.into(),
            ..Default::default()
        }
    }

    /// Execution-flow pin type
    pub fn exec() -> Self {
        Self::new(PC_EXEC)
    }

    /// Object reference type
    pub fn object(class: ObjectRef) -> Self {
        Self {
            pin_category: "object".to_string(),
            pin_sub_category_object: Some(class),
            ..Default::default()
        }
    }

    /// Set the sub-category token
    pub fn with_sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.pin_sub_category = sub_category.into();
        self
    }

    /// Set the raw container value
    pub fn with_container(mut self, raw: u8) -> Self {
        self.container_type = raw;
        self
    }

    /// Whether this is an execution-flow type
    pub fn is_exec(&self) -> bool {
        self.pin_category == PC_EXEC
    }
}

/// One end of a wire: the pin on another node this pin is linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinLink {
    /// Node owning the linked pin
    pub node: NodeId,
    /// Linked pin
    pub pin: PinId,
}

/// A pin on a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    /// Unique pin ID
    pub id: PinId,
    /// Pin name
    pub name: String,
    /// Pin direction
    pub direction: PinDirection,
    /// Pin type
    #[serde(default)]
    pub pin_type: PinType,
    /// Literal default value, empty when unset
    #[serde(default)]
    pub default_value: String,
    /// Pins this pin is wired to
    #[serde(default)]
    pub linked_to: Vec<PinLink>,
}

impl Pin {
    /// Create a new pin
    pub fn new(name: impl Into<String>, pin_type: PinType, direction: PinDirection) -> Self {
        Self {
            id: PinId::new(),
            name: name.into(),
            direction,
            pin_type,
            default_value: String::new(),
            linked_to: Vec::new(),
        }
    }

    /// Create a new input pin
    pub fn input(name: impl Into<String>, pin_type: PinType) -> Self {
        Self::new(name, pin_type, PinDirection::Input)
    }

    /// Create a new output pin
    pub fn output(name: impl Into<String>, pin_type: PinType) -> Self {
        Self::new(name, pin_type, PinDirection::Output)
    }

    /// Set the default value
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Whether this pin carries execution flow
    pub fn is_exec(&self) -> bool {
        self.pin_type.is_exec()
    }
}
