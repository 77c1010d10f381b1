// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for blueprint graphs.

use crate::pin::{Pin, PinDirection, PinId};
use crate::variable::VariableDeclaration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Host name value meaning "no name".
pub const NAME_NONE: &str = "None";

/// Function flag bits stored on function entry nodes.
pub mod function_flags {
    /// Function is pure (no execution pins)
    pub const BLUEPRINT_PURE: u32 = 0x1000_0000;
    /// Function is private
    pub const PRIVATE: u32 = 0x0004_0000;
    /// Function is protected
    pub const PROTECTED: u32 = 0x0008_0000;
    /// Function is public
    pub const PUBLIC: u32 = 0x0002_0000;
}

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Reference from a node to a member (function, event, variable) by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberReference {
    /// Referenced member name
    pub member_name: Option<String>,
    /// Class or unit owning the member, when not self
    pub member_parent: Option<String>,
}

impl MemberReference {
    /// Reference a member by name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            member_name: Some(name.into()),
            member_parent: None,
        }
    }

    /// The member name, if the reference resolved to one.
    pub fn member_name(&self) -> Option<&str> {
        self.member_name
            .as_deref()
            .filter(|name| !name.is_empty() && *name != NAME_NONE)
    }
}

/// Function metadata carried by an entry node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionMetadata {
    /// Palette category
    pub category: String,
    /// Tooltip text
    pub tooltip: String,
}

/// Payload of a function entry sentinel
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionEntryData {
    /// Function metadata
    pub meta: FunctionMetadata,
    /// Raw function flag bits (see [`function_flags`])
    pub function_flags: u32,
    /// Local variables declared in the function
    pub local_variables: Vec<VariableDeclaration>,
}

/// Kind-specific payload of a node.
///
/// The host's node classes form an open hierarchy; the snapshot carries only
/// the shapes the engine understands and collapses everything else into
/// [`NodeBody::Other`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeBody {
    /// Built-in or overridden event
    Event {
        /// Referenced event
        #[serde(default)]
        event_reference: MemberReference,
    },
    /// Function call
    CallFunction {
        /// Referenced function
        #[serde(default)]
        function_reference: MemberReference,
    },
    /// Variable read
    VariableGet {
        /// Referenced variable
        #[serde(default)]
        variable_reference: MemberReference,
    },
    /// Variable write
    VariableSet {
        /// Referenced variable
        #[serde(default)]
        variable_reference: MemberReference,
    },
    /// User-declared event
    CustomEvent {
        /// Declared event name
        #[serde(default)]
        custom_function_name: String,
    },
    /// Function entry sentinel
    FunctionEntry(FunctionEntryData),
    /// Function result sentinel
    FunctionResult,
    /// Any other node class
    #[default]
    #[serde(other)]
    Other,
}

/// A node instance in a graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique instance ID
    pub guid: NodeId,
    /// Concrete node class name
    pub class_name: String,
    /// Full display title
    #[serde(default)]
    pub title: String,
    /// Position in the graph editor
    #[serde(default)]
    pub position: [f32; 2],
    /// Kind-specific payload
    #[serde(default)]
    pub body: NodeBody,
    /// Pins in declaration order; empty slots are tolerated
    #[serde(default)]
    pub pins: Vec<Option<Pin>>,
}

impl GraphNode {
    /// Create a new node
    pub fn new(class_name: impl Into<String>, title: impl Into<String>, body: NodeBody) -> Self {
        Self {
            guid: NodeId::new(),
            class_name: class_name.into(),
            title: title.into(),
            position: [0.0, 0.0],
            body,
            pins: Vec::new(),
        }
    }

    /// Set the position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = [x, y];
        self
    }

    /// Append a pin
    pub fn with_pin(mut self, pin: Pin) -> Self {
        self.pins.push(Some(pin));
        self
    }

    /// Get all live pins in declaration order
    pub fn pins(&self) -> impl Iterator<Item = &Pin> {
        self.pins.iter().flatten()
    }

    /// Get live pins with the given direction
    pub fn pins_with_direction(&self, direction: PinDirection) -> impl Iterator<Item = &Pin> {
        self.pins().filter(move |p| p.direction == direction)
    }

    /// Get a pin by ID
    pub fn pin(&self, pin_id: PinId) -> Option<&Pin> {
        self.pins().find(|p| p.id == pin_id)
    }

    /// Get a mutable pin by ID
    pub fn pin_mut(&mut self, pin_id: PinId) -> Option<&mut Pin> {
        self.pins.iter_mut().flatten().find(|p| p.id == pin_id)
    }

    /// Get a pin by name
    pub fn pin_named(&self, name: &str) -> Option<&Pin> {
        self.pins().find(|p| p.name == name)
    }

    /// Entry sentinel payload, if this node is one
    pub fn as_function_entry(&self) -> Option<&FunctionEntryData> {
        match &self.body {
            NodeBody::FunctionEntry(data) => Some(data),
            _ => None,
        }
    }

    /// Whether this node is a function result sentinel
    pub fn is_function_result(&self) -> bool {
        matches!(self.body, NodeBody::FunctionResult)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::PinType;

    #[test]
    fn test_member_reference_validity() {
        assert_eq!(MemberReference::named("PrintString").member_name(), Some("PrintString"));
        assert_eq!(MemberReference::named("None").member_name(), None);
        assert_eq!(MemberReference::named("").member_name(), None);
        assert_eq!(MemberReference::default().member_name(), None);
    }

    #[test]
    fn test_unknown_body_kind_is_other() {
        let body: NodeBody = serde_json::from_str(r#"{"kind":"macro_instance"}"#).unwrap();
        assert!(matches!(body, NodeBody::Other));
    }

    #[test]
    fn test_call_function_body_from_json() {
        let body: NodeBody = serde_json::from_str(
            r#"{"kind":"call_function","function_reference":{"member_name":"Delay"}}"#,
        )
        .unwrap();
        match body {
            NodeBody::CallFunction { function_reference } => {
                assert_eq!(function_reference.member_name(), Some("Delay"));
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn test_pin_lookup_skips_empty_slots() {
        let mut node = GraphNode::new("K2Node_Knot", "Reroute", NodeBody::Other)
            .with_pin(Pin::input("InputPin", PinType::new("wildcard")));
        node.pins.push(None);
        let node = node.with_pin(Pin::output("OutputPin", PinType::new("wildcard")));

        assert_eq!(node.pins().count(), 2);
        assert_eq!(node.pins_with_direction(PinDirection::Output).count(), 1);
        assert!(node.pin_named("OutputPin").is_some());
    }
}
