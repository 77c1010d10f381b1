// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pin descriptors.

use crate::type_info::TypeInfo;
use blueprint_model::{Pin, PinDirection, PinId};
use serde::Serialize;

/// Pin direction as written to documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Input pin
    Input,
    /// Output pin
    Output,
}

impl From<PinDirection> for Direction {
    fn from(direction: PinDirection) -> Self {
        match direction {
            PinDirection::Input => Direction::Input,
            PinDirection::Output => Direction::Output,
        }
    }
}

/// A pin on an extracted node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PinDescriptor {
    /// Pin GUID
    pub id: PinId,
    /// Pin name
    pub name: String,
    /// Pin type
    pub type_info: TypeInfo,
    /// Direction
    pub direction: Direction,
    /// Literal default, omitted when empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Passed by reference
    pub is_reference: bool,
    /// Const qualified
    pub is_const: bool,
    /// Number of wires attached when extracted
    pub connection_count: usize,
}

impl PinDescriptor {
    /// Describe a pin
    pub fn from_pin(pin: &Pin) -> Self {
        Self {
            id: pin.id,
            name: pin.name.clone(),
            type_info: TypeInfo::from_pin_type(&pin.pin_type),
            direction: pin.direction.into(),
            default_value: non_empty(&pin.default_value),
            is_reference: pin.pin_type.is_reference,
            is_const: pin.pin_type.is_const,
            connection_count: pin.linked_to.len(),
        }
    }
}

/// A function parameter: a pin without direction or degree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDescriptor {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub type_info: TypeInfo,
    /// Literal default, omitted when empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Passed by reference
    pub is_reference: bool,
    /// Const qualified
    pub is_const: bool,
}

impl ParameterDescriptor {
    /// Describe a sentinel pin as a parameter
    pub fn from_pin(pin: &Pin) -> Self {
        Self {
            name: pin.name.clone(),
            type_info: TypeInfo::from_pin_type(&pin.pin_type),
            default_value: non_empty(&pin.default_value),
            is_reference: pin.pin_type.is_reference,
            is_const: pin.pin_type.is_const,
        }
    }
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_model::{NodeId, PinLink, PinType};

    #[test]
    fn test_default_value_omitted_when_empty() {
        let pin = Pin::input("Duration", PinType::new("float"));
        let descriptor = PinDescriptor::from_pin(&pin);
        assert_eq!(descriptor.default_value, None);

        let json = serde_json::to_value(&descriptor).unwrap();
        assert!(json.get("default_value").is_none());
        assert_eq!(json["direction"], "input");

        let pin = pin.with_default("0.2");
        assert_eq!(PinDescriptor::from_pin(&pin).default_value.as_deref(), Some("0.2"));
    }

    #[test]
    fn test_degree_counts_links() {
        let mut pin = Pin::output("then", PinType::exec());
        for _ in 0..3 {
            pin.linked_to.push(PinLink {
                node: NodeId::new(),
                pin: PinId::new(),
            });
        }
        let descriptor = PinDescriptor::from_pin(&pin);
        assert_eq!(descriptor.connection_count, 3);
        assert_eq!(descriptor.direction, Direction::Output);
    }

    #[test]
    fn test_qualifiers_copied_from_type() {
        let mut ty = PinType::new("struct");
        ty.is_reference = true;
        ty.is_const = true;
        let param = ParameterDescriptor::from_pin(&Pin::output("Target", ty));
        assert!(param.is_reference);
        assert!(param.is_const);
        assert!(param.type_info.is_reference);
    }
}
