// SPDX-License-Identifier: MIT OR Apache-2.0
//! Normalized type descriptors for pins and variables.

use blueprint_model::PinType;
use serde::Serialize;

/// Host token for "no sub-category".
const NAME_NONE: &str = "None";

/// Container shape of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContainerType {
    /// Single value
    #[default]
    None,
    /// Ordered array
    Array,
    /// Unique set
    Set,
    /// Key/value map
    Map,
}

impl ContainerType {
    /// Map the host's raw container value; anything unknown is `None`.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            1 => ContainerType::Array,
            2 => ContainerType::Set,
            3 => ContainerType::Map,
            _ => ContainerType::None,
        }
    }
}

/// Normalized type information
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeInfo {
    /// Primary category token
    pub category: String,
    /// Sub-category token, empty when inapplicable
    pub sub_category: String,
    /// Container shape
    pub container_type: ContainerType,
    /// Referenced object name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    /// Referenced object path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_path: Option<String>,
    /// Passed by reference
    pub is_reference: bool,
    /// Const qualified
    pub is_const: bool,
    /// Weak object reference
    pub is_weak_pointer: bool,
}

impl TypeInfo {
    /// Build from a raw host type. Never fails.
    pub fn from_pin_type(pin_type: &PinType) -> Self {
        let object = pin_type
            .pin_sub_category_object
            .as_ref()
            .filter(|object| object.is_valid());

        let sub_category = if pin_type.pin_sub_category == NAME_NONE {
            String::new()
        } else {
            pin_type.pin_sub_category.clone()
        };

        Self {
            category: pin_type.pin_category.clone(),
            sub_category,
            container_type: ContainerType::from_raw(pin_type.container_type),
            object_type: object.map(|o| o.name.clone()),
            object_path: object.map(|o| o.path.clone()),
            is_reference: pin_type.is_reference,
            is_const: pin_type.is_const,
            is_weak_pointer: pin_type.is_weak_pointer,
        }
    }

    /// Flat `category` or `category:Object` rendering
    pub fn legacy_type_string(&self) -> String {
        match &self.object_type {
            Some(object) => format!("{}:{}", self.category, object),
            None => self.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_model::ObjectRef;
    use proptest::prelude::*;

    #[test]
    fn test_object_reference() {
        let ty = PinType::object(ObjectRef::new("Actor", "/Script/Engine.Actor"));
        let info = TypeInfo::from_pin_type(&ty);
        assert_eq!(info.category, "object");
        assert_eq!(info.object_type.as_deref(), Some("Actor"));
        assert_eq!(info.object_path.as_deref(), Some("/Script/Engine.Actor"));
        assert_eq!(info.legacy_type_string(), "object:Actor");
    }

    #[test]
    fn test_invalid_object_reference_is_omitted() {
        let ty = PinType::object(ObjectRef::new("", ""));
        let info = TypeInfo::from_pin_type(&ty);
        assert!(info.object_type.is_none());
        assert!(info.object_path.is_none());

        let json = serde_json::to_value(&info).unwrap();
        assert!(json.get("object_type").is_none());
        assert!(json.get("object_path").is_none());
    }

    #[test]
    fn test_none_sub_category_is_empty() {
        let info = TypeInfo::from_pin_type(&PinType::new("int").with_sub_category("None"));
        assert_eq!(info.sub_category, "");
        let info = TypeInfo::from_pin_type(&PinType::new("byte").with_sub_category("EMovementMode"));
        assert_eq!(info.sub_category, "EMovementMode");
    }

    #[test]
    fn test_container_serialization() {
        let info = TypeInfo::from_pin_type(&PinType::new("float").with_container(1));
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["container_type"], "array");
        assert_eq!(json["is_weak_pointer"], false);
    }

    proptest! {
        #[test]
        fn container_shape_is_total(raw in any::<u8>()) {
            let info = TypeInfo::from_pin_type(&PinType::new("int").with_container(raw));
            let json = serde_json::to_value(&info).unwrap();
            let shape = json["container_type"].as_str().unwrap().to_string();
            prop_assert!(["none", "array", "set", "map"].contains(&shape.as_str()));
            if raw > 3 {
                prop_assert_eq!(info.container_type, ContainerType::None);
            }
        }
    }
}
