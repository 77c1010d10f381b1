// SPDX-License-Identifier: MIT OR Apache-2.0
//! Component hierarchy extraction.

use crate::node::finite;
use blueprint_model::{
    ComponentNode, ConstructionScript, LightProperties, Mobility, SceneProperties,
    StaticMeshProperties,
};
use serde::Serialize;
use std::collections::HashSet;

/// Relative transform of a spatial component
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformRecord {
    /// Location (x, y, z)
    pub location: [f64; 3],
    /// Rotation (pitch, yaw, roll)
    pub rotation: [f64; 3],
    /// Scale (x, y, z)
    pub scale: [f64; 3],
}

/// Scene state reported next to the transform
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneState {
    /// True when movable
    pub mobility: bool,
    /// Visible
    pub visible: bool,
    /// Hidden at runtime
    pub hidden_in_game: bool,
}

/// Mesh properties block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshPropertiesRecord {
    /// Mesh asset path, empty when unassigned
    pub static_mesh: String,
    /// Simulates physics
    pub simulate_physics: bool,
    /// Generates overlap events
    pub generate_overlap_events: bool,
    /// Mass
    pub mass: f64,
    /// Casts shadows
    pub cast_shadow: bool,
    /// Material slot count
    pub num_materials: u32,
}

/// Light properties block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightPropertiesRecord {
    /// Intensity
    pub intensity: f64,
    /// Color (r, g, b, a)
    pub light_color: [f64; 4],
    /// Casts shadows
    pub cast_shadows: bool,
}

/// An extracted component
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentRecord {
    /// Component variable name
    pub name: String,
    /// Concrete component class
    #[serde(rename = "type")]
    pub component_type: String,
    /// Parent component name; absent for roots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_component: Option<String>,
    /// Relative transform, for spatial components
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<TransformRecord>,
    /// Scene state, for spatial components
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub scene: Option<SceneState>,
    /// Mesh block, for mesh-bearing components
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mesh_properties: Option<MeshPropertiesRecord>,
    /// Light block, for lights
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_properties: Option<LightPropertiesRecord>,
}

impl From<&SceneProperties> for TransformRecord {
    fn from(scene: &SceneProperties) -> Self {
        Self {
            location: scene.relative_location.map(finite),
            rotation: scene.relative_rotation.map(finite),
            scale: scene.relative_scale.map(finite),
        }
    }
}

impl From<&SceneProperties> for SceneState {
    fn from(scene: &SceneProperties) -> Self {
        Self {
            mobility: scene.mobility == Mobility::Movable,
            visible: scene.visible,
            hidden_in_game: scene.hidden_in_game,
        }
    }
}

impl From<&StaticMeshProperties> for MeshPropertiesRecord {
    fn from(mesh: &StaticMeshProperties) -> Self {
        Self {
            static_mesh: mesh.static_mesh.clone().unwrap_or_default(),
            simulate_physics: mesh.simulate_physics,
            generate_overlap_events: mesh.generate_overlap_events,
            mass: finite(mesh.mass),
            cast_shadow: mesh.cast_shadow,
            num_materials: mesh.num_materials,
        }
    }
}

impl From<&LightProperties> for LightPropertiesRecord {
    fn from(light: &LightProperties) -> Self {
        Self {
            intensity: finite(light.intensity),
            light_color: light.light_color.map(finite),
            cast_shadows: light.cast_shadows,
        }
    }
}

impl ComponentRecord {
    /// Describe a construction record; `None` when it has no template.
    pub fn from_node(node: &ComponentNode) -> Option<Self> {
        let template = node.component_template.as_ref()?;
        let scene = template.as_scene();

        Some(Self {
            name: node.variable_name.clone(),
            component_type: template.class_name.clone(),
            parent_component: node.parent_name().map(str::to_string),
            transform: scene.map(TransformRecord::from),
            scene: scene.map(SceneState::from),
            mesh_properties: template.as_static_mesh().map(MeshPropertiesRecord::from),
            light_properties: template.as_light().map(LightPropertiesRecord::from),
        })
    }
}

/// Extract every real component, in declaration order
pub fn extract_components(script: Option<&ConstructionScript>) -> Vec<ComponentRecord> {
    let Some(script) = script else {
        tracing::warn!("Unit has no construction script; no components extracted");
        return Vec::new();
    };

    let records: Vec<ComponentRecord> = script
        .all_nodes()
        .filter_map(|node| {
            let record = ComponentRecord::from_node(node);
            if record.is_none() {
                tracing::debug!("Skipping component {}: no template", node.variable_name);
            }
            record
        })
        .collect();

    let names: HashSet<&str> = records.iter().map(|r| r.name.as_str()).collect();
    for record in &records {
        if let Some(parent) = record.parent_component.as_deref() {
            if !names.contains(parent) {
                tracing::debug!("Component {} has unresolved parent {}", record.name, parent);
            }
        }
    }

    tracing::debug!("Extracted {} components", records.len());
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_model::ComponentTemplate;

    #[test]
    fn test_root_and_child() {
        let mut script = ConstructionScript::default();
        script.add(ComponentNode::new(
            "Root",
            ComponentTemplate::new("SceneComponent").with_scene(SceneProperties::default()),
        ));
        script.add(
            ComponentNode::new(
                "Mesh",
                ComponentTemplate::new("StaticMeshComponent")
                    .with_scene(SceneProperties::default())
                    .with_static_mesh(StaticMeshProperties {
                        static_mesh: Some("/Game/Meshes/SM_Door.SM_Door".to_string()),
                        num_materials: 2,
                        ..Default::default()
                    }),
            )
            .with_parent("Root"),
        );

        let records = extract_components(Some(&script));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].parent_component, None);
        assert_eq!(records[1].parent_component.as_deref(), Some("Root"));

        let mesh = serde_json::to_value(&records[1]).unwrap();
        assert_eq!(mesh["type"], "StaticMeshComponent");
        assert_eq!(mesh["parent_component"], "Root");
        assert_eq!(mesh["transform"]["scale"], serde_json::json!([1.0, 1.0, 1.0]));
        assert_eq!(mesh["mobility"], true);
        assert_eq!(mesh["mesh_properties"]["static_mesh"], "/Game/Meshes/SM_Door.SM_Door");
        assert_eq!(mesh["mesh_properties"]["num_materials"], 2);
        assert!(mesh.get("light_properties").is_none());

        let root = serde_json::to_value(&records[0]).unwrap();
        assert!(root.get("parent_component").is_none());
    }

    #[test]
    fn test_capability_blocks_follow_template() {
        let mut script = ConstructionScript::default();
        script.add(ComponentNode::new(
            "Movement",
            ComponentTemplate::new("FloatingPawnMovement"),
        ));
        script.add(ComponentNode::new(
            "Lamp",
            ComponentTemplate::new("PointLightComponent")
                .with_scene(SceneProperties::default())
                .with_light(LightProperties {
                    intensity: 1200.0,
                    light_color: [1.0, 0.5, 0.25, 1.0],
                    cast_shadows: false,
                }),
        ));

        let records = extract_components(Some(&script));
        let movement = serde_json::to_value(&records[0]).unwrap();
        assert!(movement.get("transform").is_none());
        assert!(movement.get("mobility").is_none());
        assert!(movement.get("mesh_properties").is_none());

        let lamp = serde_json::to_value(&records[1]).unwrap();
        assert_eq!(lamp["light_properties"]["intensity"], 1200.0);
        assert_eq!(lamp["light_properties"]["light_color"], serde_json::json!([1.0, 0.5, 0.25, 1.0]));
        assert_eq!(lamp["light_properties"]["cast_shadows"], false);
    }

    #[test]
    fn test_records_without_template_are_skipped() {
        let mut script = ConstructionScript::default();
        script.add(ComponentNode {
            variable_name: "Ghost".to_string(),
            parent_component: None,
            component_template: None,
        });
        script.nodes.push(None);
        script.add(ComponentNode::new("Orphan", ComponentTemplate::new("SceneComponent")).with_parent("Missing"));

        let records = extract_components(Some(&script));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Orphan");
        assert_eq!(records[0].parent_component.as_deref(), Some("Missing"));
    }

    #[test]
    fn test_non_finite_numbers_are_zeroed() {
        let mut script = ConstructionScript::default();
        script.add(ComponentNode::new(
            "Lamp",
            ComponentTemplate::new("PointLightComponent")
                .with_scene(SceneProperties {
                    relative_location: [f64::NAN, 1.0, 2.0],
                    ..Default::default()
                })
                .with_light(LightProperties {
                    intensity: f64::INFINITY,
                    ..Default::default()
                }),
        ));

        let lamp = serde_json::to_value(&extract_components(Some(&script))[0]).unwrap();
        assert_eq!(lamp["transform"]["location"], serde_json::json!([0.0, 1.0, 2.0]));
        assert_eq!(lamp["light_properties"]["intensity"], 0.0);
    }

    #[test]
    fn test_missing_construction_script() {
        assert!(extract_components(None).is_empty());
    }
}
