// SPDX-License-Identifier: MIT OR Apache-2.0
//! Component construction records.
//!
//! A unit's components are declared as a flat list of construction records.
//! Each record names its parent, which forms the attachment tree, and owns a
//! template object carrying the component's default properties. Templates
//! expose optional capability blocks instead of a class hierarchy: a record
//! is "spatial" when it has scene properties, and so on.

use serde::{Deserialize, Serialize};

/// Component mobility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Mobility {
    /// Never moves
    #[default]
    Static,
    /// Fixed position, changeable lighting
    Stationary,
    /// Moves at runtime
    Movable,
}

/// Properties of a component that has a transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneProperties {
    /// Relative location (x, y, z)
    pub relative_location: [f64; 3],
    /// Relative rotation (pitch, yaw, roll) in degrees
    pub relative_rotation: [f64; 3],
    /// Relative scale (x, y, z)
    pub relative_scale: [f64; 3],
    /// Mobility
    pub mobility: Mobility,
    /// Visible in the editor and game
    pub visible: bool,
    /// Hidden at runtime
    pub hidden_in_game: bool,
}

impl Default for SceneProperties {
    fn default() -> Self {
        Self {
            relative_location: [0.0, 0.0, 0.0],
            relative_rotation: [0.0, 0.0, 0.0],
            relative_scale: [1.0, 1.0, 1.0],
            mobility: Mobility::Movable,
            visible: true,
            hidden_in_game: false,
        }
    }
}

/// Properties of a mesh-bearing component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticMeshProperties {
    /// Path of the mesh asset, if one is assigned
    pub static_mesh: Option<String>,
    /// Simulates physics
    pub simulate_physics: bool,
    /// Generates overlap events
    pub generate_overlap_events: bool,
    /// Mass in kilograms
    pub mass: f64,
    /// Casts shadows
    pub cast_shadow: bool,
    /// Number of material slots
    pub num_materials: u32,
}

impl Default for StaticMeshProperties {
    fn default() -> Self {
        Self {
            static_mesh: None,
            simulate_physics: false,
            generate_overlap_events: true,
            mass: 0.0,
            cast_shadow: true,
            num_materials: 0,
        }
    }
}

/// Properties of a light component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightProperties {
    /// Brightness
    pub intensity: f64,
    /// Linear color (r, g, b, a)
    pub light_color: [f64; 4],
    /// Casts shadows
    pub cast_shadows: bool,
}

impl Default for LightProperties {
    fn default() -> Self {
        Self {
            intensity: 5000.0,
            light_color: [1.0, 1.0, 1.0, 1.0],
            cast_shadows: true,
        }
    }
}

/// The instantiated template object behind a construction record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentTemplate {
    /// Concrete component class name
    pub class_name: String,
    /// Present for spatial components
    #[serde(default)]
    pub scene: Option<SceneProperties>,
    /// Present for mesh-bearing components
    #[serde(default)]
    pub static_mesh: Option<StaticMeshProperties>,
    /// Present for lights
    #[serde(default)]
    pub light: Option<LightProperties>,
}

impl ComponentTemplate {
    /// Create a template with no capabilities
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            scene: None,
            static_mesh: None,
            light: None,
        }
    }

    /// Add scene properties
    pub fn with_scene(mut self, scene: SceneProperties) -> Self {
        self.scene = Some(scene);
        self
    }

    /// Add mesh properties
    pub fn with_static_mesh(mut self, mesh: StaticMeshProperties) -> Self {
        self.static_mesh = Some(mesh);
        self
    }

    /// Add light properties
    pub fn with_light(mut self, light: LightProperties) -> Self {
        self.light = Some(light);
        self
    }

    /// Scene properties, if this component is spatial
    pub fn as_scene(&self) -> Option<&SceneProperties> {
        self.scene.as_ref()
    }

    /// Mesh properties, if this component bears a mesh
    pub fn as_static_mesh(&self) -> Option<&StaticMeshProperties> {
        self.static_mesh.as_ref()
    }

    /// Light properties, if this component is a light
    pub fn as_light(&self) -> Option<&LightProperties> {
        self.light.as_ref()
    }
}

/// A component construction record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    /// Variable name of the component
    pub variable_name: String,
    /// Name of the parent component, `None` for roots
    #[serde(default)]
    pub parent_component: Option<String>,
    /// Template object; records without one are not real components
    #[serde(default)]
    pub component_template: Option<ComponentTemplate>,
}

impl ComponentNode {
    /// Create a root record
    pub fn new(variable_name: impl Into<String>, template: ComponentTemplate) -> Self {
        Self {
            variable_name: variable_name.into(),
            parent_component: None,
            component_template: Some(template),
        }
    }

    /// Attach to a parent component
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_component = Some(parent.into());
        self
    }

    /// The parent name, treating the host's "None" as absent
    pub fn parent_name(&self) -> Option<&str> {
        self.parent_component
            .as_deref()
            .filter(|name| !name.is_empty() && *name != crate::node::NAME_NONE)
    }
}

/// The construction script owning a unit's component records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstructionScript {
    /// Records in declaration order; empty slots are tolerated
    #[serde(default)]
    pub nodes: Vec<Option<ComponentNode>>,
}

impl ConstructionScript {
    /// Add a record
    pub fn add(&mut self, node: ComponentNode) {
        self.nodes.push(Some(node));
    }

    /// Live records in declaration order
    pub fn all_nodes(&self) -> impl Iterator<Item = &ComponentNode> {
        self.nodes.iter().flatten()
    }
}
