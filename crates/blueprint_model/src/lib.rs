// SPDX-License-Identifier: MIT OR Apache-2.0
//! Blueprint snapshot model.
//!
//! This crate holds the read-only host object model that the introspection
//! engine walks:
//! - Program units (blueprints) and their metadata
//! - Node graphs with typed pins and pin links
//! - Component construction records
//! - Variable declarations
//!
//! ## Architecture
//!
//! Every type is plain owned data that deserializes from JSON, so a
//! snapshot exported by an editor can be loaded without the editor running.
//! Slots the host may leave empty (graph nodes, node pins, component records)
//! are `Option`s so partially broken snapshots still load.

pub mod component;
pub mod graph;
pub mod node;
pub mod pin;
pub mod source;
pub mod unit;
pub mod variable;

pub use component::{
    ComponentNode, ComponentTemplate, ConstructionScript, LightProperties, Mobility,
    SceneProperties, StaticMeshProperties,
};
pub use graph::{ConnectionError, Graph};
pub use node::{FunctionEntryData, FunctionMetadata, GraphNode, MemberReference, NodeBody, NodeId};
pub use pin::{ObjectRef, Pin, PinDirection, PinId, PinLink, PinType};
pub use source::{RegistryError, UnitRegistry, UnitSource};
pub use unit::{BlueprintType, GraphRole, ProgramUnit};
pub use variable::{MetaDataEntry, VariableDeclaration};
