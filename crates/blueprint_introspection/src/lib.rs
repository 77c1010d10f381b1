// SPDX-License-Identifier: MIT OR Apache-2.0
//! Blueprint introspection engine.
//!
//! Turns a [`blueprint_model::ProgramUnit`] into one self-describing
//! document covering:
//! - Unit metadata
//! - The component hierarchy
//! - Member variables with flags, replication and metadata
//! - Functions with signatures, locals and bodies
//! - Event graphs and the construction script graph
//!
//! ## Architecture
//!
//! Extraction is a pure, leaf-first pipeline over a read-only snapshot:
//! - [`type_info`] normalizes pin and variable types
//! - [`pin`] and [`node`] describe ports and classified nodes
//! - [`graph`] collects nodes and the deduplicated wire list
//! - [`components`], [`variables`] and [`functions`] cover the unit's members
//! - [`document`] assembles everything and [`commands`] wraps it in the
//!   JSON response envelope

pub mod commands;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod functions;
pub mod graph;
pub mod node;
pub mod pin;
pub mod type_info;
pub mod variables;

pub use commands::{error_response, CommandHandler, GET_BLUEPRINT_DATA};
pub use components::{extract_components, ComponentRecord};
pub use config::{ConfigError, IntrospectionConfig};
pub use document::{BlueprintDocument, BlueprintInfo, BlueprintIntrospector, GraphEntry, GraphEntryType};
pub use error::IntrospectionError;
pub use functions::{AccessSpecifier, FunctionDescriptor, FunctionExtractor};
pub use graph::{ConnectionDescriptor, GraphDocument};
pub use node::{NodeDescriptor, NodeKind};
pub use pin::{Direction, ParameterDescriptor, PinDescriptor};
pub use type_info::{ContainerType, TypeInfo};
pub use variables::{extract_variables, ReplicationCondition, ReplicationMode, VariableDescriptor};
