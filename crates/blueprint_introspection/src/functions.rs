// SPDX-License-Identifier: MIT OR Apache-2.0
//! Function extraction.
//!
//! A graph is a function when it is not a main event graph and it contains a
//! function entry sentinel. The signature comes from the sentinels:
//! - inputs: data outputs of the first entry node
//! - outputs: data inputs of the first result node
//! - locals: the entry node's local variable declarations
//!
//! Functions with several return nodes report only the first one's pins.

use crate::graph::GraphDocument;
use crate::pin::ParameterDescriptor;
use crate::variables::LocalVariableDescriptor;
use blueprint_model::node::function_flags;
use blueprint_model::{FunctionEntryData, Graph, GraphNode, Pin, PinDirection};
use serde::Serialize;

/// Access specifier of a function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessSpecifier {
    /// Callable from anywhere
    Public,
    /// Callable from the owning unit only
    Private,
    /// Callable from the owning unit and subclasses
    Protected,
}

impl AccessSpecifier {
    /// Decode from function flags; private wins over protected.
    pub fn from_flags(flags: u32) -> Self {
        if flags & function_flags::PRIVATE != 0 {
            AccessSpecifier::Private
        } else if flags & function_flags::PROTECTED != 0 {
            AccessSpecifier::Protected
        } else {
            AccessSpecifier::Public
        }
    }
}

/// An extracted function
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDescriptor {
    /// Function name (the graph name)
    pub name: String,
    /// Palette category
    pub category: String,
    /// Tooltip
    pub description: String,
    /// Pure function
    pub is_pure: bool,
    /// Access specifier
    pub access_specifier: AccessSpecifier,
    /// Input parameters
    pub inputs: Vec<ParameterDescriptor>,
    /// Output parameters
    pub outputs: Vec<ParameterDescriptor>,
    /// Local variables
    pub local_variables: Vec<LocalVariableDescriptor>,
    /// Function body
    pub graph: GraphDocument,
}

/// Finds function graphs and describes them
#[derive(Debug, Clone)]
pub struct FunctionExtractor<'a> {
    /// Main event graphs, never reported as functions
    event_graphs: Vec<&'a Graph>,
    /// Pin category excluded from signatures
    exec_category: &'a str,
}

impl<'a> FunctionExtractor<'a> {
    /// Create an extractor that excludes the given event graphs
    pub fn new(event_graphs: impl IntoIterator<Item = &'a Graph>, exec_category: &'a str) -> Self {
        Self {
            event_graphs: event_graphs.into_iter().collect(),
            exec_category,
        }
    }

    fn is_event_graph(&self, graph: &Graph) -> bool {
        self.event_graphs.iter().any(|g| std::ptr::eq(*g, graph))
    }

    /// Describe every function graph among `graphs`, in order
    pub fn extract<'g>(&self, graphs: impl IntoIterator<Item = &'g Graph>) -> Vec<FunctionDescriptor> {
        let functions: Vec<_> = graphs
            .into_iter()
            .filter_map(|graph| self.extract_graph(graph))
            .collect();
        tracing::debug!("Extracted {} functions", functions.len());
        functions
    }

    /// Describe one graph, or `None` if it is not a function graph
    pub fn extract_graph(&self, graph: &Graph) -> Option<FunctionDescriptor> {
        if self.is_event_graph(graph) {
            tracing::debug!("Skipping {}: event graph", graph.name);
            return None;
        }

        let Some((entry_node, entry)) = graph
            .nodes()
            .find_map(|node| node.as_function_entry().map(|data| (node, data)))
        else {
            tracing::debug!("Skipping {}: no function entry node", graph.name);
            return None;
        };

        let result_node = graph.nodes().find(|node| node.is_function_result());

        Some(FunctionDescriptor {
            name: graph.name.clone(),
            category: entry.meta.category.clone(),
            description: entry.meta.tooltip.clone(),
            is_pure: entry.function_flags & function_flags::BLUEPRINT_PURE != 0,
            access_specifier: AccessSpecifier::from_flags(entry.function_flags),
            inputs: self.parameters(entry_node, PinDirection::Output),
            outputs: result_node
                .map(|node| self.parameters(node, PinDirection::Input))
                .unwrap_or_default(),
            local_variables: locals(entry),
            graph: GraphDocument::from_graph(graph),
        })
    }

    fn parameters(&self, sentinel: &GraphNode, direction: PinDirection) -> Vec<ParameterDescriptor> {
        sentinel
            .pins_with_direction(direction)
            .filter(|pin| !self.is_exec(pin))
            .map(ParameterDescriptor::from_pin)
            .collect()
    }

    fn is_exec(&self, pin: &Pin) -> bool {
        pin.pin_type.pin_category == self.exec_category
    }
}

fn locals(entry: &FunctionEntryData) -> Vec<LocalVariableDescriptor> {
    entry
        .local_variables
        .iter()
        .map(LocalVariableDescriptor::from_declaration)
        .collect()
}
