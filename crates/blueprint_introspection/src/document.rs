// SPDX-License-Identifier: MIT OR Apache-2.0
//! Document assembly.
//!
//! [`BlueprintIntrospector`] resolves a unit through a [`UnitSource`] and
//! runs every extractor over it. Once the unit resolves nothing can fail:
//! broken parts are skipped by the extractors.

use crate::components::{extract_components, ComponentRecord};
use crate::config::IntrospectionConfig;
use crate::error::IntrospectionError;
use crate::functions::{FunctionDescriptor, FunctionExtractor};
use crate::graph::GraphDocument;
use crate::variables::{extract_variables, VariableDescriptor};
use blueprint_model::{Graph, GraphRole, ProgramUnit, UnitSource};
use serde::Serialize;

/// Rendered in place of a missing parent class
const NO_PARENT_CLASS: &str = "None";

/// Unit-level metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlueprintInfo {
    /// Unit name
    pub name: String,
    /// Full object path
    pub path: String,
    /// Parent class, `"None"` when absent
    pub parent_class: String,
    /// Unit kind
    pub blueprint_type: &'static str,
    /// Description
    pub description: String,
    /// Category
    pub category: String,
    /// Owning package
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

impl BlueprintInfo {
    /// Read metadata off a unit
    pub fn from_unit(unit: &ProgramUnit) -> Self {
        Self {
            name: unit.name.clone(),
            path: unit.path.clone(),
            parent_class: unit
                .parent_class
                .clone()
                .unwrap_or_else(|| NO_PARENT_CLASS.to_string()),
            blueprint_type: unit.blueprint_type.as_str(),
            description: unit.description.clone(),
            category: unit.category.clone(),
            package: unit.package.clone(),
        }
    }
}

/// Kind of a top-level graph entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphEntryType {
    /// A main event graph
    EventGraph,
    /// The construction script graph
    ConstructionScript,
}

/// A top-level graph with its name and kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEntry {
    /// Graph name
    pub name: String,
    /// Entry kind
    #[serde(rename = "type")]
    pub entry_type: GraphEntryType,
    /// Graph body
    pub graph: GraphDocument,
}

impl GraphEntry {
    fn new(graph: &Graph, entry_type: GraphEntryType) -> Self {
        Self {
            name: graph.name.clone(),
            entry_type,
            graph: GraphDocument::from_graph(graph),
        }
    }
}

/// The complete document for one unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlueprintDocument {
    /// Always true; failures never produce a document
    pub success: bool,
    /// Unit metadata
    pub blueprint_info: BlueprintInfo,
    /// Components
    pub components: Vec<ComponentRecord>,
    /// Member variables
    pub variables: Vec<VariableDescriptor>,
    /// Functions
    pub functions: Vec<FunctionDescriptor>,
    /// Event graphs, then the construction script
    pub event_graphs: Vec<GraphEntry>,
}

/// Builds documents from units
#[derive(Debug, Clone, Default)]
pub struct BlueprintIntrospector {
    config: IntrospectionConfig,
}

impl BlueprintIntrospector {
    /// Create an introspector with the given settings
    pub fn new(config: IntrospectionConfig) -> Self {
        Self { config }
    }

    /// Current settings
    pub fn config(&self) -> &IntrospectionConfig {
        &self.config
    }

    /// Resolve `identifier` and document the unit
    pub fn extract<S>(&self, source: &S, identifier: &str) -> Result<BlueprintDocument, IntrospectionError>
    where
        S: UnitSource + ?Sized,
    {
        tracing::info!("Getting blueprint data for: {}", identifier);
        let unit = source
            .find_unit(identifier)
            .ok_or_else(|| IntrospectionError::UnitNotFound(identifier.to_string()))?;
        Ok(self.document_for(unit))
    }

    /// Document an already resolved unit
    pub fn document_for(&self, unit: &ProgramUnit) -> BlueprintDocument {
        let construction_graph = self.construction_graph(unit);
        let functions = self.functions(unit, construction_graph);
        let event_graphs = self.event_graphs(unit, construction_graph);

        let document = BlueprintDocument {
            success: true,
            blueprint_info: BlueprintInfo::from_unit(unit),
            components: extract_components(unit.construction_script.as_ref()),
            variables: extract_variables(&unit.variables),
            functions,
            event_graphs,
        };

        tracing::info!(
            "Extracted {}: {} components, {} variables, {} functions, {} graphs",
            unit.name,
            document.components.len(),
            document.variables.len(),
            document.functions.len(),
            document.event_graphs.len()
        );
        document
    }

    /// The graph listed as the construction script. Only units that carry
    /// construction records have one; otherwise a graph with that name is an
    /// ordinary function candidate.
    fn construction_graph<'u>(&self, unit: &'u ProgramUnit) -> Option<&'u Graph> {
        unit.construction_script.as_ref()?;
        unit.function_graphs()
            .find(|graph| graph.name == self.config.construction_script_name)
    }

    fn is_candidate(&self, role: GraphRole, graph: &Graph, construction_graph: Option<&Graph>) -> bool {
        let role_enabled = match role {
            GraphRole::Macro => self.config.include_macro_graphs,
            GraphRole::DelegateSignature => self.config.include_delegate_signature_graphs,
            GraphRole::Ubergraph | GraphRole::Function => true,
        };
        role_enabled && !construction_graph.is_some_and(|listed| std::ptr::eq(listed, graph))
    }

    fn functions(&self, unit: &ProgramUnit, construction_graph: Option<&Graph>) -> Vec<FunctionDescriptor> {
        let extractor = FunctionExtractor::new(unit.event_graphs(), &self.config.exec_pin_category);
        let candidates = unit
            .all_graphs()
            .filter(|(role, graph)| self.is_candidate(*role, graph, construction_graph))
            .map(|(_, graph)| graph);
        extractor.extract(candidates)
    }

    fn event_graphs(&self, unit: &ProgramUnit, construction_graph: Option<&Graph>) -> Vec<GraphEntry> {
        let mut entries: Vec<GraphEntry> = unit
            .event_graphs()
            .map(|graph| {
                tracing::debug!("Event graph {}: {} nodes", graph.name, graph.node_count());
                GraphEntry::new(graph, GraphEntryType::EventGraph)
            })
            .collect();

        if let Some(graph) = construction_graph {
            entries.push(GraphEntry::new(graph, GraphEntryType::ConstructionScript));
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_model::{
        ConstructionScript, FunctionEntryData, GraphNode, NodeBody, UnitRegistry,
    };

    fn entry_node() -> GraphNode {
        GraphNode::new(
            "K2Node_FunctionEntry",
            "Entry",
            NodeBody::FunctionEntry(FunctionEntryData::default()),
        )
    }

    fn graph_with_entry(name: &str) -> Graph {
        let mut graph = Graph::new(name);
        graph.add_node(entry_node());
        graph
    }

    #[test]
    fn test_info_defaults() {
        let mut unit = ProgramUnit::new("BP_Door");
        unit.package = None;
        let json = serde_json::to_value(BlueprintInfo::from_unit(&unit)).unwrap();
        assert_eq!(json["parent_class"], "None");
        assert_eq!(json["blueprint_type"], "Normal");
        assert_eq!(json["path"], "/Game/BP_Door.BP_Door");
        assert!(json.get("package").is_none());
    }

    #[test]
    fn test_construction_script_listed_with_event_graphs() {
        let mut unit = ProgramUnit::new("BP_Door");
        unit.construction_script = Some(ConstructionScript::default());
        unit.ubergraph_pages.push(Some(Graph::new("EventGraph")));
        unit.function_graphs.push(Some(graph_with_entry("UserConstructionScript")));
        unit.function_graphs.push(Some(graph_with_entry("Open")));

        let document = BlueprintIntrospector::default().document_for(&unit);
        let graphs: Vec<_> = document
            .event_graphs
            .iter()
            .map(|e| (e.name.as_str(), e.entry_type))
            .collect();
        assert_eq!(
            graphs,
            vec![
                ("EventGraph", GraphEntryType::EventGraph),
                ("UserConstructionScript", GraphEntryType::ConstructionScript),
            ]
        );
        let functions: Vec<_> = document.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(functions, vec!["Open"]);
    }

    #[test]
    fn test_construction_script_name_without_records_is_a_function() {
        let mut unit = ProgramUnit::new("BP_Library");
        unit.function_graphs.push(Some(graph_with_entry("UserConstructionScript")));
        let document = BlueprintIntrospector::default().document_for(&unit);
        assert!(document.event_graphs.is_empty());
        let functions: Vec<_> = document.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(functions, vec!["UserConstructionScript"]);
    }

    #[test]
    fn test_macro_graphs_follow_config() {
        let mut unit = ProgramUnit::new("BP_Macros");
        unit.macro_graphs.push(Some(graph_with_entry("Latch")));

        let included = BlueprintIntrospector::default().document_for(&unit);
        assert_eq!(included.functions.len(), 1);

        let config = IntrospectionConfig {
            include_macro_graphs: false,
            ..Default::default()
        };
        let excluded = BlueprintIntrospector::new(config).document_for(&unit);
        assert!(excluded.functions.is_empty());
    }

    #[test]
    fn test_unknown_unit() {
        let registry = UnitRegistry::new();
        let err = BlueprintIntrospector::default()
            .extract(&registry, "BP_Missing")
            .unwrap_err();
        assert_eq!(err.to_string(), "Blueprint not found: BP_Missing");
    }
}
