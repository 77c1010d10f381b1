// SPDX-License-Identifier: MIT OR Apache-2.0
//! Program units (blueprints).

use crate::component::ConstructionScript;
use crate::graph::Graph;
use crate::variable::VariableDeclaration;
use serde::{Deserialize, Serialize};

/// Kind of program unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BlueprintType {
    /// Const blueprint
    Const,
    /// Macro library
    MacroLibrary,
    /// Interface
    Interface,
    /// Level script
    LevelScript,
    /// Function library
    FunctionLibrary,
    /// Ordinary class blueprint; also any kind this model does not know
    #[default]
    #[serde(other)]
    Normal,
}

impl BlueprintType {
    /// Stable name used in documents
    pub fn as_str(&self) -> &'static str {
        match self {
            BlueprintType::Normal => "Normal",
            BlueprintType::Const => "Const",
            BlueprintType::MacroLibrary => "MacroLibrary",
            BlueprintType::Interface => "Interface",
            BlueprintType::LevelScript => "LevelScript",
            BlueprintType::FunctionLibrary => "FunctionLibrary",
        }
    }
}

/// Which list of the unit a graph belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphRole {
    /// Main event graph page
    Ubergraph,
    /// Function graph (includes the construction script)
    Function,
    /// Macro graph
    Macro,
    /// Delegate signature graph
    DelegateSignature,
}

/// A blueprint snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramUnit {
    /// Unit name
    pub name: String,
    /// Full object path
    pub path: String,
    /// Parent class name
    pub parent_class: Option<String>,
    /// Unit kind
    pub blueprint_type: BlueprintType,
    /// Free-text description
    pub description: String,
    /// Palette category
    pub category: String,
    /// Owning package name
    pub package: Option<String>,
    /// Component construction records
    pub construction_script: Option<ConstructionScript>,
    /// Declared member variables
    pub variables: Vec<VariableDeclaration>,
    /// Main event graphs
    pub ubergraph_pages: Vec<Option<Graph>>,
    /// Function graphs
    pub function_graphs: Vec<Option<Graph>>,
    /// Macro graphs
    pub macro_graphs: Vec<Option<Graph>>,
    /// Delegate signature graphs
    pub delegate_signature_graphs: Vec<Option<Graph>>,
}

impl ProgramUnit {
    /// Create an empty unit at `/Game/<name>.<name>`
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let package = format!("/Game/{name}");
        Self {
            path: format!("{package}.{name}"),
            package: Some(package),
            name,
            ..Default::default()
        }
    }

    /// Live main event graphs
    pub fn event_graphs(&self) -> impl Iterator<Item = &Graph> {
        self.ubergraph_pages.iter().flatten()
    }

    /// Live function graphs
    pub fn function_graphs(&self) -> impl Iterator<Item = &Graph> {
        self.function_graphs.iter().flatten()
    }

    /// Every live graph the unit owns, tagged with its role.
    ///
    /// Order: event graphs, function graphs, macro graphs, delegate
    /// signature graphs.
    pub fn all_graphs(&self) -> impl Iterator<Item = (GraphRole, &Graph)> {
        let pages = self.ubergraph_pages.iter().flatten().map(|g| (GraphRole::Ubergraph, g));
        let functions = self.function_graphs.iter().flatten().map(|g| (GraphRole::Function, g));
        let macros = self.macro_graphs.iter().flatten().map(|g| (GraphRole::Macro, g));
        let delegates = self
            .delegate_signature_graphs
            .iter()
            .flatten()
            .map(|g| (GraphRole::DelegateSignature, g));
        pages.chain(functions).chain(macros).chain(delegates)
    }

    /// Package path, derived from the object path when not recorded
    pub fn package_path(&self) -> &str {
        match &self.package {
            Some(package) => package,
            None => self.path.split('.').next().unwrap_or(&self.path),
        }
    }
}
