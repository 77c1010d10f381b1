// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes and their pin links.
//!
//! Wires are not stored separately: like the host editor, each pin keeps the
//! list of pins it is linked to, so a wire appears once on each endpoint.

use crate::node::{GraphNode, NodeId};
use crate::pin::{PinDirection, PinId, PinLink};
use serde::{Deserialize, Serialize};

/// A node graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes in declaration order; empty slots are tolerated
    #[serde(default)]
    pub nodes: Vec<Option<GraphNode>>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: GraphNode) -> NodeId {
        let id = node.guid;
        self.nodes.push(Some(node));
        id
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&GraphNode> {
        self.nodes().find(|n| n.guid == node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut GraphNode> {
        self.nodes.iter_mut().flatten().find(|n| n.guid == node_id)
    }

    /// Get all live nodes in declaration order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().flatten()
    }

    /// Get the number of live nodes
    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Wire an output pin to an input pin.
    ///
    /// The link is recorded on both pins, mirroring how the host stores wires.
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_pin: PinId,
        to_node: NodeId,
        to_pin: PinId,
    ) -> Result<(), ConnectionError> {
        if from_node == to_node {
            return Err(ConnectionError::SelfLoop);
        }

        let source = self
            .node(from_node)
            .ok_or(ConnectionError::NodeNotFound(from_node))?
            .pin(from_pin)
            .ok_or(ConnectionError::PinNotFound(from_pin))?;
        let target = self
            .node(to_node)
            .ok_or(ConnectionError::NodeNotFound(to_node))?
            .pin(to_pin)
            .ok_or(ConnectionError::PinNotFound(to_pin))?;

        if source.direction != PinDirection::Output || target.direction != PinDirection::Input {
            return Err(ConnectionError::DirectionMismatch);
        }

        if let Some(pin) = self.node_mut(from_node).and_then(|n| n.pin_mut(from_pin)) {
            pin.linked_to.push(PinLink {
                node: to_node,
                pin: to_pin,
            });
        }
        if let Some(pin) = self.node_mut(to_node).and_then(|n| n.pin_mut(to_pin)) {
            pin.linked_to.push(PinLink {
                node: from_node,
                pin: from_pin,
            });
        }
        Ok(())
    }

    /// Wire two pins looked up by name
    pub fn connect_named(
        &mut self,
        from_node: NodeId,
        from_pin: &str,
        to_node: NodeId,
        to_pin: &str,
    ) -> Result<(), ConnectionError> {
        let from_pin_id = self
            .node(from_node)
            .ok_or(ConnectionError::NodeNotFound(from_node))?
            .pin_named(from_pin)
            .ok_or_else(|| ConnectionError::PinNameNotFound(from_pin.to_string()))?
            .id;
        let to_pin_id = self
            .node(to_node)
            .ok_or(ConnectionError::NodeNotFound(to_node))?
            .pin_named(to_pin)
            .ok_or_else(|| ConnectionError::PinNameNotFound(to_pin.to_string()))?
            .id;
        self.connect(from_node, from_pin_id, to_node, to_pin_id)
    }

    /// Whether any node in the graph is a function entry sentinel
    pub fn has_function_entry(&self) -> bool {
        self.nodes().any(|n| n.as_function_entry().is_some())
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Error when wiring two pins
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Pin not found
    #[error("Pin not found: {0:?}")]
    PinNotFound(PinId),

    /// Pin not found by name
    #[error("Pin not found: {0}")]
    PinNameNotFound(String),

    /// Source must be an output and target an input
    #[error("Connections must run from an output pin to an input pin")]
    DirectionMismatch,

    /// Self-loop not allowed
    #[error("Self-loop not allowed")]
    SelfLoop,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeBody;
    use crate::pin::{Pin, PinType};

    fn exec_node(title: &str) -> GraphNode {
        GraphNode::new("K2Node_CallFunction", title, NodeBody::Other)
            .with_pin(Pin::input("execute", PinType::exec()))
            .with_pin(Pin::output("then", PinType::exec()))
    }

    #[test]
    fn test_connect_records_both_ends() {
        let mut graph = Graph::new("EventGraph");
        let a = graph.add_node(exec_node("A"));
        let b = graph.add_node(exec_node("B"));

        graph.connect_named(a, "then", b, "execute").unwrap();

        let then = graph.node(a).unwrap().pin_named("then").unwrap();
        let execute = graph.node(b).unwrap().pin_named("execute").unwrap();
        assert_eq!(then.linked_to, vec![PinLink { node: b, pin: execute.id }]);
        assert_eq!(execute.linked_to, vec![PinLink { node: a, pin: then.id }]);
    }

    #[test]
    fn test_connect_rejects_wrong_direction() {
        let mut graph = Graph::new("EventGraph");
        let a = graph.add_node(exec_node("A"));
        let b = graph.add_node(exec_node("B"));

        let result = graph.connect_named(a, "execute", b, "then");
        assert!(matches!(result, Err(ConnectionError::DirectionMismatch)));
    }

    #[test]
    fn test_connect_rejects_self_loop() {
        let mut graph = Graph::new("EventGraph");
        let a = graph.add_node(exec_node("A"));
        assert!(matches!(
            graph.connect_named(a, "then", a, "execute"),
            Err(ConnectionError::SelfLoop)
        ));
    }

    #[test]
    fn test_null_nodes_are_skipped() {
        let mut graph = Graph::new("EventGraph");
        graph.add_node(exec_node("A"));
        graph.nodes.push(None);
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.node_count(), 1);
    }
}
