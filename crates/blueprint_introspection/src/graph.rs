// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph extraction: node descriptors and the deduplicated wire list.

use crate::node::NodeDescriptor;
use blueprint_model::{Graph, GraphNode, NodeId, PinDirection, PinId};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// A directed wire from an output pin to an input pin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionDescriptor {
    /// Source node
    pub from_node: NodeId,
    /// Source pin
    pub from_pin: PinId,
    /// Source pin name
    pub from_pin_name: String,
    /// Target node
    pub to_node: NodeId,
    /// Target pin
    pub to_pin: PinId,
    /// Target pin name
    pub to_pin_name: String,
}

/// Extracted graph body.
///
/// Node and connection counts are derived from the sequences when
/// serialized, so they cannot disagree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphDocument {
    /// Nodes in declaration order
    pub nodes: Vec<NodeDescriptor>,
    /// Wires, each reported once from its output end
    pub connections: Vec<ConnectionDescriptor>,
}

impl GraphDocument {
    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Extract a graph. Never fails; broken parts are skipped.
    pub fn from_graph(graph: &Graph) -> Self {
        let live: Vec<&GraphNode> = graph.nodes().collect();
        let skipped = graph.nodes.len() - live.len();
        if skipped > 0 {
            tracing::warn!("Graph {}: skipped {} empty node slots", graph.name, skipped);
        }

        // Resolves wire endpoints; lives only for this call.
        let index: HashMap<NodeId, usize> = live
            .iter()
            .enumerate()
            .map(|(i, node)| (node.guid, i))
            .collect();

        let nodes = live.iter().map(|node| NodeDescriptor::from_node(node)).collect();
        let connections = derive_connections(graph, &live, &index);

        let document = Self { nodes, connections };
        tracing::debug!(
            "Extracted graph {}: {} nodes, {} connections",
            graph.name,
            document.node_count(),
            document.connection_count()
        );
        document
    }
}

/// Walk output pins only, so each wire is emitted from exactly one end.
fn derive_connections(
    graph: &Graph,
    live: &[&GraphNode],
    index: &HashMap<NodeId, usize>,
) -> Vec<ConnectionDescriptor> {
    let mut connections = Vec::new();

    for node in live {
        for pin in node.pins_with_direction(PinDirection::Output) {
            for link in &pin.linked_to {
                let Some(target_node) = index.get(&link.node).map(|&i| live[i]) else {
                    tracing::warn!(
                        "Graph {}: pin {} on {} links to missing node {:?}",
                        graph.name,
                        pin.name,
                        node.title,
                        link.node
                    );
                    continue;
                };
                let Some(target_pin) = target_node.pin(link.pin) else {
                    tracing::warn!(
                        "Graph {}: pin {} on {} links to missing pin {:?}",
                        graph.name,
                        pin.name,
                        node.title,
                        link.pin
                    );
                    continue;
                };
                if target_pin.direction != PinDirection::Input {
                    tracing::warn!(
                        "Graph {}: pin {} on {} links to output pin {}",
                        graph.name,
                        pin.name,
                        node.title,
                        target_pin.name
                    );
                    continue;
                }

                connections.push(ConnectionDescriptor {
                    from_node: node.guid,
                    from_pin: pin.id,
                    from_pin_name: pin.name.clone(),
                    to_node: target_node.guid,
                    to_pin: target_pin.id,
                    to_pin_name: target_pin.name.clone(),
                });
            }
        }
    }

    connections
}

impl Serialize for GraphDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GraphDocument", 4)?;
        state.serialize_field("nodes", &self.nodes)?;
        state.serialize_field("connections", &self.connections)?;
        state.serialize_field("node_count", &self.node_count())?;
        state.serialize_field("connection_count", &self.connection_count())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_model::{MemberReference, NodeBody, Pin, PinLink, PinType};
    use proptest::prelude::*;

    fn call(name: &str) -> GraphNode {
        GraphNode::new(
            "K2Node_CallFunction",
            name,
            NodeBody::CallFunction {
                function_reference: MemberReference::named(name),
            },
        )
        .with_pin(Pin::input("execute", PinType::exec()))
        .with_pin(Pin::output("then", PinType::exec()))
        .with_pin(Pin::input("Value", PinType::new("float")))
        .with_pin(Pin::output("ReturnValue", PinType::new("float")))
    }

    #[test]
    fn test_single_wire_reported_once() {
        let mut graph = Graph::new("EventGraph");
        let a = graph.add_node(call("A"));
        let b = graph.add_node(call("B"));
        graph.connect_named(a, "then", b, "execute").unwrap();

        let document = GraphDocument::from_graph(&graph);
        assert_eq!(document.node_count(), 2);
        assert_eq!(document.connection_count(), 1);

        let wire = &document.connections[0];
        assert_eq!(wire.from_node, a);
        assert_eq!(wire.from_pin_name, "then");
        assert_eq!(wire.to_node, b);
        assert_eq!(wire.to_pin_name, "execute");

        let json = serde_json::to_value(&document).unwrap();
        assert_eq!(json["node_count"], 2);
        assert_eq!(json["connection_count"], 1);
        assert_eq!(json["nodes"][0]["pins"][1]["connection_count"], 1);
    }

    #[test]
    fn test_fan_out_from_one_output() {
        let mut graph = Graph::new("EventGraph");
        let source = graph.add_node(call("Source"));
        let targets: Vec<_> = (0..3).map(|i| graph.add_node(call(&format!("T{i}")))).collect();
        for &target in &targets {
            graph.connect_named(source, "ReturnValue", target, "Value").unwrap();
        }

        let document = GraphDocument::from_graph(&graph);
        assert_eq!(document.connection_count(), 3);
        assert!(document.connections.iter().all(|c| c.from_node == source));
        assert_eq!(document.nodes[0].pins[3].connection_count, 3);
    }

    #[test]
    fn test_broken_graph_is_walked_best_effort() {
        let mut graph = Graph::new("EventGraph");
        let a = graph.add_node(call("A"));
        let b = graph.add_node(call("B"));
        graph.connect_named(a, "then", b, "execute").unwrap();
        graph.nodes.insert(1, None);

        // Dangling links: unknown node, and unknown pin on a live node.
        let node = graph.node_mut(a).unwrap();
        node.pins.push(None);
        let return_value = node.pin_named("ReturnValue").unwrap().id;
        let pin = node.pin_mut(return_value).unwrap();
        pin.linked_to.push(PinLink {
            node: NodeId::new(),
            pin: PinId::new(),
        });
        pin.linked_to.push(PinLink {
            node: b,
            pin: PinId::new(),
        });

        let document = GraphDocument::from_graph(&graph);
        assert_eq!(document.node_count(), 2);
        assert_eq!(document.connection_count(), 1);
        assert_eq!(document.nodes[0].pins.len(), 4);
        assert_eq!(document.nodes[0].pins[3].connection_count, 2);
    }

    #[test]
    fn test_empty_graph() {
        let document = GraphDocument::from_graph(&Graph::new("Empty"));
        let json = serde_json::to_value(&document).unwrap();
        assert_eq!(json["nodes"].as_array().unwrap().len(), 0);
        assert_eq!(json["node_count"], 0);
        assert_eq!(json["connection_count"], 0);
    }

    proptest! {
        /// N wires between distinct nodes always produce exactly N connections.
        #[test]
        fn wires_are_never_double_counted(
            node_count in 2usize..12,
            wires in proptest::collection::vec((0usize..64, 0usize..64, any::<bool>()), 0..40),
        ) {
            let mut graph = Graph::new("Generated");
            let ids: Vec<_> = (0..node_count).map(|i| graph.add_node(call(&format!("N{i}")))).collect();

            let mut wired = 0;
            for (from, to, exec) in wires {
                let (from, to) = (ids[from % node_count], ids[to % node_count]);
                if from == to {
                    continue;
                }
                let (out_pin, in_pin) = if exec { ("then", "execute") } else { ("ReturnValue", "Value") };
                graph.connect_named(from, out_pin, to, in_pin).unwrap();
                wired += 1;
            }

            let document = GraphDocument::from_graph(&graph);
            prop_assert_eq!(document.connection_count(), wired);
            prop_assert_eq!(document.node_count(), node_count);

            let degree: usize = document
                .nodes
                .iter()
                .flat_map(|n| n.pins.iter())
                .map(|p| p.connection_count)
                .sum();
            prop_assert_eq!(degree, 2 * wired);
        }
    }
}
