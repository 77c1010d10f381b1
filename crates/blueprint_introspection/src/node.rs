// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node classification and extraction.
//!
//! Every node gets exactly one [`NodeKind`]. The known shapes are tested in a
//! fixed order (event, function call, variable get, variable set, custom
//! event) and the first match wins; everything else is [`NodeKind::Other`].

use crate::pin::PinDescriptor;
use blueprint_model::{GraphNode, NodeBody, NodeId};
use serde::Serialize;

/// Semantic kind of a node, with its kind-specific name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node_category", rename_all = "snake_case")]
pub enum NodeKind {
    /// Event node
    Event {
        /// Event name, omitted when the reference did not resolve
        #[serde(skip_serializing_if = "Option::is_none")]
        event_name: Option<String>,
    },
    /// Function call
    FunctionCall {
        /// Called function, omitted when the reference did not resolve
        #[serde(skip_serializing_if = "Option::is_none")]
        function_name: Option<String>,
    },
    /// Variable read
    VariableGet {
        /// Variable name, omitted when the reference did not resolve
        #[serde(skip_serializing_if = "Option::is_none")]
        variable_name: Option<String>,
    },
    /// Variable write
    VariableSet {
        /// Variable name, omitted when the reference did not resolve
        #[serde(skip_serializing_if = "Option::is_none")]
        variable_name: Option<String>,
    },
    /// User-declared event
    CustomEvent {
        /// Declared event name
        event_name: String,
    },
    /// Anything else
    Other,
}

type Matcher = fn(&NodeBody) -> Option<NodeKind>;

/// Shape tests in priority order.
const MATCHERS: [Matcher; 5] = [
    match_event,
    match_function_call,
    match_variable_get,
    match_variable_set,
    match_custom_event,
];

fn match_event(body: &NodeBody) -> Option<NodeKind> {
    match body {
        NodeBody::Event { event_reference } => Some(NodeKind::Event {
            event_name: event_reference.member_name().map(str::to_string),
        }),
        _ => None,
    }
}

fn match_function_call(body: &NodeBody) -> Option<NodeKind> {
    match body {
        NodeBody::CallFunction { function_reference } => Some(NodeKind::FunctionCall {
            function_name: function_reference.member_name().map(str::to_string),
        }),
        _ => None,
    }
}

fn match_variable_get(body: &NodeBody) -> Option<NodeKind> {
    match body {
        NodeBody::VariableGet { variable_reference } => Some(NodeKind::VariableGet {
            variable_name: variable_reference.member_name().map(str::to_string),
        }),
        _ => None,
    }
}

fn match_variable_set(body: &NodeBody) -> Option<NodeKind> {
    match body {
        NodeBody::VariableSet { variable_reference } => Some(NodeKind::VariableSet {
            variable_name: variable_reference.member_name().map(str::to_string),
        }),
        _ => None,
    }
}

fn match_custom_event(body: &NodeBody) -> Option<NodeKind> {
    match body {
        NodeBody::CustomEvent {
            custom_function_name,
        } => Some(NodeKind::CustomEvent {
            event_name: custom_function_name.clone(),
        }),
        _ => None,
    }
}

impl NodeKind {
    /// Classify a node
    pub fn classify(node: &GraphNode) -> Self {
        MATCHERS
            .iter()
            .find_map(|matcher| matcher(&node.body))
            .unwrap_or(NodeKind::Other)
    }

    /// Stable category token
    pub fn category(&self) -> &'static str {
        match self {
            NodeKind::Event { .. } => "event",
            NodeKind::FunctionCall { .. } => "function_call",
            NodeKind::VariableGet { .. } => "variable_get",
            NodeKind::VariableSet { .. } => "variable_set",
            NodeKind::CustomEvent { .. } => "custom_event",
            NodeKind::Other => "other",
        }
    }
}

/// An extracted node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDescriptor {
    /// Node GUID
    pub id: NodeId,
    /// Concrete node class name
    #[serde(rename = "type")]
    pub node_type: String,
    /// Full title
    pub title: String,
    /// Horizontal position
    pub pos_x: f64,
    /// Vertical position
    pub pos_y: f64,
    /// Kind tag and kind-specific name
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Pins in declaration order
    pub pins: Vec<PinDescriptor>,
}

impl NodeDescriptor {
    /// Describe a node and its live pins
    pub fn from_node(node: &GraphNode) -> Self {
        Self {
            id: node.guid,
            node_type: node.class_name.clone(),
            title: node.title.clone(),
            pos_x: finite(f64::from(node.position[0])),
            pos_y: finite(f64::from(node.position[1])),
            kind: NodeKind::classify(node),
            pins: node.pins().map(PinDescriptor::from_pin).collect(),
        }
    }
}

/// Non-finite numbers have no JSON form; they are written as zero.
pub(crate) fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        tracing::warn!("Replacing non-finite value {} with 0", value);
        0.0
    }
}
