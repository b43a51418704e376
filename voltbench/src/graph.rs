//! Connectivity view of a resolved circuit.
//!
//! Builds a petgraph digraph with component and net nodes, edges carrying
//! the connecting slot. Backs the render-time node-label overlay and the
//! CLI `nodes` listing; also handy for quick structural queries in tests.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::Serialize;

use crate::document::{CircuitDocument, ComponentKind, Slot, TerminalRef};
use crate::resolve::{resolve, Resolution};

/// Node type in the connectivity graph.
#[derive(Debug, Clone)]
pub enum GraphNode {
    Component { id: String, kind: ComponentKind },
    Net(String),
}

/// The circuit as components connected to resolved nets.
#[derive(Debug, Clone)]
pub struct CircuitGraph {
    graph: DiGraph<GraphNode, Slot>,
    component_indices: HashMap<String, NodeIndex>,
    net_indices: HashMap<String, NodeIndex>,
}

impl CircuitGraph {
    /// Build the view with a fresh resolution pass.
    pub fn build(doc: &CircuitDocument) -> Self {
        let resolution = resolve(doc);
        Self::from_resolution(doc, &resolution)
    }

    /// Build from an existing resolution so overlay and netlist share one
    /// pass.
    pub fn from_resolution(doc: &CircuitDocument, resolution: &Resolution) -> Self {
        let mut view = Self {
            graph: DiGraph::new(),
            component_indices: HashMap::new(),
            net_indices: HashMap::new(),
        };

        for component in doc.components() {
            let idx = view.graph.add_node(GraphNode::Component {
                id: component.id.clone(),
                kind: component.kind,
            });
            view.component_indices.insert(component.id.clone(), idx);
        }

        for component in doc.components() {
            for slot in Slot::BOTH {
                let at = TerminalRef::new(component.id.clone(), slot);
                if let Some(net) = resolution.node_for_terminal(&at) {
                    let net_idx = view.net_index(net);
                    let comp_idx = view.component_indices[&component.id];
                    view.graph.add_edge(comp_idx, net_idx, slot);
                }
            }
        }

        // Junction-only nets still appear as nodes.
        for junction in doc.junctions() {
            if let Some(net) =
                resolution.node_for_endpoint(&crate::document::Endpoint::Junction(*junction))
            {
                view.net_index(net);
            }
        }

        view
    }

    fn net_index(&mut self, net: &str) -> NodeIndex {
        if let Some(&idx) = self.net_indices.get(net) {
            return idx;
        }
        let idx = self.graph.add_node(GraphNode::Net(net.to_string()));
        self.net_indices.insert(net.to_string(), idx);
        idx
    }

    /// Component ids attached to a net.
    pub fn components_on_net(&self, net: &str) -> Vec<&str> {
        let Some(&net_idx) = self.net_indices.get(net) else {
            return Vec::new();
        };
        let mut ids: Vec<&str> = self
            .graph
            .edges_directed(net_idx, Direction::Incoming)
            .filter_map(|edge| match self.graph.node_weight(edge.source()) {
                Some(GraphNode::Component { id, .. }) => Some(id.as_str()),
                _ => None,
            })
            .collect();
        ids.dedup();
        ids
    }

    /// Nets a component touches, n1 edge first.
    pub fn nets_for_component(&self, id: &str) -> Vec<&str> {
        let Some(&comp_idx) = self.component_indices.get(id) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(comp_idx, Direction::Outgoing)
            .collect();
        edges.sort_by_key(|edge| *edge.weight());
        edges
            .into_iter()
            .filter_map(|edge| match self.graph.node_weight(edge.target()) {
                Some(GraphNode::Net(name)) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn net_names(&self) -> Vec<&str> {
        self.graph
            .node_weights()
            .filter_map(|node| match node {
                GraphNode::Net(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            component_count: self.component_indices.len(),
            net_count: self.net_indices.len(),
            connection_count: self.graph.edge_count(),
        }
    }
}

/// Structural counts for status displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub component_count: usize,
    pub net_count: usize,
    pub connection_count: usize,
}
