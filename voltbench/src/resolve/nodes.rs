//! Ground normalization and deterministic node naming.
//!
//! One [`resolve`] pass registers every identity key, merges wire-connected
//! keys, pulls every grounded partition onto the global ground bus, and
//! assigns names in a fixed visiting order: components in declaration order
//! (n1 before n2), then junctions in creation order. Identical documents
//! always produce identical names.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::document::{CircuitDocument, Endpoint, GridPoint, Slot, TerminalRef};

use super::dsu::DisjointSet;
use super::ident::{endpoint_key, terminal_key, NodeKey};

/// The reserved, globally unique ground node name.
pub const GROUND_NODE: &str = "0";

/// Result of one resolution pass over a document snapshot.
///
/// Self-contained: lookups do not consult the document again, so a
/// `Resolution` always describes exactly the snapshot it was computed from
/// (identified by [`Resolution::revision`]).
#[derive(Debug, Clone)]
pub struct Resolution {
    revision: u64,
    terminal_nodes: HashMap<TerminalRef, String>,
    junction_nodes: HashMap<GridPoint, String>,
    assignments: Vec<(NodeKey, String)>,
}

impl Resolution {
    /// Revision of the document this pass was computed from.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn node_for_terminal(&self, at: &TerminalRef) -> Option<&str> {
        self.terminal_nodes.get(at).map(String::as_str)
    }

    pub fn node_for_endpoint(&self, endpoint: &Endpoint) -> Option<&str> {
        match endpoint {
            Endpoint::Terminal(t) => self.node_for_terminal(t),
            Endpoint::Junction(p) => self.junction_nodes.get(p).map(String::as_str),
        }
    }

    /// Node name for a terminal, defaulting to ground for terminals the pass
    /// never saw. This fallback silently changes topology if unintended; it
    /// exists so a half-wired component still emits a complete record.
    pub fn node_or_ground(&self, at: &TerminalRef) -> &str {
        self.node_for_terminal(at).unwrap_or(GROUND_NODE)
    }

    /// Key-to-name assignments in visiting order, for render overlays.
    pub fn assignments(&self) -> &[(NodeKey, String)] {
        &self.assignments
    }

    /// Distinct node names in first-assignment order.
    pub fn node_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.assignments
            .iter()
            .filter(|(_, name)| seen.insert(name.as_str()))
            .map(|(_, name)| name.as_str())
            .collect()
    }
}

/// Run the full consolidation pipeline against the current document.
///
/// Stateless input-to-output; nothing is cached between passes, so deletions
/// can never surface stale partitions.
pub fn resolve(doc: &CircuitDocument) -> Resolution {
    let mut sets = DisjointSet::new();

    // Step 1: register every key in the deterministic visiting order.
    // Terminals sharing a label collapse to one key here.
    let mut visit: Vec<NodeKey> = Vec::new();
    let mut seen: HashSet<NodeKey> = HashSet::new();
    for component in doc.components() {
        for slot in Slot::BOTH {
            let key = terminal_key(doc, &TerminalRef::new(component.id.clone(), slot));
            if seen.insert(key.clone()) {
                visit.push(key);
            }
        }
    }
    for junction in doc.junctions() {
        let key = NodeKey::Junction(*junction);
        if seen.insert(key.clone()) {
            visit.push(key);
        }
    }
    for key in &visit {
        sets.find(key);
    }

    // Step 2: merge across explicit wires.
    for wire in doc.wires() {
        sets.union(&endpoint_key(doc, &wire.a), &endpoint_key(doc, &wire.b));
    }

    // Step 3: ground is a global bus. Every grounded terminal joins one
    // partition, even across otherwise disconnected subgraphs.
    let mut ground_anchor: Option<NodeKey> = None;
    for component in doc.components() {
        for slot in Slot::BOTH {
            if component.terminal(slot).grounded {
                let key = terminal_key(doc, &TerminalRef::new(component.id.clone(), slot));
                match &ground_anchor {
                    None => ground_anchor = Some(key),
                    Some(anchor) => sets.union(anchor, &key),
                }
            }
        }
    }
    let ground_rep = ground_anchor.as_ref().map(|anchor| sets.find(anchor));

    // Step 4: name each partition at its first appearance in visiting order.
    let mut partition_names: HashMap<NodeKey, String> = HashMap::new();
    let mut names: HashMap<NodeKey, String> = HashMap::new();
    let mut assignments = Vec::with_capacity(visit.len());
    let mut next_index = 1u32;
    for key in &visit {
        let rep = sets.find(key);
        let name = match partition_names.get(&rep) {
            Some(name) => name.clone(),
            None => {
                let fresh = if ground_rep.as_ref() == Some(&rep) {
                    GROUND_NODE.to_string()
                } else {
                    let fresh = format!("N{}", next_index);
                    next_index += 1;
                    fresh
                };
                partition_names.insert(rep.clone(), fresh.clone());
                fresh
            }
        };
        names.insert(key.clone(), name.clone());
        assignments.push((key.clone(), name));
    }

    // Project names back onto concrete terminals and junctions.
    let mut terminal_nodes = HashMap::new();
    for component in doc.components() {
        for slot in Slot::BOTH {
            let at = TerminalRef::new(component.id.clone(), slot);
            if let Some(name) = names.get(&terminal_key(doc, &at)) {
                terminal_nodes.insert(at, name.clone());
            }
        }
    }
    let mut junction_nodes = HashMap::new();
    for junction in doc.junctions() {
        if let Some(name) = names.get(&NodeKey::Junction(*junction)) {
            junction_nodes.insert(*junction, name.clone());
        }
    }

    debug!(
        revision = doc.revision(),
        partitions = partition_names.len(),
        keys = visit.len(),
        "resolved document"
    );

    Resolution {
        revision: doc.revision(),
        terminal_nodes,
        junction_nodes,
        assignments,
    }
}
