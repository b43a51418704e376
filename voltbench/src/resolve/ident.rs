//! Terminal identity.
//!
//! The disjoint-set engine merges [`NodeKey`]s, not raw strings. A key is a
//! tagged value compared and hashed structurally, so a user label can never
//! collide with a generated component/slot identity by accident.

use serde::Serialize;

use crate::document::{CircuitDocument, Endpoint, GridPoint, TerminalRef};

/// Identity of one electrically mergeable point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKey {
    /// A user-assigned terminal label. Terminals sharing a label share a key
    /// and are therefore implicitly connected.
    Label(String),
    /// An unlabeled terminal, identified by component id and slot.
    Slot(TerminalRef),
    /// An implicit junction, identified by its snapped coordinate.
    Junction(GridPoint),
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKey::Label(l) => write!(f, "{}", l),
            NodeKey::Slot(t) => write!(f, "{}", t),
            NodeKey::Junction(p) => write!(f, "{}", p),
        }
    }
}

/// Identity key for a component terminal: the user label if present,
/// otherwise the structural component/slot reference.
///
/// Pure function of current document state; no caching, so repeated calls
/// across consumers cannot diverge.
pub fn terminal_key(doc: &CircuitDocument, at: &TerminalRef) -> NodeKey {
    match doc.terminal(at).and_then(|t| t.label.as_deref()) {
        Some(label) if !label.trim().is_empty() => NodeKey::Label(label.trim().to_string()),
        _ => NodeKey::Slot(at.clone()),
    }
}

/// Identity key for a wire endpoint.
pub fn endpoint_key(doc: &CircuitDocument, endpoint: &Endpoint) -> NodeKey {
    match endpoint {
        Endpoint::Terminal(t) => terminal_key(doc, t),
        Endpoint::Junction(p) => NodeKey::Junction(*p),
    }
}
