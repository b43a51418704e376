//! Voltbench - circuit editor core with netlist consolidation
//!
//! This library turns a freeform graph of component terminals, explicit
//! wires and coincident-point junctions into a canonical circuit
//! description: every terminal assigned exactly one electrical node, ground
//! normalized to `"0"`, node names deterministic across recomputation.
//!
//! # Quick Start
//!
//! ```
//! use voltbench::{CircuitDocument, ComponentKind, Endpoint, Slot, TerminalRef};
//!
//! let mut doc = CircuitDocument::new("divider");
//! let v1 = doc.add_component(ComponentKind::VoltageSource, Some(5.0));
//! let r1 = doc.add_component(ComponentKind::Resistor, Some(1000.0));
//! doc.add_wire(
//!     Endpoint::terminal(v1.clone(), Slot::N2),
//!     Endpoint::terminal(r1, Slot::N1),
//! ).unwrap();
//! doc.set_grounded(&TerminalRef::new(v1, Slot::N1), true).unwrap();
//!
//! println!("{}", voltbench::netlist_text(&doc));
//! ```
//!
//! # Features
//!
//! - **Consolidation**: disjoint-set merge of terminals, wires and junctions
//! - **Deterministic naming**: ground `"0"`, then `N1`, `N2`, … in a fixed order
//! - **One pipeline**: export, solver payload, probe and overlay share it
//! - **Solver client**: async HTTP client with snapshot-tagged results

pub mod core;
pub mod document;
pub mod editor;
pub mod graph;
pub mod netlist;
pub mod probe;
pub mod resolve;
pub mod solver;

// Re-export main types
pub use crate::core::{
    load_document, netlist_text, probe, resolve, save_document, solver_payload, CircuitError,
};
pub use document::{
    CircuitDocument, Component, ComponentKind, DocumentMeta, Endpoint, GridPoint, Slot,
    Terminal, TerminalRef, Wire, WireId,
};
pub use editor::{SolveOutcome, SolveTicket, WiringGesture, Workbench};
pub use graph::{CircuitGraph, GraphStats};
pub use netlist::{Netlist, NetlistRecord};
pub use probe::ProbeReading;
pub use resolve::{NodeKey, Resolution, GROUND_NODE};
pub use solver::{
    HttpSolver, SimulationRequest, SimulationResult, SolverBackend, SolverComponent,
    SolverError,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CircuitDocument, CircuitError, ComponentKind, Endpoint, Netlist, ProbeReading,
        Resolution, Slot, TerminalRef, Workbench, GROUND_NODE,
    };
}
