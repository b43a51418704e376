//! Core API shared by the CLI and any embedding UI.
//! No transport or shell dependencies beyond the solver client itself.

use std::path::Path;

use crate::document::{CircuitDocument, Endpoint};
use crate::editor::SolveOutcome;
use crate::netlist::Netlist;
use crate::probe::ProbeReading;
use crate::resolve::Resolution;
use crate::solver::{SimulationRequest, SolverError};

#[derive(Debug, thiserror::Error)]
pub enum CircuitError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("document format error: {0}")]
    Format(#[from] serde_json::Error),

    #[error("unknown component: {0}")]
    UnknownComponent(String),

    #[error("unknown probe target: {0}")]
    UnknownTarget(String),

    #[error("a solve is already in flight (snapshot {0})")]
    SolveInFlight(u64),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Load a circuit document from a JSON file.
pub fn load_document(path: &Path) -> Result<CircuitDocument, CircuitError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Save a circuit document as pretty-printed JSON.
pub fn save_document(path: &Path, doc: &CircuitDocument) -> Result<(), CircuitError> {
    let text = serde_json::to_string_pretty(doc)?;
    std::fs::write(path, text)?;
    Ok(())
}

/// Run the consolidation pipeline over the document.
pub fn resolve(doc: &CircuitDocument) -> Resolution {
    crate::resolve::resolve(doc)
}

/// Textual netlist export for the current document.
pub fn netlist_text(doc: &CircuitDocument) -> String {
    Netlist::build(doc).text()
}

/// Solver request payload for the current document. Derived from the same
/// records as [`netlist_text`], never from an independent pass.
pub fn solver_payload(doc: &CircuitDocument) -> SimulationRequest {
    Netlist::build(doc).request()
}

/// Probe a terminal or wire endpoint; see [`crate::probe::probe`].
pub fn probe(
    doc: &CircuitDocument,
    target: &Endpoint,
    outcome: Option<&SolveOutcome>,
) -> Result<ProbeReading, CircuitError> {
    crate::probe::probe(doc, target, outcome)
}
