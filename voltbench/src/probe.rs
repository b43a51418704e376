//! Interactive probe readback.
//!
//! A probe maps a clicked terminal or wire endpoint to its node name, and to
//! the last-computed voltage when a solve outcome for the *current* document
//! snapshot is supplied. This runs the identical resolution pipeline as the
//! netlist builder; a second mapping implementation is deliberately absent.

use serde::Serialize;

use crate::core::CircuitError;
use crate::document::{CircuitDocument, Endpoint};
use crate::editor::SolveOutcome;
use crate::resolve::{resolve, Resolution};

/// What a probe click reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeReading {
    /// Canonical node name at the probed point.
    pub node: String,
    /// Voltage from the supplied outcome, when that outcome matches the
    /// probed snapshot. Nodes the solver never saw read as 0.0.
    pub voltage: Option<f64>,
}

/// Probe an endpoint with a fresh resolution pass over the document.
pub fn probe(
    doc: &CircuitDocument,
    target: &Endpoint,
    outcome: Option<&SolveOutcome>,
) -> Result<ProbeReading, CircuitError> {
    let resolution = resolve(doc);
    probe_resolved(&resolution, target, outcome)
}

/// Probe against an already-computed resolution (shared with the netlist
/// builder by callers that need both).
pub fn probe_resolved(
    resolution: &Resolution,
    target: &Endpoint,
    outcome: Option<&SolveOutcome>,
) -> Result<ProbeReading, CircuitError> {
    let node = resolution
        .node_for_endpoint(target)
        .ok_or_else(|| CircuitError::UnknownTarget(target.to_string()))?;

    let voltage = outcome
        .filter(|o| o.revision == resolution.revision())
        .map(|o| o.result.voltage(node));

    Ok(ProbeReading {
        node: node.to_string(),
        voltage,
    })
}
