//! Netlist emission.
//!
//! A [`Netlist`] is built from one shared resolution pass and then rendered
//! two ways: human-readable text lines and the structured solver payload.
//! Because both forms derive from the same records, export text and solver
//! request always agree on node names.

use std::fmt::Write as _;

use serde::Serialize;

use crate::document::{CircuitDocument, ComponentKind, Slot, TerminalRef};
use crate::resolve::{resolve, Resolution};
use crate::solver::{SimulationRequest, SolverComponent};

/// One emitted component record with both terminals resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetlistRecord {
    pub kind: ComponentKind,
    pub name: String,
    pub n1: String,
    pub n2: String,
    pub value: f64,
}

/// Consolidated netlist for one document snapshot, components in declaration
/// order.
#[derive(Debug, Clone, Serialize)]
pub struct Netlist {
    records: Vec<NetlistRecord>,
    revision: u64,
}

impl Netlist {
    /// Build the netlist with a fresh resolution pass.
    pub fn build(doc: &CircuitDocument) -> Self {
        let resolution = resolve(doc);
        Self::from_resolution(doc, &resolution)
    }

    /// Build from an already-computed resolution, so callers that also need
    /// the node mapping (probe, overlay) run the pipeline exactly once.
    ///
    /// A terminal the resolution does not cover falls back to ground `"0"`;
    /// this is a documented default, not an error.
    pub fn from_resolution(doc: &CircuitDocument, resolution: &Resolution) -> Self {
        let records = doc
            .components()
            .iter()
            .map(|component| {
                let node = |slot| {
                    resolution
                        .node_or_ground(&TerminalRef::new(component.id.clone(), slot))
                        .to_string()
                };
                NetlistRecord {
                    kind: component.kind,
                    name: component.id.clone(),
                    n1: node(Slot::N1),
                    n2: node(Slot::N2),
                    value: component.effective_value(),
                }
            })
            .collect();

        Self {
            records,
            revision: resolution.revision(),
        }
    }

    pub fn records(&self) -> &[NetlistRecord] {
        &self.records
    }

    /// Revision of the document snapshot this netlist describes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Text export, one line per component:
    /// `<name> <n1> <n2> [DC] <value>` with `DC` only for sources.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            let _ = if record.kind.is_source() {
                writeln!(out, "{} {} {} DC {}", record.name, record.n1, record.n2, record.value)
            } else {
                writeln!(out, "{} {} {} {}", record.name, record.n1, record.n2, record.value)
            };
        }
        out
    }

    /// Structured payload for the solver, derived from the same records as
    /// [`Netlist::text`].
    pub fn request(&self) -> SimulationRequest {
        SimulationRequest {
            components: self
                .records
                .iter()
                .map(|record| SolverComponent {
                    kind: record.kind.prefix().to_string(),
                    name: record.name.clone(),
                    n1: record.n1.clone(),
                    n2: record.n2.clone(),
                    value: record.value,
                })
                .collect(),
        }
    }
}
