//! Wire types for the solver service.
//!
//! These mirror the service's JSON contract exactly: `POST /simulate` takes a
//! flat component list with resolved node names, and the response carries
//! node voltages plus per-element voltage/current/power.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One netlist record as the solver sees it. `type` is the one-letter kind
/// prefix (R, V, I, C, L, D).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverComponent {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub n1: String,
    pub n2: String,
    pub value: f64,
}

/// Request body for `POST /simulate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub components: Vec<SolverComponent>,
}

/// Solved operating point of a single element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementReport {
    #[serde(rename = "type")]
    pub kind: String,
    pub n1: String,
    pub n2: String,
    pub value: f64,
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
}

/// Response body of `POST /simulate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationResult {
    #[serde(default)]
    pub node_voltages: HashMap<String, f64>,
    #[serde(default)]
    pub elements: HashMap<String, ElementReport>,
    #[serde(default)]
    pub total_current: Option<f64>,
    #[serde(default)]
    pub equivalent_resistance: Option<f64>,
}

impl SimulationResult {
    /// Voltage of a node, defaulting to 0 for nodes the solver never saw
    /// (e.g. an isolated terminal's singleton partition).
    pub fn voltage(&self, node: &str) -> f64 {
        self.node_voltages.get(node).copied().unwrap_or(0.0)
    }
}

/// Body of `GET /health`.
#[derive(Debug, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
