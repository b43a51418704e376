//! External DC solver interface.
//!
//! The core never solves anything itself; it ships a consolidated netlist to
//! a solver service and reads back per-node voltages and per-element
//! operating points. [`SolverBackend`] abstracts the transport so tests can
//! script responses without a network.

pub mod http;
pub mod schema;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpSolver;
pub use schema::{ElementReport, SimulationRequest, SimulationResult, SolverComponent};

/// Errors from talking to a solver backend. No retry happens here; if a
/// caller wants backoff it wraps the backend itself.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("solver request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("solver rejected the netlist ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("malformed solver response: {0}")]
    Decode(String),
}

/// A service that can solve a consolidated netlist.
#[async_trait]
pub trait SolverBackend: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Whether the backend is reachable and willing to solve.
    async fn is_available(&self) -> bool;

    /// Solve one netlist snapshot.
    async fn simulate(&self, request: &SimulationRequest)
        -> Result<SimulationResult, SolverError>;
}
