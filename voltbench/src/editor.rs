//! Editor shell: the two-click wiring gesture and the [`Workbench`] that
//! owns the document and the solve lifecycle.
//!
//! All document mutation flows through the workbench on one thread; the only
//! suspending operation is the solver call, and at most one solve is in
//! flight at a time. Solve results are tagged with the document revision
//! they were built from and discarded when the document has moved on.

use tracing::{debug, warn};

use crate::core::CircuitError;
use crate::document::{CircuitDocument, Endpoint, WireId};
use crate::netlist::Netlist;
use crate::probe::{probe_resolved, ProbeReading};
use crate::resolve::{resolve, Resolution};
use crate::solver::{SimulationRequest, SimulationResult, SolverBackend};

/// The two-click wiring gesture.
///
/// `Idle` → first click stores the endpoint → second click on a *different*
/// endpoint commits a wire; re-clicking the first endpoint (or an explicit
/// cancel) returns to `Idle` without committing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum WiringGesture {
    #[default]
    Idle,
    Pending(Endpoint),
}

impl WiringGesture {
    /// Feed one endpoint click; returns the wire to commit, if any.
    pub fn click(&mut self, endpoint: Endpoint) -> Option<(Endpoint, Endpoint)> {
        match std::mem::take(self) {
            WiringGesture::Idle => {
                *self = WiringGesture::Pending(endpoint);
                None
            }
            WiringGesture::Pending(first) if first == endpoint => None, // cancelled
            WiringGesture::Pending(first) => Some((first, endpoint)),
        }
    }

    pub fn cancel(&mut self) {
        *self = WiringGesture::Idle;
    }

    pub fn pending(&self) -> Option<&Endpoint> {
        match self {
            WiringGesture::Idle => None,
            WiringGesture::Pending(endpoint) => Some(endpoint),
        }
    }
}

/// A solver result bound to the document revision it was computed from.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub revision: u64,
    pub result: SimulationResult,
}

/// Handle for one outbound solve: the payload plus the snapshot tag the
/// response must match to be applied.
#[derive(Debug, Clone)]
pub struct SolveTicket {
    revision: u64,
    pub request: SimulationRequest,
}

impl SolveTicket {
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Owns the single circuit document and everything derived from it.
#[derive(Debug, Default)]
pub struct Workbench {
    document: CircuitDocument,
    gesture: WiringGesture,
    in_flight: Option<u64>,
    last_outcome: Option<SolveOutcome>,
}

impl Workbench {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_document(CircuitDocument::new(name))
    }

    pub fn with_document(document: CircuitDocument) -> Self {
        Self {
            document,
            gesture: WiringGesture::Idle,
            in_flight: None,
            last_outcome: None,
        }
    }

    pub fn document(&self) -> &CircuitDocument {
        &self.document
    }

    /// Mutable access for editing actions. Any mutation bumps the revision,
    /// which naturally invalidates the cached outcome for probing.
    pub fn document_mut(&mut self) -> &mut CircuitDocument {
        &mut self.document
    }

    /// Feed a wiring click; commits a wire when the gesture completes.
    pub fn click(&mut self, endpoint: Endpoint) -> Result<Option<WireId>, CircuitError> {
        match self.gesture.click(endpoint) {
            Some((a, b)) => Ok(Some(self.document.add_wire(a, b)?)),
            None => Ok(None),
        }
    }

    pub fn cancel_wiring(&mut self) {
        self.gesture.cancel();
    }

    pub fn wiring(&self) -> &WiringGesture {
        &self.gesture
    }

    /// Fresh resolution pass over the current document.
    pub fn resolve(&self) -> Resolution {
        resolve(&self.document)
    }

    /// Fresh netlist for the current document.
    pub fn netlist(&self) -> Netlist {
        Netlist::build(&self.document)
    }

    /// Start a solve: builds the payload and reserves the in-flight slot.
    /// Fails while another solve is outstanding, so one response is always
    /// attributable to one snapshot.
    pub fn begin_solve(&mut self) -> Result<SolveTicket, CircuitError> {
        if let Some(revision) = self.in_flight {
            return Err(CircuitError::SolveInFlight(revision));
        }
        let revision = self.document.revision();
        let request = self.netlist().request();
        self.in_flight = Some(revision);
        debug!(revision, "solve started");
        Ok(SolveTicket { revision, request })
    }

    /// Apply a solver response. Returns false (and stores nothing) when the
    /// document has been edited since the ticket was issued.
    pub fn apply_result(&mut self, ticket: &SolveTicket, result: SimulationResult) -> bool {
        self.in_flight = None;
        if ticket.revision != self.document.revision() {
            warn!(
                ticket = ticket.revision,
                current = self.document.revision(),
                "discarding stale solve result"
            );
            return false;
        }
        self.last_outcome = Some(SolveOutcome {
            revision: ticket.revision,
            result,
        });
        true
    }

    /// Release the in-flight slot after a failed request.
    pub fn abort_solve(&mut self) {
        self.in_flight = None;
    }

    pub fn solve_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_outcome(&self) -> Option<&SolveOutcome> {
        self.last_outcome.as_ref()
    }

    /// Run a full solve round-trip against a backend.
    pub async fn solve_with(
        &mut self,
        backend: &dyn SolverBackend,
    ) -> Result<SimulationResult, CircuitError> {
        let ticket = self.begin_solve()?;
        debug!(backend = backend.name(), revision = ticket.revision(), "solving");
        match backend.simulate(&ticket.request).await {
            Ok(result) => {
                self.apply_result(&ticket, result.clone());
                Ok(result)
            }
            Err(e) => {
                self.abort_solve();
                Err(e.into())
            }
        }
    }

    /// Probe an endpoint, reading a voltage when the last outcome still
    /// matches the current document.
    pub fn probe(&self, target: &Endpoint) -> Result<ProbeReading, CircuitError> {
        let resolution = self.resolve();
        probe_resolved(&resolution, target, self.last_outcome.as_ref())
    }
}
