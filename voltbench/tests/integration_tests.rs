//! Integration tests for the Voltbench library.

use voltbench::prelude::*;
use voltbench::solver::{SimulationRequest, SimulationResult, SolverBackend, SolverError};
use voltbench::{NodeKey, SolverComponent, TerminalRef};

use async_trait::async_trait;
use std::sync::Mutex;

/// Builds the canonical divider: V1 (5V), R1 and R2 (1k each) in a ring, with
/// V1.n1 explicitly grounded.
fn divider() -> CircuitDocument {
    let mut doc = CircuitDocument::new("divider");
    let v1 = doc.add_component(ComponentKind::VoltageSource, Some(5.0));
    let r1 = doc.add_component(ComponentKind::Resistor, Some(1000.0));
    let r2 = doc.add_component(ComponentKind::Resistor, Some(1000.0));
    doc.add_wire(
        Endpoint::terminal(v1.clone(), Slot::N2),
        Endpoint::terminal(r1.clone(), Slot::N1),
    )
    .unwrap();
    doc.add_wire(
        Endpoint::terminal(r1, Slot::N2),
        Endpoint::terminal(r2.clone(), Slot::N1),
    )
    .unwrap();
    doc.add_wire(
        Endpoint::terminal(r2, Slot::N2),
        Endpoint::terminal(v1.clone(), Slot::N1),
    )
    .unwrap();
    doc.set_grounded(&TerminalRef::new(v1, Slot::N1), true).unwrap();
    doc
}

#[test]
fn divider_export_is_canonical() {
    let doc = divider();

    assert_eq!(
        voltbench::netlist_text(&doc),
        "V1 0 N1 DC 5\nR1 N1 N2 1000\nR2 N2 0 1000\n"
    );

    let payload = voltbench::solver_payload(&doc);
    assert_eq!(
        payload.components,
        vec![
            SolverComponent {
                kind: "V".into(),
                name: "V1".into(),
                n1: "0".into(),
                n2: "N1".into(),
                value: 5.0,
            },
            SolverComponent {
                kind: "R".into(),
                name: "R1".into(),
                n1: "N1".into(),
                n2: "N2".into(),
                value: 1000.0,
            },
            SolverComponent {
                kind: "R".into(),
                name: "R2".into(),
                n1: "N2".into(),
                n2: "0".into(),
                value: 1000.0,
            },
        ]
    );
}

#[test]
fn every_consumer_agrees_on_node_names() {
    let doc = divider();
    let resolution = voltbench::resolve(&doc);
    let netlist = Netlist::from_resolution(&doc, &resolution);
    let overlay = voltbench::CircuitGraph::from_resolution(&doc, &resolution);

    for record in netlist.records() {
        // Probe agrees with the netlist builder on both terminals.
        for (slot, node) in [(Slot::N1, &record.n1), (Slot::N2, &record.n2)] {
            let target = Endpoint::terminal(record.name.clone(), slot);
            let reading = voltbench::probe(&doc, &target, None).unwrap();
            assert_eq!(&reading.node, node);
        }
        // The overlay graph lists the same nets in slot order.
        assert_eq!(
            overlay.nets_for_component(&record.name),
            vec![record.n1.as_str(), record.n2.as_str()],
        );
    }
}

#[test]
fn resolution_is_a_pure_function_of_document_state() {
    let doc = divider();
    let a = voltbench::resolve(&doc);
    let b = voltbench::resolve(&doc);
    assert_eq!(a.assignments(), b.assignments());

    // A saved-and-reloaded document resolves identically.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("divider.json");
    voltbench::save_document(&path, &doc).unwrap();
    let reloaded = voltbench::load_document(&path).unwrap();
    assert_eq!(a.assignments(), voltbench::resolve(&reloaded).assignments());
}

#[test]
fn labels_appear_as_node_keys_in_the_overlay() {
    let mut doc = CircuitDocument::new("labeled");
    let r1 = doc.add_component(ComponentKind::Resistor, None);
    doc.set_label(&TerminalRef::new(r1, Slot::N1), Some("VIN".to_string()))
        .unwrap();

    let resolution = voltbench::resolve(&doc);
    assert!(resolution
        .assignments()
        .iter()
        .any(|(key, _)| matches!(key, NodeKey::Label(l) if l == "VIN")));
}

/// Backend that records each request and replies from a script.
struct ScriptedSolver {
    requests: Mutex<Vec<SimulationRequest>>,
    result: SimulationResult,
}

impl ScriptedSolver {
    fn with_voltages(pairs: &[(&str, f64)]) -> Self {
        let mut result = SimulationResult::default();
        for (node, volts) in pairs {
            result.node_voltages.insert(node.to_string(), *volts);
        }
        Self {
            requests: Mutex::new(Vec::new()),
            result,
        }
    }
}

#[async_trait]
impl SolverBackend for ScriptedSolver {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn simulate(
        &self,
        request: &SimulationRequest,
    ) -> Result<SimulationResult, SolverError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.result.clone())
    }
}

#[tokio::test]
async fn solve_probe_round_trip() {
    let mut bench = Workbench::with_document(divider());
    let backend =
        ScriptedSolver::with_voltages(&[("0", 0.0), ("N1", 5.0), ("N2", 2.5)]);

    bench.solve_with(&backend).await.unwrap();

    // The payload the backend saw matches the export.
    let sent = backend.requests.lock().unwrap()[0].clone();
    assert_eq!(sent, voltbench::solver_payload(bench.document()));

    // Probing the divider midpoint reads the solved voltage.
    let reading = bench.probe(&Endpoint::terminal("R1", Slot::N2)).unwrap();
    assert_eq!(reading.node, "N2");
    assert_eq!(reading.voltage, Some(2.5));
}

#[tokio::test]
async fn edits_after_solve_invalidate_the_readback() {
    let mut bench = Workbench::with_document(divider());
    let backend = ScriptedSolver::with_voltages(&[("N1", 5.0)]);
    bench.solve_with(&backend).await.unwrap();

    bench.document_mut().add_component(ComponentKind::Inductor, None);

    let reading = bench.probe(&Endpoint::terminal("V1", Slot::N2)).unwrap();
    assert_eq!(reading.voltage, None, "stale voltages must not surface");
}

#[test]
fn deleting_a_component_renames_nothing_it_should_not() {
    let mut doc = divider();
    doc.remove_component("R2");

    let resolution = voltbench::resolve(&doc);
    // V1.n2/R1.n1 still share the first generated name.
    assert_eq!(
        resolution.node_for_terminal(&TerminalRef::new("V1", Slot::N2)),
        Some("N1")
    );
    // R1.n2 lost its wire partner but keeps a node of its own.
    assert_eq!(
        resolution.node_for_terminal(&TerminalRef::new("R1", Slot::N2)),
        Some("N2")
    );
}
