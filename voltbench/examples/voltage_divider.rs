//! Build the canonical voltage divider, print its netlist and node map, and
//! (if a solver is running locally) solve it and probe the midpoint.
//!
//! Run with: `cargo run --example voltage_divider`

use voltbench::prelude::*;
use voltbench::{HttpSolver, SolverBackend, TerminalRef};

#[tokio::main]
async fn main() -> Result<(), CircuitError> {
    let mut bench = Workbench::new("voltage divider");
    let (v1, r1, r2);
    {
        let doc = bench.document_mut();
        v1 = doc.add_component(ComponentKind::VoltageSource, Some(5.0));
        r1 = doc.add_component(ComponentKind::Resistor, Some(1000.0));
        r2 = doc.add_component(ComponentKind::Resistor, Some(1000.0));
        doc.add_wire(
            Endpoint::terminal(v1.clone(), Slot::N2),
            Endpoint::terminal(r1.clone(), Slot::N1),
        )?;
        doc.add_wire(
            Endpoint::terminal(r1.clone(), Slot::N2),
            Endpoint::terminal(r2.clone(), Slot::N1),
        )?;
        doc.add_wire(
            Endpoint::terminal(r2, Slot::N2),
            Endpoint::terminal(v1.clone(), Slot::N1),
        )?;
        doc.set_grounded(&TerminalRef::new(v1, Slot::N1), true)?;
    }

    println!("netlist:\n{}", bench.netlist().text());

    println!("nodes:");
    for (key, node) in bench.resolve().assignments() {
        println!("  {} -> {}", key, node);
    }

    let solver = HttpSolver::default();
    if solver.is_available().await {
        let result = bench.solve_with(&solver).await?;
        println!("node voltages: {:?}", result.node_voltages);

        let midpoint = Endpoint::terminal(r1, Slot::N2);
        let reading = bench.probe(&midpoint)?;
        println!("probe {}: node {} = {:?} V", midpoint, reading.node, reading.voltage);
    } else {
        println!("solver not reachable; skipping simulation");
    }

    Ok(())
}
