//! CLI integration tests

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

use voltbench::prelude::*;
use voltbench::TerminalRef;

/// Build command for the voltbench-cli binary (found in target/debug when run via cargo test).
fn voltbench_cli() -> Command {
    cargo_bin_cmd!("voltbench-cli")
}

/// Write the canonical voltage-divider document into a temp dir and return
/// its path (the dir must outlive the command).
fn divider_fixture(dir: &tempfile::TempDir) -> PathBuf {
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

    let path = dir.path().join("divider.json");
    voltbench::save_document(&path, &doc).unwrap();
    path
}

#[test]
fn test_cli_help() {
    let mut cmd = voltbench_cli();

    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("netlist"));
}

#[test]
fn test_cli_version() {
    let mut cmd = voltbench_cli();

    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_export_divider() {
    let dir = tempfile::tempdir().unwrap();
    let path = divider_fixture(&dir);

    let mut cmd = voltbench_cli();
    cmd.arg("export").arg(path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("V1 0 N1 DC 5"))
        .stdout(predicate::str::contains("R1 N1 N2 1000"))
        .stdout(predicate::str::contains("R2 N2 0 1000"));
}

#[test]
fn test_cli_nodes_human() {
    let dir = tempfile::tempdir().unwrap();
    let path = divider_fixture(&dir);

    let mut cmd = voltbench_cli();
    cmd.arg("nodes").arg(path);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("V1.n1 -> 0"))
        .stdout(predicate::str::contains("R1.n2 -> N2"));
}

#[test]
fn test_cli_nodes_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = divider_fixture(&dir);

    let mut cmd = voltbench_cli();
    cmd.arg("nodes").arg(path).arg("--format").arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"node\": \"N1\""));
}

#[test]
fn test_cli_probe_terminal() {
    let dir = tempfile::tempdir().unwrap();
    let path = divider_fixture(&dir);

    let mut cmd = voltbench_cli();
    cmd.arg("probe").arg(path).arg("R2.n1");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("node N2"));
}

#[test]
fn test_cli_probe_bad_target() {
    let dir = tempfile::tempdir().unwrap();
    let path = divider_fixture(&dir);

    let mut cmd = voltbench_cli();
    cmd.arg("probe").arg(path).arg("R2.n9");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid probe target"));
}

#[test]
fn test_cli_export_missing_file() {
    let mut cmd = voltbench_cli();
    cmd.arg("export").arg("no_such_circuit.json");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_cli_simulate_unreachable_solver() {
    let dir = tempfile::tempdir().unwrap();
    let path = divider_fixture(&dir);

    let mut cmd = voltbench_cli();
    // Nothing listens on localhost port 1; the connection is refused.
    cmd.arg("simulate")
        .arg(path)
        .arg("--url")
        .arg("http://127.0.0.1:1");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
