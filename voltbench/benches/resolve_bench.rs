use criterion::{black_box, criterion_group, criterion_main, Criterion};
use voltbench::prelude::*;

/// Ladder of `stages` resistor pairs hanging off one grounded source.
fn ladder(stages: usize) -> CircuitDocument {
    let mut doc = CircuitDocument::new("ladder");
    let v1 = doc.add_component(ComponentKind::VoltageSource, Some(5.0));
    doc.set_grounded(&TerminalRef::new(v1.clone(), Slot::N1), true)
        .unwrap();

    let mut upper = Endpoint::terminal(v1.clone(), Slot::N2);
    for _ in 0..stages {
        let series = doc.add_component(ComponentKind::Resistor, Some(1000.0));
        let shunt = doc.add_component(ComponentKind::Resistor, Some(1000.0));
        doc.add_wire(upper, Endpoint::terminal(series.clone(), Slot::N1))
            .unwrap();
        doc.add_wire(
            Endpoint::terminal(series.clone(), Slot::N2),
            Endpoint::terminal(shunt.clone(), Slot::N1),
        )
        .unwrap();
        doc.add_wire(
            Endpoint::terminal(shunt, Slot::N2),
            Endpoint::terminal(v1.clone(), Slot::N1),
        )
        .unwrap();
        upper = Endpoint::terminal(series, Slot::N2);
    }
    doc
}

fn bench_resolve(c: &mut Criterion) {
    let doc = ladder(100);
    c.bench_function("resolve_ladder_100", |b| {
        b.iter(|| voltbench::resolve(black_box(&doc)));
    });
}

fn bench_netlist(c: &mut Criterion) {
    let doc = ladder(100);
    c.bench_function("netlist_ladder_100", |b| {
        b.iter(|| Netlist::build(black_box(&doc)).text());
    });
}

criterion_group!(benches, bench_resolve, bench_netlist);
criterion_main!(benches);
