use criterion::{black_box, criterion_group, criterion_main, Criterion};
use railsim::prelude::*;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A powered board driving one end of a long chain of slide switches.
fn daisy_chain(len: usize) -> Workbench {
    let mut bench = Workbench::new(BoardProfile::new("bench", ["GND", "5V", "GP2"]));
    bench.place(Box::new(Battery::new("bat", 5.0))).unwrap();
    bench.connect(PinRef::board("5V"), PinRef::component("bat", "POS")).unwrap();
    bench.connect(PinRef::board("GND"), PinRef::component("bat", "NEG")).unwrap();

    let mut previous = PinRef::board("GP2");
    for i in 0..len {
        let id = format!("sw{}", i);
        bench.place(Box::new(SlideSwitch::new(id.as_str()))).unwrap();
        bench.connect(previous, PinRef::component(id.as_str(), "com")).unwrap();
        previous = PinRef::component(id.as_str(), "p1");
    }
    bench.board_mut().pin_states_mut().set("GP2", 1.0);
    bench
}

fn bench_daisy_chain(c: &mut Criterion) {
    let bench = daisy_chain(200);
    let tail = PinRef::component("sw199", "p1");

    c.bench_function("pin_level_daisy_chain_200", |b| {
        b.iter(|| bench.pin_level(black_box(&tail)));
    });
}

/// Relays with every contact on the 5V rail, each coil fed by the previous NO.
fn relay_bank(len: usize) -> Workbench {
    let mut bench = Workbench::new(BoardProfile::new("bench", ["GND", "5V", "GP2"]));
    bench.place(Box::new(Battery::new("bat", 5.0))).unwrap();
    bench.connect(PinRef::board("5V"), PinRef::component("bat", "POS")).unwrap();
    bench.connect(PinRef::board("GND"), PinRef::component("bat", "NEG")).unwrap();

    let mut feed = PinRef::board("GP2");
    for i in 0..len {
        let id = format!("k{}", i);
        bench.place(Box::new(Relay::new(id.as_str()))).unwrap();
        bench.connect(PinRef::component(id.as_str(), "COM"), PinRef::board("5V")).unwrap();
        bench.connect(feed, PinRef::component(id.as_str(), "IN")).unwrap();
        feed = PinRef::component(id.as_str(), "NO");
    }
    bench.board_mut().pin_states_mut().set("GP2", 1.0);
    bench
}

fn bench_relay_bank(c: &mut Criterion) {
    let bench = relay_bank(32);
    let tail = PinRef::component("k31", "NO");

    c.bench_function("pin_level_relay_bank_32", |b| {
        b.iter(|| bench.pin_level(black_box(&tail)));
    });
}

fn bench_button_project(c: &mut Criterion) {
    let bench = Workbench::load(&fixture_path("button.json")).unwrap();
    let sig = PinRef::component("btn1", "SIG");

    c.bench_function("pin_level_button", |b| {
        b.iter(|| bench.pin_level(black_box(&sig)));
    });

    c.bench_function("netlist_snapshot_button", |b| {
        b.iter(|| Netlist::snapshot(black_box(&bench)));
    });
}

criterion_group!(benches, bench_daisy_chain, bench_relay_bank, bench_button_project);
criterion_main!(benches);
