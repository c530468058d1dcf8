//! Net Snapshot
//!
//! Partitions every known terminal into nets at one instant and resolves each
//! net's level. This is a debugging and reporting view: the partition reflects
//! the component states at the moment it was taken and is never consulted by
//! [`RailTracer::pin_level`](crate::engine::RailTracer::pin_level).

use petgraph::unionfind::UnionFind;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::contract::LevelState;
use crate::core::Workbench;
use crate::pin::PinRef;

/// One net and its resolved level.
#[derive(Debug, Clone, Serialize)]
pub struct NetSnapshot {
    pub members: Vec<String>,
    pub level: f64,
    pub state: LevelState,
}

impl NetSnapshot {
    pub fn contains(&self, pin: &PinRef) -> bool {
        let wanted = pin.canonical().to_string();
        self.members.iter().any(|m| *m == wanted)
    }
}

/// Every net on the workbench.
#[derive(Debug, Clone, Serialize)]
pub struct Netlist {
    pub powered: bool,
    pub powering_battery: Option<String>,
    pub nets: Vec<NetSnapshot>,
}

impl Netlist {
    /// Take a snapshot of the current state.
    pub fn snapshot(bench: &Workbench) -> Self {
        let tracer = bench.tracer();

        // Canonical pins in a stable order: board pins, component pins, then any
        // extra endpoints wires mention.
        let mut index: HashMap<PinRef, usize> = HashMap::new();
        let mut pins: Vec<PinRef> = Vec::new();
        let mut intern = |pin: PinRef, pins: &mut Vec<PinRef>| -> usize {
            let pin = pin.canonical();
            *index.entry(pin.clone()).or_insert_with(|| {
                pins.push(pin);
                pins.len() - 1
            })
        };

        for label in &bench.board().profile().pins {
            intern(PinRef::board(label.as_str()), &mut pins);
        }
        for (id, component) in bench.components().iter() {
            for pin in component.pins() {
                intern(PinRef::component(id, *pin), &mut pins);
            }
        }

        let mut edges: Vec<(usize, usize)> = Vec::new();
        for wire in bench.wiring().wires() {
            let a = intern(wire.start.clone(), &mut pins);
            let b = intern(wire.end.clone(), &mut pins);
            edges.push((a, b));
        }

        // Fusing can name pins a component does not list; intern those too.
        let mut fused: Vec<(PinRef, PinRef)> = Vec::new();
        for pin in pins.iter().filter(|p| !p.owner.is_board()) {
            for other in tracer.internal_connections(pin) {
                fused.push((pin.clone(), other));
            }
        }
        for (a, b) in fused {
            let a = intern(a, &mut pins);
            let b = intern(b, &mut pins);
            edges.push((a, b));
        }

        let mut sets = UnionFind::new(pins.len());
        for (a, b) in edges {
            sets.union(a, b);
        }

        let mut groups: BTreeMap<usize, Vec<&PinRef>> = BTreeMap::new();
        for (i, pin) in pins.iter().enumerate() {
            groups.entry(sets.find(i)).or_default().push(pin);
        }

        let nets = groups
            .into_values()
            .map(|members| {
                let level = tracer.pin_level(members[0]);
                NetSnapshot {
                    members: members.iter().map(|p| p.to_string()).collect(),
                    level,
                    state: LevelState::from_level(level),
                }
            })
            .collect();

        let powering_battery = tracer.powering_battery();
        Netlist {
            powered: powering_battery.is_some(),
            powering_battery,
            nets,
        }
    }

    /// The net containing `pin`, if the snapshot knows the pin.
    pub fn net_of(&self, pin: &PinRef) -> Option<&NetSnapshot> {
        self.nets.iter().find(|net| net.contains(pin))
    }
}
