//! RailSim - voltage-rail tracing for a virtual breadboard
//!
//! This library resolves the electrical level seen at any terminal of a
//! simulated microcontroller circuit: components wired to a board, some of
//! them fusing pins internally (switches, buttons, relays), some sourcing
//! levels (batteries, sensors, GPIO pins driven by the running program).
//!
//! # Quick Start
//!
//! ```
//! use railsim::prelude::*;
//!
//! let mut bench = Workbench::new(BoardProfile::new("demo", ["GND", "5V", "GP2"]));
//! bench.place(Box::new(Battery::new("bat", 5.0))).unwrap();
//! bench.place(Box::new(PushButton::new("btn"))).unwrap();
//! bench.connect(PinRef::board("5V"), PinRef::component("bat", "POS")).unwrap();
//! bench.connect(PinRef::board("GND"), PinRef::component("bat", "NEG")).unwrap();
//! bench.connect(PinRef::board("GP2"), PinRef::component("btn", "VCC")).unwrap();
//! bench.board_mut().pin_states_mut().set("GP2", 1.0);
//!
//! bench.actuate("btn", Actuation::Press).unwrap();
//! assert_eq!(bench.pin_level(&PinRef::component("btn", "SIG")), 1.0);
//! ```
//!
//! # Levels
//!
//! - `-1` floating: nothing drives the net and it reaches no ground
//! - `0` low: grounded, actively driven low, or shorted
//! - `(0, 1]` driven, fractional values allowed

pub mod board;
pub mod components;
pub mod contract;
pub mod core;
pub mod engine;
pub mod netlist;
pub mod pin;
pub mod project;
pub mod wiring;

// Re-export main types
pub use board::{Board, BoardProfile, PinStates};
pub use components::{ComponentSet, ComponentSpec};
pub use contract::{
    Actuation, Component, ElectricalContract, LevelProbe, LevelState, PowerSource, SwitchPosition,
    FLOATING, HIGH, LOW,
};
pub use core::{EngineOptions, RailSimError, Workbench};
pub use engine::RailTracer;
pub use netlist::{NetSnapshot, Netlist};
pub use pin::{normalize_board_pin, Owner, PinRef};
pub use project::Project;
pub use wiring::{Wire, WireId, WiringGraph};

/// Load a project file into a workbench (convenience wrapper).
pub fn load_project(path: &std::path::Path) -> Result<Workbench, RailSimError> {
    Workbench::load(path)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::components::{AnalogSensor, Battery, Led, Potentiometer, PushButton, Relay, SlideSwitch};
    pub use crate::{
        Actuation, BoardProfile, Component, EngineOptions, Netlist, PinRef, RailSimError, RailTracer,
        Workbench, FLOATING, HIGH, LOW,
    };
}
