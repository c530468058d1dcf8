//! Rail Tracing Engine
//!
//! Resolves the level at a terminal by walking its net: wires, board ground
//! fan-out, and each component's current internal connections. Every driving
//! source and ground reference on the net is collected and arbitrated into a
//! single level.
//!
//! # Architecture
//!
//! ```text
//! pin_level(pin) ──▶ Trace (per query) ──▶ power gate ──▶ net BFS ──▶ classify ──▶ resolve
//!                        │                                  │
//!                        └──── in-flight set ◀── LevelProbe ┘ (components querying other pins)
//! ```
//!
//! Nothing is cached across queries: component state may change between any
//! two frames, so each [`RailTracer::pin_level`] call recomputes from the live
//! wiring and component set.

mod power;
mod trace;

use crate::board::Board;
use crate::components::ComponentSet;
use crate::contract::LevelProbe;
use crate::core::EngineOptions;
use crate::pin::PinRef;
use crate::wiring::WiringGraph;

pub use trace::resolve_level;
use trace::Trace;

/// Read-only view over one simulation state.
///
/// The tracer holds no per-query state of its own; the in-flight guard lives
/// in a fresh [`Trace`] for each top-level call, so separate queries cannot
/// corrupt each other's guard.
#[derive(Debug, Clone, Copy)]
pub struct RailTracer<'a> {
    wiring: &'a WiringGraph,
    components: &'a ComponentSet,
    board: &'a Board,
    options: &'a EngineOptions,
}

impl<'a> RailTracer<'a> {
    pub fn new(
        wiring: &'a WiringGraph,
        components: &'a ComponentSet,
        board: &'a Board,
        options: &'a EngineOptions,
    ) -> Self {
        Self {
            wiring,
            components,
            board,
            options,
        }
    }

    /// Resolved level at `pin`: `-1` floating, `0` low, `(0, 1]` driven.
    pub fn pin_level(&self, pin: &PinRef) -> f64 {
        Trace::new(*self).resolve(pin)
    }

    /// Whether a sufficiently charged battery closes a loop through the board.
    pub fn is_board_powered(&self) -> bool {
        Trace::new(*self).power_gate()
    }

    /// Id of the battery currently powering the board, if any.
    pub fn powering_battery(&self) -> Option<String> {
        Trace::new(*self).powering_battery()
    }

    /// Every terminal on the net of `pin`, start included, in BFS order.
    pub fn trace_net(&self, pin: &PinRef) -> Vec<PinRef> {
        Trace::new(*self).net(pin)
    }

    /// Pins `pin` is fused to inside its own component right now.
    pub fn internal_connections(&self, pin: &PinRef) -> Vec<PinRef> {
        Trace::new(*self).fused_with(pin)
    }
}

/// Lets hosts evaluate sink helpers such as `Led::is_lit` outside a trace.
/// Every call is an independent top-level query.
impl LevelProbe for RailTracer<'_> {
    fn level(&mut self, pin: &PinRef) -> f64 {
        self.pin_level(pin)
    }

    fn board_powered(&mut self) -> bool {
        self.is_board_powered()
    }
}
