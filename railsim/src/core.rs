//! Core workbench shared by hosts and the CLI.
//!
//! The [`Workbench`] owns everything the tracer reads: the board, the placed
//! components, and the wiring graph. All mutation goes through `&mut
//! Workbench` between queries; a [`RailTracer`] only ever borrows it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardProfile};
use crate::components::ComponentSet;
use crate::contract::{Actuation, Component};
use crate::engine::RailTracer;
use crate::pin::{Owner, PinRef, BOARD_SENTINEL};
use crate::project::Project;
use crate::wiring::{Wire, WireId, WiringGraph};

#[derive(Debug, thiserror::Error)]
pub enum RailSimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown board profile: {0}")]
    UnknownBoard(String),
    #[error("Unknown component: {0}")]
    UnknownComponent(String),
    #[error("Duplicate component id: {0}")]
    DuplicateComponent(String),
    #[error("Component id '{0}' is reserved for the board")]
    ReservedId(String),
    #[error("Wire would connect {0} to itself")]
    SelfLoop(String),
    #[error("Malformed wire endpoint '{0}', expected OWNER:PIN")]
    BadEndpoint(String),
    #[error("{kind} '{component}' does not support '{action}'")]
    UnsupportedActuation {
        component: String,
        kind: &'static str,
        action: String,
    },
    #[error("Invalid actuation: {0}")]
    BadActuation(String),
}

/// Tunables of the level resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// A driven level above this, tied to a ground reference, collapses to 0.
    pub short_circuit_threshold: f64,
    /// Minimum voltage for a battery to power the board.
    pub min_battery_voltage: f64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            short_circuit_threshold: 0.1,
            min_battery_voltage: 2.5,
        }
    }
}

/// A board, its placed components and the wires between them.
#[derive(Debug)]
pub struct Workbench {
    board: Board,
    components: ComponentSet,
    wiring: WiringGraph,
    options: EngineOptions,
}

impl Workbench {
    pub fn new(profile: BoardProfile) -> Self {
        Self::with_options(profile, EngineOptions::default())
    }

    pub fn with_options(profile: BoardProfile, options: EngineOptions) -> Self {
        Self {
            board: Board::new(profile),
            components: ComponentSet::new(),
            wiring: WiringGraph::new(),
            options,
        }
    }

    /// Build a workbench from a parsed project.
    pub fn from_project(project: Project) -> Result<Self, RailSimError> {
        let profile = project.board.resolve()?;
        let mut bench = Self::with_options(profile, project.options);

        for spec in project.components {
            bench.place(spec.build())?;
        }

        for wire in project.wires {
            let start = PinRef::parse(&wire.from)
                .ok_or_else(|| RailSimError::BadEndpoint(wire.from.clone()))?;
            let end = PinRef::parse(&wire.to)
                .ok_or_else(|| RailSimError::BadEndpoint(wire.to.clone()))?;
            bench.connect_routed(start, end, wire.route)?;
        }

        for (pin, level) in project.pin_states {
            bench.board.pin_states_mut().set(pin, level);
        }

        tracing::debug!(
            "Loaded project {:?}: {} components, {} wires on board {}",
            project.name,
            bench.components.len(),
            bench.wiring.len(),
            bench.board.profile().name
        );

        Ok(bench)
    }

    /// Load and build a project file.
    pub fn load(path: &Path) -> Result<Self, RailSimError> {
        Self::from_project(Project::load(path)?)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access, used by the hardware bridge to write pin states.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn components(&self) -> &ComponentSet {
        &self.components
    }

    pub fn wiring(&self) -> &WiringGraph {
        &self.wiring
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Place a component on the workbench.
    pub fn place(&mut self, component: Box<dyn Component>) -> Result<(), RailSimError> {
        if component.id().eq_ignore_ascii_case(BOARD_SENTINEL) {
            return Err(RailSimError::ReservedId(component.id().to_string()));
        }
        self.components.insert(component)
    }

    /// Remove a component together with every wire touching it.
    pub fn remove_component(&mut self, id: &str) -> Result<Box<dyn Component>, RailSimError> {
        let component = self
            .components
            .remove(id)
            .ok_or_else(|| RailSimError::UnknownComponent(id.to_string()))?;
        let dropped = self.wiring.remove_owner(&Owner::component(id));
        tracing::debug!("Removed component {} and {} wires", id, dropped);
        Ok(component)
    }

    /// Wire two terminals together.
    pub fn connect(&mut self, start: PinRef, end: PinRef) -> Result<WireId, RailSimError> {
        self.connect_routed(start, end, Vec::new())
    }

    /// Wire two terminals together, keeping cosmetic routing points.
    pub fn connect_routed(
        &mut self,
        start: PinRef,
        end: PinRef,
        route: Vec<crate::wiring::RoutePoint>,
    ) -> Result<WireId, RailSimError> {
        self.check_endpoint(&start)?;
        self.check_endpoint(&end)?;
        self.wiring.connect_routed(start, end, route)
    }

    pub fn disconnect(&mut self, wire: WireId) -> Option<Wire> {
        self.wiring.disconnect(wire)
    }

    /// Apply an external state change to a component.
    pub fn actuate(&mut self, id: &str, action: Actuation) -> Result<(), RailSimError> {
        let component = self
            .components
            .get_mut(id)
            .ok_or_else(|| RailSimError::UnknownComponent(id.to_string()))?;
        tracing::debug!("Actuating {} ({}) with {}", id, component.kind(), action);
        component.actuate(action)
    }

    /// A tracer over the current state.
    pub fn tracer(&self) -> RailTracer<'_> {
        RailTracer::new(&self.wiring, &self.components, &self.board, &self.options)
    }

    /// Resolved level at a terminal right now.
    pub fn pin_level(&self, pin: &PinRef) -> f64 {
        self.tracer().pin_level(pin)
    }

    pub fn is_board_powered(&self) -> bool {
        self.tracer().is_board_powered()
    }

    fn check_endpoint(&self, pin: &PinRef) -> Result<(), RailSimError> {
        match &pin.owner {
            Owner::Board => {
                if !self.board.profile().has_pin(&pin.pin) {
                    tracing::warn!("Wire endpoint {} is not a pin of board {}", pin, self.board.profile().name);
                }
            }
            Owner::Component(id) => {
                let component = self
                    .components
                    .get(id)
                    .ok_or_else(|| RailSimError::UnknownComponent(id.clone()))?;
                if !component.pins().contains(&pin.pin.as_str()) {
                    tracing::warn!("Wire endpoint {} is not a pin of {} '{}'", pin, component.kind(), id);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Battery, PushButton};

    fn bench() -> Workbench {
        let mut bench = Workbench::new(BoardProfile::new("test", ["GND", "5V", "GP2"]));
        bench.place(Box::new(Battery::new("bat1", 5.0))).unwrap();
        bench.place(Box::new(PushButton::new("btn1"))).unwrap();
        bench
    }

    #[test]
    fn test_default_options() {
        let options = EngineOptions::default();
        assert_eq!(options.short_circuit_threshold, 0.1);
        assert_eq!(options.min_battery_voltage, 2.5);
    }

    #[test]
    fn test_partial_options_fill_defaults() {
        let options: EngineOptions = serde_json::from_str(r#"{"min_battery_voltage": 3.0}"#).unwrap();
        assert_eq!(options.min_battery_voltage, 3.0);
        assert_eq!(options.short_circuit_threshold, 0.1);
    }

    #[test]
    fn test_reserved_and_duplicate_ids() {
        let mut bench = bench();
        assert!(matches!(
            bench.place(Box::new(Battery::new("board", 5.0))),
            Err(RailSimError::ReservedId(_))
        ));
        assert!(matches!(
            bench.place(Box::new(Battery::new("bat1", 9.0))),
            Err(RailSimError::DuplicateComponent(_))
        ));
    }

    #[test]
    fn test_connect_rejects_unknown_component() {
        let mut bench = bench();
        let result = bench.connect(PinRef::board("5V"), PinRef::component("ghost", "VCC"));
        assert!(matches!(result, Err(RailSimError::UnknownComponent(id)) if id == "ghost"));
    }

    #[test]
    fn test_remove_component_drops_its_wires() {
        let mut bench = bench();
        bench.connect(PinRef::board("5V"), PinRef::component("bat1", "POS")).unwrap();
        bench.connect(PinRef::board("GND"), PinRef::component("bat1", "NEG")).unwrap();
        bench.connect(PinRef::board("GP2"), PinRef::component("btn1", "VCC")).unwrap();
        assert!(bench.is_board_powered());

        bench.remove_component("bat1").unwrap();
        assert_eq!(bench.wiring().len(), 1);
        assert!(!bench.is_board_powered());
        assert!(matches!(
            bench.remove_component("bat1"),
            Err(RailSimError::UnknownComponent(_))
        ));
    }

    #[test]
    fn test_actuate_unknown_component() {
        let mut bench = bench();
        assert!(matches!(
            bench.actuate("nope", Actuation::Press),
            Err(RailSimError::UnknownComponent(_))
        ));
        assert!(bench.actuate("btn1", Actuation::Press).is_ok());
        assert!(matches!(
            bench.actuate("bat1", Actuation::Press),
            Err(RailSimError::UnsupportedActuation { kind: "battery", .. })
        ));
    }
}
