//! Per-query trace state: net BFS, node classification and resolution.

use std::collections::{HashMap, HashSet, VecDeque};

use super::RailTracer;
use crate::contract::{is_driving, LevelProbe, FLOATING, HIGH, LOW};
use crate::pin::{is_power_rail, Owner, PinRef};

/// What a net contributes once every member has been classified.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct NetDrive {
    driven: Option<f64>,
    grounded: bool,
}

impl NetDrive {
    fn drive(&mut self, level: f64) {
        let level = level.min(HIGH);
        self.driven = Some(self.driven.map_or(level, |d| d.max(level)));
    }
}

/// Arbitrate the sources and grounds found on one net.
///
/// The highest driven level wins. A driven level above `short_threshold` on a
/// net that also reaches ground is a dead short and collapses to `0`.
pub fn resolve_level(driven: Option<f64>, grounded: bool, short_threshold: f64) -> f64 {
    match (driven, grounded) {
        (Some(level), true) if level > short_threshold => LOW,
        (Some(level), _) => level,
        (None, true) => LOW,
        (None, false) => FLOATING,
    }
}

/// State of one top-level query.
///
/// The in-flight set lives here rather than on the tracer, and dies with the
/// query; an unwinding component cannot leave a stale entry behind.
///
/// Completed resolutions are reused for the rest of the query, so each pin
/// is resolved at most once per power context. Levels resolved while the
/// power gate is being evaluated see an unpowered board and are kept apart
/// from the others.
pub(super) struct Trace<'a> {
    tracer: RailTracer<'a>,
    in_flight: HashSet<PinRef>,
    resolved: HashMap<PinRef, f64>,
    resolved_in_gate: HashMap<PinRef, f64>,
    pub(super) gate_in_flight: bool,
    pub(super) gate_result: Option<Option<String>>,
}

impl<'a> Trace<'a> {
    pub(super) fn new(tracer: RailTracer<'a>) -> Self {
        Self {
            tracer,
            in_flight: HashSet::new(),
            resolved: HashMap::new(),
            resolved_in_gate: HashMap::new(),
            gate_in_flight: false,
            gate_result: None,
        }
    }

    pub(super) fn tracer(&self) -> RailTracer<'a> {
        self.tracer
    }

    pub(super) fn resolve(&mut self, pin: &PinRef) -> f64 {
        let key = pin.canonical();
        let in_gate = self.gate_in_flight;
        if let Some(level) = self.memo(in_gate).get(&key) {
            return *level;
        }
        if !self.in_flight.insert(key.clone()) {
            tracing::trace!("Re-entrant query for {}, reporting floating", key);
            return FLOATING;
        }

        let level = self.resolve_net(&key);

        self.in_flight.remove(&key);
        self.memo_mut(in_gate).insert(key, level);
        level
    }

    fn memo(&self, in_gate: bool) -> &HashMap<PinRef, f64> {
        if in_gate {
            &self.resolved_in_gate
        } else {
            &self.resolved
        }
    }

    fn memo_mut(&mut self, in_gate: bool) -> &mut HashMap<PinRef, f64> {
        if in_gate {
            &mut self.resolved_in_gate
        } else {
            &mut self.resolved
        }
    }

    fn resolve_net(&mut self, start: &PinRef) -> f64 {
        let powered = self.power_gate();
        let net = self.net(start);

        let mut drive = NetDrive::default();
        for node in &net {
            self.classify(node, powered, &mut drive);
        }

        let level = resolve_level(
            drive.driven,
            drive.grounded,
            self.tracer.options.short_circuit_threshold,
        );
        tracing::debug!(
            "{} resolved to {} (net of {}, driven {:?}, grounded {}, powered {})",
            start,
            level,
            net.len(),
            drive.driven,
            drive.grounded,
            powered
        );
        level
    }

    fn classify(&mut self, node: &PinRef, powered: bool, drive: &mut NetDrive) {
        match &node.owner {
            Owner::Board => {
                if powered && node.is_board_ground() {
                    drive.grounded = true;
                }
                if powered && is_power_rail(&node.pin) {
                    drive.drive(HIGH);
                }
                // Program-driven levels apply whether or not the board is powered
                for level in self.tracer.board.pin_states().driven_levels(&node.pin) {
                    drive.drive(level);
                }
            }
            Owner::Component(id) => {
                let components = self.tracer.components;
                let Some(component) = components.get(id) else {
                    return;
                };

                if let Some(source) = component.power_source() {
                    if node.pin == source.positive_terminal() {
                        drive.drive(HIGH);
                        return;
                    }
                    if node.pin == source.negative_terminal() {
                        drive.grounded = true;
                        return;
                    }
                }

                let output = component.pin_output(&node.pin, self);
                if is_driving(output) {
                    tracing::trace!("{} drives {}", node, output);
                    drive.drive(output);
                }
            }
        }
    }

    /// Breadth-first walk of the net containing `start`.
    pub(super) fn net(&mut self, start: &PinRef) -> Vec<PinRef> {
        let start = start.canonical();
        let mut visited: HashSet<PinRef> = HashSet::new();
        let mut queue = VecDeque::new();
        let mut net = Vec::new();

        visited.insert(start.clone());
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            let mut next = self.tracer.wiring.neighbors(&node);

            if node.is_board_ground() {
                next.extend(self.tracer.board.profile().ground_pins().map(PinRef::board));
            } else if !node.owner.is_board() {
                next.extend(self.fused_with(&node));
            }

            for pin in next {
                let pin = pin.canonical();
                if visited.insert(pin.clone()) {
                    queue.push_back(pin);
                }
            }
            net.push(node);
        }

        net
    }

    /// Sibling pins fused to `pin` inside its component; empty for board pins
    /// and unknown components.
    pub(super) fn fused_with(&mut self, pin: &PinRef) -> Vec<PinRef> {
        let Owner::Component(id) = &pin.owner else {
            return Vec::new();
        };
        let components = self.tracer.components;
        let Some(component) = components.get(id) else {
            return Vec::new();
        };
        component
            .internal_connections(&pin.pin, self)
            .into_iter()
            .map(|other| PinRef::component(id.as_str(), other))
            .collect()
    }
}

impl LevelProbe for Trace<'_> {
    fn level(&mut self, pin: &PinRef) -> f64 {
        self.resolve(pin)
    }

    fn board_powered(&mut self) -> bool {
        self.power_gate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_table() {
        assert_eq!(resolve_level(None, false, 0.1), FLOATING);
        assert_eq!(resolve_level(None, true, 0.1), LOW);
        assert_eq!(resolve_level(Some(0.7), false, 0.1), 0.7);
        assert_eq!(resolve_level(Some(1.0), true, 0.1), LOW);
    }

    #[test]
    fn test_low_source_on_ground_is_not_a_short() {
        assert_eq!(resolve_level(Some(0.05), true, 0.1), 0.05);
        assert_eq!(resolve_level(Some(0.1), true, 0.1), 0.1);
        assert_eq!(resolve_level(Some(LOW), true, 0.1), LOW);
    }

    #[test]
    fn test_max_wins() {
        let mut drive = NetDrive::default();
        drive.drive(0.3);
        drive.drive(1.0);
        drive.drive(0.0);
        assert_eq!(drive.driven, Some(1.0));

        let mut drive = NetDrive::default();
        drive.drive(4.0);
        assert_eq!(drive.driven, Some(HIGH));
    }
}
