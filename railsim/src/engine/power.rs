//! Board Power Gate
//!
//! The board is powered only when one battery, at or above the minimum
//! operating voltage, has its positive terminal on the net of a board power
//! input and its negative terminal on the net of the board ground. Plus and
//! minus must belong to the same battery. There is no USB/host power path.

use std::collections::HashSet;

use super::trace::Trace;
use crate::pin::{PinRef, GROUND, POWER_INPUTS};

impl Trace<'_> {
    /// Evaluate the gate. Re-entrant evaluation answers `false`.
    pub(super) fn power_gate(&mut self) -> bool {
        self.powering_battery().is_some()
    }

    /// Evaluated at most once per query; the answer is reused afterwards.
    pub(super) fn powering_battery(&mut self) -> Option<String> {
        if let Some(battery) = &self.gate_result {
            return battery.clone();
        }
        if self.gate_in_flight {
            return None;
        }
        self.gate_in_flight = true;
        let battery = self.find_powering_battery();
        self.gate_in_flight = false;
        self.gate_result = Some(battery.clone());
        battery
    }

    fn find_powering_battery(&mut self) -> Option<String> {
        let tracer = self.tracer();
        let profile = tracer.board.profile();

        if !profile.has_ground() {
            return None;
        }

        let mut supply_net: HashSet<PinRef> = HashSet::new();
        for input in POWER_INPUTS.iter().filter(|input| profile.has_pin(input)) {
            let start = PinRef::board(*input);
            if supply_net.contains(&start) {
                continue;
            }
            supply_net.extend(self.net(&start));
        }
        if supply_net.is_empty() {
            return None;
        }

        let ground_net: HashSet<PinRef> = self.net(&PinRef::board(GROUND)).into_iter().collect();

        for (id, component) in tracer.components.iter() {
            let Some(source) = component.power_source() else {
                continue;
            };
            let voltage = source.voltage();
            if !voltage.is_finite() || voltage < tracer.options.min_battery_voltage {
                tracing::trace!(
                    "Battery {} at {} V is below the {} V operating threshold",
                    id,
                    voltage,
                    tracer.options.min_battery_voltage
                );
                continue;
            }

            let positive = PinRef::component(id, source.positive_terminal());
            let negative = PinRef::component(id, source.negative_terminal());
            if supply_net.contains(&positive) && ground_net.contains(&negative) {
                tracing::trace!("Board powered by {}", id);
                return Some(id.to_string());
            }
        }

        None
    }
}
