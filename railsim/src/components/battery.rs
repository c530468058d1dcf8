//! Battery pack: the only power source the board recognizes.

use crate::contract::{Actuation, Component, ElectricalContract, LevelProbe, PowerSource, FLOATING, HIGH};
use crate::core::RailSimError;

pub const POSITIVE: &str = "POS";
pub const NEGATIVE: &str = "NEG";

/// Voltage assumed when a project omits it.
pub const DEFAULT_VOLTAGE: f64 = 4.5;

const PINS: &[&str] = &[POSITIVE, NEGATIVE];

#[derive(Debug, Clone)]
pub struct Battery {
    id: String,
    voltage: f64,
}

impl Battery {
    pub fn new(id: impl Into<String>, voltage: f64) -> Self {
        let mut battery = Self {
            id: id.into(),
            voltage: 0.0,
        };
        battery.set_voltage(voltage);
        battery
    }

    /// Non-finite or negative voltages are stored as a flat `0`.
    pub fn set_voltage(&mut self, voltage: f64) {
        self.voltage = if voltage.is_finite() { voltage.max(0.0) } else { 0.0 };
    }
}

impl PowerSource for Battery {
    fn positive_terminal(&self) -> &str {
        POSITIVE
    }

    fn negative_terminal(&self) -> &str {
        NEGATIVE
    }

    fn voltage(&self) -> f64 {
        self.voltage
    }
}

impl ElectricalContract for Battery {
    fn internal_connections(&self, _pin: &str, _probe: &mut dyn LevelProbe) -> Vec<String> {
        Vec::new()
    }

    // NEG is a ground reference, reported through `power_source`, not as a level.
    fn pin_output(&self, pin: &str, _probe: &mut dyn LevelProbe) -> f64 {
        if pin == POSITIVE {
            HIGH
        } else {
            FLOATING
        }
    }

    fn power_source(&self) -> Option<&dyn PowerSource> {
        Some(self)
    }
}

impl Component for Battery {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &'static str {
        "battery"
    }

    fn pins(&self) -> &'static [&'static str] {
        PINS
    }

    fn actuate(&mut self, action: Actuation) -> Result<(), RailSimError> {
        match action {
            Actuation::SetVoltage(v) if v.is_finite() && v >= 0.0 => {
                self.set_voltage(v);
                Ok(())
            }
            Actuation::SetVoltage(v) => Err(RailSimError::BadActuation(format!(
                "battery voltage must be non-negative, got {}",
                v
            ))),
            other => Err(RailSimError::UnsupportedActuation {
                component: self.id.clone(),
                kind: self.kind(),
                action: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::testing::StubProbe;

    #[test]
    fn test_terminals() {
        let battery = Battery::new("bat1", 3.0);
        let mut probe = StubProbe::default();
        assert_eq!(battery.pin_output(POSITIVE, &mut probe), HIGH);
        assert_eq!(battery.pin_output(NEGATIVE, &mut probe), FLOATING);
        assert!(battery.internal_connections(POSITIVE, &mut probe).is_empty());

        let source = battery.power_source().expect("battery is a power source");
        assert_eq!(source.positive_terminal(), "POS");
        assert_eq!(source.negative_terminal(), "NEG");
        assert_eq!(source.voltage(), 3.0);
    }

    #[test]
    fn test_set_voltage() {
        let mut battery = Battery::new("bat1", 3.0);
        battery.actuate(Actuation::SetVoltage(1.5)).unwrap();
        assert_eq!(battery.voltage(), 1.5);
        assert!(matches!(
            battery.actuate(Actuation::SetVoltage(-2.0)),
            Err(RailSimError::BadActuation(_))
        ));
        assert!(battery.actuate(Actuation::Toggle).is_err());
    }

    #[test]
    fn test_non_finite_voltage_is_flat() {
        assert_eq!(Battery::new("bat1", f64::NAN).voltage(), 0.0);
        assert_eq!(Battery::new("bat1", f64::INFINITY).voltage(), 0.0);

        let mut battery = Battery::new("bat1", 5.0);
        battery.set_voltage(-3.0);
        assert_eq!(battery.voltage(), 0.0);
    }
}
