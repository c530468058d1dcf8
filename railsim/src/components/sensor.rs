//! Analog sensor module (light, temperature, soil moisture...).
//!
//! The sensor never fuses pins; it only sources its reading on `SIG`, and
//! only while its supply pins see power and ground.

use crate::contract::{Actuation, Component, ElectricalContract, LevelProbe, FLOATING, LOW};
use crate::core::RailSimError;
use crate::pin::PinRef;

pub const VCC: &str = "VCC";
pub const SIG: &str = "SIG";
pub const GND: &str = "GND";

const PINS: &[&str] = &[VCC, SIG, GND];

/// Supply level below which the sensor is considered unpowered.
const MIN_SUPPLY_LEVEL: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct AnalogSensor {
    id: String,
    reading: f64,
}

impl AnalogSensor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reading: 0.0,
        }
    }

    pub fn with_reading(mut self, reading: f64) -> Self {
        self.set_reading(reading);
        self
    }

    pub fn reading(&self) -> f64 {
        self.reading
    }

    /// Normalized reading in `[0, 1]`.
    pub fn set_reading(&mut self, reading: f64) {
        self.reading = if reading.is_finite() { reading.clamp(0.0, 1.0) } else { 0.0 };
    }

    fn is_supplied(&self, probe: &mut dyn LevelProbe) -> bool {
        let supply = probe.level(&PinRef::component(self.id.as_str(), VCC));
        if supply <= MIN_SUPPLY_LEVEL {
            return false;
        }
        probe.level(&PinRef::component(self.id.as_str(), GND)) == LOW
    }
}

impl ElectricalContract for AnalogSensor {
    fn internal_connections(&self, _pin: &str, _probe: &mut dyn LevelProbe) -> Vec<String> {
        Vec::new()
    }

    fn pin_output(&self, pin: &str, probe: &mut dyn LevelProbe) -> f64 {
        if pin == SIG && self.is_supplied(probe) {
            self.reading
        } else {
            FLOATING
        }
    }
}

impl Component for AnalogSensor {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &'static str {
        "analog_sensor"
    }

    fn pins(&self) -> &'static [&'static str] {
        PINS
    }

    fn actuate(&mut self, action: Actuation) -> Result<(), RailSimError> {
        match action {
            Actuation::SetLevel(level) => {
                self.set_reading(level);
                Ok(())
            }
            other => Err(RailSimError::UnsupportedActuation {
                component: self.id.clone(),
                kind: self.kind(),
                action: other.to_string(),
            }),
        }
    }
}
