//! Rotary potentiometer wired as a voltage divider.
//!
//! A divider gates and scales but never sources, so the contract reports no
//! fusing and no output. [`Potentiometer::wiper_level`] gives the divided
//! level for hosts that feed analog reads.

use crate::contract::{is_driving, Actuation, Component, ElectricalContract, LevelProbe, FLOATING, LOW};
use crate::core::RailSimError;
use crate::pin::PinRef;

pub const VCC: &str = "VCC";
pub const WIPER: &str = "SIG";
pub const GND: &str = "GND";

const PINS: &[&str] = &[VCC, WIPER, GND];

#[derive(Debug, Clone)]
pub struct Potentiometer {
    id: String,
    ratio: f64,
}

impl Potentiometer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ratio: 0.5,
        }
    }

    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.set_ratio(ratio);
        self
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Knob position in `[0, 1]`; out-of-range values are clamped.
    pub fn set_ratio(&mut self, ratio: f64) {
        self.ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    }

    /// `ratio * level(VCC)` when the divider is supplied and grounded.
    pub fn wiper_level(&self, probe: &mut dyn LevelProbe) -> f64 {
        let supply = probe.level(&PinRef::component(self.id.as_str(), VCC));
        let ground = probe.level(&PinRef::component(self.id.as_str(), GND));
        if is_driving(supply) && ground == LOW {
            supply * self.ratio
        } else {
            FLOATING
        }
    }
}

impl ElectricalContract for Potentiometer {
    fn internal_connections(&self, _pin: &str, _probe: &mut dyn LevelProbe) -> Vec<String> {
        Vec::new()
    }

    fn pin_output(&self, _pin: &str, _probe: &mut dyn LevelProbe) -> f64 {
        FLOATING
    }
}

impl Component for Potentiometer {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &'static str {
        "potentiometer"
    }

    fn pins(&self) -> &'static [&'static str] {
        PINS
    }

    fn actuate(&mut self, action: Actuation) -> Result<(), RailSimError> {
        match action {
            Actuation::SetRatio(ratio) => {
                self.set_ratio(ratio);
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
