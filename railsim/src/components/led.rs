//! LED: a pure sink.

use crate::contract::{is_driving, Component, ElectricalContract, LevelProbe, FLOATING, LOW};
use crate::pin::PinRef;

pub const ANODE: &str = "ANODE";
pub const CATHODE: &str = "CATHODE";

const PINS: &[&str] = &[ANODE, CATHODE];

#[derive(Debug, Clone)]
pub struct Led {
    id: String,
}

impl Led {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Anode level when the cathode is grounded; 0 when dark.
    pub fn brightness(&self, probe: &mut dyn LevelProbe) -> f64 {
        let anode = probe.level(&PinRef::component(self.id.as_str(), ANODE));
        if !is_driving(anode) {
            return LOW;
        }
        if probe.level(&PinRef::component(self.id.as_str(), CATHODE)) == LOW {
            anode
        } else {
            LOW
        }
    }

    pub fn is_lit(&self, probe: &mut dyn LevelProbe) -> bool {
        self.brightness(probe) > LOW
    }
}

impl ElectricalContract for Led {
    fn internal_connections(&self, _pin: &str, _probe: &mut dyn LevelProbe) -> Vec<String> {
        Vec::new()
    }

    fn pin_output(&self, _pin: &str, _probe: &mut dyn LevelProbe) -> f64 {
        FLOATING
    }
}

impl Component for Led {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &'static str {
        "led"
    }

    fn pins(&self) -> &'static [&'static str] {
        PINS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::testing::StubProbe;

    #[test]
    fn test_lit_only_with_grounded_cathode() {
        let led = Led::new("led1");
        let mut probe = StubProbe::default()
            .with_level(PinRef::component("led1", ANODE), 0.6)
            .with_level(PinRef::component("led1", CATHODE), 0.0);
        assert_eq!(led.brightness(&mut probe), 0.6);
        assert!(led.is_lit(&mut probe));

        let mut floating_cathode = StubProbe::default().with_level(PinRef::component("led1", ANODE), 1.0);
        assert!(!led.is_lit(&mut floating_cathode));
    }
}
