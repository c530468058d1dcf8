//! Relay module.
//!
//! The contacts follow the coil input: `COM` is fused to `NO` while `IN`
//! reads above [`COIL_THRESHOLD`], otherwise to `NC`. Evaluating the coil
//! means resolving another net from inside a trace, so a relay wired back onto
//! its own input is the canonical re-entrant case.

use crate::contract::{Component, ElectricalContract, LevelProbe, FLOATING};
use crate::pin::PinRef;

pub const IN: &str = "IN";
pub const VCC: &str = "VCC";
pub const GND: &str = "GND";
pub const COM: &str = "COM";
pub const NO: &str = "NO";
pub const NC: &str = "NC";

const PINS: &[&str] = &[IN, VCC, GND, COM, NO, NC];

/// Input level that pulls the contacts in.
pub const COIL_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct Relay {
    id: String,
}

impl Relay {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn is_energized(&self, probe: &mut dyn LevelProbe) -> bool {
        probe.level(&PinRef::component(self.id.as_str(), IN)) > COIL_THRESHOLD
    }
}

impl ElectricalContract for Relay {
    fn internal_connections(&self, pin: &str, probe: &mut dyn LevelProbe) -> Vec<String> {
        if !matches!(pin, COM | NO | NC) {
            return Vec::new();
        }
        let closed = if self.is_energized(probe) { NO } else { NC };
        if pin == COM {
            vec![closed.to_string()]
        } else if pin == closed {
            vec![COM.to_string()]
        } else {
            Vec::new()
        }
    }

    fn pin_output(&self, _pin: &str, _probe: &mut dyn LevelProbe) -> f64 {
        FLOATING
    }
}

impl Component for Relay {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &'static str {
        "relay"
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
    fn test_contacts_follow_coil() {
        let relay = Relay::new("k1");
        let mut idle = StubProbe::default();
        assert_eq!(relay.internal_connections(COM, &mut idle), vec![NC]);
        assert_eq!(relay.internal_connections(NC, &mut idle), vec![COM]);
        assert!(relay.internal_connections(NO, &mut idle).is_empty());

        let mut energized = StubProbe::default().with_level(PinRef::component("k1", IN), 1.0);
        assert_eq!(relay.internal_connections(COM, &mut energized), vec![NO]);
        assert!(relay.internal_connections(NC, &mut energized).is_empty());
    }

    #[test]
    fn test_coil_pins_never_fuse() {
        let relay = Relay::new("k1");
        let mut probe = StubProbe::default().with_level(PinRef::component("k1", IN), 1.0);
        assert!(relay.internal_connections(IN, &mut probe).is_empty());
        assert!(relay.internal_connections(VCC, &mut probe).is_empty());
    }
}
