//! Reference Components
//!
//! Small parts implementing the electrical contract, plus the
//! [`ComponentSet`] that owns them and the serde-facing [`ComponentSpec`]
//! used by project files.
//!
//! | kind | pins | fusing | output |
//! |------|------|--------|--------|
//! | `battery` | `POS`, `NEG` | none | `POS` drives 1, `NEG` is a ground reference |
//! | `slide_switch` | `com`, `p1`, `p2` | `com` to the selected side | none |
//! | `push_button` | `VCC`, `SIG`, `GND` | `SIG` to `VCC` while pressed | none |
//! | `potentiometer` | `VCC`, `SIG`, `GND` | none | none (divider) |
//! | `analog_sensor` | `VCC`, `SIG`, `GND` | none | `SIG` = reading while supplied |
//! | `led` | `ANODE`, `CATHODE` | none | none (sink) |
//! | `relay` | `IN`, `VCC`, `GND`, `COM`, `NO`, `NC` | `COM` to `NO` while `IN` is high, else `NC` | none |

pub mod battery;
pub mod led;
pub mod potentiometer;
pub mod relay;
pub mod sensor;
pub mod switch;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::contract::{Component, SwitchPosition};
use crate::core::RailSimError;

pub use battery::Battery;
pub use led::Led;
pub use potentiometer::Potentiometer;
pub use relay::Relay;
pub use sensor::AnalogSensor;
pub use switch::{PushButton, SlideSwitch};

/// The live component collection, keyed by id.
#[derive(Debug, Default)]
pub struct ComponentSet {
    parts: BTreeMap<String, Box<dyn Component>>,
}

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, component: Box<dyn Component>) -> Result<(), RailSimError> {
        let id = component.id().to_string();
        if self.parts.contains_key(&id) {
            return Err(RailSimError::DuplicateComponent(id));
        }
        self.parts.insert(id, component);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Option<Box<dyn Component>> {
        self.parts.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&dyn Component> {
        self.parts.get(id).map(|c| &**c)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut (dyn Component + 'static)> {
        self.parts.get_mut(id).map(|c| &mut **c)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.parts.contains_key(id)
    }

    /// Components in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &(dyn Component + 'static))> {
        self.parts.iter().map(|(id, c)| (id.as_str(), &**c))
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

fn default_battery_voltage() -> f64 {
    battery::DEFAULT_VOLTAGE
}

fn default_ratio() -> f64 {
    0.5
}

/// A component as written in a project file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentSpec {
    Battery {
        id: String,
        #[serde(default = "default_battery_voltage")]
        voltage: f64,
    },
    SlideSwitch {
        id: String,
        #[serde(default)]
        position: SwitchPosition,
    },
    PushButton {
        id: String,
        #[serde(default)]
        pressed: bool,
    },
    Potentiometer {
        id: String,
        #[serde(default = "default_ratio")]
        ratio: f64,
    },
    AnalogSensor {
        id: String,
        #[serde(default)]
        reading: f64,
    },
    Led {
        id: String,
    },
    Relay {
        id: String,
    },
}

impl ComponentSpec {
    pub fn id(&self) -> &str {
        match self {
            ComponentSpec::Battery { id, .. }
            | ComponentSpec::SlideSwitch { id, .. }
            | ComponentSpec::PushButton { id, .. }
            | ComponentSpec::Potentiometer { id, .. }
            | ComponentSpec::AnalogSensor { id, .. }
            | ComponentSpec::Led { id }
            | ComponentSpec::Relay { id } => id,
        }
    }

    /// Instantiate the described component.
    pub fn build(self) -> Box<dyn Component> {
        match self {
            ComponentSpec::Battery { id, voltage } => Box::new(Battery::new(id, voltage)),
            ComponentSpec::SlideSwitch { id, position } => {
                Box::new(SlideSwitch::new(id).with_position(position))
            }
            ComponentSpec::PushButton { id, pressed } => {
                let mut button = PushButton::new(id);
                button.set_pressed(pressed);
                Box::new(button)
            }
            ComponentSpec::Potentiometer { id, ratio } => {
                Box::new(Potentiometer::new(id).with_ratio(ratio))
            }
            ComponentSpec::AnalogSensor { id, reading } => {
                Box::new(AnalogSensor::new(id).with_reading(reading))
            }
            ComponentSpec::Led { id } => Box::new(Led::new(id)),
            ComponentSpec::Relay { id } => Box::new(Relay::new(id)),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_spec_defaults() {
        let spec: ComponentSpec = serde_json::from_str(r#"{"kind": "battery", "id": "bat1"}"#).unwrap();
        assert_eq!(
            spec,
            ComponentSpec::Battery {
                id: "bat1".to_string(),
                voltage: battery::DEFAULT_VOLTAGE
            }
        );

        let spec: ComponentSpec =
            serde_json::from_str(r#"{"kind": "slide_switch", "id": "sw1", "position": "b"}"#).unwrap();
        let component = spec.build();
        assert_eq!(component.kind(), "slide_switch");
        assert_eq!(component.id(), "sw1");
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let result = serde_json::from_str::<ComponentSpec>(r#"{"kind": "flux_capacitor", "id": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_set_rejects_duplicates() {
        let mut set = ComponentSet::new();
        set.insert(Box::new(Led::new("led1"))).unwrap();
        assert!(matches!(
            set.insert(Box::new(Relay::new("led1"))),
            Err(RailSimError::DuplicateComponent(_))
        ));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("led1").map(|c| c.kind()), Some("led"));
    }

    #[test]
    fn test_iteration_is_ordered_by_id() {
        let mut set = ComponentSet::new();
        set.insert(Box::new(Led::new("b"))).unwrap();
        set.insert(Box::new(Led::new("a"))).unwrap();
        set.insert(Box::new(Led::new("c"))).unwrap();
        let ids: Vec<&str> = set.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
