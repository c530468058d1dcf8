//! Board Model
//!
//! The microcontroller board is a sentinel pseudo-component. Its pins come
//! from a static [`BoardProfile`]; its GPIO levels come from the running user
//! program, which the hardware bridge writes into [`PinStates`]. Every pin
//! label whose canonical form is `GND` belongs to one fused ground plane.

pub mod builtin;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::contract::is_driving;
use crate::pin::{is_ground_pin, normalize_board_pin};

/// Static pin description of a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardProfile {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub pins: Vec<String>,
}

impl BoardProfile {
    pub fn new<I, S>(name: impl Into<String>, pins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: None,
            pins: pins.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether any pin label on the board normalizes to the same id as `pin`.
    pub fn has_pin(&self, pin: &str) -> bool {
        let wanted = normalize_board_pin(pin);
        self.pins.iter().any(|p| normalize_board_pin(p) == wanted)
    }

    /// Every ground-labeled pin, as written in the profile.
    pub fn ground_pins(&self) -> impl Iterator<Item = &str> {
        self.pins.iter().map(String::as_str).filter(|p| is_ground_pin(p))
    }

    pub fn has_ground(&self) -> bool {
        self.ground_pins().next().is_some()
    }
}

/// Levels the simulated program is driving on board pins, keyed by label.
///
/// The tracer only ever reads this map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinStates {
    levels: HashMap<String, f64>,
}

impl PinStates {
    pub fn set(&mut self, pin: impl Into<String>, level: f64) {
        self.levels.insert(pin.into(), level);
    }

    pub fn clear(&mut self, pin: &str) -> Option<f64> {
        self.levels.remove(pin)
    }

    pub fn clear_all(&mut self) {
        self.levels.clear();
    }

    pub fn get(&self, pin: &str) -> Option<f64> {
        self.levels.get(pin).copied()
    }

    /// Driving levels of every key that normalizes to `pin`.
    pub fn driven_levels(&self, pin: &str) -> impl Iterator<Item = f64> + '_ {
        let wanted = normalize_board_pin(pin);
        self.levels
            .iter()
            .filter(move |(key, _)| normalize_board_pin(key) == wanted)
            .map(|(_, level)| *level)
            .filter(|level| is_driving(*level))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// The board sentinel: its profile plus live pin states.
#[derive(Debug, Clone)]
pub struct Board {
    profile: BoardProfile,
    pin_states: PinStates,
}

impl Board {
    pub fn new(profile: BoardProfile) -> Self {
        Self {
            profile,
            pin_states: PinStates::default(),
        }
    }

    pub fn profile(&self) -> &BoardProfile {
        &self.profile
    }

    pub fn pin_states(&self) -> &PinStates {
        &self.pin_states
    }

    pub fn pin_states_mut(&mut self) -> &mut PinStates {
        &mut self.pin_states
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_pins() {
        let profile = BoardProfile::new("t", ["GND1", "GP2", "gnd2", "AGND", "5V"]);
        let grounds: Vec<&str> = profile.ground_pins().collect();
        assert_eq!(grounds, vec!["GND1", "gnd2", "AGND"]);
        assert!(profile.has_ground());
        assert!(!BoardProfile::new("t", ["5V"]).has_ground());
    }

    #[test]
    fn test_has_pin_uses_normalization() {
        let profile = BoardProfile::new("t", ["GP2", "GND3", "vsys"]);
        assert!(profile.has_pin("D2"));
        assert!(profile.has_pin("GND"));
        assert!(profile.has_pin("VSYS"));
        assert!(!profile.has_pin("VBUS"));
    }

    #[test]
    fn test_driven_levels_match_any_label_form() {
        let mut states = PinStates::default();
        states.set("GP2", 1.0);
        states.set("D3", -1.0);
        states.set("4", 0.25);

        assert_eq!(states.driven_levels("D2").collect::<Vec<_>>(), vec![1.0]);
        assert_eq!(states.driven_levels("2").collect::<Vec<_>>(), vec![1.0]);
        // -1 means the program is not driving the pin
        assert_eq!(states.driven_levels("GP3").count(), 0);
        assert_eq!(states.driven_levels("GP4").collect::<Vec<_>>(), vec![0.25]);
    }
}
