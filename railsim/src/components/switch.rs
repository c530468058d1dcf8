//! Slide switch and push button.
//!
//! Both are pure gates: they fuse pins according to their position and never
//! drive a level of their own.

use crate::contract::{Actuation, Component, ElectricalContract, LevelProbe, SwitchPosition, FLOATING};
use crate::core::RailSimError;

pub const COMMON: &str = "com";
pub const SIDE_A: &str = "p1";
pub const SIDE_B: &str = "p2";

const SLIDE_PINS: &[&str] = &[COMMON, SIDE_A, SIDE_B];

/// Single-pole double-throw slide switch.
#[derive(Debug, Clone)]
pub struct SlideSwitch {
    id: String,
    position: SwitchPosition,
}

impl SlideSwitch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position: SwitchPosition::A,
        }
    }

    pub fn with_position(mut self, position: SwitchPosition) -> Self {
        self.position = position;
        self
    }

    pub fn position(&self) -> SwitchPosition {
        self.position
    }

    pub fn set_position(&mut self, position: SwitchPosition) {
        self.position = position;
    }

    pub fn toggle(&mut self) {
        self.position = self.position.flipped();
    }

    fn selected_side(&self) -> &'static str {
        match self.position {
            SwitchPosition::A => SIDE_A,
            SwitchPosition::B => SIDE_B,
        }
    }
}

impl ElectricalContract for SlideSwitch {
    fn internal_connections(&self, pin: &str, _probe: &mut dyn LevelProbe) -> Vec<String> {
        let side = self.selected_side();
        if pin == COMMON {
            vec![side.to_string()]
        } else if pin == side {
            vec![COMMON.to_string()]
        } else {
            Vec::new()
        }
    }

    fn pin_output(&self, _pin: &str, _probe: &mut dyn LevelProbe) -> f64 {
        FLOATING
    }
}

impl Component for SlideSwitch {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &'static str {
        "slide_switch"
    }

    fn pins(&self) -> &'static [&'static str] {
        SLIDE_PINS
    }

    fn actuate(&mut self, action: Actuation) -> Result<(), RailSimError> {
        match action {
            Actuation::Toggle => self.toggle(),
            Actuation::SetPosition(position) => self.set_position(position),
            other => {
                return Err(RailSimError::UnsupportedActuation {
                    component: self.id.clone(),
                    kind: self.kind(),
                    action: other.to_string(),
                })
            }
        }
        Ok(())
    }
}

pub const BUTTON_VCC: &str = "VCC";
pub const BUTTON_SIG: &str = "SIG";
pub const BUTTON_GND: &str = "GND";

const BUTTON_PINS: &[&str] = &[BUTTON_VCC, BUTTON_SIG, BUTTON_GND];

/// Momentary push button module: `SIG` is fused to `VCC` while pressed.
#[derive(Debug, Clone)]
pub struct PushButton {
    id: String,
    pressed: bool,
}

impl PushButton {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pressed: false,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }
}

impl ElectricalContract for PushButton {
    fn internal_connections(&self, pin: &str, _probe: &mut dyn LevelProbe) -> Vec<String> {
        match (self.pressed, pin) {
            (true, BUTTON_SIG) => vec![BUTTON_VCC.to_string()],
            (true, BUTTON_VCC) => vec![BUTTON_SIG.to_string()],
            _ => Vec::new(),
        }
    }

    fn pin_output(&self, _pin: &str, _probe: &mut dyn LevelProbe) -> f64 {
        FLOATING
    }
}

impl Component for PushButton {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &'static str {
        "push_button"
    }

    fn pins(&self) -> &'static [&'static str] {
        BUTTON_PINS
    }

    fn actuate(&mut self, action: Actuation) -> Result<(), RailSimError> {
        match action {
            Actuation::Press => self.pressed = true,
            Actuation::Release => self.pressed = false,
            Actuation::Toggle => self.pressed = !self.pressed,
            other => {
                return Err(RailSimError::UnsupportedActuation {
                    component: self.id.clone(),
                    kind: self.kind(),
                    action: other.to_string(),
                })
            }
        }
        Ok(())
    }
}
