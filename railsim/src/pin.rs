//! Pin identity and board pin normalization
//!
//! A terminal is addressed by a [`PinRef`]: the owning component (or the
//! board sentinel) plus a pin id. Board pin labels arrive inconsistently
//! cased and prefixed (`GND`, `GND1`, `gnd`, `GP2`, `D2`), so every board pin
//! is compared through [`normalize_board_pin`]. Component pins are compared
//! verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a placed component.
pub type ComponentId = String;

/// Owner string that names the board in `owner:pin` endpoint notation.
pub const BOARD_SENTINEL: &str = "board";

/// Canonical id shared by every board ground pin.
pub const GROUND: &str = "GND";

/// Board pins that drive a full level whenever the board is powered.
pub const POWER_RAILS: &[&str] = &["3V3", "3V3_OUT", "5V", "VCC", "AVDD", "VBUS", "VIN", "VSYS"];

/// Board pins through which a battery can power the board.
pub const POWER_INPUTS: &[&str] = &["VIN", "VSYS", "VBUS", "5V", "3V3"];

/// The owner of a terminal: the board itself or a placed component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Owner {
    Board,
    Component(ComponentId),
}

impl Owner {
    pub fn component(id: impl Into<ComponentId>) -> Self {
        Owner::Component(id.into())
    }

    pub fn is_board(&self) -> bool {
        matches!(self, Owner::Board)
    }

    pub fn component_id(&self) -> Option<&str> {
        match self {
            Owner::Component(id) => Some(id),
            Owner::Board => None,
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Board => f.write_str(BOARD_SENTINEL),
            Owner::Component(id) => f.write_str(id),
        }
    }
}

/// One electrical terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PinRef {
    pub owner: Owner,
    pub pin: String,
}

impl PinRef {
    pub fn new(owner: Owner, pin: impl Into<String>) -> Self {
        Self {
            owner,
            pin: pin.into(),
        }
    }

    pub fn board(pin: impl Into<String>) -> Self {
        Self::new(Owner::Board, pin)
    }

    pub fn component(id: impl Into<ComponentId>, pin: impl Into<String>) -> Self {
        Self::new(Owner::component(id), pin)
    }

    /// The same terminal with its pin id in canonical form.
    ///
    /// Board pins are normalized; component pins are returned untouched.
    pub fn canonical(&self) -> PinRef {
        match self.owner {
            Owner::Board => PinRef::board(normalize_board_pin(&self.pin)),
            Owner::Component(_) => self.clone(),
        }
    }

    /// Whether two references name the same terminal.
    pub fn same_terminal(&self, other: &PinRef) -> bool {
        match (&self.owner, &other.owner) {
            (Owner::Board, Owner::Board) => {
                normalize_board_pin(&self.pin) == normalize_board_pin(&other.pin)
            }
            (Owner::Component(a), Owner::Component(b)) => a == b && self.pin == other.pin,
            _ => false,
        }
    }

    /// Whether this is a board ground pin.
    pub fn is_board_ground(&self) -> bool {
        self.owner.is_board() && is_ground_pin(&self.pin)
    }

    /// Parse `owner:pin` notation, where `board` names the board sentinel.
    pub fn parse(text: &str) -> Option<PinRef> {
        let (owner, pin) = text.rsplit_once(':')?;
        let (owner, pin) = (owner.trim(), pin.trim());
        if owner.is_empty() || pin.is_empty() {
            return None;
        }
        if owner.eq_ignore_ascii_case(BOARD_SENTINEL) {
            Some(PinRef::board(pin))
        } else {
            Some(PinRef::component(owner, pin))
        }
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.owner, self.pin)
    }
}

/// Canonical form of a board pin label.
///
/// - anything starting with `GND`, or exactly `AGND` → `GND`
/// - `D<n>` / `GP<n>` → `<n>`
/// - everything else, power rails included → uppercased as-is
pub fn normalize_board_pin(pin: &str) -> String {
    let upper = pin.to_ascii_uppercase();

    if upper.starts_with(GROUND) || upper == "AGND" {
        return GROUND.to_string();
    }

    for prefix in ["GP", "D"] {
        if let Some(digits) = upper.strip_prefix(prefix) {
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return digits.to_string();
            }
        }
    }

    upper
}

/// Whether a board pin label names a ground pin.
pub fn is_ground_pin(pin: &str) -> bool {
    normalize_board_pin(pin) == GROUND
}

/// Whether a board pin label names a rail that is live whenever the board is powered.
pub fn is_power_rail(pin: &str) -> bool {
    let normalized = normalize_board_pin(pin);
    POWER_RAILS.contains(&normalized.as_str())
}
