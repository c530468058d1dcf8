//! Component Electrical Contract
//!
//! Every simulated part answers two read-only questions about its current
//! state: which of its pins are fused together right now, and what level it
//! actively drives out of a pin. Battery-like parts additionally expose the
//! narrow [`PowerSource`] capability, which the tracer uses to find ground
//! references and to evaluate the board power gate.
//!
//! Levels are plain `f64`s: [`FLOATING`] (`-1`) means not driving, `0` is
//! actively low, and `(0, 1]` is a driven level, fractional values included.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::core::RailSimError;
use crate::pin::PinRef;

/// Not driving / nothing reachable.
pub const FLOATING: f64 = -1.0;
/// Actively low, or grounded.
pub const LOW: f64 = 0.0;
/// Full driven level.
pub const HIGH: f64 = 1.0;

/// Whether a reported level actively drives the net.
pub fn is_driving(level: f64) -> bool {
    level.is_finite() && level >= LOW
}

/// Read access to resolved levels from inside a trace.
///
/// Components whose fusing or output depends on a sensed level (a relay
/// coil, a sensor's supply) query through this handle, so that re-entrant
/// queries hit the same in-flight guard as the outer trace.
pub trait LevelProbe {
    /// Resolved level at `pin`; re-entrant queries answer [`FLOATING`].
    fn level(&mut self, pin: &PinRef) -> f64;

    /// Whether the board power gate is closed.
    fn board_powered(&mut self) -> bool;
}

/// A battery-like part that can power the board.
pub trait PowerSource {
    fn positive_terminal(&self) -> &str;
    fn negative_terminal(&self) -> &str;
    fn voltage(&self) -> f64;
}

/// The two questions the tracer asks every component on a net.
///
/// Implementations must be free of side effects; they are called many times
/// per trace.
pub trait ElectricalContract {
    /// Other pins of this component fused to `pin` at this instant.
    fn internal_connections(&self, pin: &str, probe: &mut dyn LevelProbe) -> Vec<String>;

    /// Level actively driven out of `pin`, or [`FLOATING`].
    fn pin_output(&self, pin: &str, probe: &mut dyn LevelProbe) -> f64;

    /// The power-source capability, for battery-like parts only.
    fn power_source(&self) -> Option<&dyn PowerSource> {
        None
    }
}

/// A placed part.
pub trait Component: ElectricalContract + fmt::Debug + Send + Sync {
    fn id(&self) -> &str;

    /// Short type tag, e.g. `battery`.
    fn kind(&self) -> &'static str;

    /// Every pin this part exposes.
    fn pins(&self) -> &'static [&'static str];

    /// Apply an external state change (user interaction or the hardware bridge).
    fn actuate(&mut self, action: Actuation) -> Result<(), RailSimError> {
        Err(RailSimError::UnsupportedActuation {
            component: self.id().to_string(),
            kind: self.kind(),
            action: action.to_string(),
        })
    }
}

/// Slide switch throw position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchPosition {
    #[default]
    A,
    B,
}

impl SwitchPosition {
    pub fn flipped(self) -> Self {
        match self {
            SwitchPosition::A => SwitchPosition::B,
            SwitchPosition::B => SwitchPosition::A,
        }
    }
}

/// External state changes a component may accept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Actuation {
    Press,
    Release,
    Toggle,
    SetPosition(SwitchPosition),
    SetRatio(f64),
    SetLevel(f64),
    SetVoltage(f64),
}

impl fmt::Display for Actuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actuation::Press => f.write_str("press"),
            Actuation::Release => f.write_str("release"),
            Actuation::Toggle => f.write_str("toggle"),
            Actuation::SetPosition(SwitchPosition::A) => f.write_str("position:a"),
            Actuation::SetPosition(SwitchPosition::B) => f.write_str("position:b"),
            Actuation::SetRatio(v) => write!(f, "ratio:{}", v),
            Actuation::SetLevel(v) => write!(f, "level:{}", v),
            Actuation::SetVoltage(v) => write!(f, "voltage:{}", v),
        }
    }
}

impl FromStr for Actuation {
    type Err = RailSimError;

    /// Parses `press`, `release`, `toggle`, `position:a|b`, `ratio:<f>`,
    /// `level:<f>` and `voltage:<f>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let (verb, arg) = match lower.split_once(':') {
            Some((verb, arg)) => (verb, Some(arg)),
            None => (lower.as_str(), None),
        };

        let number = |arg: Option<&str>| -> Result<f64, RailSimError> {
            arg.and_then(|a| a.parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .ok_or_else(|| RailSimError::BadActuation(s.to_string()))
        };

        match (verb, arg) {
            ("press", None) => Ok(Actuation::Press),
            ("release", None) => Ok(Actuation::Release),
            ("toggle", None) => Ok(Actuation::Toggle),
            ("position", Some("a")) => Ok(Actuation::SetPosition(SwitchPosition::A)),
            ("position", Some("b")) => Ok(Actuation::SetPosition(SwitchPosition::B)),
            ("ratio", arg) => Ok(Actuation::SetRatio(number(arg)?)),
            ("level", arg) => Ok(Actuation::SetLevel(number(arg)?)),
            ("voltage", arg) => Ok(Actuation::SetVoltage(number(arg)?)),
            _ => Err(RailSimError::BadActuation(s.to_string())),
        }
    }
}

/// Human-facing classification of a resolved level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelState {
    Floating,
    Low,
    High,
}

impl LevelState {
    pub fn from_level(level: f64) -> Self {
        if !is_driving(level) {
            LevelState::Floating
        } else if level == LOW {
            LevelState::Low
        } else {
            LevelState::High
        }
    }
}

impl fmt::Display for LevelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelState::Floating => f.write_str("floating"),
            LevelState::Low => f.write_str("low"),
            LevelState::High => f.write_str("high"),
        }
    }
}

/// `high (0.50)`, `low` or `floating`.
pub fn describe_level(level: f64) -> String {
    match LevelState::from_level(level) {
        LevelState::High => format!("high ({:.2})", level),
        state => state.to_string(),
    }
}
