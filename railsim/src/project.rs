//! Project Files
//!
//! A project is a persisted workbench: board, components, wires, the pin
//! states the program last wrote, and optional engine options.
//!
//! ```json
//! {
//!   "name": "button",
//!   "board": "pico",
//!   "components": [
//!     { "kind": "battery", "id": "bat1", "voltage": 5.0 },
//!     { "kind": "push_button", "id": "btn1", "pressed": true }
//!   ],
//!   "wires": [
//!     { "from": "board:VSYS", "to": "bat1:POS" },
//!     { "from": "board:GND1", "to": "bat1:NEG", "route": [[10, 20], [10, 40]] }
//!   ],
//!   "pin_states": { "GP2": 1.0 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::board::BoardProfile;
use crate::components::ComponentSpec;
use crate::core::{EngineOptions, RailSimError};
use crate::wiring::RoutePoint;

/// Either the name of a built-in profile or an inline profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoardRef {
    Named(String),
    Inline(BoardProfile),
}

impl BoardRef {
    pub fn resolve(self) -> Result<BoardProfile, RailSimError> {
        match self {
            BoardRef::Named(name) => BoardProfile::builtin(&name),
            BoardRef::Inline(profile) => Ok(profile),
        }
    }
}

/// A wire as written in a project file, endpoints in `owner:pin` notation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireSpec {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub route: Vec<RoutePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: Option<String>,
    pub board: BoardRef,
    #[serde(default)]
    pub components: Vec<ComponentSpec>,
    #[serde(default)]
    pub wires: Vec<WireSpec>,
    #[serde(default)]
    pub pin_states: BTreeMap<String, f64>,
    #[serde(default)]
    pub options: EngineOptions,
}

impl Project {
    pub fn from_json(content: &str) -> Result<Self, RailSimError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, RailSimError> {
        let content = std::fs::read_to_string(path)?;
        let project = Self::from_json(&content)?;
        tracing::debug!("Read project {} from {}", project.name.as_deref().unwrap_or("<unnamed>"), path.display());
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_project() {
        let project = Project::from_json(r#"{"board": "uno"}"#).unwrap();
        assert_eq!(project.board, BoardRef::Named("uno".to_string()));
        assert!(project.components.is_empty());
        assert_eq!(project.options, EngineOptions::default());
    }

    #[test]
    fn test_inline_board_and_routes() {
        let project = Project::from_json(
            r#"{
                "board": { "name": "custom", "pins": ["GND", "5V", "D2"] },
                "wires": [{ "from": "board:5V", "to": "bat:POS", "route": [[1, 2], [3.5, 4]] }]
            }"#,
        )
        .unwrap();
        let profile = project.board.clone().resolve().unwrap();
        assert_eq!(profile.name, "custom");
        assert_eq!(project.wires[0].route, vec![RoutePoint(1.0, 2.0), RoutePoint(3.5, 4.0)]);
    }

    #[test]
    fn test_unknown_named_board() {
        let project = Project::from_json(r#"{"board": "nonesuch"}"#).unwrap();
        assert!(matches!(project.board.resolve(), Err(RailSimError::UnknownBoard(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Project::from_json("{"), Err(RailSimError::Json(_))));
    }
}
