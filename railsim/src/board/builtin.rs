//! Built-in board profiles embedded in the binary.

use super::BoardProfile;
use crate::core::RailSimError;

const EMBEDDED_PICO: &str = include_str!("../../boards/pico.json");
const EMBEDDED_UNO: &str = include_str!("../../boards/uno.json");
const EMBEDDED_ESP32: &str = include_str!("../../boards/esp32.json");

const BUILTIN: &[(&str, &str)] = &[
    ("pico", EMBEDDED_PICO),
    ("uno", EMBEDDED_UNO),
    ("esp32", EMBEDDED_ESP32),
];

/// Names accepted by [`builtin_profile`].
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTIN.iter().map(|(name, _)| *name)
}

/// Look up and parse an embedded board profile by name (case-insensitive).
pub fn builtin_profile(name: &str) -> Result<BoardProfile, RailSimError> {
    let (_, json) = BUILTIN
        .iter()
        .find(|(builtin, _)| builtin.eq_ignore_ascii_case(name))
        .ok_or_else(|| RailSimError::UnknownBoard(name.to_string()))?;
    Ok(serde_json::from_str(json)?)
}

/// Every embedded profile; profiles that fail to parse are skipped.
pub fn all_profiles() -> Vec<BoardProfile> {
    let mut profiles = Vec::new();
    for (name, json) in BUILTIN {
        match serde_json::from_str::<BoardProfile>(json) {
            Ok(profile) => profiles.push(profile),
            Err(e) => tracing::warn!("Failed to parse embedded board profile {}: {}", name, e),
        }
    }
    profiles
}

impl BoardProfile {
    pub fn builtin(name: &str) -> Result<Self, RailSimError> {
        builtin_profile(name)
    }

    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        builtin_names()
    }
}
