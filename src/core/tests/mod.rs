//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Action record and bind slot tests
//! - Bind string and manual entry parsing tests
//! - Captured combination validation tests
//! - Conflict detection tests
//! - Filtering tests

#[cfg(test)]
mod filter_tests;
#[cfg(test)]
mod validator_tests;

use crate::core::{ActionDefinition, ActionRecord, KeywordDictionary};

/// Builds a record bindable on keyboard and gamepad
pub(crate) fn record(name: &str, keyboard: &str, gamepad: &str) -> ActionRecord {
    let definition = ActionDefinition {
        name: name.to_string(),
        map_name: "spaceship_movement".to_string(),
        keyboard: Some(keyboard.to_string()),
        gamepad: Some(gamepad.to_string()),
        ..Default::default()
    };
    ActionRecord::from_definition(&definition, &KeywordDictionary::new())
}
