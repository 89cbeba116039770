// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Keyword dictionary and category taxonomy
//!
//! The dictionary is a JSON document mapping action names to optional
//! display overrides:
//!
//! ```json
//! { "v_strafe_up": { "label": "Strafe Up", "description": "...", "keywords": ["vehicle"] } }
//! ```
//!
//! Keywords are resolved through a fixed category table into the tags used
//! for filtering. Unknown keywords are logged and kept verbatim.

use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

use crate::xml::LoadError;

/// Top-level filter categories, in display order
pub const CATEGORY_TAGS: &[&str] = &["Vehicle", "On Foot", "Comms/Social", "Camera", "None"];

/// Sub-tags shown under a top-level category
pub fn subcategories(tag: &str) -> &'static [&'static str] {
    match tag {
        "Vehicle" => &[
            "Salvage",
            "Mining",
            "Turrets",
            "Defences",
            "Weapons",
            "Power",
            "MFDs",
            "Vehicle - Other",
        ],
        "On Foot" => &[
            "EVA",
            "Combat",
            "Emotes",
            "Equipment",
            "Interaction",
            "On Foot - Other",
        ],
        "Comms/Social" => &["FOIP", "VOIP", "Emotes", "Comms - Other"],
        _ => &[],
    }
}

/// Filter tags a raw keyword expands to, `None` when the keyword is unknown
fn category_for(keyword: &str) -> Option<&'static [&'static str]> {
    let tags: &'static [&'static str] = match keyword {
        "vehicle" | "@ui_CCSeatGeneral" | "@ui_CCVehicle" | "@ui_CCSpaceFlight" => &["vehicle"],
        "@ui_CGLightControllerDesc" => &["vehicle", "vehicle - other"],
        "@ui_CCTurrets" | "turrets" => &["vehicle", "turrets"],
        "communication" => &["comms/social"],
        "other" | "@ui_CGEASpectator" | "@ui_CGUIGeneral" | "@ui_CGOpticalTracking" => &["other"],
        "camera" | "@ui_CCCamera" => &["camera"],
        "on foot" | "@ui_CCFPS" => &["on foot"],
        "@ui_CCEVA" | "@ui_CCEVAZGT" => &["on foot", "eva"],
        "@ui_CGInteraction" => &["on foot", "interaction"],
        "salvage" => &["salvage"],
        "mining" => &["mining"],
        "vehicle control" => &["vehicle control"],
        "defences" => &["defences"],
        "weapons" => &["weapons"],
        "power" => &["power"],
        "combat" => &["combat"],
        "equipment" => &["equipment"],
        "mfds" | "MFDs" => &["vehicle", "mfds"],
        "emotes" => &["comms/social", "emotes"],
        "none" => &["None"],
        "vehicle - other" => &["vehicle - other"],
        "custom" => &["FLOOF"],
        _ => return None,
    };
    Some(tags)
}

/// Expands raw keywords into filter tags
///
/// Unknown keywords are logged and passed through unchanged rather than
/// dropped. Duplicates are not removed here.
pub fn resolve_keywords(keywords: &[String], action_name: &str) -> Vec<String> {
    keywords
        .iter()
        .flat_map(|keyword| match category_for(keyword) {
            Some(tags) => tags.iter().map(|t| t.to_string()).collect::<Vec<_>>(),
            None => {
                log::warn!(
                    "Unresolved keyword category '{}' (action: {})",
                    keyword,
                    action_name
                );
                vec![keyword.clone()]
            }
        })
        .collect()
}

/// Turns a raw action name into a readable label
///
/// `v_` is dropped, underscores become spaces, known prefixes are expanded
/// to acronyms or section names, and every word is title-cased.
pub fn auto_format_name(action_name: &str) -> String {
    let mut output = action_name.replacen("v_", "", 1).replace('_', " ");
    output = output.replacen(" 3d ", " 3D ", 1);

    const PREFIXES: &[(&str, &str)] = &[
        ("mfd ", "MFD "),
        ("ifcs ", "IFCS "),
        ("vtol ", "VTOL "),
        ("atc ", "ATC "),
        ("eva ", "EVA "),
        ("ads ", "ADS "),
        ("hud ", "HUD "),
        ("ui ", "UI "),
        ("zgt ", "Zero G: "),
        ("foip ", "FOIP: "),
        ("pc ", ""),
        ("qs ", "QS: "),
        ("view ", "Free Cam: "),
    ];

    for (prefix, replacement) in PREFIXES {
        if let Some(rest) = output.strip_prefix(prefix) {
            output = format!("{}{}", replacement, rest);
        }
    }

    output
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display overrides for one action
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct KeywordEntry {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Action name → display overrides
#[derive(Clone, Debug, Default)]
pub struct KeywordDictionary {
    entries: HashMap<String, KeywordEntry>,
}

impl KeywordDictionary {
    /// An empty dictionary; every lookup falls back to the raw action name
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the dictionary JSON
    pub fn from_json(content: &str) -> Result<Self, LoadError> {
        let entries: HashMap<String, KeywordEntry> =
            serde_json::from_str(content).map_err(|e| LoadError::Dictionary(e.to_string()))?;
        Ok(Self { entries })
    }

    /// Reads and parses the dictionary file
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path).map_err(|e| LoadError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let dictionary = Self::from_json(&content)?;
        log::info!(
            "Loaded {} keyword entries from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    /// Loads the dictionary, logging failures and falling back to empty
    pub fn load_or_empty(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::error!("Error loading keyword dictionary: {}", e);
            Self::new()
        })
    }

    /// Adds or replaces an entry
    pub fn insert(&mut self, action_name: &str, entry: KeywordEntry) {
        self.entries.insert(action_name.to_string(), entry);
    }

    pub fn label(&self, action_name: &str) -> Option<&str> {
        self.entries
            .get(action_name)
            .and_then(|e| e.label.as_deref())
            .filter(|l| !l.is_empty())
    }

    pub fn description(&self, action_name: &str) -> Option<&str> {
        self.entries
            .get(action_name)
            .and_then(|e| e.description.as_deref())
            .filter(|d| !d.is_empty())
    }

    pub fn keywords(&self, action_name: &str) -> &[String] {
        self.entries
            .get(action_name)
            .map(|e| e.keywords.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_format_plain_name() {
        assert_eq!(auto_format_name("v_strafe_up"), "Strafe Up");
    }

    #[test]
    fn test_auto_format_known_prefixes() {
        assert_eq!(auto_format_name("v_mfd_select_left"), "MFD Select Left");
        assert_eq!(auto_format_name("zgt_push_off"), "Zero G: Push Off");
        assert_eq!(auto_format_name("pc_interaction_mode"), "Interaction Mode");
        assert_eq!(auto_format_name("view_cycle_fwd"), "Free Cam: Cycle Fwd");
    }

    #[test]
    fn test_auto_format_3d_marker() {
        assert_eq!(auto_format_name("v_toggle_3d_map"), "Toggle 3D Map");
    }

    #[test]
    fn test_resolve_known_and_array_keywords() {
        let tags = resolve_keywords(&["@ui_CCEVA".to_string()], "test");
        assert_eq!(tags, vec!["on foot", "eva"]);
    }

    #[test]
    fn test_resolve_unknown_keyword_passes_through() {
        let tags = resolve_keywords(&["FlightSystems".to_string()], "test");
        assert_eq!(tags, vec!["FlightSystems"]);
    }

    #[test]
    fn test_dictionary_lookups() {
        let dict = KeywordDictionary::from_json(
            r#"{"v_strafe_up": {"label": "Strafe Up", "keywords": ["vehicle"]}}"#,
        )
        .unwrap();

        assert_eq!(dict.label("v_strafe_up"), Some("Strafe Up"));
        assert_eq!(dict.description("v_strafe_up"), None);
        assert_eq!(dict.keywords("v_strafe_up"), &["vehicle".to_string()]);
        assert!(dict.keywords("missing").is_empty());
    }

    #[test]
    fn test_dictionary_rejects_malformed_json() {
        assert!(matches!(
            KeywordDictionary::from_json("{ not json"),
            Err(LoadError::Dictionary(_))
        ));
    }

    #[test]
    fn test_subcategories() {
        assert!(subcategories("Vehicle").contains(&"MFDs"));
        assert!(subcategories("Camera").is_empty());
    }
}
