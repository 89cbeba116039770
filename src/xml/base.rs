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

//! Base configuration loader
//!
//! The base document lists every action map the game ships with:
//!
//! ```xml
//! <actionmap name="spaceship_movement" UICategory="@ui_CCSpaceFlight">
//!   <action name="v_strafe_up" UILabel="@ui_CIStrafeUp" keyboard="space" gamepad=" " />
//! </actionmap>
//! ```
//!
//! Actions are skipped when they have no name, repeat an earlier name, use
//! a reserved prefix, or carry none of label, description and category.
//! Whole maps in `EXCLUDED_ACTION_MAPS` are skipped.

use std::{collections::HashSet, fs, path::Path};

use crate::core::{ActionDefinition, ActionList, ActionRecord, KeywordDictionary};
use crate::xml::LoadError;

/// Action maps never shown to the user
pub const EXCLUDED_ACTION_MAPS: &[&str] = &["debug"];

/// Action name prefixes never shown to the user
const RESERVED_PREFIXES: &[&str] = &["flashui"];

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Parses the base document into the master list
pub fn parse_base_config(
    content: &str,
    dictionary: &KeywordDictionary,
) -> Result<ActionList, LoadError> {
    let document = roxmltree::Document::parse(content).map_err(|e| LoadError::Xml(e.to_string()))?;

    let mut list = ActionList::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut skipped = 0usize;

    for map in document
        .descendants()
        .filter(|n| n.is_element() && n.has_tag_name("actionmap"))
    {
        let map_name = map.attribute("name").unwrap_or_default();
        if EXCLUDED_ACTION_MAPS.contains(&map_name) {
            log::debug!("Skipping excluded action map '{}'", map_name);
            continue;
        }
        let ui_category = non_empty(map.attribute("UICategory"));

        for action in map
            .descendants()
            .filter(|n| n.is_element() && n.has_tag_name("action"))
        {
            let Some(name) = action.attribute("name").filter(|n| !n.is_empty()) else {
                skipped += 1;
                continue;
            };

            let label = non_empty(action.attribute("UILabel"));
            let description = non_empty(action.attribute("UIDescription"));
            let category = non_empty(action.attribute("Category"));

            if seen.contains(name)
                || RESERVED_PREFIXES.iter().any(|p| name.starts_with(p))
                || (label.is_none() && description.is_none() && category.is_none())
            {
                skipped += 1;
                continue;
            }
            seen.insert(name);

            let definition = ActionDefinition {
                name: name.to_string(),
                map_name: map_name.to_string(),
                ui_category: ui_category.clone(),
                label,
                description,
                category,
                keyboard: action.attribute("keyboard").map(str::to_string),
                mouse: action.attribute("mouse").map(str::to_string),
                gamepad: action.attribute("gamepad").map(str::to_string),
                joystick: action.attribute("joystick").map(str::to_string),
                activation_mode: action.attribute("activationMode").map(str::to_string),
            };
            list.upsert(ActionRecord::from_definition(&definition, dictionary));
        }
    }

    log::info!(
        "Loaded {} actions from base configuration ({} skipped)",
        list.len(),
        skipped
    );
    Ok(list)
}

/// Reads and parses the base document
pub fn load_base_config(path: &Path, dictionary: &KeywordDictionary) -> Result<ActionList, LoadError> {
    let content = fs::read_to_string(path).map_err(|e| LoadError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_base_config(&content, dictionary)
}
