//! XML module tests
//!
//! - Base configuration loading and exclusions
//! - Profile export layout and stability
//! - Profile import, round-trip and failure handling

#[cfg(test)]
mod import_tests;

use crate::core::{ActionList, KeywordDictionary};
use crate::xml::parse_base_config;

/// A small base configuration covering every device class
pub(crate) const BASE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ActionMaps>
  <actionmap name="spaceship_movement" UICategory="@ui_CCSpaceFlight">
    <action name="v_strafe_up" UILabel="@ui_CIStrafeUp" keyboard="w" gamepad=" " joystick=" " />
    <action name="v_strafe_down" UILabel="@ui_CIStrafeDown" keyboard="s" gamepad=" " activationMode="press" />
    <action name="v_boost" UIDescription="@ui_CIBoostDesc" keyboard="lshift" mouse=" " joystick=" " />
  </actionmap>
  <actionmap name="spaceship_weapons" UICategory="@ui_CCVehicle">
    <action name="v_attack1" Category="Weapons" mouse="mouse1" />
    <action name="v_strafe_up" UILabel="@ui_Duplicate" keyboard="x" />
    <action name="v_no_text" keyboard="k" />
    <action name="flashui_menu" UILabel="@ui_Menu" keyboard="m" />
    <action UILabel="@ui_Nameless" keyboard="n" />
  </actionmap>
  <actionmap name="debug">
    <action name="debug_fly" UILabel="@ui_Debug" keyboard="f" />
  </actionmap>
</ActionMaps>
"#;

pub(crate) fn base_list() -> ActionList {
    parse_base_config(BASE_XML, &KeywordDictionary::new()).unwrap()
}
