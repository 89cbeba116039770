use super::base_list;
use crate::core::{ActionRecord, DeviceClass};
use crate::xml::{apply_import, export_profile, parse_import, ImportError};

fn slot_states(record: &ActionRecord) -> Vec<(String, u32, String)> {
    DeviceClass::ALL
        .iter()
        .map(|&d| {
            (
                record.bind(d).to_string(),
                record.bind_device(d),
                record.activation_mode(d).to_string(),
            )
        })
        .collect()
}

const PROFILE: &str = r#"<ActionMaps version="1" profileName="Imported">
  <actionmap name="spaceship_movement">
    <action name="v_strafe_up">
      <rebind input="kb1_space" activationMode="hold"/>
      <rebind input="gp1_a" multiTap="2"/>
      <rebind input="js2_button4"/>
    </action>
    <action name="v_unknown_action">
      <rebind input="kb1_u"/>
    </action>
    <action name="v_boost">
      <rebind input="xx3_f"/>
      <rebind input="kb1_"/>
    </action>
  </actionmap>
</ActionMaps>"#;

#[test]
fn test_parse_import_values() {
    let imported = parse_import(PROFILE).unwrap();
    assert_eq!(imported.len(), 3);

    let strafe = &imported[0];
    assert_eq!(strafe.action_name, "v_strafe_up");
    assert_eq!(strafe.map_name, "spaceship_movement");

    let keyboard = &strafe.rebinds[&DeviceClass::Keyboard];
    assert_eq!(keyboard.bind, "space");
    assert_eq!(keyboard.activation_mode, "hold");

    let gamepad = &strafe.rebinds[&DeviceClass::Controller];
    assert_eq!(gamepad.activation_mode, "double_tap", "multiTap implies double_tap");

    let joystick = &strafe.rebinds[&DeviceClass::Joystick];
    assert_eq!(joystick.device_index, 2);
    assert_eq!(joystick.activation_mode, "");
}

#[test]
fn test_unknown_prefix_and_empty_bind() {
    let imported = parse_import(PROFILE).unwrap();
    let boost = &imported[2];

    // xx3_f lands on keyboard; the empty kb1_ is skipped rather than overwriting it
    assert_eq!(boost.rebinds.len(), 1);
    let keyboard = &boost.rebinds[&DeviceClass::Keyboard];
    assert_eq!(keyboard.bind, "f");
    assert_eq!(keyboard.device_index, 3);

    // A blank tail is an explicit unbind and is kept
    let unbind = parse_import(
        r#"<ActionMaps><actionmap name="spaceship_movement">
             <action name="v_boost"><rebind input="xx3_f"/><rebind input="kb1_ " activationMode="hold"/></action>
           </actionmap></ActionMaps>"#,
    )
    .unwrap();
    let keyboard = &unbind[0].rebinds[&DeviceClass::Keyboard];
    assert_eq!(keyboard.bind, "");
    assert_eq!(keyboard.device_index, 1);
    assert_eq!(keyboard.activation_mode, "hold");
}

#[test]
fn test_blank_rebind_unbinds_default_key() {
    let mut list = base_list();
    assert_eq!(list.get("v_strafe_up").unwrap().bind(DeviceClass::Keyboard), "w");

    let imported = parse_import(
        r#"<ActionMaps><actionmap name="spaceship_movement">
             <action name="v_strafe_up"><rebind input="kb1_ "/></action>
           </actionmap></ActionMaps>"#,
    )
    .unwrap();
    let report = apply_import(&mut list, &imported);

    assert!(report.changed);
    let strafe = list.get("v_strafe_up").unwrap();
    assert_eq!(strafe.bind(DeviceClass::Keyboard), "");
    assert_eq!(strafe.activation_mode(DeviceClass::Keyboard), "");
}

#[test]
fn test_apply_reports_unknown_actions() {
    let mut list = base_list();
    let imported = parse_import(PROFILE).unwrap();
    let report = apply_import(&mut list, &imported);

    assert_eq!(report.applied, vec!["v_strafe_up", "v_boost"]);
    assert_eq!(report.not_found, vec!["v_unknown_action"]);
    assert!(report.changed);
    assert!(list.get("v_unknown_action").is_none(), "imports never insert records");

    let strafe = list.get("v_strafe_up").unwrap();
    assert_eq!(strafe.bind(DeviceClass::Keyboard), "space");
    assert_eq!(strafe.activation_mode(DeviceClass::Keyboard), "hold");
    assert_eq!(strafe.bind(DeviceClass::Controller), "a");
    assert_eq!(strafe.bind_device(DeviceClass::Joystick), 2);
}

#[test]
fn test_malformed_import_aborts() {
    let result = parse_import("<ActionMaps><actionmap name=\"x\">");
    assert!(matches!(result, Err(ImportError::Xml(_))));
}

#[test]
fn test_round_trip_restores_slots() {
    let mut edited = base_list();
    {
        let strafe = edited.get_mut("v_strafe_up").unwrap();
        strafe.set_bind(DeviceClass::Keyboard, "lctrl+s", 1);
        strafe.set_activation_mode(DeviceClass::Keyboard, "double_tap");
        strafe.set_bind(DeviceClass::Controller, "thumbl_up", 1);
        strafe.set_bind(DeviceClass::Joystick, "rctrl+button5", 2);
    }
    edited
        .get_mut("v_boost")
        .unwrap()
        .set_bind(DeviceClass::Mouse, "mouse4", 1);

    let xml = export_profile(&edited, "Round Trip").unwrap();

    let mut fresh = base_list();
    let report = apply_import(&mut fresh, &parse_import(&xml).unwrap());
    assert!(report.not_found.is_empty());

    for record in edited.iter() {
        let restored = fresh.get(record.action_name()).unwrap();
        for device in DeviceClass::ALL {
            if record.bind(device).is_empty() {
                continue;
            }
            assert_eq!(
                slot_states(record)[device as usize],
                slot_states(restored)[device as usize],
                "{} {} should survive the round trip",
                record.action_name(),
                device
            );
        }
    }
}

#[test]
fn test_round_trip_keeps_control_whitespace() {
    let mut edited = base_list();
    {
        let strafe = edited.get_mut("v_strafe_up").unwrap();
        strafe.set_bind(DeviceClass::Keyboard, "lalt\tf", 1);
        strafe.set_bind(DeviceClass::Joystick, "button1\nbutton2\r", 2);
    }

    let xml = export_profile(&edited, "Whitespace").unwrap();
    assert!(xml.contains("kb1_lalt&#9;f"));

    let mut fresh = base_list();
    apply_import(&mut fresh, &parse_import(&xml).unwrap());

    let strafe = fresh.get("v_strafe_up").unwrap();
    assert_eq!(strafe.bind(DeviceClass::Keyboard), "lalt\tf");
    assert_eq!(strafe.bind(DeviceClass::Joystick), "button1\nbutton2");
    assert_eq!(strafe.bind_device(DeviceClass::Joystick), 2);
}

#[test]
fn test_reimport_without_changes_reports_unchanged() {
    let mut list = base_list();
    let xml = export_profile(&list, "Same").unwrap();
    let report = apply_import(&mut list, &parse_import(&xml).unwrap());

    assert!(!report.changed);
    assert_eq!(report.applied.len(), 4);
}
