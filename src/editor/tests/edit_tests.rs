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

use super::editor;
use crate::capture::CaptureEvent;
use crate::config::{PersistedState, StateStore};
use crate::core::{
    ActionFilter, ActivationChoice, ActivationMode, BindStringError, BoundFilter, DeviceClass,
    SubstringSearch,
};
use crate::editor::{BindEditor, EditorError};
use crate::xml::tests::base_list;
use tempfile::TempDir;

#[test]
fn test_manual_entry_with_device_index() {
    let (mut editor, calls) = editor();

    let state = editor.apply_manual_entry("v_strafe_up", "3:lalt+f").unwrap();
    assert_eq!(state.input, "lalt+f");
    assert_eq!(state.device_index, 3);

    let state = editor.apply_manual_entry("v_strafe_down", "f").unwrap();
    assert_eq!(state.device_index, 1);
    assert_eq!(state.activation_mode, "press", "Mode is left alone");

    assert_eq!(calls.borrow().len(), 2);
}

#[test]
fn test_manual_entry_skips_capture_rules() {
    let (mut editor, _calls) = editor();

    // Two normal keys would be rejected by a capture
    let state = editor.apply_manual_entry("v_boost", "w+s").unwrap();
    assert_eq!(state.input, "w+s");
}

#[test]
fn test_manual_entry_errors_leave_state_alone() {
    let (mut editor, calls) = editor();

    assert!(matches!(
        editor.apply_manual_entry("v_strafe_up", "   "),
        Err(EditorError::Entry(BindStringError::Empty))
    ));
    assert!(matches!(
        editor.apply_manual_entry("v_strafe_up", "2:"),
        Err(EditorError::Entry(BindStringError::MissingBind(2)))
    ));
    assert!(matches!(
        editor.apply_manual_entry("v_missing", "f"),
        Err(EditorError::UnknownAction(_))
    ));

    editor.set_device(DeviceClass::Controller);
    assert!(matches!(
        editor.apply_manual_entry("v_boost", "a"),
        Err(EditorError::NotBindable { .. })
    ));

    assert!(calls.borrow().is_empty());
    assert_eq!(editor.record("v_strafe_up").unwrap().bind(DeviceClass::Keyboard), "w");
}

#[test]
fn test_manual_entry_cancels_capture_on_same_row() {
    let (mut editor, _calls) = editor();
    editor.start_capture("v_strafe_up").unwrap();
    editor.handle_event(&CaptureEvent::key_down("KeyG"));

    editor.apply_manual_entry("v_strafe_up", "h").unwrap();
    assert!(!editor.is_capturing());
    assert_eq!(editor.record("v_strafe_up").unwrap().bind(DeviceClass::Keyboard), "h");
}

#[test]
fn test_activation_mode_choices() {
    let (mut editor, calls) = editor();

    let mode = editor
        .set_activation_mode("v_strafe_down", &ActivationChoice::Mode(ActivationMode::Hold))
        .unwrap();
    assert_eq!(mode, "hold");

    let mode = editor
        .set_activation_mode("v_strafe_down", &ActivationChoice::Default)
        .unwrap();
    assert_eq!(mode, "press");

    let mode = editor
        .set_activation_mode("v_strafe_down", &"smart_toggle".parse().unwrap())
        .unwrap();
    assert_eq!(mode, "smart_toggle");

    assert_eq!(calls.borrow().len(), 3);
}

#[test]
fn test_clear_restores_default_mode() {
    let (mut editor, calls) = editor();
    editor.apply_manual_entry("v_strafe_down", "4:np_5").unwrap();
    editor
        .set_activation_mode("v_strafe_down", &ActivationChoice::Mode(ActivationMode::Tap))
        .unwrap();

    editor.clear_bind("v_strafe_down").unwrap();

    let slot = editor.record("v_strafe_down").unwrap().slot(DeviceClass::Keyboard);
    assert_eq!(slot.input(), "");
    assert_eq!(slot.device_index(), 1);
    assert_eq!(slot.activation_mode(), "press");
    assert_eq!(calls.borrow().len(), 3, "One notification per edit");
}

#[test]
fn test_clear_cancels_capture_on_that_row_only() {
    let (mut editor, _calls) = editor();

    editor.start_capture("v_strafe_up").unwrap();
    editor.clear_bind("v_boost").unwrap();
    assert!(editor.is_capturing());

    editor.clear_bind("v_strafe_up").unwrap();
    assert!(!editor.is_capturing());
}

#[test]
fn test_clear_all_notifies_once() {
    let (mut editor, calls) = editor();

    assert_eq!(editor.clear_all(), 3);
    assert_eq!(calls.borrow().len(), 1);
    assert!(editor
        .actions()
        .iter()
        .all(|r| r.bind(DeviceClass::Keyboard).is_empty()));
    assert_eq!(editor.record("v_attack1").unwrap().bind(DeviceClass::Mouse), "mouse1");
}

#[test]
fn test_conflicts_are_per_device_class() {
    let (mut editor, _calls) = editor();
    editor.apply_manual_entry("v_boost", "w").unwrap();

    assert!(editor.has_conflict("v_strafe_up"));
    assert!(editor.has_conflict("v_boost"));
    assert!(!editor.has_conflict("v_strafe_down"));

    let conflicts = editor.conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].bind, "w");
    assert_eq!(conflicts[0].action_names, vec!["v_strafe_up", "v_boost"]);

    editor.set_device(DeviceClass::Controller);
    editor.apply_manual_entry("v_strafe_up", "w").unwrap();
    assert!(!editor.has_conflict("v_strafe_up"), "Keyboard 'w' is not a controller bind");
}

#[test]
fn test_sharing_bind_lists_other_actions() {
    let (mut editor, _calls) = editor();
    assert!(editor.sharing_bind("v_strafe_up").is_empty());

    editor.apply_manual_entry("v_boost", "w").unwrap();

    assert_eq!(editor.sharing_bind("v_strafe_up"), vec!["v_boost"]);
    assert_eq!(editor.sharing_bind("v_boost"), vec!["v_strafe_up"]);
    assert!(editor.sharing_bind("v_attack1").is_empty(), "Unbound rows share nothing");
    assert!(editor.sharing_bind("v_missing").is_empty());
    assert_eq!(editor.conflict_detector().total_binds(), 3);
}

#[test]
fn test_selection() {
    let (mut editor, _calls) = editor();
    assert!(editor.selected().is_none());

    assert_eq!(editor.select("v_boost").unwrap().action_name(), "v_boost");
    assert_eq!(editor.selected().unwrap().action_name(), "v_boost");
    assert!(matches!(editor.select("nope"), Err(EditorError::UnknownAction(_))));
    assert_eq!(editor.selected().unwrap().action_name(), "v_boost");

    editor.deselect();
    assert!(editor.selected().is_none());
}

#[test]
fn test_console_placeholder_follows_focus() {
    let (mut editor, _calls) = editor();
    editor.apply_manual_entry("v_strafe_up", "2:lctrl+w").unwrap();

    assert_eq!(editor.console_placeholder("v_strafe_up").unwrap(), "2:lctrl+w");
    editor.set_device(DeviceClass::Joystick);
    assert_eq!(editor.console_placeholder("v_strafe_up").unwrap(), "");
    assert!(editor.console_placeholder("v_missing").is_none());
}

#[test]
fn test_filtered_view() {
    let (editor, _calls) = editor();
    let filter = ActionFilter {
        bound: BoundFilter::Unbound,
        ..Default::default()
    };

    let names: Vec<&str> = editor
        .filtered(&filter, &SubstringSearch)
        .iter()
        .map(|r| r.action_name())
        .collect();
    assert_eq!(names, vec!["v_attack1"]);
}

#[test]
fn test_import_notifies_once_when_changed() {
    let (mut editor, calls) = editor();
    let profile = r#"<ActionMaps>
      <actionmap name="spaceship_movement">
        <action name="v_strafe_up"><rebind input="kb1_e"/><rebind input="gp1_x"/></action>
        <action name="v_gone"><rebind input="kb1_g"/></action>
      </actionmap>
    </ActionMaps>"#;

    let report = editor.import_xml(profile).unwrap();
    assert_eq!(report.not_found, vec!["v_gone"]);
    assert_eq!(calls.borrow().len(), 1);

    // Same file again changes nothing
    editor.import_xml(profile).unwrap();
    assert_eq!(calls.borrow().len(), 1);
}

#[test]
fn test_malformed_import_leaves_records_untouched() {
    let (mut editor, calls) = editor();
    let before = editor.export_xml("Before").unwrap();

    let result = editor.import_xml("<ActionMaps><actionmap>");
    assert!(matches!(result, Err(EditorError::Import(_))));
    assert_eq!(editor.export_xml("Before").unwrap(), before);
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_replay_does_not_notify() {
    let (mut editor, calls) = editor();
    let mut edited = base_list();
    edited
        .get_mut("v_boost")
        .unwrap()
        .set_bind(DeviceClass::Joystick, "button7", 1);

    let report = editor.replay_state(&PersistedState::capture(&edited));
    assert_eq!(report.slots, 1);
    assert_eq!(editor.record("v_boost").unwrap().bind(DeviceClass::Joystick), "button7");
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_state_store_as_hook() {
    let temp_dir = TempDir::new().unwrap();
    let state_path = temp_dir.path().join("bindings.json");
    let store = StateStore::new(state_path.clone()).unwrap();

    let mut editor = BindEditor::new(base_list(), Box::new(store));
    editor.start_capture("v_strafe_up").unwrap();
    editor.handle_event(&CaptureEvent::key_down("KeyS"));
    editor.handle_event(&CaptureEvent::key_up("KeyS"));

    // A new session replays the saved edit over a fresh base list
    let state = StateStore::new(state_path).unwrap().load().unwrap().unwrap();
    let mut reloaded = BindEditor::new(base_list(), Box::new(crate::editor::NoopHook));
    reloaded.replay_state(&state);
    assert_eq!(reloaded.record("v_strafe_up").unwrap().bind(DeviceClass::Keyboard), "s");
}
