// Copyright 2025 bakri (tidynest@proton.me)
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

//! Star Binder
//!
//! A keybinding editor for Star Citizen action maps: capture binds from
//! keyboard, mouse, controller and joystick, spot conflicts, and export a
//! profile the game loads.
//!
//! # Features
//!
//! - **Capture:** Key/mouse state machine and controller/joystick poll tasks
//! - **Normalization:** Raw input codes translated to the game's tokens
//! - **Conflict Detection:** Shared binds per device class
//! - **Profiles:** Sparse XML export and lenient import
//! - **Automatic Backups:** Timestamped copies of the state blob on every save
//! - **Atomic Operations:** State and profiles are never half written
//!
//! # Architecture
//!
//! - **`core`:** Data model and pure algorithms (records, translator,
//!   validator, parser, conflicts, filters, keywords)
//! - **`capture`:** Capture session and device poll tasks
//! - **`xml`:** Base configuration, profile export and import
//! - **`config`:** Durable state, transactions and backups
//! - **`editor`:** The editor context tying the above together
//!
//! # Examples
//!
//! ## Loading and checking for conflicts
//!
//! ```no_run
//! use star_binder::core::{ConflictDetector, DeviceClass, KeywordDictionary};
//! use star_binder::xml::load_base_config;
//! use std::path::Path;
//!
//! let keywords = KeywordDictionary::load_or_empty(Path::new("keybinds.json"));
//! let actions = load_base_config(Path::new("actionmaps.xml"), &keywords)?;
//!
//! let detector = ConflictDetector::from_records(DeviceClass::Keyboard, actions.iter());
//! for conflict in detector.find_conflicts() {
//!     println!("{} is used by {:?}", conflict.bind, conflict.action_names);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Capturing a bind
//!
//! ```
//! use star_binder::capture::CaptureEvent;
//! use star_binder::core::{ActionDefinition, ActionList, ActionRecord, DeviceClass, KeywordDictionary};
//! use star_binder::editor::{BindEditor, CaptureUpdate, NoopHook};
//!
//! let definition = ActionDefinition {
//!     name: "v_strafe_up".to_string(),
//!     map_name: "spaceship_movement".to_string(),
//!     label: Some("@ui_CIStrafeUp".to_string()),
//!     keyboard: Some("space".to_string()),
//!     ..Default::default()
//! };
//! let record = ActionRecord::from_definition(&definition, &KeywordDictionary::new());
//! let actions: ActionList = [record].into_iter().collect();
//!
//! let mut editor = BindEditor::new(actions, Box::new(NoopHook));
//! editor.start_capture("v_strafe_up")?;
//! editor.handle_event(&CaptureEvent::key_down("KeyS"));
//! let update = editor.handle_event(&CaptureEvent::key_up("KeyS"));
//!
//! assert!(matches!(update, CaptureUpdate::Committed { .. }));
//! assert_eq!(editor.record("v_strafe_up").unwrap().bind(DeviceClass::Keyboard), "s");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod capture;
pub mod config;
pub mod core;
pub mod editor;
pub mod xml;

// Re-export commonly used types for convenience
pub use core::{ActionList, ActionRecord, BindSlot, DeviceClass};
pub use editor::BindEditor;
