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

//! src/xml/export.rs
//!
//! Profile export
//!
//! Output is a sparse diff against "fully unbound": only records with at
//! least one bind appear, grouped by action map, one `<rebind>` per bound
//! slot in keyboard, mouse, controller, joystick order.
//!
//! ```xml
//! <ActionMaps version="1" optionsVersion="2" rebindVersion="2" profileName="StarBinder">
//!  ...header...
//!  <actionmap name="spaceship_movement">
//!   <action name="v_strafe_up">
//!    <rebind input="kb1_space" activationMode="press"/>
//!   </action>
//!  </actionmap>
//! </ActionMaps>
//! ```
//!
//! Map and action order follow the master list, so exporting the same
//! records twice produces identical bytes.

use indexmap::IndexMap;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::core::parser::format_bind_string;
use crate::core::{ActionList, ActionRecord, DeviceClass};
use crate::xml::ExportError;

/// Profile name used when the caller has none
pub const DEFAULT_PROFILE_NAME: &str = "StarBinder";

/// Escapes an attribute value, with tab, newline and carriage return written
/// as character references
fn attribute_value(value: &str) -> String {
    escape(value)
        .replace('\t', "&#9;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
}

struct ProfileWriter {
    writer: Writer<Vec<u8>>,
}

impl ProfileWriter {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 1),
        }
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), ExportError> {
        self.writer
            .write_event(event)
            .map_err(|e| ExportError::Write(e.to_string()))
    }

    fn start(&mut self, element: BytesStart<'_>) -> Result<(), ExportError> {
        self.write(Event::Start(element))
    }

    fn empty(&mut self, element: BytesStart<'_>) -> Result<(), ExportError> {
        self.write(Event::Empty(element))
    }

    fn end(&mut self, name: &str) -> Result<(), ExportError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn header(&mut self, profile_name: &str) -> Result<(), ExportError> {
        self.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.start(BytesStart::new("ActionMaps").with_attributes([
            ("version", "1"),
            ("optionsVersion", "2"),
            ("rebindVersion", "2"),
            ("profileName", profile_name),
        ]))?;

        self.start(BytesStart::new("CustomisationUIHeader").with_attributes([
            ("label", profile_name),
            ("description", ""),
            ("image", ""),
        ]))?;
        self.start(BytesStart::new("devices"))?;
        for device in ["keyboard", "mouse", "joystick"] {
            self.empty(BytesStart::new(device).with_attributes([("instance", "1")]))?;
        }
        self.end("devices")?;
        self.end("CustomisationUIHeader")?;
        self.empty(BytesStart::new("modifiers"))
    }

    fn action(&mut self, record: &ActionRecord) -> Result<(), ExportError> {
        self.start(BytesStart::new("action").with_attributes([("name", record.action_name())]))?;

        for device in DeviceClass::ALL {
            let bind = record.bind(device).trim();
            if bind.is_empty() {
                continue;
            }

            let input =
                attribute_value(&format_bind_string(device, record.bind_device(device), bind));
            let mut rebind = BytesStart::new("rebind");
            rebind.push_attribute((b"input".as_slice(), input.as_bytes()));
            let mode = record.activation_mode(device);
            if !mode.is_empty() {
                let mode = attribute_value(mode);
                rebind.push_attribute((b"activationMode".as_slice(), mode.as_bytes()));
            }
            self.empty(rebind)?;
        }

        self.end("action")
    }

    fn finish(mut self) -> Result<String, ExportError> {
        self.end("ActionMaps")?;
        let mut bytes = self.writer.into_inner();
        bytes.push(b'\n');
        Ok(String::from_utf8(bytes)?)
    }
}

/// Renders every bound record as a profile document
pub fn export_profile(list: &ActionList, profile_name: &str) -> Result<String, ExportError> {
    let profile_name = match profile_name.trim() {
        "" => DEFAULT_PROFILE_NAME,
        name => name,
    };

    let mut groups: IndexMap<&str, Vec<&ActionRecord>> = IndexMap::new();
    for record in list.iter().filter(|r| r.has_any_bind()) {
        groups.entry(record.action_map_name()).or_default().push(record);
    }

    let mut out = ProfileWriter::new();
    out.header(profile_name)?;

    for (map_name, records) in &groups {
        out.start(BytesStart::new("actionmap").with_attributes([("name", *map_name)]))?;
        for record in records {
            out.action(record)?;
        }
        out.end("actionmap")?;
    }

    let xml = out.finish()?;
    log::info!(
        "Exported {} actions in {} action maps",
        groups.values().map(Vec::len).sum::<usize>(),
        groups.len()
    );
    Ok(xml)
}
