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

//! src/editor/mod.rs
//!
//! Editor context
//!
//! `BindEditor` owns everything a running editor session mutates: the
//! master list, the device-class focus, the selected row, the active
//! capture and the change hook. All capture and selection operations go
//! through it, so capture sequences can be driven deterministically from
//! tests.

pub mod controller;
pub mod hook;

pub use controller::BindEditor;
pub use hook::{BindChangeHook, NoopHook};

use thiserror::Error;

use crate::capture::CaptureError;
use crate::core::{BindStringError, DeviceClass, ValidationError};
use crate::xml::{ExportError, ImportError};

/// Editor operation failures
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error("Invalid bind entry: {0}")]
    Entry(#[from] BindStringError),

    #[error("Action '{0}' not found")]
    UnknownAction(String),

    #[error("Action '{action}' is not shown under {device}")]
    NotBindable { action: String, device: DeviceClass },

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// What one input, tick or poll frame did to the active capture
#[derive(Clone, Debug, PartialEq)]
pub enum CaptureUpdate {
    /// Nothing happened (no capture, or the input was suppressed)
    Ignored,
    /// Still recording; the bind captured so far
    Recording { preview: String },
    /// A countdown second passed without input
    Waiting { remaining: u32 },
    /// The bind was written to the slot and the hook has run
    Committed { bind: String, device_index: u32 },
    /// The combination was invalid; the slot keeps `previous`
    Rejected {
        error: ValidationError,
        previous: String,
    },
    /// The countdown ran out; the slot keeps `previous`
    TimedOut { previous: String },
}

#[cfg(test)]
mod tests;
