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

//! Bind change notification
//!
//! The editor calls the hook once after every successful slot mutation,
//! handing it the whole master list. The hook decides what to keep.

use crate::config::StateStore;
use crate::core::ActionList;

/// Receiver of "bind changed" notifications
pub trait BindChangeHook {
    fn bind_changed(&mut self, actions: &ActionList);
}

/// Discards every notification
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHook;

impl BindChangeHook for NoopHook {
    fn bind_changed(&mut self, _actions: &ActionList) {}
}

/// Persists the edited slots of the list
///
/// A failed save is logged; the in-memory edit stands either way.
impl BindChangeHook for StateStore {
    fn bind_changed(&mut self, actions: &ActionList) {
        if let Err(e) = self.persist(actions) {
            log::error!("Failed to persist binds to {}: {}", self.state_path().display(), e);
        }
    }
}
