//! Editor module tests
//!
//! - Capture sequences driven through the editor context
//! - Direct edits, import and the change hook contract

#[cfg(test)]
mod edit_tests;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::PersistedState;
use crate::core::ActionList;
use crate::editor::{BindChangeHook, BindEditor};
use crate::xml::tests::base_list;

/// Snapshots the persisted state on every notification
#[derive(Clone, Default)]
pub(crate) struct RecordingHook {
    pub calls: Rc<RefCell<Vec<PersistedState>>>,
}

impl BindChangeHook for RecordingHook {
    fn bind_changed(&mut self, actions: &ActionList) {
        self.calls.borrow_mut().push(PersistedState::capture(actions));
    }
}

/// An editor over the shared test base list and its hook log
pub(crate) fn editor() -> (BindEditor, Rc<RefCell<Vec<PersistedState>>>) {
    let hook = RecordingHook::default();
    let calls = Rc::clone(&hook.calls);
    (BindEditor::new(base_list(), Box::new(hook)), calls)
}
