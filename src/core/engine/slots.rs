//! Per-stage callback storage
//!
//! Each lifecycle stage holds at most one callback; registering again
//! replaces the previous one. Invocation takes the callback out of its slot
//! so it can borrow the job mutably, then restores it afterwards.

use crate::core::engine::StageCallback;
use crate::domain::Stage;

/// Callback slots for the four lifecycle stages
#[derive(Default)]
pub(crate) struct StageSlots {
    slots: [Option<StageCallback>; 4],
}

impl StageSlots {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stores a callback for `stage`, replacing any prior one
    pub(crate) fn set(&mut self, stage: Stage, callback: StageCallback) {
        self.slots[stage.index()] = Some(callback);
    }

    pub(crate) fn is_registered(&self, stage: Stage) -> bool {
        self.slots[stage.index()].is_some()
    }

    /// Vacates and returns the callback for `stage`, if any
    pub(crate) fn take(&mut self, stage: Stage) -> Option<StageCallback> {
        self.slots[stage.index()].take()
    }

    /// Puts a taken callback back, unless the slot was re-registered while
    /// the callback was running (the new registration wins)
    pub(crate) fn restore(&mut self, stage: Stage, callback: StageCallback) {
        let slot = &mut self.slots[stage.index()];
        if slot.is_none() {
            *slot = Some(callback);
        }
    }
}
