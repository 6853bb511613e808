use core::sync::atomic::{AtomicU8, Ordering};

use super::types::GestureState;

/// Committed classifier state for display code.
///
/// Only the engine writes the cell, once per completed tick, so plain
/// load/store is enough and works on cores without compare-and-swap.
pub struct StateCell {
    raw: AtomicU8,
}

impl StateCell {
    pub const fn new() -> Self {
        Self {
            raw: AtomicU8::new(GestureState::None.as_u8()),
        }
    }

    pub fn load(&self) -> GestureState {
        GestureState::from_u8(self.raw.load(Ordering::Acquire))
    }

    pub(crate) fn publish(&self, state: GestureState) {
        self.raw.store(state.as_u8(), Ordering::Release);
    }
}

impl Default for StateCell {
    fn default() -> Self {
        Self::new()
    }
}

pub static GESTURE_STATE: StateCell = StateCell::new();

pub fn current_state() -> GestureState {
    GESTURE_STATE.load()
}
