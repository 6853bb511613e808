use core::sync::atomic::{AtomicU32, Ordering};

static GESTURE_TRANSITIONS: AtomicU32 = AtomicU32::new(0);
static GESTURE_ACTIONS_DISPATCHED: AtomicU32 = AtomicU32::new(0);
static GESTURE_ACTIONS_DROPPED: AtomicU32 = AtomicU32::new(0);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub transitions: u32,
    pub actions_dispatched: u32,
    pub actions_dropped: u32,
}

// Counters have a single writer (the polling loop); load + store keeps them
// usable on targets without atomic read-modify-write.
fn bump(counter: &AtomicU32) {
    counter.store(
        counter.load(Ordering::Relaxed).wrapping_add(1),
        Ordering::Relaxed,
    );
}

pub(crate) fn record_transition() {
    bump(&GESTURE_TRANSITIONS);
}

pub(crate) fn record_action_dispatched() {
    bump(&GESTURE_ACTIONS_DISPATCHED);
}

pub(crate) fn record_action_dropped() {
    bump(&GESTURE_ACTIONS_DROPPED);
}

pub fn snapshot() -> Snapshot {
    Snapshot {
        transitions: GESTURE_TRANSITIONS.load(Ordering::Relaxed),
        actions_dispatched: GESTURE_ACTIONS_DISPATCHED.load(Ordering::Relaxed),
        actions_dropped: GESTURE_ACTIONS_DROPPED.load(Ordering::Relaxed),
    }
}
