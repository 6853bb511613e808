use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Sender};
use log::{trace, warn};

use super::types::{Action, ClickCount, Direction, GestureState, LayerId};
use crate::telemetry;

/// Classifier facts an action is derived from, captured at the transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionContext {
    pub click_count: ClickCount,
    pub direction: Option<Direction>,
    pub click_layer: LayerId,
    pub click_layer_enabled: bool,
    pub click_layer_engaged: bool,
}

/// Maps one classifier transition to at most one action.
pub fn on_transition(
    from: GestureState,
    to: GestureState,
    context: &TransitionContext,
) -> Option<Action> {
    match (from, to) {
        (GestureState::Clickable, GestureState::Clicking) => {
            Some(Action::Click(context.click_count))
        }
        (GestureState::Swiping, GestureState::Swiping) => {
            context.direction.map(Action::SwipeRepeat)
        }
        (_, GestureState::Swipe) => context.direction.map(Action::SwipeStart),
        (GestureState::Waiting, GestureState::Clickable)
            if context.click_layer_enabled && !context.click_layer_engaged =>
        {
            Some(Action::LayerToggle(context.click_layer))
        }
        (from, GestureState::None) if from != GestureState::None && context.click_layer_engaged => {
            Some(Action::LayerToggle(context.click_layer))
        }
        _ => None,
    }
}

/// Non-blocking destination for actions (HID report queue, layer requests).
pub trait ActionSink {
    /// Hands the action back when there is no room for it.
    fn try_enqueue(&mut self, action: Action) -> Result<(), Action>;
}

impl<const N: usize> ActionSink for heapless::Deque<Action, N> {
    fn try_enqueue(&mut self, action: Action) -> Result<(), Action> {
        self.push_back(action)
    }
}

impl<M: RawMutex, const N: usize> ActionSink for Sender<'_, M, Action, N> {
    fn try_enqueue(&mut self, action: Action) -> Result<(), Action> {
        self.try_send(action).map_err(|_| action)
    }
}

/// Enqueues without blocking; a full sink drops the action.
pub fn dispatch<S: ActionSink + ?Sized>(sink: &mut S, action: Action) -> bool {
    match sink.try_enqueue(action) {
        Ok(()) => {
            telemetry::record_action_dispatched();
            trace!("gesture: action_enqueued action={:?}", action);
            true
        }
        Err(dropped) => {
            telemetry::record_action_dropped();
            warn!("gesture: action_dropped action={:?} reason=sink_full", dropped);
            false
        }
    }
}
