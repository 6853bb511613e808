use log::{debug, trace};
use statig::blocking::IntoStateMachineExt as _;

use super::*;
use crate::gesture::{
    config::active_config,
    dispatcher::{dispatch, ActionSink},
    observer::{StateCell, GESTURE_STATE},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureOutput {
    pub action: Option<Action>,
    pub trace: GestureTraceSample,
}

/// Classifier plus the cell the display reads the committed state from.
pub struct GestureEngine {
    config: &'static GestureConfig,
    observer: &'static StateCell,
    machine: statig::blocking::StateMachine<GestureHsm>,
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new(active_config(), &GESTURE_STATE)
    }
}

impl GestureEngine {
    pub fn new(config: &'static GestureConfig, observer: &'static StateCell) -> Self {
        observer.publish(GestureState::None);
        Self {
            config,
            observer,
            machine: GestureHsm::new(config).state_machine(),
        }
    }

    /// Runs one polling tick. Returns at most one action.
    pub fn tick(&mut self, input: TickInput) -> GestureOutput {
        let mut context = DispatchContext::default();
        self.machine
            .handle_with_context(&GestureEvent::Tick(input), &mut context);
        if self.machine.inner().chain_pending {
            self.machine
                .handle_with_context(&GestureEvent::ChainedPress, &mut context);
        }
        self.finish(context)
    }

    /// Runs one tick and hands any resulting action to `sink` without blocking.
    pub fn tick_and_dispatch<S: ActionSink + ?Sized>(
        &mut self,
        input: TickInput,
        sink: &mut S,
    ) -> GestureOutput {
        let output = self.tick(input);
        if let Some(action) = output.action {
            dispatch(sink, action);
        }
        output
    }

    pub fn state(&self) -> GestureState {
        self.machine.inner().state_id
    }

    pub fn movement(&self) -> AccumulatedMovement {
        self.machine.inner().accumulator.snapshot()
    }

    pub fn click_layer_engaged(&self) -> bool {
        self.machine.inner().click_layer_engaged
    }

    /// Drops back to a fresh `NONE`. Returns the toggle that releases the
    /// click layer when it was still engaged.
    pub fn reset(&mut self) -> Option<Action> {
        let release = self
            .click_layer_engaged()
            .then_some(Action::LayerToggle(self.config.click_layer.layer));
        self.machine = GestureHsm::new(self.config).state_machine();
        self.observer.publish(GestureState::None);
        debug!("gesture: reset released_layer={}", release.is_some());
        release
    }

    fn finish(&self, context: DispatchContext) -> GestureOutput {
        let inner = self.machine.inner();
        self.observer.publish(inner.state_id);
        let sample = inner.trace_sample(context.transitions);
        trace!(
            "gesture: tick t={} state={} step={} magnitude={} idle={}",
            sample.t,
            sample.state,
            sample.step,
            sample.magnitude,
            sample.idle_ticks
        );
        GestureOutput {
            action: context.action,
            trace: sample,
        }
    }
}
