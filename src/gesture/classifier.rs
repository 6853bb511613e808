use log::debug;
use statig::prelude::*;

use super::{
    accumulator::{DirectionBuckets, MovementAccumulator},
    config::GestureConfig,
    dispatcher::{self, TransitionContext},
    trace::GestureTraceSample,
    types::{AccumulatedMovement, Action, ClickCount, Direction, GestureState, TickInput},
};
use crate::telemetry;

mod engine;

pub use engine::{GestureEngine, GestureOutput};

#[derive(Clone, Copy, Debug)]
enum GestureEvent {
    Tick(TickInput),
    /// Second half of a chained press: `CLICKED -> CLICKABLE -> CLICKING`.
    ChainedPress,
}

#[derive(Default)]
struct DispatchContext {
    action: Option<Action>,
    transitions: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Arming {
    Keep,
    Disarm,
}

struct GestureHsm {
    config: &'static GestureConfig,
    buckets: DirectionBuckets,
    accumulator: MovementAccumulator,
    swipe_window: MovementAccumulator,
    state_id: GestureState,
    last_input: TickInput,
    last_movement: AccumulatedMovement,
    still_ticks: u16,
    idle_ticks: u16,
    armed: bool,
    click_count: ClickCount,
    chained: bool,
    chain_pending: bool,
    swipe_direction: Option<Direction>,
    click_layer_engaged: bool,
}

impl GestureHsm {
    fn new(config: &'static GestureConfig) -> Self {
        let buckets =
            DirectionBuckets::new(config.swipe.direction_mode, config.swipe.diagonal_ratio_x100);
        Self {
            config,
            buckets,
            accumulator: MovementAccumulator::new(buckets),
            swipe_window: MovementAccumulator::new(buckets),
            state_id: GestureState::None,
            last_input: TickInput::default(),
            last_movement: AccumulatedMovement::default(),
            still_ticks: 0,
            idle_ticks: 0,
            armed: true,
            click_count: ClickCount::Single,
            chained: false,
            chain_pending: false,
            swipe_direction: None,
            click_layer_engaged: false,
        }
    }

    /// A step equal to the threshold still counts as still.
    fn click_eligible_max(&self) -> u32 {
        u32::from(self.config.thresholds.click_eligible_max_movement)
    }

    fn is_still(&self) -> bool {
        self.last_input.motion.step() <= self.click_eligible_max()
    }

    fn observe(&mut self, input: &TickInput) -> AccumulatedMovement {
        let still = input.motion.step() <= self.click_eligible_max();
        // The swipe window restarts on stillness and once it spans
        // swipe_min_duration ticks, independent of the state's accumulator.
        if still
            || self.swipe_window.snapshot().duration >= self.config.thresholds.swipe_min_duration
        {
            self.swipe_window.clear();
        }
        self.swipe_window.accumulate(&input.motion);

        if still {
            self.still_ticks = self.still_ticks.saturating_add(1);
        } else {
            self.still_ticks = 0;
            self.armed = true;
        }

        if input.is_idle() {
            self.idle_ticks = self.idle_ticks.saturating_add(1);
        } else {
            self.idle_ticks = 0;
        }

        self.last_input = *input;
        self.last_movement = self.accumulator.accumulate(&input.motion);
        self.last_movement
    }

    fn idle_expired(&self) -> bool {
        self.idle_ticks >= self.config.thresholds.idle_timeout_ticks
    }

    fn click_window_elapsed(&self, movement: &AccumulatedMovement) -> bool {
        movement.duration >= self.config.thresholds.click_window_ticks
    }

    fn swipe_direction_for(&self, movement: &AccumulatedMovement) -> Option<Direction> {
        let motion = self.last_input.motion;
        movement
            .direction_hint
            .or_else(|| self.buckets.classify(i32::from(motion.dx), i32::from(motion.dy)))
    }

    /// Fast, large displacement wins over every click-path rule.
    fn try_start_swipe(&mut self, context: &mut DispatchContext) -> bool {
        let movement = &self.swipe_window.snapshot();
        let thresholds = &self.config.thresholds;
        if movement.magnitude <= u32::from(thresholds.swipe_min_movement)
            || movement.duration > thresholds.swipe_min_duration
        {
            return false;
        }
        let Some(direction) = self.swipe_direction_for(movement) else {
            return false;
        };

        self.swipe_direction = Some(direction);
        self.transition(context, GestureState::Swipe);
        true
    }

    fn begin_click(&mut self, context: &mut DispatchContext) {
        self.click_count = if self.chained {
            self.click_count.next()
        } else {
            ClickCount::Single
        };
        self.chained = false;
        self.chain_pending = false;
        self.transition(context, GestureState::Clicking);
    }

    fn settle_to_none(&mut self, context: &mut DispatchContext, arming: Arming) {
        if arming == Arming::Disarm {
            self.armed = false;
        }
        self.chained = false;
        self.chain_pending = false;
        self.transition(context, GestureState::None);
    }

    fn transition(&mut self, context: &mut DispatchContext, to: GestureState) {
        let from = self.state_id;
        let movement = self.accumulator.snapshot();
        let transition = TransitionContext {
            click_count: self.click_count,
            direction: self.swipe_direction,
            click_layer: self.config.click_layer.layer,
            click_layer_enabled: self.config.click_layer.enabled,
            click_layer_engaged: self.click_layer_engaged,
        };

        if let Some(action) = dispatcher::on_transition(from, to, &transition) {
            if matches!(action, Action::LayerToggle(_)) {
                self.click_layer_engaged = !self.click_layer_engaged;
            }
            context.action = Some(action);
        }

        self.state_id = to;
        self.accumulator.clear();
        self.swipe_window.clear();
        context.transitions = context.transitions.saturating_add(1);
        telemetry::record_transition();
        debug!(
            "gesture: transition from={} to={} magnitude={} duration={} t={}",
            from, to, movement.magnitude, movement.duration, self.last_input.motion.t
        );
    }

    fn trace_sample(&self, transitions: u8) -> GestureTraceSample {
        GestureTraceSample {
            t: self.last_input.motion.t,
            state: self.state_id,
            step: self.last_input.motion.step(),
            magnitude: self.last_movement.magnitude,
            duration: self.last_movement.duration,
            still_ticks: self.still_ticks,
            idle_ticks: self.idle_ticks,
            click_count: self.click_count,
            armed: self.armed,
            click_layer_engaged: self.click_layer_engaged,
            transitions,
        }
    }
}

#[state_machine(initial = "State::idle()")]
impl GestureHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &GestureEvent) -> Outcome<State> {
        match event {
            GestureEvent::Tick(input) => {
                self.observe(input);
                if self.try_start_swipe(context) {
                    return Transition(State::swipe());
                }
                if self.armed && self.is_still() {
                    self.transition(context, GestureState::Waiting);
                    return Transition(State::waiting());
                }
                Handled
            }
            GestureEvent::ChainedPress => Handled,
        }
    }

    #[state(superstate = "engaged")]
    fn waiting(&mut self, context: &mut DispatchContext, event: &GestureEvent) -> Outcome<State> {
        match event {
            GestureEvent::Tick(input) => {
                let movement = self.observe(input);
                if self.idle_expired() {
                    return Super;
                }
                if self.try_start_swipe(context) {
                    return Transition(State::swipe());
                }
                if movement.magnitude > self.click_eligible_max() {
                    self.settle_to_none(context, Arming::Keep);
                    return Transition(State::idle());
                }
                if self.still_ticks >= self.config.thresholds.settle_ticks {
                    self.transition(context, GestureState::Clickable);
                    return Transition(State::clickable());
                }
                Handled
            }
            GestureEvent::ChainedPress => Handled,
        }
    }

    #[state(superstate = "engaged")]
    fn clickable(&mut self, context: &mut DispatchContext, event: &GestureEvent) -> Outcome<State> {
        match event {
            GestureEvent::Tick(input) => {
                let movement = self.observe(input);
                if self.idle_expired() {
                    return Super;
                }
                if self.try_start_swipe(context) {
                    return Transition(State::swipe());
                }
                if movement.magnitude > self.click_eligible_max() {
                    self.settle_to_none(context, Arming::Keep);
                    return Transition(State::idle());
                }
                if input.button.pressed {
                    self.begin_click(context);
                    return Transition(State::clicking());
                }
                if self.click_window_elapsed(&movement) {
                    self.settle_to_none(context, Arming::Disarm);
                    return Transition(State::idle());
                }
                Handled
            }
            GestureEvent::ChainedPress if self.chain_pending => {
                self.begin_click(context);
                Transition(State::clicking())
            }
            GestureEvent::ChainedPress => Handled,
        }
    }

    #[state(superstate = "engaged")]
    fn clicking(&mut self, context: &mut DispatchContext, event: &GestureEvent) -> Outcome<State> {
        match event {
            GestureEvent::Tick(input) => {
                self.observe(input);
                if self.idle_expired() {
                    return Super;
                }
                self.transition(context, GestureState::Clicked);
                Transition(State::clicked())
            }
            GestureEvent::ChainedPress => Handled,
        }
    }

    #[state(superstate = "engaged")]
    fn clicked(&mut self, context: &mut DispatchContext, event: &GestureEvent) -> Outcome<State> {
        match event {
            GestureEvent::Tick(input) => {
                let movement = self.observe(input);
                if self.idle_expired() {
                    return Super;
                }
                if self.try_start_swipe(context) {
                    return Transition(State::swipe());
                }
                if self.click_window_elapsed(&movement) {
                    self.settle_to_none(context, Arming::Disarm);
                    return Transition(State::idle());
                }
                if input.button.pressed {
                    self.chained = true;
                    self.chain_pending = true;
                    self.transition(context, GestureState::Clickable);
                    return Transition(State::clickable());
                }
                Handled
            }
            GestureEvent::ChainedPress => Handled,
        }
    }

    #[state(superstate = "engaged")]
    fn swipe(&mut self, context: &mut DispatchContext, event: &GestureEvent) -> Outcome<State> {
        match event {
            GestureEvent::Tick(input) => {
                let movement = self.observe(input);
                if self.idle_expired() {
                    return Super;
                }
                if movement.magnitude >= u32::from(self.config.swipe.continue_movement) {
                    self.transition(context, GestureState::Swiping);
                    return Transition(State::swiping());
                }
                self.settle_to_none(context, Arming::Disarm);
                Transition(State::idle())
            }
            GestureEvent::ChainedPress => Handled,
        }
    }

    #[state(superstate = "engaged")]
    fn swiping(&mut self, context: &mut DispatchContext, event: &GestureEvent) -> Outcome<State> {
        match event {
            GestureEvent::Tick(input) => {
                let movement = self.observe(input);
                if self.idle_expired() {
                    return Super;
                }
                if movement.duration < self.config.swipe.repeat_ticks {
                    return Handled;
                }
                if movement.magnitude >= self.config.swipe.window_continue_movement() {
                    if let Some(direction) = movement.direction_hint {
                        self.swipe_direction = Some(direction);
                    }
                    self.transition(context, GestureState::Swiping);
                    return Transition(State::swiping());
                }
                self.settle_to_none(context, Arming::Disarm);
                Transition(State::idle())
            }
            GestureEvent::ChainedPress => Handled,
        }
    }

    /// Every state but `NONE`; owns the idle watchdog.
    #[superstate]
    fn engaged(&mut self, context: &mut DispatchContext, event: &GestureEvent) -> Outcome<State> {
        match event {
            GestureEvent::Tick(_) if self.idle_expired() => {
                debug!(
                    "gesture: idle_timeout state={} idle_ticks={}",
                    self.state_id, self.idle_ticks
                );
                self.settle_to_none(context, Arming::Disarm);
                Transition(State::idle())
            }
            _ => Handled,
        }
    }
}
