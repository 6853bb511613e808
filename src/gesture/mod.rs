pub mod accumulator;
pub mod classifier;
pub mod config;
pub mod dispatcher;
pub mod observer;
pub mod trace;
pub mod types;

pub use classifier::{GestureEngine, GestureOutput};
pub use config::{active_config, GestureConfig};
pub use dispatcher::{dispatch, ActionSink};
pub use observer::{current_state, StateCell, GESTURE_STATE};
pub use trace::GestureTraceSample;
pub use types::{Action, ClickCount, Direction, GestureState, LayerId, TickInput};
