use super::types::{ClickCount, GestureState};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureTraceSample {
    pub t: u32,
    pub state: GestureState,
    pub step: u32,
    pub magnitude: u32,
    pub duration: u16,
    pub still_ticks: u16,
    pub idle_ticks: u16,
    pub click_count: ClickCount,
    pub armed: bool,
    pub click_layer_engaged: bool,
    pub transitions: u8,
}
