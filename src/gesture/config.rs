use super::types::{DirectionMode, LayerId};

#[derive(Clone, Copy, Debug)]
pub struct ThresholdConfig {
    pub click_eligible_max_movement: u16,
    pub settle_ticks: u16,
    pub click_window_ticks: u16,
    pub swipe_min_movement: u16,
    pub swipe_min_duration: u16,
    pub idle_timeout_ticks: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct SwipeConfig {
    pub continue_movement: u16,
    pub repeat_ticks: u16,
    pub direction_mode: DirectionMode,
    pub diagonal_ratio_x100: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct ClickLayerConfig {
    pub enabled: bool,
    pub layer: LayerId,
}

#[derive(Clone, Copy, Debug)]
pub struct IndicatorConfig {
    pub scroll_layer_mask: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct GestureConfig {
    pub thresholds: ThresholdConfig,
    pub swipe: SwipeConfig,
    pub click_layer: ClickLayerConfig,
    pub indicator: IndicatorConfig,
}

impl SwipeConfig {
    /// Movement a full repeat window must cover to keep `SWIPING` alive.
    pub const fn window_continue_movement(&self) -> u32 {
        self.continue_movement as u32 * self.repeat_ticks as u32
    }
}

include!(concat!(env!("OUT_DIR"), "/gesture_config.rs"));

pub fn active_config() -> &'static GestureConfig {
    &GESTURE_CONFIG
}
