//! Underglow colour and trackball scroll mode that follow the highest
//! active layer.

use log::debug;

use crate::gesture::{config::IndicatorConfig, LayerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

// QMK's named HSV values.
pub const HSV_RED: Hsv = Hsv::new(0, 255, 255);
pub const HSV_YELLOW: Hsv = Hsv::new(43, 255, 255);
pub const HSV_GREEN: Hsv = Hsv::new(85, 255, 255);
pub const HSV_TURQUOISE: Hsv = Hsv::new(123, 90, 112);
pub const HSV_BLUE: Hsv = Hsv::new(170, 255, 255);
pub const HSV_PURPLE: Hsv = Hsv::new(191, 255, 255);
pub const HSV_MAGENTA: Hsv = Hsv::new(213, 255, 255);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerIndication {
    pub color: Hsv,
    pub scroll_mode: bool,
}

pub fn scroll_mode_for(layer: LayerId, config: &IndicatorConfig) -> bool {
    layer < 32 && config.scroll_layer_mask & (1u32 << layer) != 0
}

pub fn color_for(layer: LayerId, click_layer: LayerId) -> Hsv {
    match layer {
        1 => HSV_MAGENTA,
        2 => HSV_BLUE,
        3 => HSV_YELLOW,
        4 => HSV_RED,
        5 => HSV_GREEN,
        layer if layer == click_layer => HSV_TURQUOISE,
        _ => HSV_PURPLE,
    }
}

/// Called by the host whenever its layer state changes.
pub fn indicate(
    highest_layer: LayerId,
    config: &IndicatorConfig,
    click_layer: LayerId,
) -> LayerIndication {
    let indication = LayerIndication {
        color: color_for(highest_layer, click_layer),
        scroll_mode: scroll_mode_for(highest_layer, config),
    };
    debug!(
        "layers: indicate layer={} hue={} scroll_mode={}",
        highest_layer, indication.color.h, indication.scroll_mode
    );
    indication
}
