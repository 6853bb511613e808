use core::fmt::Write;

use crate::gesture::{GestureState, LayerId};

pub const LAYER_LINE_CAPACITY: usize = 12;
pub const STATE_LINE_CAPACITY: usize = 16;

/// `Layer:` followed by the layer number right-aligned in three columns.
pub fn format_layer_line(layer: LayerId) -> heapless::String<LAYER_LINE_CAPACITY> {
    let mut line = heapless::String::new();
    let _ = write!(&mut line, "Layer:{:>3}", layer);
    line
}

pub fn format_state_line(state: GestureState) -> heapless::String<STATE_LINE_CAPACITY> {
    let mut line = heapless::String::new();
    let _ = write!(&mut line, "  {}", state.label());
    line
}

#[cfg(feature = "graphics")]
mod render {
    use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
    use u8g2_fonts::{
        fonts,
        types::{FontColor, HorizontalAlignment, VerticalPosition},
        FontRenderer,
    };

    use super::{format_layer_line, format_state_line};
    use crate::gesture::{GestureState, LayerId};

    pub const STATUS_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_6x10_tf>();
    pub const STATUS_LINE_HEIGHT: i32 = 11;

    /// Draws the layer line and the gesture label below it.
    pub fn render_status<T>(display: &mut T, origin: Point, layer: LayerId, state: GestureState)
    where
        T: DrawTarget<Color = BinaryColor>,
    {
        let layer_line = format_layer_line(layer);
        let state_line = format_state_line(state);

        draw_line(display, layer_line.as_str(), origin);
        draw_line(
            display,
            state_line.as_str(),
            origin + Point::new(0, STATUS_LINE_HEIGHT),
        );
    }

    fn draw_line<T>(display: &mut T, text: &str, at: Point)
    where
        T: DrawTarget<Color = BinaryColor>,
    {
        let _ = STATUS_FONT.render_aligned(
            text,
            at,
            VerticalPosition::Top,
            HorizontalAlignment::Left,
            FontColor::Transparent(BinaryColor::On),
            display,
        );
    }
}

#[cfg(feature = "graphics")]
pub use render::{render_status, STATUS_FONT, STATUS_LINE_HEIGHT};
