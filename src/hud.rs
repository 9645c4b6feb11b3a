//! On-screen FPS readout.

use macroquad::prelude::*;

const FPS_FONT_SIZE: u16 = 30;
const FPS_MARGIN: Vec2 = Vec2::new(20.0, 40.0);

/// Colour of the FPS readout for `fps` against the `target` rate.
pub fn fps_color(fps: f32, target: f32) -> Color {
    if fps < target / 2.0 {
        RED
    } else if fps < target / 1.5 {
        ORANGE
    } else if fps < target / 1.2 {
        YELLOW
    } else if fps < target / 1.1 {
        BLUE
    } else {
        GREEN
    }
}

/// FPS in the top-right corner, screen space.
pub fn draw_fps(target: f32) {
    let fps = get_fps();
    let text = format!("FPS: {fps}");
    let size = measure_text(&text, None, FPS_FONT_SIZE, 1.0);
    draw_text(
        &text,
        screen_width() - size.width - FPS_MARGIN.x,
        FPS_MARGIN.y,
        FPS_FONT_SIZE as f32,
        fps_color(fps as f32, target),
    );
}
