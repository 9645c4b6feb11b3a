//! Fixed-zoom follow camera.

use macroquad::prelude::{vec2, Camera2D, Vec2};

/// Follow camera: fixed zoom, re-targeted on the player every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowCamera {
    /// World point drawn at `offset`.
    pub target: Vec2,
    /// Screen pixels per world pixel.
    pub zoom: f32,
    /// Screen-space point the target lands on (the screen centre).
    pub offset: Vec2,
}

impl FollowCamera {
    /// Camera for a `screen` sized viewport looking at `target`.
    pub fn new(target: Vec2, zoom: f32, screen: Vec2) -> Self {
        Self {
            target,
            zoom,
            offset: screen / 2.0,
        }
    }

    /// No smoothing and no clamping to map bounds.
    #[inline]
    pub fn follow(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Keep `offset` centred after a window resize.
    pub fn resize(&mut self, screen: Vec2) {
        self.offset = screen / 2.0;
    }

    /// World point under a screen point.
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.offset) / self.zoom + self.target
    }

    /// Macroquad camera with y pointing down, like screen space.
    pub fn to_camera2d(&self) -> Camera2D {
        let screen = self.offset * 2.0;
        let w = screen.x.max(1.0);
        let h = screen.y.max(1.0);
        Camera2D {
            target: self.target,
            zoom: vec2(2.0 * self.zoom / w, -2.0 * self.zoom / h),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_screen_centre() {
        let cam = FollowCamera::new(Vec2::ZERO, 3.0, vec2(1500.0, 800.0));
        assert_eq!(cam.offset, vec2(750.0, 400.0));
    }

    #[test]
    fn screen_centre_maps_to_target() {
        let mut cam = FollowCamera::new(Vec2::ZERO, 3.0, vec2(1500.0, 800.0));
        cam.follow(vec2(-4000.0, 25.0));
        assert_eq!(cam.screen_to_world(cam.offset), vec2(-4000.0, 25.0));
        assert_eq!(cam.screen_to_world(vec2(753.0, 400.0)), vec2(-3999.0, 25.0));
    }

    #[test]
    fn camera2d_keeps_target_and_flips_y() {
        let cam = FollowCamera::new(vec2(10.0, 20.0), 1.0, vec2(200.0, 100.0));
        let c = cam.to_camera2d();
        assert_eq!(c.target, vec2(10.0, 20.0));
        assert_eq!(c.zoom, vec2(0.01, -0.02));
    }
}
