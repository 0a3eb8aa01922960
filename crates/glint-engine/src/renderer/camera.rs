use glam::Vec2;

use crate::math::Rect;

/// 2D camera with a top-left world position and a fixed logical viewport.
/// World-to-screen mapping is a plain translation; parallax layers scale the
/// translation per axis. An optional world rectangle limits where the
/// viewport may travel.
pub struct Camera {
    position: Vec2,
    viewport_size: Vec2,
    limit_bounds: Option<Rect>,
    smoothing: f32,
}

impl Camera {
    pub fn new(viewport_size: Vec2) -> Self {
        Self {
            position: Vec2::ZERO,
            viewport_size,
            limit_bounds: None,
            smoothing: 5.0,
        }
    }

    /// Top-left corner of the viewport in world space.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, viewport_size: Vec2) {
        self.viewport_size = viewport_size;
        self.clamp_to_bounds();
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.clamp_to_bounds();
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
        self.clamp_to_bounds();
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.position
    }

    /// Like `world_to_screen` but the camera offset is scaled per axis.
    /// A factor of zero pins the layer to the screen; one tracks the world.
    pub fn world_to_screen_parallax(&self, world: Vec2, factor: Vec2) -> Vec2 {
        world - self.position * factor
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.position
    }

    /// Constrain the viewport to a world rectangle. Takes effect
    /// immediately and on every later move.
    pub fn set_limit_bounds(&mut self, bounds: Rect) {
        self.limit_bounds = Some(bounds);
        self.clamp_to_bounds();
    }

    pub fn clear_limit_bounds(&mut self) {
        self.limit_bounds = None;
    }

    /// Exponential follow rate for `follow`; zero snaps instantly.
    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.smoothing = smoothing.max(0.0);
    }

    /// Ease the viewport toward centering `target` in view.
    /// Call once per frame with the frame delta.
    pub fn follow(&mut self, target: Vec2, dt: f32) {
        let desired = target - self.viewport_size * 0.5;
        if self.smoothing <= 0.0 {
            self.position = desired;
        } else {
            let t = (self.smoothing * dt).min(1.0);
            self.position += (desired - self.position) * t;
        }
        self.clamp_to_bounds();
    }

    /// Overlap test against the screen rectangle (0,0)..viewport.
    /// `rect` is in screen space; backends use this for culling.
    pub fn is_rect_visible(&self, rect: Rect) -> bool {
        rect.intersects(&Rect::from_parts(Vec2::ZERO, self.viewport_size))
    }

    fn clamp_to_bounds(&mut self) {
        let Some(bounds) = self.limit_bounds else {
            return;
        };
        let min = bounds.min();
        let max = bounds.max() - self.viewport_size;
        // A viewport wider/taller than the bounds pins to the bounds origin.
        self.position.x = if max.x < min.x {
            min.x
        } else {
            self.position.x.clamp(min.x, max.x)
        };
        self.position.y = if max.y < min.y {
            min.y
        } else {
            self.position.y.clamp(min.y, max.y)
        };
    }
}
