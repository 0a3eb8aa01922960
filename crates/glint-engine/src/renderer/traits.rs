//! Renderer abstraction shared by every backend.
//!
//! Backends differ in *when* work reaches the platform (immediate blits vs.
//! a retained per-frame command buffer) but consume the same data model:
//! sprites, camera, resource lookups. The frame bracket is
//! `clear_screen()` .. `present()`; draw calls inside the bracket are
//! composited in call order, draw calls outside it are not resolved.

use glam::Vec2;
use thiserror::Error;

use crate::assets::resources::ResourceManager;
use crate::renderer::camera::Camera;
use crate::renderer::sprite::Sprite;

/// Failures surfaced across the backend construction/submission boundary.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("pipeline creation failed: {0}")]
    PipelineCreation(String),
    #[error("device lost: {0}")]
    DeviceLost(String),
}

/// 8-bit RGBA draw color. Applies to the next `clear_screen()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Normalized lanes for GPU clear values.
    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Draw-call contract every backend implements.
///
/// Positions are world space; the camera maps them to screen space the same
/// way for every backend. Texture lookups go through the resource manager
/// passed per call; an uncached texture id logs an error and skips the call.
pub trait Renderer {
    /// Begin a frame, filling the target with the current draw color.
    fn clear_screen(&mut self);

    /// Draw one sprite with its top-left at `position` (world space).
    /// `rotation_degrees` spins around the sprite's top-left corner.
    fn draw_sprite(
        &mut self,
        camera: &Camera,
        resources: &ResourceManager,
        sprite: &Sprite,
        position: Vec2,
        scale: Vec2,
        rotation_degrees: f32,
    );

    /// Draw a scrolling background layer. `scroll_factor` scales the camera
    /// offset per axis; `repeat` tiles the texture across the viewport on
    /// that axis.
    fn draw_parallax(
        &mut self,
        camera: &Camera,
        resources: &ResourceManager,
        sprite: &Sprite,
        position: Vec2,
        scroll_factor: Vec2,
        repeat: (bool, bool),
        scale: Vec2,
    );

    /// Set the color used by subsequent `clear_screen()` calls.
    fn set_draw_color(&mut self, color: Color);

    /// Finish the frame. The retained backend submits its command buffer
    /// here; immediate backends flip the target.
    fn present(&mut self);
}

/// Tiling span along one axis for a parallax layer.
///
/// Repeating layers start one tile before the first visible column so the
/// seam never shows, and stop at the viewport edge. Non-repeating layers are
/// a single tile at the anchor.
pub(crate) fn parallax_span(anchor: f32, scaled: f32, viewport: f32, repeat: bool) -> (f32, f32) {
    if repeat {
        (anchor.rem_euclid(scaled) - scaled, viewport)
    } else {
        (anchor, anchor + scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_converts_to_unit_floats() {
        let c = Color::rgba(255, 0, 51, 255);
        let f = c.to_f32_array();
        assert!((f[0] - 1.0).abs() < 1e-6);
        assert_eq!(f[1], 0.0);
        assert!((f[2] - 0.2).abs() < 1e-6);
        assert!((f[3] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn repeating_span_covers_the_viewport() {
        // Anchor far off to the left; tiles are 64 wide, viewport 200.
        let (start, stop) = parallax_span(-1000.0, 64.0, 200.0, true);
        assert!(start <= 0.0);
        assert!(start > -64.0 - 1e-3);
        assert_eq!(stop, 200.0);

        // Walking the span always paints past the right edge.
        let mut x = start;
        while x < stop {
            x += 64.0;
        }
        assert!(x >= 200.0);
    }

    #[test]
    fn non_repeating_span_is_one_tile() {
        let (start, stop) = parallax_span(30.0, 64.0, 200.0, false);
        assert_eq!(start, 30.0);
        assert_eq!(stop, 94.0);
    }

    #[test]
    fn repeating_span_handles_positive_anchor() {
        let (start, _) = parallax_span(10.0, 64.0, 200.0, true);
        // 10 mod 64 - 64 = -54: first tile starts left of the screen.
        assert!((start - -54.0).abs() < 1e-3);
    }
}
