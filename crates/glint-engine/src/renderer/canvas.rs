use glam::Vec2;

use crate::assets::resources::{ResourceManager, TextureHandle};
use crate::math::Rect;
use crate::renderer::camera::Camera;
use crate::renderer::sprite::Sprite;
use crate::renderer::traits::{parallax_span, Color, Renderer};

/// Immediate 2D surface the platform layer implements (a software blitter,
/// an SDL canvas, a browser 2D context). Every call lands on the target
/// right away; `present` flips it to the screen.
pub trait Canvas {
    fn clear(&mut self, color: Color);

    /// Copy `src` (texture pixels) to `dst` (screen pixels), rotated around
    /// the destination's top-left corner, mirrored horizontally when `flip`.
    fn blit(
        &mut self,
        texture: TextureHandle,
        src: Rect,
        dst: Rect,
        rotation_degrees: f32,
        flip: bool,
    );

    fn present(&mut self);
}

/// Immediate backend: forwards each draw call to a [`Canvas`] as it arrives.
///
/// Offscreen destinations are culled against the camera viewport before they
/// reach the canvas. An uncached texture id logs an error and skips the call.
pub struct CanvasRenderer {
    canvas: Box<dyn Canvas>,
    draw_color: Color,
}

impl CanvasRenderer {
    pub fn new(canvas: Box<dyn Canvas>) -> Self {
        Self {
            canvas,
            draw_color: Color::BLACK,
        }
    }

    /// Texture handle, source rectangle and unscaled draw size for a sprite.
    /// None when the texture is not cached.
    fn resolve(
        resources: &ResourceManager,
        sprite: &Sprite,
    ) -> Option<(TextureHandle, Rect, Vec2)> {
        let Some(handle) = resources.texture(&sprite.texture_id) else {
            log::error!("draw: texture '{}' is not cached", sprite.texture_id);
            return None;
        };
        let full_size = resources.texture_size(&sprite.texture_id);
        let src = sprite
            .source_rect
            .unwrap_or(Rect::from_parts(Vec2::ZERO, full_size));
        Some((handle, src, src.size))
    }
}

impl Renderer for CanvasRenderer {
    fn clear_screen(&mut self) {
        self.canvas.clear(self.draw_color);
    }

    fn draw_sprite(
        &mut self,
        camera: &Camera,
        resources: &ResourceManager,
        sprite: &Sprite,
        position: Vec2,
        scale: Vec2,
        rotation_degrees: f32,
    ) {
        let Some((handle, src, size)) = Self::resolve(resources, sprite) else {
            return;
        };
        let dst = Rect::from_parts(camera.world_to_screen(position), size * scale);
        if !camera.is_rect_visible(dst) {
            return;
        }
        self.canvas
            .blit(handle, src, dst, rotation_degrees, sprite.flipped);
    }

    fn draw_parallax(
        &mut self,
        camera: &Camera,
        resources: &ResourceManager,
        sprite: &Sprite,
        position: Vec2,
        scroll_factor: Vec2,
        repeat: (bool, bool),
        scale: Vec2,
    ) {
        let Some((handle, src, size)) = Self::resolve(resources, sprite) else {
            return;
        };
        let scaled = size * scale;
        if scaled.x <= 0.0 || scaled.y <= 0.0 {
            log::debug!(
                "draw_parallax: '{}' has no resolvable size yet",
                sprite.texture_id
            );
            return;
        }
        let anchor = camera.world_to_screen_parallax(position, scroll_factor);
        let viewport = camera.viewport_size();
        let (x0, x1) = parallax_span(anchor.x, scaled.x, viewport.x, repeat.0);
        let (y0, y1) = parallax_span(anchor.y, scaled.y, viewport.y, repeat.1);

        let mut y = y0;
        while y < y1 {
            let mut x = x0;
            while x < x1 {
                let dst = Rect::from_parts(Vec2::new(x, y), scaled);
                if camera.is_rect_visible(dst) {
                    self.canvas.blit(handle, src, dst, 0.0, sprite.flipped);
                }
                x += scaled.x;
            }
            y += scaled.y;
        }
    }

    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn present(&mut self) {
        self.canvas.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum CanvasCall {
        Clear(Color),
        Blit {
            texture: TextureHandle,
            src: Rect,
            dst: Rect,
            flip: bool,
        },
        Present,
    }

    struct RecordingCanvas {
        calls: Rc<RefCell<Vec<CanvasCall>>>,
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self, color: Color) {
            self.calls.borrow_mut().push(CanvasCall::Clear(color));
        }

        fn blit(
            &mut self,
            texture: TextureHandle,
            src: Rect,
            dst: Rect,
            _rotation_degrees: f32,
            flip: bool,
        ) {
            self.calls.borrow_mut().push(CanvasCall::Blit {
                texture,
                src,
                dst,
                flip,
            });
        }

        fn present(&mut self) {
            self.calls.borrow_mut().push(CanvasCall::Present);
        }
    }

    fn fixture() -> (
        CanvasRenderer,
        Camera,
        ResourceManager,
        Rc<RefCell<Vec<CanvasCall>>>,
    ) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let renderer = CanvasRenderer::new(Box::new(RecordingCanvas {
            calls: Rc::clone(&calls),
        }));
        let camera = Camera::new(Vec2::new(200.0, 100.0));
        let mut resources = ResourceManager::new();
        resources.insert_texture("hero", TextureHandle(1), Vec2::new(64.0, 64.0));
        resources.insert_texture("strip", TextureHandle(2), Vec2::new(50.0, 20.0));
        (renderer, camera, resources, calls)
    }

    fn blits(calls: &Rc<RefCell<Vec<CanvasCall>>>) -> Vec<CanvasCall> {
        calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, CanvasCall::Blit { .. }))
            .cloned()
            .collect()
    }

    #[test]
    fn sprite_blit_is_camera_relative_and_scaled() {
        let (mut renderer, mut camera, resources, calls) = fixture();
        camera.set_position(Vec2::new(10.0, 5.0));

        let sprite = Sprite::new("hero");
        renderer.draw_sprite(
            &camera,
            &resources,
            &sprite,
            Vec2::new(30.0, 25.0),
            Vec2::splat(2.0),
            0.0,
        );

        match blits(&calls).as_slice() {
            [CanvasCall::Blit { src, dst, .. }] => {
                assert_eq!(*src, Rect::new(0.0, 0.0, 64.0, 64.0));
                assert_eq!(*dst, Rect::new(20.0, 20.0, 128.0, 128.0));
            }
            other => panic!("Expected one blit, got {other:?}"),
        }
    }

    #[test]
    fn source_rect_rides_through_to_the_blit() {
        let (mut renderer, camera, resources, calls) = fixture();
        let sprite = Sprite::new("hero").with_source_rect(Rect::new(16.0, 0.0, 16.0, 32.0));
        renderer.draw_sprite(&camera, &resources, &sprite, Vec2::ZERO, Vec2::ONE, 0.0);

        match blits(&calls).as_slice() {
            [CanvasCall::Blit { src, dst, .. }] => {
                assert_eq!(*src, Rect::new(16.0, 0.0, 16.0, 32.0));
                assert_eq!(dst.size, Vec2::new(16.0, 32.0));
            }
            other => panic!("Expected one blit, got {other:?}"),
        }
    }

    #[test]
    fn unknown_texture_skips_the_call() {
        let (mut renderer, camera, resources, calls) = fixture();
        let sprite = Sprite::new("never-loaded");
        renderer.draw_sprite(&camera, &resources, &sprite, Vec2::ZERO, Vec2::ONE, 0.0);
        assert!(blits(&calls).is_empty());
    }

    #[test]
    fn offscreen_sprites_are_culled() {
        let (mut renderer, camera, resources, calls) = fixture();
        let sprite = Sprite::new("hero");
        // Fully right of the 200-wide viewport.
        renderer.draw_sprite(
            &camera,
            &resources,
            &sprite,
            Vec2::new(250.0, 0.0),
            Vec2::ONE,
            0.0,
        );
        // Straddling the edge still draws.
        renderer.draw_sprite(
            &camera,
            &resources,
            &sprite,
            Vec2::new(190.0, 0.0),
            Vec2::ONE,
            0.0,
        );
        assert_eq!(blits(&calls).len(), 1);
    }

    #[test]
    fn repeating_parallax_covers_the_viewport_width() {
        let (mut renderer, mut camera, resources, calls) = fixture();
        camera.set_position(Vec2::new(333.0, 0.0));

        let sprite = Sprite::new("strip");
        renderer.draw_parallax(
            &camera,
            &resources,
            &sprite,
            Vec2::ZERO,
            Vec2::new(0.5, 0.0),
            (true, false),
            Vec2::ONE,
        );

        let tiles = blits(&calls);
        // 200px viewport / 50px tiles plus the seam tile left of zero.
        assert!(tiles.len() >= 4, "got {} tiles", tiles.len());
        let (first, last) = match (tiles.first(), tiles.last()) {
            (
                Some(CanvasCall::Blit { dst: first, .. }),
                Some(CanvasCall::Blit { dst: last, .. }),
            ) => (*first, *last),
            other => panic!("Expected blits, got {other:?}"),
        };
        assert!(first.position.x <= 0.0);
        assert!(last.position.x + last.size.x >= 200.0);
        // All tiles share the row anchored by the scroll factor.
        assert_eq!(first.position.y, 0.0);
    }

    #[test]
    fn non_repeating_parallax_is_a_single_tile() {
        let (mut renderer, camera, resources, calls) = fixture();
        let sprite = Sprite::new("strip");
        renderer.draw_parallax(
            &camera,
            &resources,
            &sprite,
            Vec2::new(20.0, 30.0),
            Vec2::ONE,
            (false, false),
            Vec2::ONE,
        );
        let tiles = blits(&calls);
        assert_eq!(tiles.len(), 1);
        match &tiles[0] {
            CanvasCall::Blit { dst, .. } => {
                assert_eq!(dst.position, Vec2::new(20.0, 30.0));
            }
            other => panic!("Expected a blit, got {other:?}"),
        }
    }

    #[test]
    fn zero_sized_layer_draws_nothing() {
        let (mut renderer, camera, mut resources, calls) = fixture();
        resources.insert_texture("empty", TextureHandle(9), Vec2::ZERO);
        let sprite = Sprite::new("empty");
        renderer.draw_parallax(
            &camera,
            &resources,
            &sprite,
            Vec2::ZERO,
            Vec2::ONE,
            (true, true),
            Vec2::ONE,
        );
        assert!(blits(&calls).is_empty());
    }

    #[test]
    fn clear_uses_the_current_draw_color_and_present_flips() {
        let (mut renderer, _camera, _resources, calls) = fixture();
        renderer.set_draw_color(Color::rgb(8, 16, 24));
        renderer.clear_screen();
        renderer.present();
        assert_eq!(
            calls.borrow().as_slice(),
            &[
                CanvasCall::Clear(Color::rgb(8, 16, 24)),
                CanvasCall::Present
            ]
        );
    }
}
