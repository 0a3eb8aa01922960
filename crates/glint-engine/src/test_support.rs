//! Shared fixtures for the unit tests: a renderer that records its calls
//! instead of drawing, and a context wired to it with a couple of textures.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use crate::assets::resources::{ResourceManager, TextureHandle};
use crate::core::context::Context;
use crate::renderer::camera::Camera;
use crate::renderer::sprite::Sprite;
use crate::renderer::traits::{Color, Renderer};

/// One recorded renderer call, field-for-field as issued.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RenderCall {
    Clear,
    Sprite {
        texture_id: String,
        position: Vec2,
        scale: Vec2,
        rotation: f32,
        flipped: bool,
    },
    Parallax {
        texture_id: String,
        position: Vec2,
        scroll_factor: Vec2,
        repeat: (bool, bool),
        scale: Vec2,
    },
    SetDrawColor(Color),
    Present,
}

pub(crate) type SharedRenderLog = Rc<RefCell<Vec<RenderCall>>>;

/// Backend that appends every call to a shared log. No culling, no
/// tiling, so tests observe exactly what the engine issued.
struct RecordingRenderer {
    log: SharedRenderLog,
}

impl Renderer for RecordingRenderer {
    fn clear_screen(&mut self) {
        self.log.borrow_mut().push(RenderCall::Clear);
    }

    fn draw_sprite(
        &mut self,
        _camera: &Camera,
        _resources: &ResourceManager,
        sprite: &Sprite,
        position: Vec2,
        scale: Vec2,
        rotation_degrees: f32,
    ) {
        self.log.borrow_mut().push(RenderCall::Sprite {
            texture_id: sprite.texture_id.clone(),
            position,
            scale,
            rotation: rotation_degrees,
            flipped: sprite.flipped,
        });
    }

    fn draw_parallax(
        &mut self,
        _camera: &Camera,
        _resources: &ResourceManager,
        sprite: &Sprite,
        position: Vec2,
        scroll_factor: Vec2,
        repeat: (bool, bool),
        scale: Vec2,
    ) {
        self.log.borrow_mut().push(RenderCall::Parallax {
            texture_id: sprite.texture_id.clone(),
            position,
            scroll_factor,
            repeat,
            scale,
        });
    }

    fn set_draw_color(&mut self, color: Color) {
        self.log.borrow_mut().push(RenderCall::SetDrawColor(color));
    }

    fn present(&mut self) {
        self.log.borrow_mut().push(RenderCall::Present);
    }
}

pub(crate) fn recording_renderer() -> (Box<dyn Renderer>, SharedRenderLog) {
    let log: SharedRenderLog = Rc::new(RefCell::new(Vec::new()));
    let renderer = RecordingRenderer {
        log: Rc::clone(&log),
    };
    (Box::new(renderer), log)
}

/// Context over a recording renderer, preloaded with a 64x64 "hero"
/// texture and a 32x32 "tile" texture.
pub(crate) fn test_context() -> (Context, SharedRenderLog) {
    let (renderer, log) = recording_renderer();
    let mut ctx = Context::new(renderer);
    ctx.resources_mut()
        .insert_texture("hero", TextureHandle(1), Vec2::new(64.0, 64.0));
    ctx.resources_mut()
        .insert_texture("tile", TextureHandle(2), Vec2::new(32.0, 32.0));
    (ctx, log)
}
