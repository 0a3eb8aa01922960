use glam::Vec2;

use crate::assets::resources::ResourceManager;
use crate::components::game_object::{GameObject, ObjectId};
use crate::core::config::EngineConfig;
use crate::core::scene::Scene;
use crate::core::scene_manager::SceneAction;
use crate::input::manager::InputManager;
use crate::renderer::camera::Camera;
use crate::renderer::sprite::Sprite;
use crate::renderer::traits::{Color, Renderer};
use crate::systems::render::SpriteRenderSystem;

/// Engine services handed to every component hook and scene pass.
///
/// Owns the renderer, camera, input, resources and the sprite render system
/// so call sites thread one `&mut Context` instead of five borrows. Draw
/// calls that need several services at once go through the helpers here,
/// which split the borrow internally.
pub struct Context {
    renderer: Box<dyn Renderer>,
    camera: Camera,
    input: InputManager,
    resources: ResourceManager,
    render_system: SpriteRenderSystem,
    /// Scene transition mailbox the scene manager drains once per update.
    scene_action: SceneAction,
    next_object_id: u32,
}

impl Context {
    pub fn new(renderer: Box<dyn Renderer>) -> Self {
        Self {
            renderer,
            camera: Camera::new(Vec2::new(640.0, 360.0)),
            input: InputManager::new(),
            resources: ResourceManager::new(),
            render_system: SpriteRenderSystem::new(),
            scene_action: SceneAction::None,
            next_object_id: 0,
        }
    }

    /// Build a context with the camera viewport and input bindings a config
    /// document describes.
    pub fn from_config(renderer: Box<dyn Renderer>, config: &EngineConfig) -> Self {
        let mut ctx = Self::new(renderer);
        ctx.camera
            .set_viewport_size(Vec2::new(config.camera_size[0], config.camera_size[1]));
        for (action, keys) in &config.input_mappings {
            ctx.input.bind_action(action, keys);
        }
        ctx
    }

    /// Hand out the next object id. Ids are unique per context.
    pub fn alloc_object_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_object_id);
        self.next_object_id = self.next_object_id.wrapping_add(1);
        id
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn input(&self) -> &InputManager {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceManager {
        &mut self.resources
    }

    pub fn render_system(&self) -> &SpriteRenderSystem {
        &self.render_system
    }

    pub fn render_system_mut(&mut self) -> &mut SpriteRenderSystem {
        &mut self.render_system
    }

    /// Ask the scene manager to push `scene` after the current update.
    /// A later request in the same frame wins; the loser is cleaned.
    pub fn request_push_scene(&mut self, scene: Scene) {
        let prior = std::mem::replace(&mut self.scene_action, SceneAction::Push(scene));
        self.discard_action(prior);
    }

    /// Ask the scene manager to pop the top scene after the current update.
    pub fn request_pop_scene(&mut self) {
        let prior = std::mem::replace(&mut self.scene_action, SceneAction::Pop);
        self.discard_action(prior);
    }

    /// Ask the scene manager to clean the whole stack and start over with
    /// `scene` after the current update.
    pub fn request_replace_scene(&mut self, scene: Scene) {
        let prior = std::mem::replace(&mut self.scene_action, SceneAction::Replace(scene));
        self.discard_action(prior);
    }

    /// Hand the queued transition to the scene manager, leaving `None`.
    pub(crate) fn take_scene_action(&mut self) -> SceneAction {
        std::mem::replace(&mut self.scene_action, SceneAction::None)
    }

    // Last write wins; a displaced Push/Replace still owns a scene, which
    // must be cleaned before it drops.
    fn discard_action(&mut self, action: SceneAction) {
        match action {
            SceneAction::None => {}
            SceneAction::Pop => {
                log::debug!("scene request: overwriting a queued pop");
            }
            SceneAction::Push(mut scene) | SceneAction::Replace(mut scene) => {
                log::debug!(
                    "scene request: overwriting a queued transition, cleaning '{}'",
                    scene.name()
                );
                scene.clean(self);
            }
        }
    }

    pub fn clear_screen(&mut self) {
        self.renderer.clear_screen();
    }

    pub fn set_draw_color(&mut self, color: Color) {
        self.renderer.set_draw_color(color);
    }

    pub fn present(&mut self) {
        self.renderer.present();
    }

    /// Draw every registered sprite that `objects` resolves, in registration
    /// order. Scenes call this once per render pass with their own objects.
    pub fn render_sprites(&mut self, objects: &[GameObject]) {
        let Context {
            renderer,
            camera,
            resources,
            render_system,
            ..
        } = self;
        render_system.render_all(renderer.as_mut(), camera, resources, objects);
    }

    /// Issue a single sprite draw outside the registry, world space.
    pub fn draw_sprite(
        &mut self,
        sprite: &Sprite,
        position: Vec2,
        scale: Vec2,
        rotation_degrees: f32,
    ) {
        let Context {
            renderer,
            camera,
            resources,
            ..
        } = self;
        renderer.draw_sprite(camera, resources, sprite, position, scale, rotation_degrees);
    }

    /// Issue a scrolling background draw, world space anchor.
    pub fn draw_parallax(
        &mut self,
        sprite: &Sprite,
        position: Vec2,
        scroll_factor: Vec2,
        repeat: (bool, bool),
        scale: Vec2,
    ) {
        let Context {
            renderer,
            camera,
            resources,
            ..
        } = self;
        renderer.draw_parallax(camera, resources, sprite, position, scroll_factor, repeat, scale);
    }
}
