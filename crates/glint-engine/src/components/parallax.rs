use glam::Vec2;

use crate::components::component::Component;
use crate::components::game_object::GameObject;
use crate::components::transform::TransformComponent;
use crate::core::context::Context;
use crate::renderer::sprite::Sprite;

/// Scrolling background layer drawn during the owner's render pass.
///
/// Unlike [`SpriteComponent`](crate::components::sprite::SpriteComponent)
/// this does not go through the sprite render system; it issues its own
/// `draw_parallax` call so layers composite under the registered sprites.
/// The owner's transform position anchors the layer in world space and is
/// optional, a missing transform anchors at the origin.
pub struct ParallaxComponent {
    sprite: Sprite,
    /// Per-axis multiplier on the camera offset. 0 pins the layer to the
    /// screen, 1 scrolls it with the world, values between drift slower.
    scroll_factor: Vec2,
    /// Tile the texture across the viewport per axis.
    repeat: (bool, bool),
    scale: Vec2,
    hidden: bool,
}

impl ParallaxComponent {
    pub fn new(sprite: Sprite, scroll_factor: Vec2) -> Self {
        Self {
            sprite,
            scroll_factor,
            repeat: (true, false),
            scale: Vec2::ONE,
            hidden: false,
        }
    }

    pub fn with_repeat(mut self, repeat_x: bool, repeat_y: bool) -> Self {
        self.repeat = (repeat_x, repeat_y);
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn scroll_factor(&self) -> Vec2 {
        self.scroll_factor
    }

    pub fn set_scroll_factor(&mut self, scroll_factor: Vec2) {
        self.scroll_factor = scroll_factor;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    fn refresh_size(&mut self, ctx: &Context) {
        if self.sprite.size == Vec2::ZERO {
            self.sprite.size = ctx.resources().texture_size(&self.sprite.texture_id);
        }
    }
}

impl Component for ParallaxComponent {
    fn init(&mut self, _owner: &mut GameObject, ctx: &mut Context) {
        self.refresh_size(ctx);
    }

    fn update(&mut self, _dt: f32, _owner: &mut GameObject, ctx: &mut Context) {
        // Keep retrying until the texture shows up in the cache.
        self.refresh_size(ctx);
    }

    fn render(&mut self, owner: &mut GameObject, ctx: &mut Context) {
        if self.hidden {
            return;
        }
        let anchor = owner
            .get_component::<TransformComponent>()
            .map(|t| t.position())
            .unwrap_or(Vec2::ZERO);
        ctx.draw_parallax(&self.sprite, anchor, self.scroll_factor, self.repeat, self.scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_context, RenderCall};

    #[test]
    fn render_issues_one_parallax_call() {
        let (mut ctx, log) = test_context();
        let mut object = GameObject::new(&mut ctx, "sky");
        object.add_component(TransformComponent::new(Vec2::new(0.0, 40.0)), &mut ctx);
        object.add_component(
            ParallaxComponent::new(Sprite::new("tile"), Vec2::new(0.25, 0.0)),
            &mut ctx,
        );

        object.render(&mut ctx);

        let calls = log.borrow();
        match calls.as_slice() {
            [RenderCall::Parallax {
                texture_id,
                position,
                scroll_factor,
                repeat,
                scale,
            }] => {
                assert_eq!(texture_id, "tile");
                assert_eq!(*position, Vec2::new(0.0, 40.0));
                assert_eq!(*scroll_factor, Vec2::new(0.25, 0.0));
                assert_eq!(*repeat, (true, false));
                assert_eq!(*scale, Vec2::ONE);
            }
            other => panic!("Expected a single parallax call, got {other:?}"),
        }
    }

    #[test]
    fn hidden_layer_draws_nothing() {
        let (mut ctx, log) = test_context();
        let mut object = GameObject::new(&mut ctx, "sky");
        object.add_component(
            ParallaxComponent::new(Sprite::new("tile"), Vec2::splat(0.5)),
            &mut ctx,
        );
        object
            .get_component_mut::<ParallaxComponent>()
            .unwrap()
            .set_hidden(true);

        object.render(&mut ctx);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn missing_transform_anchors_at_the_origin() {
        let (mut ctx, log) = test_context();
        let mut object = GameObject::new(&mut ctx, "sky");
        object.add_component(
            ParallaxComponent::new(Sprite::new("tile"), Vec2::ONE),
            &mut ctx,
        );

        object.render(&mut ctx);

        let calls = log.borrow();
        match calls.as_slice() {
            [RenderCall::Parallax { position, .. }] => assert_eq!(*position, Vec2::ZERO),
            other => panic!("Expected a single parallax call, got {other:?}"),
        }
    }

    #[test]
    fn init_resolves_the_texture_size() {
        let (mut ctx, _log) = test_context();
        let mut object = GameObject::new(&mut ctx, "sky");
        object.add_component(
            ParallaxComponent::new(Sprite::new("tile"), Vec2::ONE),
            &mut ctx,
        );
        let layer = object.get_component::<ParallaxComponent>().unwrap();
        assert_eq!(layer.sprite().size, Vec2::new(32.0, 32.0));
    }
}
