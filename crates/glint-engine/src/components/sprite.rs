use glam::Vec2;

use crate::assets::resources::ResourceManager;
use crate::components::component::Component;
use crate::components::game_object::GameObject;
use crate::components::transform::TransformComponent;
use crate::core::context::Context;
use crate::math::Rect;
use crate::renderer::sprite::Sprite;

/// Which point of the scaled sprite sits on the owner's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Draw at the position as-is, same as `TopLeft`.
    #[default]
    None,
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Alignment {
    /// Offset from the anchor point to the sprite's top-left corner,
    /// for a sprite already scaled to `scaled` pixels.
    pub fn anchor_offset(self, scaled: Vec2) -> Vec2 {
        match self {
            Alignment::None | Alignment::TopLeft => Vec2::ZERO,
            Alignment::TopCenter => Vec2::new(-scaled.x / 2.0, 0.0),
            Alignment::TopRight => Vec2::new(-scaled.x, 0.0),
            Alignment::CenterLeft => Vec2::new(0.0, -scaled.y / 2.0),
            Alignment::Center => Vec2::new(-scaled.x / 2.0, -scaled.y / 2.0),
            Alignment::CenterRight => Vec2::new(-scaled.x, -scaled.y / 2.0),
            Alignment::BottomLeft => Vec2::new(0.0, -scaled.y),
            Alignment::BottomCenter => Vec2::new(-scaled.x / 2.0, -scaled.y),
            Alignment::BottomRight => Vec2::new(-scaled.x, -scaled.y),
        }
    }
}

/// Renders a [`Sprite`] at the owner's transform, anchored by alignment.
///
/// On attach it registers the owner with the sprite render system, adds a
/// default transform if the owner has none, and caches the alignment offset.
/// The offset is recomputed only when the transform's version moves or a
/// setter changes the sprite, never per frame. While the sprite's size is
/// unknown (texture not loaded, or zero-sized) the offset stays (0, 0).
pub struct SpriteComponent {
    sprite: Sprite,
    alignment: Alignment,
    /// Unscaled size of the drawn region, zero until resolved.
    sprite_size: Vec2,
    /// Cached offset from the owner's position to the sprite's top-left.
    offset: Vec2,
    /// Transform scale seen at the last offset recompute.
    cached_scale: Vec2,
    /// Transform version seen at the last recompute, `None` before init.
    last_transform_version: Option<u32>,
    hidden: bool,
    registered: bool,
}

impl SpriteComponent {
    pub fn new(sprite: Sprite, alignment: Alignment) -> Self {
        let sprite_size = sprite.display_size();
        Self {
            sprite,
            alignment,
            sprite_size,
            offset: Vec2::ZERO,
            cached_scale: Vec2::ONE,
            last_transform_version: None,
            hidden: false,
            registered: false,
        }
    }

    /// Shorthand for a full-texture sprite looked up by id.
    pub fn from_texture(texture_id: impl Into<String>, alignment: Alignment) -> Self {
        Self::new(Sprite::new(texture_id), alignment)
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn sprite_size(&self) -> Vec2 {
        self.sprite_size
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn set_flipped(&mut self, flipped: bool) {
        self.sprite.flipped = flipped;
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
        self.refresh_offset();
    }

    /// Change the atlas frame, keeping the texture and flip state.
    pub fn set_source_rect(&mut self, source_rect: Option<Rect>, resources: &ResourceManager) {
        self.sprite.source_rect = source_rect;
        self.refresh_size(resources);
        self.refresh_offset();
    }

    /// Swap the whole sprite for another texture, keeping the flip state.
    pub fn set_sprite(
        &mut self,
        texture_id: impl Into<String>,
        source_rect: Option<Rect>,
        resources: &ResourceManager,
    ) {
        let flipped = self.sprite.flipped;
        self.sprite = Sprite {
            texture_id: texture_id.into(),
            source_rect,
            size: Vec2::ZERO,
            flipped,
        };
        self.refresh_size(resources);
        self.refresh_offset();
    }

    /// Resolve the full-texture size once the texture is cached, then take
    /// the display size from the sprite (source rect wins over full size).
    fn refresh_size(&mut self, resources: &ResourceManager) {
        if self.sprite.size == Vec2::ZERO {
            self.sprite.size = resources.texture_size(&self.sprite.texture_id);
        }
        self.sprite_size = self.sprite.display_size();
    }

    fn refresh_offset(&mut self) {
        if self.sprite_size.x <= 0.0 || self.sprite_size.y <= 0.0 {
            self.offset = Vec2::ZERO;
            return;
        }
        let scaled = self.sprite_size * self.cached_scale;
        self.offset = self.alignment.anchor_offset(scaled);
    }

    /// Recompute the offset when the owner's transform version moved since
    /// the last look. A missing transform drops the offset to (0, 0).
    fn observe_transform(&mut self, owner: &GameObject) {
        let Some(transform) = owner.get_component::<TransformComponent>() else {
            self.last_transform_version = None;
            self.offset = Vec2::ZERO;
            return;
        };
        if self.last_transform_version == Some(transform.version()) {
            return;
        }
        self.last_transform_version = Some(transform.version());
        self.cached_scale = transform.scale();
        self.refresh_offset();
    }
}

impl Component for SpriteComponent {
    fn init(&mut self, owner: &mut GameObject, ctx: &mut Context) {
        if !owner.has_component::<TransformComponent>() {
            owner.add_component(TransformComponent::default(), ctx);
        }
        self.refresh_size(ctx.resources());
        self.observe_transform(owner);
        ctx.render_system_mut().register(owner.id());
        self.registered = true;
    }

    fn update(&mut self, _dt: f32, owner: &mut GameObject, ctx: &mut Context) {
        if self.sprite_size.x <= 0.0 || self.sprite_size.y <= 0.0 {
            self.refresh_size(ctx.resources());
            self.refresh_offset();
        }
        self.observe_transform(owner);
    }

    fn clean(&mut self, owner: &mut GameObject, ctx: &mut Context) {
        if self.registered {
            ctx.render_system_mut().unregister(owner.id());
            self.registered = false;
        }
    }
}
