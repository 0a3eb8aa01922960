use glam::Vec2;

use crate::math::Rect;

/// Drawable sprite data: a texture reference plus presentation flags.
/// Plain value type with no behavior, copied freely into components.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sprite {
    /// Identifier resolved through the resource manager at draw time.
    pub texture_id: String,
    /// Optional sub-rectangle of the texture (atlas frame).
    pub source_rect: Option<Rect>,
    /// Cached full-texture size in pixels; zero until resolved.
    pub size: Vec2,
    /// Mirror horizontally when drawing.
    pub flipped: bool,
}

impl Sprite {
    pub fn new(texture_id: impl Into<String>) -> Self {
        Self {
            texture_id: texture_id.into(),
            source_rect: None,
            size: Vec2::ZERO,
            flipped: false,
        }
    }

    pub fn with_source_rect(mut self, source_rect: Rect) -> Self {
        self.source_rect = Some(source_rect);
        self
    }

    pub fn with_flipped(mut self, flipped: bool) -> Self {
        self.flipped = flipped;
        self
    }

    /// Size the sprite occupies before scaling: the source rectangle when
    /// one is set, otherwise the cached full-texture size.
    pub fn display_size(&self) -> Vec2 {
        match self.source_rect {
            Some(rect) => rect.size,
            None => self.size,
        }
    }
}
