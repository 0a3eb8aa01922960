//! Flat draw registry for sprite-bearing objects.
//!
//! Objects register by id when a [`SpriteComponent`] attaches and unregister
//! when it cleans. Each frame the registry is resolved against the objects of
//! the scene being drawn; ids the scene does not own are skipped, not pruned,
//! so stacked scenes each draw exactly their own sprites from one registry.

use std::collections::HashMap;

use crate::assets::resources::ResourceManager;
use crate::components::game_object::{GameObject, ObjectId};
use crate::components::sprite::SpriteComponent;
use crate::components::transform::TransformComponent;
use crate::renderer::camera::Camera;
use crate::renderer::traits::Renderer;

pub struct SpriteRenderSystem {
    /// Ids in registration order, which is also draw order.
    registry: Vec<ObjectId>,
}

impl SpriteRenderSystem {
    pub fn new() -> Self {
        Self {
            registry: Vec::with_capacity(32),
        }
    }

    /// Append an object to the draw list. O(1), duplicates are not checked.
    pub fn register(&mut self, id: ObjectId) {
        self.registry.push(id);
    }

    /// Remove every copy of `id` from the draw list. Returns false and warns
    /// when the id was never registered.
    pub fn unregister(&mut self, id: ObjectId) -> bool {
        let before = self.registry.len();
        self.registry.retain(|&r| r != id);
        if self.registry.len() == before {
            log::warn!("unregister: object {} is not in the sprite registry", id.0);
            return false;
        }
        true
    }

    pub fn is_registered(&self, id: ObjectId) -> bool {
        self.registry.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Draw every registered object that `objects` can resolve, in
    /// registration order. Hidden sprites and objects missing a sprite or
    /// transform draw nothing.
    pub fn render_all(
        &self,
        renderer: &mut dyn Renderer,
        camera: &Camera,
        resources: &ResourceManager,
        objects: &[GameObject],
    ) {
        if self.registry.is_empty() {
            return;
        }
        let mut by_id: HashMap<ObjectId, &GameObject> = HashMap::with_capacity(objects.len());
        for object in objects {
            by_id.insert(object.id(), object);
        }
        for &id in &self.registry {
            let Some(&object) = by_id.get(&id) else {
                continue;
            };
            let Some(sprite) = object.get_component::<SpriteComponent>() else {
                continue;
            };
            if sprite.is_hidden() {
                continue;
            }
            let Some(transform) = object.get_component::<TransformComponent>() else {
                continue;
            };
            renderer.draw_sprite(
                camera,
                resources,
                sprite.sprite(),
                transform.position() + sprite.offset(),
                transform.scale(),
                transform.rotation(),
            );
        }
    }
}

impl Default for SpriteRenderSystem {
    fn default() -> Self {
        Self::new()
    }
}
