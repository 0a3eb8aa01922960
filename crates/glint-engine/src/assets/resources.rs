use std::collections::HashMap;

use glam::Vec2;

use crate::assets::manifest::TextureManifest;

/// Opaque handle to a platform texture. Allocated by the bootstrap layer
/// (or provisionally by `load_manifest`) and passed back to backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

struct TextureEntry {
    handle: TextureHandle,
    size: Vec2,
}

/// Cache of texture metadata keyed by id string.
///
/// Loading and decoding live outside the core; the platform layer inserts
/// entries as textures become available. Lookups of unknown ids are not
/// errors; callers poll until the entry appears (deferred metadata).
#[derive(Default)]
pub struct ResourceManager {
    textures: HashMap<String, TextureEntry>,
    next_handle: u32,
}

impl ResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or re-point) a texture id.
    pub fn insert_texture(&mut self, id: impl Into<String>, handle: TextureHandle, size: Vec2) {
        self.textures.insert(id.into(), TextureEntry { handle, size });
    }

    /// Register every manifest entry, allocating sequential handles.
    /// The platform layer may later re-point ids at real device textures.
    /// Returns the number of entries registered.
    pub fn load_manifest(&mut self, manifest: &TextureManifest) -> usize {
        for descriptor in &manifest.textures {
            let handle = TextureHandle(self.next_handle);
            self.next_handle += 1;
            self.insert_texture(
                descriptor.id.clone(),
                handle,
                Vec2::new(descriptor.size[0], descriptor.size[1]),
            );
        }
        manifest.textures.len()
    }

    pub fn texture(&self, id: &str) -> Option<TextureHandle> {
        self.textures.get(id).map(|entry| entry.handle)
    }

    /// Pixel size of a cached texture; (0,0) when the id is unknown.
    pub fn texture_size(&self, id: &str) -> Vec2 {
        self.textures
            .get(id)
            .map(|entry| entry.size)
            .unwrap_or(Vec2::ZERO)
    }

    pub fn remove_texture(&mut self, id: &str) -> bool {
        if self.textures.remove(id).is_none() {
            log::warn!("remove_texture: '{id}' is not cached");
            return false;
        }
        true
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_look_up() {
        let mut resources = ResourceManager::new();
        resources.insert_texture("player", TextureHandle(7), Vec2::new(64.0, 64.0));
        assert_eq!(resources.texture("player"), Some(TextureHandle(7)));
        assert_eq!(resources.texture_size("player"), Vec2::new(64.0, 64.0));
    }

    #[test]
    fn misses_return_none_and_zero() {
        let resources = ResourceManager::new();
        assert_eq!(resources.texture("ghost"), None);
        assert_eq!(resources.texture_size("ghost"), Vec2::ZERO);
    }

    #[test]
    fn manifest_entries_get_sequential_handles() {
        let manifest = TextureManifest::from_json(
            r#"{ "textures": [
                { "id": "a", "size": [8.0, 8.0] },
                { "id": "b", "size": [16.0, 4.0] }
            ] }"#,
        )
        .unwrap();
        let mut resources = ResourceManager::new();
        assert_eq!(resources.load_manifest(&manifest), 2);
        assert_eq!(resources.texture("a"), Some(TextureHandle(0)));
        assert_eq!(resources.texture("b"), Some(TextureHandle(1)));
        assert_eq!(resources.texture_size("b"), Vec2::new(16.0, 4.0));
    }

    #[test]
    fn remove_is_a_warned_noop_when_absent() {
        let mut resources = ResourceManager::new();
        resources.insert_texture("a", TextureHandle(0), Vec2::ONE);
        assert!(resources.remove_texture("a"));
        assert!(!resources.remove_texture("a"));
        assert!(resources.is_empty());
    }

    #[test]
    fn reinsert_repoints_the_handle() {
        let mut resources = ResourceManager::new();
        resources.insert_texture("a", TextureHandle(0), Vec2::splat(8.0));
        resources.insert_texture("a", TextureHandle(42), Vec2::splat(16.0));
        assert_eq!(resources.texture("a"), Some(TextureHandle(42)));
        assert_eq!(resources.texture_size("a"), Vec2::splat(16.0));
        assert_eq!(resources.len(), 1);
    }
}
