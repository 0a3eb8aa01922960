//! Asset handling: texture manifests and the runtime resource cache.

pub mod manifest;
pub mod resources;

// Re-export key types for convenient access
pub use manifest::{TextureDescriptor, TextureManifest};
pub use resources::{ResourceManager, TextureHandle};
