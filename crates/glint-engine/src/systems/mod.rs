pub mod render;

// Re-export key types for convenient access
pub use render::SpriteRenderSystem;
