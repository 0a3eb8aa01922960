pub mod component;
pub mod game_object;
pub mod parallax;
pub mod sprite;
pub mod transform;

// Re-export key types for convenient access
pub use component::Component;
pub use game_object::{GameObject, ObjectId};
pub use parallax::ParallaxComponent;
pub use sprite::{Alignment, SpriteComponent};
pub use transform::TransformComponent;
