pub mod assets;
pub mod components;
pub mod core;
pub mod input;
pub mod math;
pub mod renderer;
pub mod systems;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export key types at crate root for convenience
pub use assets::manifest::{TextureDescriptor, TextureManifest};
pub use assets::resources::{ResourceManager, TextureHandle};
pub use components::component::Component;
pub use components::game_object::{GameObject, ObjectId};
pub use components::parallax::ParallaxComponent;
pub use components::sprite::{Alignment, SpriteComponent};
pub use components::transform::TransformComponent;
pub use core::config::EngineConfig;
pub use core::context::Context;
pub use core::scene::{Scene, SceneHook};
pub use core::scene_manager::{SceneAction, SceneManager};
pub use core::time::FrameClock;
pub use input::manager::{ActionState, InputEvent, InputManager};
pub use math::Rect;
pub use renderer::camera::Camera;
pub use renderer::canvas::{Canvas, CanvasRenderer};
pub use renderer::gpu::{
    DrawRun, FramePacket, GpuDevice, GpuQueue, GpuRenderer, PipelineHandle, SpriteInstance,
};
pub use renderer::sprite::Sprite;
pub use renderer::traits::{Color, Renderer, RendererError};
