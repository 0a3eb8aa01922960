//! Rendering: camera, sprite descriptions and the two renderer backends.

pub mod camera;
pub mod canvas;
pub mod gpu;
pub mod sprite;
pub mod traits;

// Re-export key types for convenient access
pub use camera::Camera;
pub use canvas::{Canvas, CanvasRenderer};
pub use gpu::{
    DrawRun, FramePacket, GpuDevice, GpuQueue, GpuRenderer, PipelineHandle, SpriteInstance,
};
pub use sprite::Sprite;
pub use traits::{Color, Renderer, RendererError};
