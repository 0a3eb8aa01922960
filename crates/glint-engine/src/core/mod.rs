pub mod config;
pub mod context;
pub mod scene;
pub mod scene_manager;
pub mod time;

// Re-export key types for convenient access
pub use config::EngineConfig;
pub use context::Context;
pub use scene::{Scene, SceneHook};
pub use scene_manager::{SceneAction, SceneManager};
pub use time::FrameClock;
