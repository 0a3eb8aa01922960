pub mod manager;

// Re-export key types for convenient access
pub use manager::{ActionState, InputEvent, InputManager};
