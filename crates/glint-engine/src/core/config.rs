use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Engine startup settings, usually parsed from a JSON document.
///
/// Every field falls back to its default when the document omits it, so an
/// empty object `{}` is a valid config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window_title: String,
    /// Physical window size in pixels.
    pub window_size: [u32; 2],
    /// Backbuffer size in pixels; the window scales this up.
    pub logical_size: [u32; 2],
    /// Camera viewport in world units.
    pub camera_size: [f32; 2],
    pub vsync: bool,
    /// Frames per second the app loop paces to. 0 means uncapped.
    pub target_fps: u32,
    /// Action name to the key codes that drive it.
    pub input_mappings: HashMap<String, Vec<u32>>,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_title: "glint".to_string(),
            window_size: [1280, 720],
            logical_size: [640, 360],
            camera_size: [640.0, 360.0],
            vsync: true,
            target_fps: 60,
            input_mappings: HashMap::new(),
        }
    }
}
