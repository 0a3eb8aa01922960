use serde::{Deserialize, Serialize};

/// One texture entry: an id the engine refers to, an opaque path the
/// platform loader understands, and the pixel size when known up front.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureDescriptor {
    pub id: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub size: [f32; 2],
}

/// Texture metadata shipped alongside the assets, parsed from JSON.
/// The engine core never touches pixel data; the manifest only pre-seeds
/// sizes so sprites can lay themselves out before textures finish loading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextureManifest {
    #[serde(default)]
    pub textures: Vec<TextureDescriptor>,
}

impl TextureManifest {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
