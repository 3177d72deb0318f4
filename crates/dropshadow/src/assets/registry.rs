use std::collections::HashMap;

use crate::assets::manifest::AssetManifest;
use crate::components::graphic::{AtlasId, Graphic};

/// Registry of named graphics, built from an AssetManifest.
/// Provides name-based lookup for game code.
pub struct GraphicRegistry {
    graphics: HashMap<String, Graphic>,
}

impl GraphicRegistry {
    pub fn new() -> Self {
        Self {
            graphics: HashMap::new(),
        }
    }

    /// Build a registry from a parsed AssetManifest.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut graphics = HashMap::with_capacity(manifest.graphics.len());
        for (name, desc) in &manifest.graphics {
            graphics.insert(
                name.clone(),
                Graphic::new(AtlasId(desc.atlas), desc.col as f32, desc.row as f32)
                    .with_size(desc.width, desc.height),
            );
        }
        Self { graphics }
    }

    /// Look up a graphic by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<&Graphic> {
        self.graphics.get(name)
    }

    pub fn len(&self) -> usize {
        self.graphics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphics.is_empty()
    }
}

impl Default for GraphicRegistry {
    fn default() -> Self {
        Self::new()
    }
}
