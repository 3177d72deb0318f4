use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Asset manifest describing the atlases and named graphics for a game.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetManifest {
    /// List of texture atlases.
    pub atlases: Vec<AtlasDescriptor>,
    /// Named graphic lookup: name → atlas index, cell and size.
    #[serde(default)]
    pub graphics: HashMap<String, GraphicDescriptor>,
}

/// Describes a single texture atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    /// Human-readable name (e.g., "trees").
    pub name: String,
    /// Number of columns in the atlas grid.
    pub cols: u32,
    /// Number of rows in the atlas grid.
    pub rows: u32,
    /// Relative path to the PNG file (e.g., "trees.png").
    pub path: String,
}

/// Describes a named graphic within an atlas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicDescriptor {
    /// Index into the atlases array.
    pub atlas: u32,
    /// Column in the atlas grid.
    pub col: u32,
    /// Row in the atlas grid.
    pub row: u32,
    /// Drawn width in world units (default: 64).
    #[serde(default = "default_extent")]
    pub width: f32,
    /// Drawn height in world units (default: 64).
    #[serde(default = "default_extent")]
    pub height: f32,
}

fn default_extent() -> f32 {
    64.0
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
