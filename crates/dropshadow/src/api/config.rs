//! JSON-loadable light and shadow settings.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::shadow::{DropShadow, OffsetSpace};
use crate::error::Result;
use crate::systems::light::{LightKind, LightSource};

/// Light source settings. `kind` is kept as text so unknown types surface
/// as `ShadowError::UnknownLightType` rather than a generic parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// "directional", "point" or "omni".
    pub kind: String,
    pub position: [f32; 2],
    pub direction: [f32; 2],
    pub max_shadow_length: f32,
    pub falloff_range: f32,
    pub visualize_rays: bool,
    pub interactive: bool,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            kind: LightKind::Directional.name().to_string(),
            position: [0.0, 0.0],
            direction: [5.0, 5.0],
            max_shadow_length: 1000.0,
            falloff_range: 0.0,
            visualize_rays: false,
            interactive: false,
        }
    }
}

impl LightConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a light with no subscribers.
    pub fn build(&self) -> Result<LightSource> {
        let kind = self.kind.parse::<LightKind>().inspect_err(|err| log::warn!("light config: {}", err))?;
        let mut light = match kind {
            LightKind::Directional => LightSource::directional(Vec2::from(self.direction)),
            LightKind::Point => LightSource::point(Vec2::from(self.position)),
        }
        .with_max_shadow_length(self.max_shadow_length)
        .with_falloff_range(self.falloff_range)
        .with_visualize_rays(self.visualize_rays)
        .with_interactive(self.interactive);
        light.position = Vec2::from(self.position);
        Ok(light)
    }
}

/// Drop shadow settings for a caster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    pub visible: bool,
    pub opacity: f32,
    pub offset: [f32; 2],
    pub max_length: f32,
    pub shadow_only: bool,
    pub space: OffsetSpace,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        let shadow = DropShadow::default();
        Self {
            visible: shadow.visible,
            opacity: shadow.opacity,
            offset: shadow.offset.to_array(),
            max_length: shadow.max_length,
            shadow_only: shadow.shadow_only,
            space: shadow.space,
        }
    }
}

impl ShadowConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<&ShadowConfig> for DropShadow {
    fn from(config: &ShadowConfig) -> Self {
        DropShadow::new()
            .with_visible(config.visible)
            .with_opacity(config.opacity)
            .with_offset(Vec2::from(config.offset))
            .with_max_length(config.max_length)
            .with_shadow_only(config.shadow_only)
            .with_space(config.space)
    }
}
