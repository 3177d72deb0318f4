//! Drop shadow material: uniforms for a host-side fragment shader that
//! samples the graphic at an offset and blends a tinted copy beneath it.
//!
//! Unlike the two-pass `DropShadow`, the material shadow is clipped to the
//! graphic's own texture bounds, so trimmed sprites lose part of it.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::util::color::Color;

/// Shadow colour and texel offset for the drop shadow shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowMaterial {
    pub color: Color,
    /// Sample offset in texels.
    pub offset: Vec2,
}

/// GPU-side uniform block: `[r, g, b, a, offset_x, offset_y, pad, pad]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ShadowMaterialUniform {
    pub color: [f32; 4],
    pub offset: [f32; 2],
    pub _pad: [f32; 2],
}

impl ShadowMaterialUniform {
    pub const FLOATS: usize = 8;
}

impl ShadowMaterial {
    pub fn new(color: Color, offset: Vec2) -> Self {
        Self { color, offset }
    }

    pub fn uniform(&self) -> ShadowMaterialUniform {
        ShadowMaterialUniform {
            color: self.color.to_array(),
            offset: self.offset.to_array(),
            _pad: [0.0; 2],
        }
    }
}

impl Default for ShadowMaterial {
    fn default() -> Self {
        Self {
            color: Color::rgba(0.0, 0.0, 0.0, 0.3),
            offset: Vec2::new(-5.0, -5.0),
        }
    }
}
