use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::components::entity::Entity;
use crate::components::graphic::Graphic;
use crate::components::material::{ShadowMaterial, ShadowMaterialUniform};
use crate::renderer::context::{DrawContext, DrawState, StateStack};
use crate::util::color::Color;

/// Per-draw data written to SharedArrayBuffer for the TypeScript renderer.
/// Must match the TypeScript protocol: 20 floats = 80 bytes stride.
///
/// One instance per `draw_image` call: a shadow pass and a normal pass of the
/// same entity produce two instances sharing the transform.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Entity X position in world space.
    pub x: f32,
    /// Entity Y position in world space.
    pub y: f32,
    /// Entity rotation in radians.
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Draw position in the entity's local frame.
    pub draw_x: f32,
    pub draw_y: f32,
    /// Graphic size in world units.
    pub width: f32,
    pub height: f32,
    /// Atlas cell.
    pub atlas_col: f32,
    pub atlas_row: f32,
    pub atlas: f32,
    /// Tint colour.
    pub tint_r: f32,
    pub tint_g: f32,
    pub tint_b: f32,
    /// Tint alpha multiplied by the context opacity.
    pub alpha: f32,
    /// Draw order key.
    pub z: f32,
    /// Index into the material uniform table, or -1 for none.
    pub material: f32,
    pub _pad: [f32; 2],
}

impl RenderInstance {
    pub const FLOATS: usize = 20;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
    pub const NO_MATERIAL: f32 = -1.0;

    /// Local draw position.
    pub fn draw_pos(&self) -> Vec2 {
        Vec2::new(self.draw_x, self.draw_y)
    }
}

/// A world-space line segment (debug rays, light markers).
/// 9 floats: `[x0, y0, x1, y1, r, g, b, a, width]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LineSegment {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    pub width: f32,
}

impl LineSegment {
    pub const FLOATS: usize = 9;

    pub fn start(&self) -> Vec2 {
        Vec2::new(self.x0, self.y0)
    }

    pub fn end(&self) -> Vec2 {
        Vec2::new(self.x1, self.y1)
    }
}

/// Entity transform the host applies to local draw positions.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transform {
    pos: Vec2,
    rotation: f32,
    scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

/// Render buffer containing every draw call of a frame.
///
/// Implements `DrawContext` by recording: each `draw_image` becomes a
/// `RenderInstance` stamped with the current transform, draw state and
/// material, each `draw_line` a `LineSegment`.
pub struct RenderBuffer {
    /// Image draws; sorted by `z` (stable) once the frame is complete.
    pub instances: Vec<RenderInstance>,
    pub lines: Vec<LineSegment>,
    /// Material uniforms referenced by `RenderInstance::material`.
    pub materials: Vec<ShadowMaterialUniform>,
    state: StateStack,
    transform: Transform,
    material: f32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(max_instances: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max_instances),
            lines: Vec::new(),
            materials: Vec::new(),
            state: StateStack::default(),
            transform: Transform::default(),
            material: RenderInstance::NO_MATERIAL,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.lines.clear();
        self.materials.clear();
        self.state.reset();
        self.transform = Transform::default();
        self.material = RenderInstance::NO_MATERIAL;
    }

    /// Make `entity` the target of subsequent image draws: its transform,
    /// its z as the base draw order, and its shadow material if any.
    pub fn begin_entity(&mut self, entity: &Entity) {
        self.transform = Transform {
            pos: entity.pos,
            rotation: entity.rotation,
            scale: entity.scale,
        };
        self.state.set(DrawState {
            z: entity.z,
            ..DrawState::default()
        });
        self.material = match &entity.material {
            Some(material) => self.push_material(material),
            None => RenderInstance::NO_MATERIAL,
        };
    }

    fn push_material(&mut self, material: &ShadowMaterial) -> f32 {
        let uniform = material.uniform();
        let index = match self.materials.iter().position(|m| *m == uniform) {
            Some(index) => index,
            None => {
                self.materials.push(uniform);
                self.materials.len() - 1
            }
        };
        index as f32
    }

    /// Stable-sort instances by z so lowered shadow passes land beneath casters.
    pub fn finish(&mut self) {
        self.instances.sort_by(|a, b| a.z.total_cmp(&b.z));
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    /// Raw pointer to instance data for SharedArrayBuffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn lines_ptr(&self) -> *const f32 {
        self.lines.as_ptr() as *const f32
    }

    pub fn materials_ptr(&self) -> *const f32 {
        self.materials.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawContext for RenderBuffer {
    fn state(&self) -> DrawState {
        self.state.current()
    }

    fn set_state(&mut self, state: DrawState) {
        self.state.set(state);
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn draw_image(&mut self, graphic: &Graphic, x: f32, y: f32) {
        let state = self.state.current();
        self.instances.push(RenderInstance {
            x: self.transform.pos.x,
            y: self.transform.pos.y,
            rotation: self.transform.rotation,
            scale_x: self.transform.scale.x,
            scale_y: self.transform.scale.y,
            draw_x: x,
            draw_y: y,
            width: graphic.width,
            height: graphic.height,
            atlas_col: graphic.col,
            atlas_row: graphic.row,
            atlas: graphic.atlas.0 as f32,
            tint_r: state.tint.r,
            tint_g: state.tint.g,
            tint_b: state.tint.b,
            alpha: state.tint.a * state.opacity,
            z: state.z as f32,
            material: self.material,
            _pad: [0.0; 2],
        });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.lines.push(LineSegment {
            x0: from.x,
            y0: from.y,
            x1: to.x,
            y1: to.y,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
            width,
        });
    }
}
