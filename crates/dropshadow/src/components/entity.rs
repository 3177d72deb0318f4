use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::graphic::Graphic;
use crate::components::material::ShadowMaterial;
use crate::components::shadow::DropShadow;

/// Fat Entity: a single struct with optional components.
/// Designed for simplicity and rapid prototyping over ECS purity.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are skipped).
    pub active: bool,
    /// Position in world space.
    pub pos: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Scale applied by the host on top of the graphic's size.
    pub scale: Vec2,
    /// Fractional origin within the graphic (0..1 per axis).
    pub anchor: Vec2,
    /// Draw order; lower values draw first.
    pub z: i32,
    /// Current graphic (entities without one draw nothing).
    pub graphic: Option<Graphic>,
    /// Two-pass drop shadow.
    pub shadow: Option<DropShadow>,
    /// Shader-based drop shadow.
    pub material: Option<ShadowMaterial>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            anchor: Vec2::splat(0.5),
            z: 0,
            graphic: None,
            shadow: None,
            material: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn with_graphic(mut self, graphic: Graphic) -> Self {
        self.graphic = Some(graphic);
        self
    }

    pub fn with_shadow(mut self, shadow: DropShadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn with_material(mut self, material: ShadowMaterial) -> Self {
        self.material = Some(material);
        self
    }
}
