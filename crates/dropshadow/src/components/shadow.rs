use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Frame in which a shadow offset is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetSpace {
    /// The offset is rotated by the entity's rotation before it is applied
    /// to the anchor-relative draw position. Only world-fixed when the host
    /// draws the entity unrotated; spinning casters want `World`.
    #[default]
    Local,
    /// The offset is a world-space displacement: it is counter-rotated so the
    /// shadow keeps its world direction however the entity spins.
    World,
}

/// Drop shadow state attached to a drawable entity.
///
/// The offset points from the caster towards the light; the shadow is drawn
/// on the opposite side. A `max_length` of zero or less disables clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct DropShadow {
    /// Whether the shadow pass runs at all.
    pub visible: bool,
    /// Alpha of the shadow tint, in [0, 1].
    pub opacity: f32,
    /// Raw shadow offset.
    pub offset: Vec2,
    /// Clamp on the offset magnitude (<= 0 means unclamped).
    pub max_length: f32,
    /// Skip the normal draw pass, rendering only the shadow.
    pub shadow_only: bool,
    pub space: OffsetSpace,
}

impl DropShadow {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Builder pattern --

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_max_length(mut self, max_length: f32) -> Self {
        self.max_length = max_length.max(0.0);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_shadow_only(mut self, shadow_only: bool) -> Self {
        self.shadow_only = shadow_only;
        self
    }

    pub fn with_space(mut self, space: OffsetSpace) -> Self {
        self.space = space;
        self
    }
}

impl Default for DropShadow {
    fn default() -> Self {
        Self {
            visible: true,
            opacity: 0.3,
            offset: Vec2::new(5.0, 5.0),
            max_length: 5.0,
            shadow_only: false,
            space: OffsetSpace::Local,
        }
    }
}
