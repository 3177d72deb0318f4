/// SharedArrayBuffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Instances: max_instances × 20 floats]
/// [Lines: max_lines × 9 floats]
/// [Materials: max_materials × 8 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::components::material::ShadowMaterialUniform;
use crate::renderer::instance::{LineSegment, RenderInstance};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_MAX_LINES: usize = 4;
pub const HEADER_LINE_COUNT: usize = 5;
pub const HEADER_MAX_MATERIALS: usize = 6;
pub const HEADER_MATERIAL_COUNT: usize = 7;
pub const HEADER_MAX_EVENTS: usize = 8;
pub const HEADER_EVENT_COUNT: usize = 9;
pub const HEADER_WORLD_WIDTH: usize = 10;
pub const HEADER_WORLD_HEIGHT: usize = 11;
pub const HEADER_PROTOCOL_VERSION: usize = 12;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per image draw (wire format).
pub const INSTANCE_FLOATS: usize = RenderInstance::FLOATS;

/// Floats per debug line: x0, y0, x1, y1, r, g, b, a, width.
pub const LINE_FLOATS: usize = LineSegment::FLOATS;

/// Floats per shadow material: r, g, b, a, offset_x, offset_y, pad×2.
pub const MATERIAL_FLOATS: usize = ShadowMaterialUniform::FLOATS;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_lines: usize,
    pub max_materials: usize,
    pub max_events: usize,

    /// Size of each section in floats.
    pub instance_data_floats: usize,
    pub line_data_floats: usize,
    pub material_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where each section begins.
    pub instance_data_offset: usize,
    pub line_data_offset: usize,
    pub material_data_offset: usize,
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_lines: usize, max_materials: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let line_data_floats = max_lines * LINE_FLOATS;
        let material_data_floats = max_materials * MATERIAL_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let instance_data_offset = HEADER_FLOATS;
        let line_data_offset = instance_data_offset + instance_data_floats;
        let material_data_offset = line_data_offset + line_data_floats;
        let event_data_offset = material_data_offset + material_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_instances,
            max_lines,
            max_materials,
            max_events,
            instance_data_floats,
            line_data_floats,
            material_data_floats,
            event_data_floats,
            instance_data_offset,
            line_data_offset,
            material_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_instances,
            config.max_lines,
            config.max_materials,
            config.max_events,
        )
    }
}
