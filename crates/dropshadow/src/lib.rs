pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod util;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext, LightId};
pub use api::config::{LightConfig, ShadowConfig};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::graphic::{Graphic, AtlasId};
pub use components::shadow::{DropShadow, OffsetSpace};
pub use components::material::{ShadowMaterial, ShadowMaterialUniform};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use renderer::context::{DrawContext, DrawState};
pub use renderer::instance::{RenderInstance, RenderBuffer, LineSegment};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::AssetManifest;
pub use assets::registry::GraphicRegistry;
pub use bridge::protocol::ProtocolLayout;
pub use systems::light::{LightKind, LightSource};
pub use systems::render::build_render_buffer;
pub use util::color::Color;
pub use util::random::Rng;
pub use error::{Result, ShadowError};
