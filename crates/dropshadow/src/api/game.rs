use serde::{Deserialize, Serialize};

use crate::api::types::{EntityId, GameEvent};
use crate::assets::registry::GraphicRegistry;
use crate::core::scene::Scene;
use crate::error::Result;
use crate::input::queue::InputQueue;
use crate::renderer::instance::RenderBuffer;
use crate::systems::light::LightSource;
use crate::util::random::Rng;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum number of image draws per frame (default: 512).
    /// Shadow casters take two each.
    pub max_instances: usize,
    /// Maximum number of debug line segments per frame (default: 1024).
    pub max_lines: usize,
    /// Maximum number of distinct shadow materials per frame (default: 16).
    pub max_materials: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Seed for the context's RNG.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            max_instances: 512,
            max_lines: 1024,
            max_materials: 16,
            max_events: 32,
            seed: 1234,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, create lights and subscribe casters.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The game loop tick. Move casters, react to input, reconfigure lights.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only render pass for custom render commands.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Index of a light in `EngineContext::lights`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightId(pub usize);

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub lights: Vec<LightSource>,
    pub events: Vec<GameEvent>,
    /// Deterministic randomness for setup code.
    pub rng: Rng,
    /// Named graphics from the loaded asset manifest.
    pub graphics: GraphicRegistry,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_seed(GameConfig::default().seed)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            scene: Scene::new(),
            lights: Vec::new(),
            events: Vec::new(),
            rng: Rng::new(seed),
            graphics: GraphicRegistry::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Register a light. Its current subscribers receive its offset now.
    pub fn add_light(&mut self, light: LightSource) -> LightId {
        light.broadcast(&mut self.scene);
        self.lights.push(light);
        LightId(self.lights.len() - 1)
    }

    pub fn light(&self, id: LightId) -> Option<&LightSource> {
        self.lights.get(id.0)
    }

    pub fn light_mut(&mut self, id: LightId) -> Option<&mut LightSource> {
        self.lights.get_mut(id.0)
    }

    /// Subscribe an entity to a light. Returns false for unknown lights or
    /// existing subscriptions.
    pub fn subscribe(&mut self, light: LightId, entity: EntityId) -> bool {
        match self.lights.get_mut(light.0) {
            Some(light) => light.add_subscriber(entity, &mut self.scene),
            None => false,
        }
    }

    /// Unsubscribe an entity from a light; its shadow keeps the last offset.
    pub fn unsubscribe(&mut self, light: LightId, entity: EntityId) -> bool {
        match self.lights.get_mut(light.0) {
            Some(light) => light.remove_subscriber(entity),
            None => false,
        }
    }

    /// Feed pending input to every light's demo controls.
    pub fn dispatch_light_input(&mut self, input: &InputQueue) {
        for event in input.iter() {
            for light in &mut self.lights {
                light.handle_input(event, &mut self.scene);
            }
        }
    }

    /// Per-frame light tick. Call after game logic, before drawing.
    pub fn update_lights(&mut self, dt: f32) {
        for light in &mut self.lights {
            light.update(dt, &mut self.scene);
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub render_buffer: &'a mut RenderBuffer,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use crate::input::queue::{keys, InputEvent};
    use crate::systems::light::LightKind;
    use glam::Vec2;

    #[test]
    fn config_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{ "world_width": 1920, "world_height": 1080 }"#).unwrap();
        assert_eq!(config.world_width, 1920.0);
        assert_eq!(config.max_instances, 512);
        assert!(GameConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn ids_are_unique() {
        let mut ctx = EngineContext::new();
        assert_ne!(ctx.next_id(), ctx.next_id());
    }

    #[test]
    fn subscribe_through_context() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        ctx.scene.spawn(Entity::new(id).with_pos(Vec2::new(0.0, 100.0)));
        let light = ctx.add_light(LightSource::point(Vec2::ZERO).with_max_shadow_length(4.0));

        assert!(ctx.subscribe(light, id));
        assert!(!ctx.subscribe(LightId(7), id));
        let offset = ctx.scene.get(id).unwrap().shadow.as_ref().unwrap().offset;
        assert_eq!(offset, Vec2::new(0.0, -4.0));

        ctx.scene.get_mut(id).unwrap().pos = Vec2::new(100.0, 0.0);
        ctx.update_lights(1.0 / 60.0);
        let offset = ctx.scene.get(id).unwrap().shadow.as_ref().unwrap().offset;
        assert_eq!(offset, Vec2::new(-4.0, 0.0));

        assert!(ctx.unsubscribe(light, id));
        assert!(ctx.light(light).unwrap().subscribers().is_empty());
    }

    #[test]
    fn input_reaches_lights() {
        let mut ctx = EngineContext::new();
        let light = ctx.add_light(LightSource::default());
        let mut input = InputQueue::new();
        input.push(InputEvent::KeyDown { key_code: keys::DIGIT_2 });
        ctx.dispatch_light_input(&input);
        assert_eq!(ctx.light(light).unwrap().kind(), LightKind::Point);
    }
}
