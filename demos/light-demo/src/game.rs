use dropshadow::*;
use dropshadow::input::queue::{InputEvent, InputQueue};
use glam::Vec2;

const WORLD_W: f32 = 1920.0;
const WORLD_H: f32 = 1080.0;
const CASTER_COUNT: usize = 48;
const CASTER_SIZE: f32 = 64.0;
const SPIN_SPEED: f32 = 0.8;

/// Light settings. The casters spin, so their shadows use world-space
/// offsets to keep pointing away from the light.
const LIGHT_CONFIG: &str = r#"{
    "kind": "directional",
    "position": [960, 540],
    "direction": [-1, -1],
    "max_shadow_length": 20,
    "falloff_range": 600,
    "visualize_rays": true,
    "interactive": true
}"#;

const SHADOW_CONFIG: &str = r#"{
    "opacity": 0.3,
    "max_length": 40,
    "space": "world"
}"#;

/// Custom event: toggle shadow-only rendering on every caster.
pub const EVENT_TOGGLE_SHADOW_ONLY: u32 = 1;
/// Custom event: set every caster's shadow opacity to `a`.
pub const EVENT_SET_OPACITY: u32 = 2;
/// Game event emitted when shadow-only mode changes; `a` is 1.0 when on.
pub const EVENT_SHADOW_ONLY_CHANGED: u32 = 100;

/// Spinning shadow casters scattered around the centre of the world,
/// lit by one interactive light (keys 1/2/3/0, pointer move).
pub struct LightDemo {
    shadow_only: bool,
    light: Option<LightId>,
    shadow: DropShadow,
}

impl LightDemo {
    pub fn new() -> Self {
        Self {
            shadow_only: false,
            light: None,
            shadow: DropShadow::default().with_space(OffsetSpace::World),
        }
    }

    fn load_light() -> LightSource {
        match LightConfig::from_json(LIGHT_CONFIG).and_then(|config| config.build()) {
            Ok(light) => light,
            Err(e) => {
                log::error!("light config: {}", e);
                LightSource::default().with_interactive(true)
            }
        }
    }

    fn load_shadow(&mut self) {
        match ShadowConfig::from_json(SHADOW_CONFIG) {
            Ok(config) => self.shadow = DropShadow::from(&config),
            Err(e) => log::error!("shadow config: {}", e),
        }
    }

    fn spawn_caster(&self, ctx: &mut EngineContext, pos: Vec2, col: f32, spin: f32) -> EntityId {
        let id = ctx.next_id();
        let entity = Entity::new(id)
            .with_tag("caster")
            .with_pos(pos)
            .with_rotation(spin)
            .with_z(1)
            .with_graphic(Graphic::new(AtlasId(0), col, 0.0).with_size(CASTER_SIZE, CASTER_SIZE))
            .with_shadow(self.shadow.clone());
        ctx.scene.spawn(entity)
    }

    fn set_shadow_only(&mut self, ctx: &mut EngineContext, shadow_only: bool) {
        self.shadow_only = shadow_only;
        for entity in ctx.scene.iter_mut() {
            if let Some(shadow) = entity.shadow.as_mut() {
                shadow.shadow_only = shadow_only;
            }
        }
        ctx.emit_event(GameEvent::new(
            EVENT_SHADOW_ONLY_CHANGED,
            if shadow_only { 1.0 } else { 0.0 },
            0.0,
            0.0,
        ));
    }
}

impl Default for LightDemo {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for LightDemo {
    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: WORLD_W,
            world_height: WORLD_H,
            // shadow + caster per entity
            max_instances: CASTER_COUNT * 2 + 16,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let center = Vec2::new(WORLD_W / 2.0, WORLD_H / 2.0);
        ctx.rng = Rng::from_str_seed("light-demo");
        self.load_shadow();

        let mut casters = Vec::with_capacity(CASTER_COUNT);
        for i in 0..CASTER_COUNT {
            let pos = match ctx.rng.point_in_radius(center, WORLD_H / 2.0 - CASTER_SIZE, 80.0) {
                Ok(pos) => pos,
                Err(e) => {
                    log::warn!("caster placement failed: {}", e);
                    center
                }
            };
            let spin = ctx.rng.range_f32(0.0, std::f32::consts::TAU);
            casters.push(self.spawn_caster(ctx, pos, (i % 4) as f32, spin));
        }

        let light = ctx.add_light(Self::load_light().with_viewport_width(WORLD_W));
        for id in casters {
            ctx.subscribe(light, id);
        }
        self.light = Some(light);

        log::info!("light-demo: {} casters subscribed", CASTER_COUNT);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let dt = self.config().fixed_dt;

        for event in input.iter() {
            if let InputEvent::Custom { kind, a, .. } = *event {
                match kind {
                    EVENT_TOGGLE_SHADOW_ONLY => {
                        let next = !self.shadow_only;
                        self.set_shadow_only(ctx, next);
                    }
                    EVENT_SET_OPACITY => {
                        for entity in ctx.scene.iter_mut() {
                            if let Some(shadow) = entity.shadow.as_mut() {
                                shadow.opacity = a.clamp(0.0, 1.0);
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        for (i, entity) in ctx.scene.iter_mut().enumerate() {
            let dir = if i % 2 == 0 { 1.0 } else { -1.0 };
            entity.rotation += SPIN_SPEED * dir * dt;
        }
    }
}
