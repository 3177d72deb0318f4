use dropshadow::*;
use glam::Vec2;

const WORLD_W: f32 = 1920.0;
const WORLD_H: f32 = 1080.0;
const VERTICAL_SPACING: f32 = 100.0;

/// Built-in manifest: one atlas holding the trimmed and untrimmed treetop.
/// The untrimmed cell carries transparent padding, so the material's
/// offset shadow is not clipped at the graphic's edge.
const MANIFEST: &str = r#"{
    "atlases": [
        { "name": "treetops", "cols": 2, "rows": 1, "path": "treetops.png" }
    ],
    "graphics": {
        "treetop_trimmed": { "atlas": 0, "col": 0, "row": 0, "width": 64, "height": 64 },
        "treetop_untrimmed": { "atlas": 0, "col": 1, "row": 0, "width": 64, "height": 64 }
    }
}"#;

/// Three treetops stacked vertically: no shadow, trimmed graphic with the
/// shadow material, untrimmed graphic with the shadow material.
pub struct MaterialDemo {
    material: ShadowMaterial,
}

impl MaterialDemo {
    pub fn new() -> Self {
        Self {
            material: ShadowMaterial::new(Color::rgba(0.0, 0.0, 0.0, 0.3), Vec2::new(-5.0, -5.0)),
        }
    }

    fn treetop(ctx: &mut EngineContext, name: &str, tag: &str, y: f32) -> Entity {
        let graphic = match ctx.graphics.get(name) {
            Some(graphic) => graphic.clone(),
            None => {
                log::warn!("graphic {} missing from manifest", name);
                Graphic::default()
            }
        };
        let id = ctx.next_id();
        Entity::new(id)
            .with_tag(tag)
            .with_pos(Vec2::new(WORLD_W / 2.0, y))
            .with_graphic(graphic)
    }
}

impl Default for MaterialDemo {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for MaterialDemo {
    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: WORLD_W,
            world_height: WORLD_H,
            max_instances: 16,
            max_materials: 1,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        match AssetManifest::from_json(MANIFEST) {
            Ok(manifest) => ctx.graphics = GraphicRegistry::from_manifest(&manifest),
            Err(e) => log::error!("built-in manifest: {}", e),
        }

        let mut y = WORLD_H / 2.0 - 64.0 - VERTICAL_SPACING - 32.0;

        let plain = Self::treetop(ctx, "treetop_trimmed", "no_shadow", y);
        y += plain.graphic.as_ref().map_or(0.0, |g| g.width) + VERTICAL_SPACING;
        ctx.scene.spawn(plain);

        let trimmed = Self::treetop(ctx, "treetop_trimmed", "trimmed", y).with_material(self.material);
        y += trimmed.graphic.as_ref().map_or(0.0, |g| g.width) + VERTICAL_SPACING;
        ctx.scene.spawn(trimmed);

        let untrimmed = Self::treetop(ctx, "treetop_untrimmed", "untrimmed", y).with_material(self.material);
        ctx.scene.spawn(untrimmed);

        log::info!("material-demo: {} treetops", ctx.scene.len());
    }

    fn update(&mut self, _ctx: &mut EngineContext, _input: &InputQueue) {}
}
