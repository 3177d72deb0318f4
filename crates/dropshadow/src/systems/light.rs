//! Shadow-casting light sources.
//!
//! A `LightSource` owns a list of subscribed entities and writes their
//! `DropShadow::offset` / `max_length`. Directional lights push one shared
//! direction whenever it changes; point lights recompute every subscriber
//! from its position on each `update`.
//!
//! Run `update` once per frame after game logic and before the draw phase.

use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::shadow::DropShadow;
use crate::core::scene::Scene;
use crate::error::{Result, ShadowError};
use crate::input::queue::{keys, InputEvent};
use crate::renderer::context::DrawContext;
use crate::util::color::Color;

/// Width of debug rays and the marker, in world units.
const RAY_WIDTH: f32 = 3.0;
/// Half-size of the light position marker.
const MARKER_RADIUS: f32 = 10.0;

/// How a light derives shadow offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightKind {
    /// One constant direction for every subscriber.
    #[default]
    Directional,
    /// Per-subscriber direction and length from the light's position.
    #[serde(alias = "omni")]
    Point,
}

impl LightKind {
    pub fn name(self) -> &'static str {
        match self {
            LightKind::Directional => "directional",
            LightKind::Point => "point",
        }
    }
}

impl FromStr for LightKind {
    type Err = ShadowError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "directional" => Ok(LightKind::Directional),
            "point" | "omni" => Ok(LightKind::Point),
            other => Err(ShadowError::UnknownLightType(other.to_string())),
        }
    }
}

/// Broadcasts shadow offsets to subscribed entities.
#[derive(Debug, Clone)]
pub struct LightSource {
    /// Light position in world space (point lights and debug drawing).
    pub position: Vec2,
    /// Distance at which point-light shadows reach full length; 0 disables attenuation.
    pub falloff_range: f32,
    /// Draw rays from the light to its subscribers.
    pub visualize_rays: bool,
    /// Follow the pointer.
    pub interactive: bool,
    /// Length multiplier for the directional debug ray.
    pub viewport_width: f32,
    direction: Vec2,
    kind: LightKind,
    max_shadow_length: f32,
    subscribers: Vec<EntityId>,
    last_pointer: Vec2,
}

impl LightSource {
    pub fn new(kind: LightKind) -> Self {
        Self {
            position: Vec2::ZERO,
            falloff_range: 0.0,
            visualize_rays: false,
            interactive: false,
            viewport_width: 800.0,
            direction: Vec2::new(5.0, 5.0),
            kind,
            max_shadow_length: 1000.0,
            subscribers: Vec::new(),
            last_pointer: Vec2::ZERO,
        }
    }

    /// A directional light pointing along `direction`.
    pub fn directional(direction: Vec2) -> Self {
        Self {
            direction,
            ..Self::new(LightKind::Directional)
        }
    }

    /// A point light at `position`.
    pub fn point(position: Vec2) -> Self {
        Self {
            position,
            ..Self::new(LightKind::Point)
        }
    }

    // -- Builder pattern --

    pub fn with_max_shadow_length(mut self, max_shadow_length: f32) -> Self {
        self.max_shadow_length = max_shadow_length;
        self
    }

    pub fn with_falloff_range(mut self, falloff_range: f32) -> Self {
        self.falloff_range = falloff_range;
        self
    }

    pub fn with_visualize_rays(mut self, visualize_rays: bool) -> Self {
        self.visualize_rays = visualize_rays;
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn with_viewport_width(mut self, viewport_width: f32) -> Self {
        self.viewport_width = viewport_width;
        self
    }

    pub fn kind(&self) -> LightKind {
        self.kind
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn max_shadow_length(&self) -> f32 {
        self.max_shadow_length
    }

    /// Subscribed entities in insertion order.
    pub fn subscribers(&self) -> &[EntityId] {
        &self.subscribers
    }

    /// Point-light shadow length at `distance` from the light:
    /// `max_shadow_length · min(1, distance / falloff_range)`, or the full
    /// length when `falloff_range <= 0`.
    pub fn effective_shadow_length(&self, distance: f32) -> f32 {
        if self.falloff_range > 0.0 {
            self.max_shadow_length * (distance / self.falloff_range).min(1.0)
        } else {
            self.max_shadow_length
        }
    }

    /// The shadow offset this light assigns to an entity at `pos`.
    pub fn offset_for(&self, pos: Vec2) -> Vec2 {
        match self.kind {
            LightKind::Directional => self.direction,
            LightKind::Point => {
                let delta = pos - self.position;
                let distance = delta.length();
                if distance == 0.0 {
                    return Vec2::ZERO;
                }
                -delta / distance * self.effective_shadow_length(distance)
            }
        }
    }

    fn apply_to(&self, entity: &mut Entity) {
        let offset = self.offset_for(entity.pos);
        let shadow = entity.shadow.get_or_insert_with(DropShadow::default);
        shadow.offset = offset;
        shadow.max_length = self.max_shadow_length;
    }

    /// Write the current offset to every subscriber still in the scene.
    pub fn broadcast(&self, scene: &mut Scene) {
        for id in &self.subscribers {
            if let Some(entity) = scene.get_mut(*id) {
                self.apply_to(entity);
            }
        }
    }

    /// Subscribe an entity and give it this light's offset immediately.
    /// Entities without a `DropShadow` get a default one.
    /// Returns false if it was already subscribed.
    pub fn add_subscriber(&mut self, id: EntityId, scene: &mut Scene) -> bool {
        if self.subscribers.contains(&id) {
            return false;
        }
        self.subscribers.push(id);
        if let Some(entity) = scene.get_mut(id) {
            self.apply_to(entity);
        }
        true
    }

    /// Unsubscribe an entity. Its shadow keeps the last offset written.
    pub fn remove_subscriber(&mut self, id: EntityId) -> bool {
        match self.subscribers.iter().position(|s| *s == id) {
            Some(index) => {
                self.subscribers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Set the light direction; directional lights push it to every subscriber.
    pub fn set_direction(&mut self, direction: Vec2, scene: &mut Scene) {
        self.direction = direction;
        if self.kind == LightKind::Directional {
            self.broadcast(scene);
        }
    }

    /// Set the shadow length cap; directional lights push it to every subscriber.
    pub fn set_max_shadow_length(&mut self, max_shadow_length: f32, scene: &mut Scene) {
        if self.max_shadow_length == max_shadow_length {
            return;
        }
        self.max_shadow_length = max_shadow_length;
        if self.kind == LightKind::Directional {
            self.broadcast(scene);
        }
    }

    /// Switch light kind. Switching to directional pushes the direction at
    /// once; switching to point waits for the next `update`.
    pub fn set_kind(&mut self, kind: LightKind, scene: &mut Scene) {
        if self.kind == kind {
            return;
        }
        self.kind = kind;
        log::debug!("light source switched to {}", kind.name());
        if kind == LightKind::Directional {
            self.broadcast(scene);
        }
    }

    /// Switch light kind by name. Unknown names are reported and leave the
    /// current kind in place.
    pub fn set_kind_named(&mut self, name: &str, scene: &mut Scene) -> Result<()> {
        match name.parse::<LightKind>() {
            Ok(kind) => {
                self.set_kind(kind, scene);
                Ok(())
            }
            Err(err) => {
                log::warn!("{}; keeping {}", err, self.kind.name());
                Err(err)
            }
        }
    }

    /// Per-frame tick. Point lights recompute every subscriber; subscribers
    /// no longer in the scene are dropped.
    pub fn update(&mut self, _dt: f32, scene: &mut Scene) {
        let before = self.subscribers.len();
        self.subscribers.retain(|id| scene.get(*id).is_some());
        if self.subscribers.len() != before {
            log::debug!("light source dropped {} despawned subscribers", before - self.subscribers.len());
        }

        match self.kind {
            // Offsets were pushed when the direction last changed.
            LightKind::Directional => {}
            LightKind::Point => self.broadcast(scene),
        }
    }

    /// Whether the light's position marker should be drawn.
    pub fn marker_visible(&self) -> bool {
        self.visualize_rays || self.interactive
    }

    /// Draw the debug overlay: rays when `visualize_rays`, a marker when
    /// visualizing or interactive.
    pub fn draw_debug(&self, ctx: &mut impl DrawContext, scene: &Scene) {
        if self.visualize_rays {
            match self.kind {
                LightKind::Directional => {
                    let end = self.position + self.direction * self.viewport_width;
                    ctx.draw_line(self.position, end, Color::ORANGE, RAY_WIDTH);
                }
                LightKind::Point => {
                    for entity in self.subscribers.iter().filter_map(|id| scene.get(*id)) {
                        ctx.draw_line(self.position, entity.pos, Color::ORANGE, RAY_WIDTH);
                    }
                }
            }
        }

        if self.marker_visible() {
            let p = self.position;
            let h = Vec2::new(MARKER_RADIUS, 0.0);
            let v = Vec2::new(0.0, MARKER_RADIUS);
            ctx.draw_line(p - h, p + h, Color::ORANGE, RAY_WIDTH);
            ctx.draw_line(p - v, p + v, Color::ORANGE, RAY_WIDTH);
        }
    }

    /// Demo controls: pointer move drags an interactive light; keys 1/2
    /// pick directional/point, 3 toggles rays, 0 toggles interactive mode
    /// and snaps the light to the pointer.
    pub fn handle_input(&mut self, event: &InputEvent, scene: &mut Scene) {
        match *event {
            InputEvent::PointerMove { x, y } => {
                self.last_pointer = Vec2::new(x, y);
                if self.interactive {
                    self.position = self.last_pointer;
                }
            }
            InputEvent::KeyDown { key_code } => match key_code {
                keys::DIGIT_1 => self.set_kind(LightKind::Directional, scene),
                keys::DIGIT_2 => self.set_kind(LightKind::Point, scene),
                keys::DIGIT_3 => self.visualize_rays = !self.visualize_rays,
                keys::DIGIT_0 => {
                    self.interactive = !self.interactive;
                    self.position = self.last_pointer;
                }
                other => log::debug!("unbound key {}", other),
            },
            _ => {}
        }
    }
}

impl Default for LightSource {
    fn default() -> Self {
        Self::new(LightKind::Directional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::graphic::Graphic;
    use crate::renderer::instance::RenderBuffer;

    fn scene_with(positions: &[Vec2]) -> (Scene, Vec<EntityId>) {
        let mut scene = Scene::new();
        let ids = positions
            .iter()
            .enumerate()
            .map(|(i, pos)| {
                let id = EntityId(i as u32 + 1);
                scene.spawn(
                    Entity::new(id)
                        .with_pos(*pos)
                        .with_graphic(Graphic::default())
                        .with_shadow(DropShadow::default()),
                );
                id
            })
            .collect();
        (scene, ids)
    }

    fn offset_of(scene: &Scene, id: EntityId) -> Vec2 {
        scene.get(id).unwrap().shadow.as_ref().unwrap().offset
    }

    #[test]
    fn kind_names_parse() {
        assert_eq!("directional".parse::<LightKind>().unwrap(), LightKind::Directional);
        assert_eq!("omni".parse::<LightKind>().unwrap(), LightKind::Point);
        assert_eq!("point".parse::<LightKind>().unwrap(), LightKind::Point);
        assert!(matches!("spot".parse::<LightKind>(), Err(ShadowError::UnknownLightType(_))));
    }

    #[test]
    fn set_direction_reaches_every_subscriber_exactly() {
        let (mut scene, ids) = scene_with(&[Vec2::ZERO, Vec2::new(40.0, 9.0), Vec2::new(-3.0, 7.0)]);
        let mut light = LightSource::directional(Vec2::new(5.0, 5.0));
        for id in &ids {
            light.add_subscriber(*id, &mut scene);
        }
        let dir = Vec2::new(0.123_456_7, -9.876_543);
        light.set_direction(dir, &mut scene);
        for id in &ids {
            assert_eq!(offset_of(&scene, *id), dir);
            assert_eq!(scene.get(*id).unwrap().shadow.as_ref().unwrap().max_length, 1000.0);
        }
    }

    #[test]
    fn adding_assigns_offset_immediately() {
        let (mut scene, ids) = scene_with(&[Vec2::new(100.0, 0.0)]);
        let mut light = LightSource::point(Vec2::ZERO)
            .with_max_shadow_length(10.0)
            .with_falloff_range(200.0);
        light.add_subscriber(ids[0], &mut scene);
        assert_eq!(offset_of(&scene, ids[0]), Vec2::new(-5.0, 0.0));
    }

    #[test]
    fn adding_twice_keeps_one_entry() {
        let (mut scene, ids) = scene_with(&[Vec2::ZERO]);
        let mut light = LightSource::default();
        assert!(light.add_subscriber(ids[0], &mut scene));
        assert!(!light.add_subscriber(ids[0], &mut scene));
        assert_eq!(light.subscribers().len(), 1);
    }

    #[test]
    fn subscribing_attaches_a_shadow() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(9)));
        let mut light = LightSource::directional(Vec2::new(1.0, 2.0));
        light.add_subscriber(EntityId(9), &mut scene);
        assert_eq!(offset_of(&scene, EntityId(9)), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn removed_subscriber_keeps_stale_offset() {
        let (mut scene, ids) = scene_with(&[Vec2::ZERO, Vec2::ONE]);
        let mut light = LightSource::directional(Vec2::new(2.0, 0.0));
        light.add_subscriber(ids[0], &mut scene);
        light.add_subscriber(ids[1], &mut scene);
        assert!(light.remove_subscriber(ids[0]));
        assert!(!light.remove_subscriber(ids[0]));

        light.set_direction(Vec2::new(0.0, 7.0), &mut scene);
        assert_eq!(offset_of(&scene, ids[0]), Vec2::new(2.0, 0.0));
        assert_eq!(offset_of(&scene, ids[1]), Vec2::new(0.0, 7.0));
    }

    #[test]
    fn point_light_attenuates_below_falloff() {
        let light = LightSource::point(Vec2::ZERO)
            .with_max_shadow_length(10.0)
            .with_falloff_range(200.0);
        assert_eq!(light.effective_shadow_length(200.0), 10.0);
        assert_eq!(light.effective_shadow_length(350.0), 10.0);
        assert_eq!(light.effective_shadow_length(50.0), 10.0 * 50.0 / 200.0);
        assert_eq!(light.offset_for(Vec2::ZERO), Vec2::ZERO);

        let far = light.offset_for(Vec2::new(0.0, 500.0));
        assert!((far - Vec2::new(0.0, -10.0)).length() < 1e-5);
    }

    #[test]
    fn point_light_without_falloff_is_full_length() {
        let light = LightSource::point(Vec2::new(10.0, 10.0)).with_max_shadow_length(8.0);
        assert_eq!(light.effective_shadow_length(1.0), 8.0);
        let offset = light.offset_for(Vec2::new(13.0, 14.0));
        assert!((offset - Vec2::new(-4.8, -6.4)).length() < 1e-5);
    }

    #[test]
    fn point_update_tracks_moving_subscribers() {
        let (mut scene, ids) = scene_with(&[Vec2::new(100.0, 0.0)]);
        let mut light = LightSource::point(Vec2::ZERO)
            .with_max_shadow_length(10.0)
            .with_falloff_range(200.0);
        light.add_subscriber(ids[0], &mut scene);

        scene.get_mut(ids[0]).unwrap().pos = Vec2::new(0.0, -400.0);
        light.update(1.0 / 60.0, &mut scene);
        assert!((offset_of(&scene, ids[0]) - Vec2::new(0.0, 10.0)).length() < 1e-5);
    }

    #[test]
    fn switching_to_directional_pushes_direction() {
        let (mut scene, ids) = scene_with(&[Vec2::new(100.0, 0.0)]);
        let mut light = LightSource::point(Vec2::ZERO).with_max_shadow_length(10.0);
        light.add_subscriber(ids[0], &mut scene);
        assert_eq!(offset_of(&scene, ids[0]), Vec2::new(-10.0, 0.0));

        light.set_kind(LightKind::Directional, &mut scene);
        assert_eq!(offset_of(&scene, ids[0]), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn switching_to_point_waits_for_update() {
        let (mut scene, ids) = scene_with(&[Vec2::new(100.0, 0.0)]);
        let mut light = LightSource::directional(Vec2::new(5.0, 5.0)).with_max_shadow_length(10.0);
        light.add_subscriber(ids[0], &mut scene);

        light.set_kind(LightKind::Point, &mut scene);
        assert_eq!(offset_of(&scene, ids[0]), Vec2::new(5.0, 5.0));
        light.update(0.016, &mut scene);
        assert_eq!(offset_of(&scene, ids[0]), Vec2::new(-10.0, 0.0));
    }

    #[test]
    fn unknown_kind_name_keeps_current_kind() {
        let mut scene = Scene::new();
        let mut light = LightSource::point(Vec2::ZERO);
        assert!(light.set_kind_named("spot", &mut scene).is_err());
        assert_eq!(light.kind(), LightKind::Point);
        assert!(light.set_kind_named("directional", &mut scene).is_ok());
        assert_eq!(light.kind(), LightKind::Directional);
    }

    #[test]
    fn update_drops_despawned_subscribers() {
        let (mut scene, ids) = scene_with(&[Vec2::ZERO, Vec2::ONE]);
        let mut light = LightSource::point(Vec2::new(5.0, 5.0));
        light.add_subscriber(ids[0], &mut scene);
        light.add_subscriber(ids[1], &mut scene);
        scene.despawn(ids[0]);
        light.update(0.016, &mut scene);
        assert_eq!(light.subscribers(), &[ids[1]]);
    }

    #[test]
    fn rays_follow_light_kind() {
        let (mut scene, ids) = scene_with(&[Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)]);
        let mut light = LightSource::point(Vec2::ZERO).with_visualize_rays(true);
        for id in &ids {
            light.add_subscriber(*id, &mut scene);
        }
        let mut ctx = RenderBuffer::new();
        light.draw_debug(&mut ctx, &scene);
        // 2 rays + 2 marker strokes
        assert_eq!(ctx.lines.len(), 4);
        assert_eq!(ctx.lines[1].end(), Vec2::new(0.0, 10.0));

        light.set_kind(LightKind::Directional, &mut scene);
        ctx.clear();
        light.draw_debug(&mut ctx, &scene);
        assert_eq!(ctx.lines.len(), 3);
        assert_eq!(ctx.lines[0].end(), Vec2::new(5.0, 5.0) * 800.0);
    }

    #[test]
    fn nothing_drawn_when_not_visualizing() {
        let scene = Scene::new();
        let light = LightSource::default();
        let mut ctx = RenderBuffer::new();
        light.draw_debug(&mut ctx, &scene);
        assert!(ctx.lines.is_empty());
    }

    #[test]
    fn keyboard_and_pointer_controls() {
        let mut scene = Scene::new();
        let mut light = LightSource::default();

        light.handle_input(&InputEvent::PointerMove { x: 50.0, y: 60.0 }, &mut scene);
        assert_eq!(light.position, Vec2::ZERO);

        light.handle_input(&InputEvent::KeyDown { key_code: keys::DIGIT_0 }, &mut scene);
        assert!(light.interactive);
        assert_eq!(light.position, Vec2::new(50.0, 60.0));

        light.handle_input(&InputEvent::PointerMove { x: 1.0, y: 2.0 }, &mut scene);
        assert_eq!(light.position, Vec2::new(1.0, 2.0));

        light.handle_input(&InputEvent::KeyDown { key_code: keys::DIGIT_2 }, &mut scene);
        assert_eq!(light.kind(), LightKind::Point);
        light.handle_input(&InputEvent::KeyDown { key_code: keys::DIGIT_1 }, &mut scene);
        assert_eq!(light.kind(), LightKind::Directional);
        light.handle_input(&InputEvent::KeyDown { key_code: keys::DIGIT_3 }, &mut scene);
        assert!(light.visualize_rays);
        light.handle_input(&InputEvent::KeyDown { key_code: keys::SPACE }, &mut scene);
        assert!(light.visualize_rays);
    }
}
