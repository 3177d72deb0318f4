//! Two-pass drop shadow rendering.
//!
//! Each shadow-casting entity is drawn as a black, semi-transparent copy of
//! its current graphic, shifted away from the light, followed by the
//! graphic itself. The shift is the entity's `DropShadow::offset` clamped to
//! `max_length` and rotated according to its `OffsetSpace`.
//!
//! Sign convention: the offset points from the caster towards the light, so
//! the shadow is drawn at `base - shift`.

use glam::Vec2;

use crate::components::entity::Entity;
use crate::components::graphic::Graphic;
use crate::components::shadow::{DropShadow, OffsetSpace};
use crate::renderer::context::{DrawContext, DrawState};
use crate::util::color::Color;
use crate::util::math;

/// Clamp the offset magnitude to `max_length`; `max_length <= 0` means unclamped.
pub fn clamp_offset(offset: Vec2, max_length: f32) -> Vec2 {
    math::clamp_magnitude(offset, max_length)
}

/// Rotate an offset by `rotation` radians:
/// `(ox·cosθ − oy·sinθ, ox·sinθ + oy·cosθ)`.
pub fn rotate_offset(offset: Vec2, rotation: f32) -> Vec2 {
    math::rotate(offset, rotation)
}

/// Anchor-relative origin of a graphic: `(-width·anchor_x, -height·anchor_y)`.
pub fn base_draw_position(anchor: Vec2, size: Vec2) -> Vec2 {
    -size * anchor
}

/// Local draw position of the shadow copy for a `Local`-space offset.
pub fn compute_shadow_draw(
    rotation: f32,
    anchor: Vec2,
    size: Vec2,
    raw_offset: Vec2,
    max_length: f32,
) -> Vec2 {
    compute_shadow_draw_in(OffsetSpace::Local, rotation, anchor, size, raw_offset, max_length)
}

/// Local draw position of the shadow copy.
///
/// `Local` rotates the clamped offset by the entity rotation. `World`
/// counter-rotates it, so after the host applies the entity transform the
/// shadow sits at exactly `-offset` in world space.
pub fn compute_shadow_draw_in(
    space: OffsetSpace,
    rotation: f32,
    anchor: Vec2,
    size: Vec2,
    raw_offset: Vec2,
    max_length: f32,
) -> Vec2 {
    let clamped = clamp_offset(raw_offset, max_length);
    let shift = match space {
        OffsetSpace::Local => rotate_offset(clamped, rotation),
        OffsetSpace::World => rotate_offset(clamped, -rotation),
    };
    base_draw_position(anchor, size) - shift
}

/// Token handed from `on_before_draw` to `on_after_draw` for one frame.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawPass {
    previous_visibility: bool,
}

/// Pre-draw hook: hides the graphic from the host's own draw and runs the
/// shadow pass. Pair every call with `on_after_draw`.
pub fn on_before_draw(entity: &mut Entity, ctx: &mut impl DrawContext) -> DrawPass {
    let previous_visibility = match entity.graphic.as_mut() {
        Some(graphic) => std::mem::replace(&mut graphic.visible, false),
        None => false,
    };

    if previous_visibility {
        if let (Some(graphic), Some(shadow)) = (&entity.graphic, &entity.shadow) {
            if shadow.visible {
                draw_shadow(graphic, shadow, entity.rotation, entity.anchor, ctx);
            }
        }
    }

    DrawPass { previous_visibility }
}

/// Post-draw hook: restores the graphic's visibility and draws it unless
/// the entity renders its shadow only.
pub fn on_after_draw(entity: &mut Entity, ctx: &mut impl DrawContext, pass: DrawPass) {
    if let Some(graphic) = entity.graphic.as_mut() {
        graphic.visible = pass.previous_visibility;
    }

    let shadow_only = entity.shadow.as_ref().is_some_and(|s| s.shadow_only);
    if pass.previous_visibility && !shadow_only {
        draw_graphic(entity, ctx);
    }
}

/// Run both hooks: shadow pass, then normal pass.
pub fn draw_entity(entity: &mut Entity, ctx: &mut impl DrawContext) {
    let pass = on_before_draw(entity, ctx);
    on_after_draw(entity, ctx, pass);
}

/// Normal pass: the current graphic at its anchor-relative origin.
pub fn draw_graphic(entity: &Entity, ctx: &mut impl DrawContext) {
    if let Some(graphic) = &entity.graphic {
        let pos = base_draw_position(entity.anchor, Vec2::new(graphic.width, graphic.height));
        ctx.draw_image(graphic, pos.x, pos.y);
    }
}

fn draw_shadow(
    graphic: &Graphic,
    shadow: &DropShadow,
    rotation: f32,
    anchor: Vec2,
    ctx: &mut impl DrawContext,
) {
    ctx.save();
    let state = ctx.state();
    // One below the caster so sorting puts every shadow under its layer.
    ctx.set_state(DrawState {
        tint: Color::BLACK,
        opacity: shadow.opacity,
        z: state.z - 1,
    });

    let pos = compute_shadow_draw_in(
        shadow.space,
        rotation,
        anchor,
        Vec2::new(graphic.width, graphic.height),
        shadow.offset,
        shadow.max_length,
    );
    ctx.draw_image(graphic, pos.x, pos.y);

    ctx.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::renderer::instance::RenderBuffer;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    const EPS: f32 = 1e-4;

    fn caster(shadow: DropShadow) -> Entity {
        Entity::new(EntityId(1))
            .with_graphic(Graphic::default().with_size(64.0, 32.0))
            .with_shadow(shadow)
    }

    #[test]
    fn clamp_never_exceeds_max_for_any_rotation() {
        let offset = Vec2::new(12.0, -7.0);
        for step in 0..64 {
            let theta = step as f32 / 64.0 * TAU;
            let shifted = rotate_offset(clamp_offset(offset, 5.0), theta);
            assert!(shifted.length() <= 5.0 + EPS, "theta {} len {}", theta, shifted.length());
        }
    }

    #[test]
    fn clamp_keeps_short_offsets() {
        let offset = Vec2::new(3.0, 4.0);
        assert_eq!(clamp_offset(offset, 10.0), offset);
        assert_eq!(clamp_offset(offset, 0.0), offset);
    }

    #[test]
    fn rotation_round_trips() {
        let offset = Vec2::new(5.0, -2.5);
        for theta in [0.3, FRAC_PI_2, PI, 4.0, -1.2] {
            let back = rotate_offset(rotate_offset(offset, theta), -theta);
            assert!((back - offset).length() < EPS);
        }
    }

    #[test]
    fn clamp_engages_at_rotation_zero() {
        let shifted = rotate_offset(clamp_offset(Vec2::new(5.0, 5.0), 5.0), 0.0);
        assert!((shifted.length() - 5.0).abs() < EPS);
        assert!((shifted.x - 3.5355).abs() < 1e-3);
        assert!((shifted.y - 3.5355).abs() < 1e-3);
    }

    #[test]
    fn shadow_draw_subtracts_shift_from_base() {
        let pos = compute_shadow_draw(0.0, Vec2::splat(0.5), Vec2::new(64.0, 32.0), Vec2::new(4.0, 0.0), 0.0);
        assert!((pos - Vec2::new(-36.0, -16.0)).length() < EPS);
    }

    #[test]
    fn local_space_rotates_with_entity() {
        let pos = compute_shadow_draw(FRAC_PI_2, Vec2::ZERO, Vec2::ZERO, Vec2::new(4.0, 0.0), 0.0);
        assert!((pos - Vec2::new(0.0, -4.0)).length() < EPS);
    }

    #[test]
    fn world_space_stays_fixed_after_host_transform() {
        let offset = Vec2::new(4.0, 3.0);
        for theta in [0.0, 0.7, FRAC_PI_2, 2.5] {
            let local = compute_shadow_draw_in(OffsetSpace::World, theta, Vec2::ZERO, Vec2::ZERO, offset, 0.0);
            let world = rotate_offset(local, theta);
            assert!((world + offset).length() < EPS, "theta {}", theta);
        }
    }

    #[test]
    fn shadow_then_normal_pass() {
        let mut entity = caster(DropShadow::default().with_max_length(0.0));
        let mut ctx = RenderBuffer::new();
        ctx.begin_entity(&entity);
        draw_entity(&mut entity, &mut ctx);

        assert_eq!(ctx.instances.len(), 2);
        let shadow = ctx.instances[0];
        let normal = ctx.instances[1];
        assert_eq!((shadow.tint_r, shadow.tint_g, shadow.tint_b), (0.0, 0.0, 0.0));
        assert!((shadow.alpha - 0.3).abs() < EPS);
        assert_eq!(shadow.z, -1.0);
        assert_eq!(shadow.draw_pos(), Vec2::new(-37.0, -21.0));
        assert_eq!(normal.draw_pos(), Vec2::new(-32.0, -16.0));
        assert_eq!(normal.alpha, 1.0);
        assert_eq!(normal.z, 0.0);
    }

    #[test]
    fn state_restored_after_shadow_pass() {
        let mut entity = caster(DropShadow::default());
        let mut ctx = RenderBuffer::new();
        ctx.begin_entity(&entity);
        ctx.set_tint(Color::ORANGE);
        ctx.set_opacity(0.8);
        let before = ctx.state();

        let pass = on_before_draw(&mut entity, &mut ctx);
        assert_eq!(ctx.state(), before);
        on_after_draw(&mut entity, &mut ctx, pass);
        assert_eq!(ctx.state(), before);
    }

    #[test]
    fn before_hook_hides_graphic_until_after_hook() {
        let mut entity = caster(DropShadow::default());
        let mut ctx = RenderBuffer::new();
        let pass = on_before_draw(&mut entity, &mut ctx);
        assert!(!entity.graphic.as_ref().unwrap().visible);
        on_after_draw(&mut entity, &mut ctx, pass);
        assert!(entity.graphic.as_ref().unwrap().visible);
    }

    #[test]
    fn shadow_only_skips_normal_pass_each_frame() {
        let mut entity = caster(DropShadow::default().with_shadow_only(true));
        let mut ctx = RenderBuffer::new();
        for _ in 0..3 {
            draw_entity(&mut entity, &mut ctx);
        }
        assert_eq!(ctx.instances.len(), 3);
        assert!(ctx.instances.iter().all(|i| i.z == -1.0));

        entity.shadow.as_mut().unwrap().shadow_only = false;
        draw_entity(&mut entity, &mut ctx);
        assert_eq!(ctx.instances.len(), 5);
    }

    #[test]
    fn hidden_shadow_still_draws_graphic() {
        let mut entity = caster(DropShadow::default().with_visible(false));
        let mut ctx = RenderBuffer::new();
        draw_entity(&mut entity, &mut ctx);
        assert_eq!(ctx.instances.len(), 1);
        assert_eq!(ctx.instances[0].z, 0.0);
    }

    #[test]
    fn hidden_shadow_and_shadow_only_draws_nothing() {
        let mut entity = caster(DropShadow::default().with_visible(false).with_shadow_only(true));
        let mut ctx = RenderBuffer::new();
        draw_entity(&mut entity, &mut ctx);
        assert!(ctx.instances.is_empty());
        assert_eq!(ctx.state(), DrawState::default());
    }

    #[test]
    fn no_graphic_is_a_no_op() {
        let mut entity = Entity::new(EntityId(1)).with_shadow(DropShadow::default());
        let mut ctx = RenderBuffer::new();
        ctx.set_opacity(0.6);
        let before = ctx.state();
        draw_entity(&mut entity, &mut ctx);
        assert!(ctx.instances.is_empty());
        assert_eq!(ctx.state(), before);
    }

    #[test]
    fn invisible_graphic_draws_nothing_and_stays_invisible() {
        let mut entity = caster(DropShadow::default());
        entity.graphic.as_mut().unwrap().visible = false;
        let mut ctx = RenderBuffer::new();
        draw_entity(&mut entity, &mut ctx);
        assert!(ctx.instances.is_empty());
        assert!(!entity.graphic.as_ref().unwrap().visible);
    }
}
