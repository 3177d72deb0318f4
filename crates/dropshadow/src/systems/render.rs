use crate::core::scene::Scene;
use crate::renderer::instance::RenderBuffer;
use crate::systems::light::LightSource;
use crate::systems::shadow;

/// Build the frame's render buffer.
///
/// Active entities are recorded in scene order and emitted in z order:
/// shadow casters go through the shadow hooks (shadow pass, then normal
/// pass), the rest get a plain normal pass. The stable z sort puts shadows,
/// recorded one z below their caster, beneath every caster of that layer.
/// Light debug overlays go last.
pub fn build_render_buffer(scene: &mut Scene, lights: &[LightSource], buffer: &mut RenderBuffer) {
    buffer.clear();

    for entity in scene.iter_mut() {
        if !entity.active {
            continue;
        }
        buffer.begin_entity(entity);
        if entity.shadow.is_some() {
            shadow::draw_entity(entity, buffer);
        } else if entity.graphic.as_ref().is_some_and(|g| g.visible) {
            shadow::draw_graphic(entity, buffer);
        }
    }
    buffer.finish();

    for light in lights {
        light.draw_debug(buffer, scene);
    }
}
