//! Drawing contract consumed from the host renderer.
//!
//! Mirrors the subset of the host's graphics context the shadow passes
//! touch: tint, opacity and z state with save/restore, plus image and
//! line primitives. Draw calls are synchronous and order-sensitive; the
//! tint and opacity in effect at the call are the ones that apply.

use glam::Vec2;

use crate::components::graphic::Graphic;
use crate::util::color::Color;

/// Mutable draw state captured by `save` and reinstated by `restore`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    pub tint: Color,
    pub opacity: f32,
    pub z: i32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            tint: Color::WHITE,
            opacity: 1.0,
            z: 0,
        }
    }
}

/// Host drawing surface.
///
/// `draw_image` positions are in the current entity's local frame,
/// relative to its origin; the host applies the entity transform.
pub trait DrawContext {
    /// Current draw state.
    fn state(&self) -> DrawState;

    /// Replace the current draw state.
    fn set_state(&mut self, state: DrawState);

    /// Push the current draw state.
    fn save(&mut self);

    /// Pop the most recently saved draw state. No-op when nothing is saved.
    fn restore(&mut self);

    /// Draw `graphic` with its top-left corner at local `(x, y)`.
    fn draw_image(&mut self, graphic: &Graphic, x: f32, y: f32);

    /// Draw a world-space line segment.
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);

    fn tint(&self) -> Color {
        self.state().tint
    }

    fn set_tint(&mut self, tint: Color) {
        let state = self.state();
        self.set_state(DrawState { tint, ..state });
    }

    fn opacity(&self) -> f32 {
        self.state().opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        let state = self.state();
        self.set_state(DrawState { opacity, ..state });
    }

    fn z(&self) -> i32 {
        self.state().z
    }

    fn set_z(&mut self, z: i32) {
        let state = self.state();
        self.set_state(DrawState { z, ..state });
    }
}

/// Draw state plus its save stack, for `DrawContext` implementors.
#[derive(Debug, Clone, Default)]
pub struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    pub fn current(&self) -> DrawState {
        self.current
    }

    pub fn set(&mut self, state: DrawState) {
        self.current = state;
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.current = state;
        }
    }

    /// Number of unmatched `save` calls.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Reset to the default state with an empty stack.
    pub fn reset(&mut self) {
        self.current = DrawState::default();
        self.saved.clear();
    }
}
