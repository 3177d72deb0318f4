pub mod context;
pub mod instance;

// Re-export key types for convenient access
pub use context::{DrawContext, DrawState, StateStack};
pub use instance::{LineSegment, RenderBuffer, RenderInstance};
