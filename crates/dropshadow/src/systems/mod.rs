pub mod light;
pub mod render;
pub mod shadow;
