pub mod entity;
pub mod graphic;
pub mod material;
pub mod shadow;
