use wasm_bindgen::prelude::*;
use dropshadow::*;

mod game;
use game::LightDemo;

dropshadow_web::export_game!(LightDemo, "light-demo");
