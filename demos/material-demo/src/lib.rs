use wasm_bindgen::prelude::*;
use dropshadow::*;

mod game;
use game::MaterialDemo;

dropshadow_web::export_game!(MaterialDemo, "material-demo");
